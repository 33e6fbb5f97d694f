//! Scroll-driven reveals and parallax.
//!
//! [`ScrollRange`] turns an element box and the viewport into a progress value;
//! [`Orchestrator`] is the registry of triggers that reacts to it.

mod orchestrator;
mod range;

pub use orchestrator::{Cue, Fired, Orchestrator, Phase, Reveal, Scrub, TriggerId};
pub use range::{Anchor, Edge, RangeError, ScrollRange};
