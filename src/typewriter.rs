//! `[data-typewriter]` text reveal.

use crate::stage::leading_int;

pub const DEFAULT_SPEED_MS: u32 = 100;
pub const CURSOR: &str = "|";
pub const CURSOR_ANIMATION: &str = "blink 1s infinite";
pub const CURSOR_LINGER_MS: u32 = 2000;

/// Yields growing prefixes of the text, one character per step.
#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    shown: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), shown: 0 }
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.text.chars().count()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Iterator for Typewriter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.is_done() {
            return None;
        }
        self.shown += 1;
        Some(self.text.chars().take(self.shown).collect())
    }
}

/// `data-typewriter-speed` in ms per character.
pub fn parse_speed(raw: Option<&str>) -> u32 {
    match raw {
        None | Some("") => DEFAULT_SPEED_MS,
        Some(s) => leading_int(Some(s)).and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_one_char_at_a_time() {
        let steps: Vec<String> = Typewriter::new("héllo").collect();
        assert_eq!(steps, vec!["h", "hé", "hél", "héll", "héllo"]);
    }

    #[test]
    fn empty_text_is_done_immediately() {
        let mut tw = Typewriter::new("");
        assert!(tw.is_done());
        assert!(tw.next().is_none());
    }

    #[test]
    fn speed_defaults() {
        assert_eq!(parse_speed(None), 100);
        assert_eq!(parse_speed(Some("40")), 40);
        assert_eq!(parse_speed(Some("fast")), 0);
    }
}
