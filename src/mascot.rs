//! Mascot frame swapping.

pub const FRAME_MS: u32 = 800;
pub const FADE_MS: u32 = 100;
pub const DIM_OPACITY: &str = "0.8";
pub const CLICK_RESET_MS: u32 = 300;

pub const HOVER_ANIMATION: &str = "mascot-bounce 0.6s ease-in-out infinite";
pub const HOVER_FILTER: &str = "drop-shadow(0 10px 40px rgba(0, 242, 254, 0.6))";
pub const REST_ANIMATION: &str = "mascot-bounce 2s ease-in-out infinite";
pub const REST_FILTER: &str = "drop-shadow(0 10px 30px rgba(0, 242, 254, 0.3))";
pub const CLICK_TRANSFORM: &str = "scale(1.1) rotate(5deg)";
pub const CLICK_RESET: &str = "scale(1) rotate(0deg)";

pub fn default_frames() -> Vec<String> {
    (1..=3).map(|i| format!("public/mascot_animated_frame{i}.png")).collect()
}

/// Cycles through the frame list; each tick dims the image and, `FADE_MS`
/// later, swaps the source.
#[derive(Clone, Debug)]
pub struct FrameCycler {
    frames: Vec<String>,
    next: usize,
}

impl FrameCycler {
    pub fn new(frames: Vec<String>) -> Self {
        Self { frames, next: 0 }
    }

    /// Source for the next swap, wrapping around. `None` with no frames.
    pub fn advance(&mut self) -> Option<&str> {
        if self.frames.is_empty() {
            return None;
        }
        let idx = self.next;
        self.next = (self.next + 1) % self.frames.len();
        self.frames.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_and_wraps() {
        let mut cycler = FrameCycler::new(default_frames());
        let seen: Vec<String> = (0..4).filter_map(|_| cycler.advance().map(str::to_string)).collect();
        assert_eq!(seen[0], "public/mascot_animated_frame1.png");
        assert_eq!(seen[2], "public/mascot_animated_frame3.png");
        assert_eq!(seen[3], seen[0]);
    }

    #[test]
    fn empty_cycler_yields_nothing() {
        let mut cycler = FrameCycler::new(Vec::new());
        assert!(cycler.advance().is_none());
        assert!(cycler.is_empty());
    }
}
