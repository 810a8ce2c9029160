/// The single on-screen message line.
///
/// Each new message replaces the previous one. The countdown only runs
/// while the world is ticking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialogue {
    text: String,
    remaining: u32,
}

impl Dialogue {
    pub const SHORT: u32 = 30;
    pub const NORMAL: u32 = 60;
    pub const LONG: u32 = 120;
    pub const LINGER: u32 = 180;

    pub fn say(&mut self, text: impl Into<String>, ticks: u32) {
        self.text = text.into();
        self.remaining = ticks;
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_visible(&self) -> bool {
        self.remaining > 0
    }

    /// The current line, if it has not timed out.
    pub fn text(&self) -> Option<&str> {
        self.is_visible().then_some(self.text.as_str())
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.remaining = 0;
    }
}
