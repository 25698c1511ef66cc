/// Deterministic reveal stepper behind the typing-effect code blocks.
///
/// Holds a fixed string and reveals it a few characters per tick; the
/// caller owns the timer and simply drops the value to cancel. No timing
/// and no domain logic live here.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    revealed: usize,
    chars_per_tick: usize,
}

impl Typewriter {
    /// A stepper over `text`, revealing one character per tick.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revealed: 0,
            chars_per_tick: 1,
        }
    }

    /// Reveal `chars` characters per tick instead of one. Zero is bumped
    /// to one so a tick always makes progress.
    #[must_use]
    pub fn with_chars_per_tick(mut self, chars: usize) -> Self {
        self.chars_per_tick = chars.max(1);
        self
    }

    /// The currently revealed prefix.
    #[must_use]
    pub fn visible(&self) -> &str {
        &self.text[..self.revealed]
    }

    /// The full text being revealed.
    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.revealed == self.text.len()
    }

    /// Advance by one tick and return the new visible prefix.
    ///
    /// Advances whole characters, never splitting a UTF-8 boundary.
    pub fn tick(&mut self) -> &str {
        let mut remaining = self.text[self.revealed..].char_indices();
        for _ in 0..self.chars_per_tick {
            match remaining.next() {
                Some((_, ch)) => self.revealed += ch.len_utf8(),
                None => break,
            }
        }
        self.visible()
    }

    /// Jump straight to the fully revealed state.
    pub fn skip_to_end(&mut self) {
        self.revealed = self.text.len();
    }

    /// Start the reveal over from the beginning.
    pub fn restart(&mut self) {
        self.revealed = 0;
    }
}
