//! Cooperative, cancelable text reveal.
//!
//! The host is single-threaded, so the typewriter effect is modeled as an
//! explicit in-flight state that the caller drives one tick at a time. At
//! most one reveal is ever in progress: starting a new one cancels the prior
//! one first, handing back its unrevealed remainder so the caller can flush
//! it instantly. Cancellation is synchronous and idempotent.

/// Driver for the character-by-character text reveal.
#[derive(Debug, Default)]
pub struct Typewriter {
    current: Option<Reveal>,
}

#[derive(Debug)]
struct Reveal {
    chars: Vec<char>,
    pos: usize,
}

impl Reveal {
    fn remainder(&self) -> String {
        self.chars[self.pos..].iter().collect()
    }
}

/// Result of advancing the reveal by one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// The next character to display.
    Chunk(String),
    /// The reveal just finished.
    Done,
    /// No reveal is in progress.
    Idle,
}

impl Typewriter {
    /// Create an idle typewriter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin revealing `text`, preempting any reveal already in flight.
    ///
    /// Returns the unrevealed remainder of the preempted reveal, if there
    /// was one: the caller must flush it instantly before displaying the
    /// new text.
    pub fn start(&mut self, text: impl Into<String>) -> Option<String> {
        let flushed = self.skip();
        self.current = Some(Reveal {
            chars: text.into().chars().collect(),
            pos: 0,
        });
        flushed
    }

    /// Advance the in-flight reveal by one character.
    pub fn tick(&mut self) -> Tick {
        let Some(reveal) = &mut self.current else {
            return Tick::Idle;
        };
        if reveal.pos < reveal.chars.len() {
            let chunk = reveal.chars[reveal.pos].to_string();
            reveal.pos += 1;
            Tick::Chunk(chunk)
        } else {
            self.current = None;
            Tick::Done
        }
    }

    /// Cancel the in-flight reveal, returning its unrevealed remainder.
    ///
    /// Idempotent: skipping when nothing is revealing is a no-op returning
    /// `None`.
    pub fn skip(&mut self) -> Option<String> {
        let reveal = self.current.take()?;
        let remainder = reveal.remainder();
        (!remainder.is_empty()).then_some(remainder)
    }

    /// Whether a reveal is currently in progress.
    pub fn is_revealing(&self) -> bool {
        self.current.is_some()
    }
}
