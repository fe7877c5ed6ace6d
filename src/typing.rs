//! Typewriter effect as an explicit state machine.
//!
//! The effect types a phrase one character at a time, holds the full text,
//! deletes it, then moves on to the next phrase, forever. Hosts either call
//! [`TypingEffect::step`] and wait `Frame::delay` before the next call, or
//! feed wall time to [`TypingEffect::tick`].

use std::time::Duration;

use crate::config::InteractionConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Pausing,
    Deleting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub pause_delay: Duration,
}

impl TypingTimings {
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self {
            type_delay: Duration::from_millis(u64::from(config.typing_speed_ms)),
            delete_delay: Duration::from_millis(u64::from(config.typing_delete_ms)),
            pause_delay: Duration::from_millis(u64::from(config.typing_pause_ms)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay: Duration,
}

#[derive(Clone, Debug)]
pub struct TypingEffect {
    phrases: Vec<Vec<char>>,
    timings: TypingTimings,
    phrase_index: usize,
    char_index: usize,
    phase: Phase,
    elapsed: Duration,
    next_delay: Duration,
}

impl TypingEffect {
    /// Returns `None` for an empty phrase list.
    pub fn new(phrases: &[String], timings: TypingTimings) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }

        Some(Self {
            phrases: phrases.iter().map(|phrase| phrase.chars().collect()).collect(),
            timings,
            phrase_index: 0,
            char_index: 0,
            phase: Phase::Typing,
            elapsed: Duration::ZERO,
            next_delay: timings.type_delay,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// True from the moment the full phrase is shown until it is erased.
    pub fn is_deleting(&self) -> bool {
        matches!(self.phase, Phase::Pausing | Phase::Deleting)
    }

    pub fn text(&self) -> String {
        self.current().iter().take(self.char_index).collect()
    }

    /// Delay before the first [`step`](Self::step).
    pub fn initial_delay(&self) -> Duration {
        self.timings.type_delay
    }

    pub fn step(&mut self) -> Frame {
        let len = self.current().len();

        let delay = match self.phase {
            Phase::Typing => {
                if self.char_index < len {
                    self.char_index += 1;
                }
                if self.char_index == len {
                    self.phase = Phase::Pausing;
                    self.timings.pause_delay
                } else {
                    self.timings.type_delay
                }
            }
            Phase::Pausing | Phase::Deleting => {
                self.phase = Phase::Deleting;
                self.char_index = self.char_index.saturating_sub(1);
                if self.char_index == 0 {
                    self.phase = Phase::Typing;
                    self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                    self.timings.type_delay
                } else {
                    self.timings.delete_delay
                }
            }
        };

        self.next_delay = delay;
        Frame {
            text: self.text(),
            delay,
        }
    }

    /// Advances by `elapsed` wall time and returns the text if it changed.
    pub fn tick(&mut self, elapsed: Duration) -> Option<String> {
        self.elapsed += elapsed;
        let mut changed = None;

        while self.elapsed >= self.next_delay {
            self.elapsed -= self.next_delay;
            changed = Some(self.step().text);
        }

        changed
    }

    fn current(&self) -> &[char] {
        &self.phrases[self.phrase_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "Web Developer";

    fn effect(phrases: &[&str]) -> TypingEffect {
        let phrases: Vec<String> = phrases.iter().map(|phrase| phrase.to_string()).collect();
        TypingEffect::new(&phrases, TypingTimings::from_config(&InteractionConfig::default()))
            .expect("non-empty phrase list")
    }

    #[test]
    fn empty_phrase_list_disables_the_effect() {
        let timings = TypingTimings::from_config(&InteractionConfig::default());
        assert!(TypingEffect::new(&[], timings).is_none());
    }

    #[test]
    fn full_phrase_switches_to_deleting_after_pause() {
        let mut typing = effect(&[PHRASE]);
        let len = PHRASE.chars().count();

        for _ in 1..len {
            let frame = typing.step();
            assert_eq!(frame.delay, Duration::from_millis(100));
            assert!(!typing.is_deleting());
        }

        let full = typing.step();
        assert_eq!(full.text, PHRASE);
        assert_eq!(full.delay, Duration::from_millis(1_200));
        assert_eq!(typing.char_index(), len);
        assert!(typing.is_deleting());

        let first_delete = typing.step();
        assert_eq!(first_delete.text, "Web Develope");
        assert_eq!(first_delete.delay, Duration::from_millis(70));
        assert_eq!(typing.phase(), Phase::Deleting);
    }

    #[test]
    fn single_phrase_wraps_back_to_itself() {
        let mut typing = effect(&[PHRASE]);
        let len = PHRASE.chars().count();

        for _ in 0..(2 * len) {
            typing.step();
        }

        assert_eq!(typing.char_index(), 0);
        assert_eq!(typing.phrase_index(), 0);
        assert!(!typing.is_deleting());
        assert_eq!(typing.text(), "");
        assert_eq!(typing.step().text, "W");
    }

    #[test]
    fn phrases_advance_modulo_list_length() {
        let mut typing = effect(&["ab", "c"]);

        // "a", "ab", "a", "" -> second phrase
        for _ in 0..4 {
            typing.step();
        }
        assert_eq!(typing.phrase_index(), 1);

        // "c", "" -> back to the first phrase
        for _ in 0..2 {
            typing.step();
        }
        assert_eq!(typing.phrase_index(), 0);
    }

    #[test]
    fn tick_runs_every_step_that_fits() {
        let mut typing = effect(&[PHRASE]);

        assert_eq!(typing.tick(Duration::from_millis(99)), None);
        assert_eq!(typing.tick(Duration::from_millis(1)).as_deref(), Some("W"));
        assert_eq!(
            typing.tick(Duration::from_millis(250)).as_deref(),
            Some("Web")
        );
        assert_eq!(typing.tick(Duration::from_millis(49)), None);
    }

    #[test]
    fn tick_honours_the_pause() {
        let mut typing = effect(&["hi"]);

        assert_eq!(typing.tick(Duration::from_millis(200)).as_deref(), Some("hi"));
        assert_eq!(typing.tick(Duration::from_millis(1_199)), None);
        assert_eq!(typing.tick(Duration::from_millis(1)).as_deref(), Some("h"));
    }

    #[test]
    fn multibyte_phrases_slice_on_characters() {
        let mut typing = effect(&["héllo"]);
        typing.step();
        assert_eq!(typing.step().text, "hé");
    }

    #[test]
    fn empty_phrase_cycles_without_panicking() {
        let mut typing = effect(&[""]);
        assert_eq!(typing.step().text, "");
        assert!(typing.is_deleting());
        typing.step();
        assert_eq!(typing.phase(), Phase::Typing);
    }
}
