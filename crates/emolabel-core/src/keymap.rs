//! Keyboard surface: maps raw key input to labeling commands.
//!
//! Digits `1`-`8` record (time mode) or toggle (text mode) an emotion,
//! arrows navigate text entries, and space toggles local playback. The
//! mapping is mode-dependent; keys outside the current mode map to nothing.

use crate::catalog::EmotionKey;

/// A key press, already stripped of platform detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    /// A digit key `0`-`9`.
    Digit(u8),
    ArrowLeft,
    ArrowRight,
    Space,
}

impl KeyInput {
    /// Map a typed character to a key input.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            ' ' => Some(Self::Space),
            _ => None,
        }
    }
}

/// Which labeling surface currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelMode {
    /// Timestamped events against a moving clock.
    Timed,
    /// Per-entry scores over CSV text records.
    Text,
}

/// A labeling command produced from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Record the catalog emotion bound to this trigger key.
    RecordEmotion(char),
    /// Toggle a text-mode emotion score on the current entry.
    ToggleEmotion(EmotionKey),
    NextEntry,
    PreviousEntry,
    /// Play/pause the local media source.
    TogglePlayback,
}

/// Resolve a key press in the given mode.
pub fn resolve(mode: LabelMode, key: KeyInput) -> Option<Command> {
    match (mode, key) {
        (LabelMode::Timed, KeyInput::Digit(d @ 1..=8)) => {
            Some(Command::RecordEmotion((b'0' + d) as char))
        }
        (LabelMode::Timed, KeyInput::Space) => Some(Command::TogglePlayback),
        (LabelMode::Text, KeyInput::Digit(d)) => EmotionKey::from_digit(d).map(Command::ToggleEmotion),
        (LabelMode::Text, KeyInput::ArrowRight) => Some(Command::NextEntry),
        (LabelMode::Text, KeyInput::ArrowLeft) => Some(Command::PreviousEntry),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_mode_digits_record() {
        assert_eq!(
            resolve(LabelMode::Timed, KeyInput::Digit(3)),
            Some(Command::RecordEmotion('3'))
        );
        assert_eq!(resolve(LabelMode::Timed, KeyInput::Digit(9)), None);
        assert_eq!(resolve(LabelMode::Timed, KeyInput::Digit(0)), None);
        assert_eq!(resolve(LabelMode::Timed, KeyInput::ArrowRight), None);
    }

    #[test]
    fn test_text_mode_digits_toggle_in_column_order() {
        assert_eq!(
            resolve(LabelMode::Text, KeyInput::Digit(2)),
            Some(Command::ToggleEmotion(EmotionKey::Sadness))
        );
        assert_eq!(
            resolve(LabelMode::Text, KeyInput::ArrowLeft),
            Some(Command::PreviousEntry)
        );
        assert_eq!(resolve(LabelMode::Text, KeyInput::Space), None);
    }

    #[test]
    fn test_from_char() {
        assert_eq!(KeyInput::from_char('7'), Some(KeyInput::Digit(7)));
        assert_eq!(KeyInput::from_char(' '), Some(KeyInput::Space));
        assert_eq!(KeyInput::from_char('x'), None);
    }
}
