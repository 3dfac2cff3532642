//! Text-entry annotation: digit toggles and arrow navigation over a
//! [`TextSession`].

use emolabel_core::{Command, EmotionKey, LabelMode, Result};
use emolabel_text::{parse_entries, Navigation, TextSession};
use tracing::warn;

use crate::keyboard::{KeyboardHub, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    Toggled { key: EmotionKey, score: u8 },
    Navigated(Navigation),
    /// No entry is loaded, or the command has no meaning here.
    Ignored,
}

#[derive(Default)]
pub struct TextAnnotator {
    session: TextSession,
    subscription: Option<Subscription>,
}

impl TextAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, hub: &KeyboardHub) {
        self.subscription = Some(hub.subscribe(LabelMode::Text));
    }

    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub fn session(&self) -> &TextSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TextSession {
        &mut self.session
    }

    /// Parse `data` and replace the loaded entries. A failed parse leaves
    /// the current entries in place.
    pub fn import(&mut self, data: &str) -> Result<usize> {
        let entries = parse_entries(data)?;
        let count = entries.len();
        self.session.load(entries);
        Ok(count)
    }

    pub fn export_csv(&self) -> Result<String> {
        self.session.export_csv()
    }

    pub fn apply(&mut self, command: Command) -> TextAction {
        match command {
            Command::ToggleEmotion(key) => match self.session.toggle(key) {
                Some(score) => TextAction::Toggled { key, score },
                None => TextAction::Ignored,
            },
            Command::NextEntry => TextAction::Navigated(self.session.next()),
            Command::PreviousEntry => TextAction::Navigated(self.session.previous()),
            _ => TextAction::Ignored,
        }
    }

    pub fn process_input(&mut self) -> Vec<TextAction> {
        let commands = match &self.subscription {
            Some(sub) => sub.drain(),
            None => return Vec::new(),
        };
        let actions: Vec<TextAction> = commands.into_iter().map(|c| self.apply(c)).collect();
        if actions.iter().any(|a| *a == TextAction::Ignored) {
            warn!("Text command ignored: no entries loaded");
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emolabel_core::KeyInput;

    #[test]
    fn test_digits_toggle_current_entry() {
        let hub = KeyboardHub::new();
        let mut a = TextAnnotator::new();
        a.attach(&hub);
        a.import("Text\nfirst\nsecond\n").unwrap();

        hub.dispatch(KeyInput::Digit(1));
        hub.dispatch(KeyInput::ArrowRight);
        hub.dispatch(KeyInput::Digit(8));
        hub.dispatch(KeyInput::ArrowRight);
        let actions = a.process_input();
        assert_eq!(
            actions,
            vec![
                TextAction::Toggled { key: EmotionKey::Joy, score: 1 },
                TextAction::Navigated(Navigation::Moved(1)),
                TextAction::Toggled { key: EmotionKey::Trust, score: 1 },
                TextAction::Navigated(Navigation::AtEnd),
            ]
        );
        assert_eq!(a.session().completed(), 2);
    }

    #[test]
    fn test_failed_import_keeps_entries() {
        let mut a = TextAnnotator::new();
        a.import("Text\nkeep me\n").unwrap();
        assert!(a.import("Text\n").is_err());
        assert_eq!(a.session().entries()[0].text, "keep me");
    }

    #[test]
    fn test_toggle_without_entries_is_ignored() {
        let mut a = TextAnnotator::new();
        assert_eq!(
            a.apply(Command::ToggleEmotion(EmotionKey::Fear)),
            TextAction::Ignored
        );
    }
}
