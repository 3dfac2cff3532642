//! Translate egui key events into labeling key input.

use egui::{Event, Key};
use emolabel_core::KeyInput;

/// Key presses of this frame as [`KeyInput`]s. Presses typed into a
/// focused text field are skipped so editing a time or search term does
/// not record emotions.
pub fn key_inputs(ctx: &egui::Context) -> Vec<KeyInput> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input(|input| {
        input
            .events
            .iter()
            .filter_map(|event| match event {
                Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } if modifiers.is_none() => map_key(*key),
                _ => None,
            })
            .collect()
    })
}

fn map_key(key: Key) -> Option<KeyInput> {
    let input = match key {
        Key::Num0 => KeyInput::Digit(0),
        Key::Num1 => KeyInput::Digit(1),
        Key::Num2 => KeyInput::Digit(2),
        Key::Num3 => KeyInput::Digit(3),
        Key::Num4 => KeyInput::Digit(4),
        Key::Num5 => KeyInput::Digit(5),
        Key::Num6 => KeyInput::Digit(6),
        Key::Num7 => KeyInput::Digit(7),
        Key::Num8 => KeyInput::Digit(8),
        Key::Num9 => KeyInput::Digit(9),
        Key::ArrowLeft => KeyInput::ArrowLeft,
        Key::ArrowRight => KeyInput::ArrowRight,
        Key::Space => KeyInput::Space,
        _ => return None,
    };
    Some(input)
}
