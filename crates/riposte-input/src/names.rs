//! Name vocabulary for devices, controls, and modifiers.
//!
//! Binding descriptors are plain text (`"ctrl shift a"`, `"joystick0
//! xaxis"`), so every bindable control has a deterministic spelling in both
//! directions: text to identity at bind time, identity back to text for the
//! query surface and the dump format. Unknown words never match anything.

use winit::keyboard::KeyCode;

use crate::event::{Axis, Control, DeviceId, DeviceKind, Gesture, Pov};
use crate::modifiers::Modifiers;

/// Resolve a device word such as `"keyboard0"` or `"mouse"`.
///
/// A missing instance number means instance zero.
#[must_use]
pub fn parse_device(spec: &str) -> Option<DeviceId> {
    let split = spec
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(spec.len());
    let (name, digits) = spec.split_at(split);
    let kind = DeviceKind::from_name(name)?;
    let instance = if digits.is_empty() {
        0
    } else {
        digits.parse().ok()?
    };
    Some(DeviceId::new(kind, instance))
}

/// Resolve one control word: an axis, hat direction, gesture, numbered
/// button or touch point, or key spelling.
#[must_use]
pub fn control_from_name(name: &str) -> Option<Control> {
    if let Some(axis) = Axis::from_name(name) {
        return Some(Control::Axis(axis));
    }
    if let Some(pov) = Pov::from_name(name) {
        return Some(Control::Pov(pov));
    }
    if let Some(gesture) = Gesture::from_name(name) {
        return Some(Control::Gesture(gesture));
    }
    if let Some(index) = name.strip_prefix("button") {
        return index.parse().ok().map(Control::Button);
    }
    if let Some(finger) = name.strip_prefix("touch") {
        return finger.parse().ok().map(Control::Touch);
    }
    key_from_name(name).map(Control::Key)
}

/// Canonical spelling for a control.
///
/// Keys without a spelling in the table fall back to their debug name in
/// lowercase; such spellings do not parse back.
#[must_use]
pub fn control_name(control: Control) -> String {
    match control {
        Control::Key(key) => key_name(key)
            .map_or_else(|| format!("{key:?}").to_ascii_lowercase(), str::to_string),
        Control::Button(index) => format!("button{index}"),
        Control::Axis(axis) => axis.name().to_string(),
        Control::Pov(pov) => pov.name().to_string(),
        Control::Touch(finger) => format!("touch{finger}"),
        Control::Gesture(gesture) => gesture.name().to_string(),
    }
}

/// Resolve one modifier word. Left/right variants collapse to the same flag.
#[must_use]
pub fn modifier_from_name(word: &str) -> Option<Modifiers> {
    match word {
        "shift" | "lshift" | "rshift" => Some(Modifiers::SHIFT),
        "ctrl" | "control" | "lctrl" | "rctrl" => Some(Modifiers::CTRL),
        "alt" | "opt" | "option" | "lalt" | "ralt" => Some(Modifiers::ALT),
        "cmd" | "super" | "win" | "meta" => Some(Modifiers::SUPER),
        _ => None,
    }
}

const MODIFIER_WORDS: [(Modifiers, &str); 4] = [
    (Modifiers::SHIFT, "shift"),
    (Modifiers::CTRL, "ctrl"),
    (Modifiers::ALT, "alt"),
    (Modifiers::SUPER, "cmd"),
];

/// Canonical modifier spelling in shift, ctrl, alt, cmd order.
#[must_use]
pub fn modifier_string(modifiers: Modifiers) -> String {
    let mut words = Vec::new();
    for (flag, word) in MODIFIER_WORDS {
        if modifiers.contains(flag) {
            words.push(word);
        }
    }
    words.join(" ")
}

/// Canonical descriptor spelling: modifier words followed by the control.
#[must_use]
pub fn descriptor_string(modifiers: Modifiers, control: Control) -> String {
    let mut words: Vec<String> = Vec::new();
    for (flag, word) in MODIFIER_WORDS {
        if modifiers.contains(flag) {
            words.push(word.to_string());
        }
    }
    words.push(control_name(control));
    words.join(" ")
}

macro_rules! key_table {
    ($(($name:literal, $key:ident)),* $(,)?) => {
        /// Resolve a key spelling to its physical key code.
        #[must_use]
        pub fn key_from_name(name: &str) -> Option<KeyCode> {
            match name {
                $($name => Some(KeyCode::$key),)*
                _ => None,
            }
        }

        /// Canonical spelling for a key code, if the vocabulary has one.
        #[must_use]
        pub fn key_name(key: KeyCode) -> Option<&'static str> {
            match key {
                $(KeyCode::$key => Some($name),)*
                _ => None,
            }
        }
    };
}

key_table! {
    ("a", KeyA),
    ("b", KeyB),
    ("c", KeyC),
    ("d", KeyD),
    ("e", KeyE),
    ("f", KeyF),
    ("g", KeyG),
    ("h", KeyH),
    ("i", KeyI),
    ("j", KeyJ),
    ("k", KeyK),
    ("l", KeyL),
    ("m", KeyM),
    ("n", KeyN),
    ("o", KeyO),
    ("p", KeyP),
    ("q", KeyQ),
    ("r", KeyR),
    ("s", KeyS),
    ("t", KeyT),
    ("u", KeyU),
    ("v", KeyV),
    ("w", KeyW),
    ("x", KeyX),
    ("y", KeyY),
    ("z", KeyZ),
    ("0", Digit0),
    ("1", Digit1),
    ("2", Digit2),
    ("3", Digit3),
    ("4", Digit4),
    ("5", Digit5),
    ("6", Digit6),
    ("7", Digit7),
    ("8", Digit8),
    ("9", Digit9),
    ("f1", F1),
    ("f2", F2),
    ("f3", F3),
    ("f4", F4),
    ("f5", F5),
    ("f6", F6),
    ("f7", F7),
    ("f8", F8),
    ("f9", F9),
    ("f10", F10),
    ("f11", F11),
    ("f12", F12),
    ("space", Space),
    ("tab", Tab),
    ("enter", Enter),
    ("escape", Escape),
    ("backspace", Backspace),
    ("delete", Delete),
    ("insert", Insert),
    ("home", Home),
    ("end", End),
    ("pageup", PageUp),
    ("pagedown", PageDown),
    ("up", ArrowUp),
    ("down", ArrowDown),
    ("left", ArrowLeft),
    ("right", ArrowRight),
    ("minus", Minus),
    ("equals", Equal),
    ("lbracket", BracketLeft),
    ("rbracket", BracketRight),
    ("backslash", Backslash),
    ("semicolon", Semicolon),
    ("apostrophe", Quote),
    ("comma", Comma),
    ("period", Period),
    ("slash", Slash),
    ("grave", Backquote),
    ("capslock", CapsLock),
    ("numpad0", Numpad0),
    ("numpad1", Numpad1),
    ("numpad2", Numpad2),
    ("numpad3", Numpad3),
    ("numpad4", Numpad4),
    ("numpad5", Numpad5),
    ("numpad6", Numpad6),
    ("numpad7", Numpad7),
    ("numpad8", Numpad8),
    ("numpad9", Numpad9),
}
