//! Modifier key flags.

use bitflags::bitflags;
use winit::keyboard::ModifiersState;

bitflags! {
    /// Modifier key flags.
    ///
    /// A binding matches only when the event's modifier set equals the set
    /// recorded on the node, so `"a"` and `"ctrl a"` are distinct bindings.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift key is pressed.
        const SHIFT = 0b0000_0001;
        /// Control key is pressed.
        const CTRL  = 0b0000_0010;
        /// Alt/Option key is pressed.
        const ALT   = 0b0000_0100;
        /// Super/Windows/Command key is pressed.
        const SUPER = 0b0000_1000;
    }
}

impl Modifiers {
    /// Returns `true` if shift is pressed.
    #[inline]
    #[must_use]
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Returns `true` if control is pressed.
    #[inline]
    #[must_use]
    pub const fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }

    /// Returns `true` if alt is pressed.
    #[inline]
    #[must_use]
    pub const fn alt(self) -> bool {
        self.contains(Self::ALT)
    }

    /// Returns `true` if super/command is pressed.
    #[inline]
    #[must_use]
    pub const fn super_key(self) -> bool {
        self.contains(Self::SUPER)
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        let mut modifiers = Self::empty();
        if state.shift_key() {
            modifiers |= Self::SHIFT;
        }
        if state.control_key() {
            modifiers |= Self::CTRL;
        }
        if state.alt_key() {
            modifiers |= Self::ALT;
        }
        if state.super_key() {
            modifiers |= Self::SUPER;
        }
        modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        let modifiers = Modifiers::default();
        assert!(!modifiers.shift());
        assert!(!modifiers.ctrl());
        assert!(!modifiers.alt());
        assert!(!modifiers.super_key());
    }

    #[test]
    fn flag_accessors() {
        let modifiers = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(modifiers.shift());
        assert!(modifiers.ctrl());
        assert!(!modifiers.alt());
    }

    #[test]
    fn from_winit_state() {
        let modifiers = Modifiers::from(ModifiersState::SHIFT | ModifiersState::ALT);
        assert!(modifiers.shift());
        assert!(modifiers.alt());
        assert!(!modifiers.ctrl());
    }
}
