//! Textual action descriptors.

use std::borrow::Cow;

use crate::error::{BindError, Result};
use crate::event::Control;
use crate::modifiers::Modifiers;
use crate::names;

/// Parsed binding descriptor: a modifier set plus exactly one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventDescriptor {
    /// Modifier keys that must be held for the binding to match.
    pub modifiers: Modifiers,
    /// The physical control the binding listens to.
    pub control: Control,
}

impl EventDescriptor {
    /// Parse a whitespace-separated descriptor such as `"ctrl shift a"`.
    ///
    /// Modifier words may appear in any order; exactly one control word must
    /// be present. Unknown words fail the parse, nothing is matched
    /// heuristically. On macOS the control modifier is rewritten to command
    /// first, matching the platform's binding convention.
    pub fn parse(spec: &str) -> Result<Self> {
        let words = if cfg!(target_os = "macos") {
            Cow::Owned(swap_ctrl_for_cmd(spec))
        } else {
            Cow::Borrowed(spec)
        };

        let mut modifiers = Modifiers::empty();
        let mut control = None;
        for word in words.split_whitespace() {
            if let Some(flag) = names::modifier_from_name(word) {
                modifiers |= flag;
            } else if let Some(found) = names::control_from_name(word) {
                if control.replace(found).is_some() {
                    return Err(BindError::AmbiguousDescriptor(spec.to_string()));
                }
            } else {
                return Err(BindError::UnknownAction(word.to_string()));
            }
        }

        control.map_or_else(
            || Err(BindError::EmptyDescriptor(spec.to_string())),
            |control| Ok(Self { modifiers, control }),
        )
    }
}

/// Rewrite the control-key spelling to the command-key spelling.
///
/// Whole-word text substitution only; every other word passes through
/// untouched.
#[must_use]
pub fn swap_ctrl_for_cmd(spec: &str) -> String {
    spec.split_whitespace()
        .map(|word| match word {
            "ctrl" | "control" | "lctrl" | "rctrl" => "cmd",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}
