//! Binding records and the analog response pipeline.

use bitflags::bitflags;
use riposte_core::ObjectId;
use serde::{Deserialize, Serialize};

use crate::event::Control;
use crate::modifiers::Modifiers;

bitflags! {
    /// Response-shape flags on a binding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        /// Input domain is remapped from 0..1 onto -1..1.
        const RANGED        = 1 << 0;
        /// Scale factor is applied.
        const HAS_SCALE     = 1 << 1;
        /// Dead zone is applied.
        const HAS_DEAD_ZONE = 1 << 2;
        /// Output sign is flipped.
        const INVERTED      = 1 << 3;
        /// Cubic response curve is applied.
        const NON_LINEAR    = 1 << 4;
        /// Target is a command pair rather than an object callback.
        const BIND_CMD      = 1 << 5;
    }
}

/// Dead-zone band in normalized input units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeadZone {
    /// Lower edge of the band.
    pub begin: f32,
    /// Upper edge of the band.
    pub end: f32,
}

impl DeadZone {
    /// Create a band from its edges.
    #[inline]
    #[must_use]
    pub const fn new(begin: f32, end: f32) -> Self {
        Self { begin, end }
    }

    /// Returns `true` if `value` falls inside the band.
    #[inline]
    #[must_use]
    pub fn contains(self, value: f32) -> bool {
        value >= self.begin && value <= self.end
    }
}

/// What a binding fires.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Target {
    /// Freshly created slot that has not been populated yet.
    #[default]
    Unbound,
    /// Command strings handed to the host's command runner.
    Command {
        /// Executed on make; empty runs nothing.
        make_command: String,
        /// Executed on break; empty runs nothing.
        break_command: String,
    },
    /// Named function on a registered object.
    Callback {
        /// The object to signal, re-validated at dispatch time.
        object: ObjectId,
        /// Function name invoked on the object.
        function: String,
    },
}

/// One binding: a (modifiers, control) key and the response attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Modifier set that must be held.
    pub modifiers: Modifiers,
    /// Physical control the binding listens to.
    pub control: Control,
    /// Response-shape flags.
    pub flags: NodeFlags,
    /// Dead-zone band; meaningful only with [`NodeFlags::HAS_DEAD_ZONE`].
    pub dead_zone: DeadZone,
    /// Scale factor; meaningful only with [`NodeFlags::HAS_SCALE`].
    pub scale: f32,
    /// What fires when the binding matches.
    pub target: Target,
}

impl Node {
    /// Zero-initialized node for a key slot.
    #[must_use]
    pub fn unbound(modifiers: Modifiers, control: Control) -> Self {
        Self {
            modifiers,
            control,
            flags: NodeFlags::empty(),
            dead_zone: DeadZone::default(),
            scale: 0.0,
            target: Target::Unbound,
        }
    }

    /// Returns `true` if this node fires command strings rather than an
    /// object callback.
    #[inline]
    #[must_use]
    pub const fn is_command(&self) -> bool {
        self.flags.contains(NodeFlags::BIND_CMD)
    }

    /// Returns `true` if this node's target refers to `command`: the make
    /// command for command nodes, the function name for callbacks.
    #[must_use]
    pub fn targets(&self, command: &str) -> bool {
        match &self.target {
            Target::Command { make_command, .. } => make_command == command,
            Target::Callback { function, .. } => function == command,
            Target::Unbound => false,
        }
    }

    /// Shape a raw analog value through this node's response settings.
    #[inline]
    #[must_use]
    pub fn shape(&self, raw: f32) -> f32 {
        apply_response(raw, self.flags, self.dead_zone, self.scale)
    }
}

/// Shape a raw analog value through a response configuration.
///
/// The order is fixed: dead-zone filter, range remap, cubic curve, scale,
/// inversion. Values inside the dead zone collapse to zero; a ranged
/// binding then remaps the 0..1 domain onto -1..1, so its rest position
/// lands on the lower range boundary.
#[must_use]
pub fn apply_response(raw: f32, flags: NodeFlags, dead_zone: DeadZone, scale: f32) -> f32 {
    let mut value = raw;

    if flags.contains(NodeFlags::HAS_DEAD_ZONE) && dead_zone.contains(value) {
        value = 0.0;
    }
    if flags.contains(NodeFlags::RANGED) {
        value = value.mul_add(2.0, -1.0);
    }
    if flags.contains(NodeFlags::NON_LINEAR) {
        value = value * value * value;
    }
    if flags.contains(NodeFlags::HAS_SCALE) {
        value *= scale;
    }
    if flags.contains(NodeFlags::INVERTED) {
        value = -value;
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn shaped(raw: f32, flags: NodeFlags, dead_zone: DeadZone, scale: f32) -> f32 {
        apply_response(raw, flags, dead_zone, scale)
    }

    #[test]
    fn dead_zone_scale_invert_pipeline() {
        let flags = NodeFlags::HAS_DEAD_ZONE | NodeFlags::HAS_SCALE | NodeFlags::INVERTED;
        let dead_zone = DeadZone::new(-0.1, 0.1);
        assert_relative_eq!(shaped(0.5, flags, dead_zone, 2.0), -1.0);
    }

    #[test]
    fn dead_zone_swallows_small_values() {
        let flags = NodeFlags::HAS_DEAD_ZONE;
        let dead_zone = DeadZone::new(-0.1, 0.1);
        assert_relative_eq!(shaped(0.05, flags, dead_zone, 0.0), 0.0);
        assert_relative_eq!(shaped(-0.1, flags, dead_zone, 0.0), 0.0);
        assert_relative_eq!(shaped(0.2, flags, dead_zone, 0.0), 0.2);
    }

    #[test]
    fn ranged_remaps_unit_domain() {
        let flags = NodeFlags::RANGED;
        assert_relative_eq!(shaped(0.0, flags, DeadZone::default(), 0.0), -1.0);
        assert_relative_eq!(shaped(0.5, flags, DeadZone::default(), 0.0), 0.0);
        assert_relative_eq!(shaped(1.0, flags, DeadZone::default(), 0.0), 1.0);
    }

    #[test]
    fn ranged_dead_zone_rests_on_lower_boundary() {
        let flags = NodeFlags::RANGED | NodeFlags::HAS_DEAD_ZONE;
        let dead_zone = DeadZone::new(0.0, 0.05);
        assert_relative_eq!(shaped(0.03, flags, dead_zone, 0.0), -1.0);
    }

    #[test]
    fn cubic_curve_preserves_sign() {
        let flags = NodeFlags::NON_LINEAR;
        assert_relative_eq!(shaped(0.5, flags, DeadZone::default(), 0.0), 0.125);
        assert_relative_eq!(shaped(-0.5, flags, DeadZone::default(), 0.0), -0.125);
        assert_relative_eq!(shaped(1.0, flags, DeadZone::default(), 0.0), 1.0);
    }

    #[test]
    fn unflagged_settings_are_inert() {
        let dead_zone = DeadZone::new(-0.5, 0.5);
        assert_relative_eq!(shaped(0.25, NodeFlags::empty(), dead_zone, 10.0), 0.25);
    }

    #[test]
    fn unbound_node_matches_no_command() {
        let node = Node::unbound(Modifiers::empty(), Control::Button(0));
        assert!(!node.targets("jump();"));
    }
}
