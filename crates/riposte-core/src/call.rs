//! Signals delivered to bound targets.

/// The signal delivered to a bound target when a binding fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionCall {
    /// Activation edge of a discrete input.
    Make,
    /// Deactivation edge of a discrete input.
    Break,
    /// Shaped magnitude of a continuous input.
    Move(f32),
}

impl ActionCall {
    /// Numeric form of the signal: 1 for make, 0 for break, the shaped
    /// magnitude for moves.
    #[inline]
    #[must_use]
    pub const fn value(self) -> f32 {
        match self {
            Self::Make => 1.0,
            Self::Break => 0.0,
            Self::Move(v) => v,
        }
    }

    /// Returns `true` for the activation edge.
    #[inline]
    #[must_use]
    pub const fn is_make(self) -> bool {
        matches!(self, Self::Make)
    }

    /// Returns `true` for the deactivation edge.
    #[inline]
    #[must_use]
    pub const fn is_break(self) -> bool {
        matches!(self, Self::Break)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_follow_edges() {
        assert_eq!(ActionCall::Make.value(), 1.0);
        assert_eq!(ActionCall::Break.value(), 0.0);
        assert_eq!(ActionCall::Move(-0.25).value(), -0.25);
    }

    #[test]
    fn edge_predicates() {
        assert!(ActionCall::Make.is_make());
        assert!(ActionCall::Break.is_break());
        assert!(!ActionCall::Move(1.0).is_make());
    }
}
