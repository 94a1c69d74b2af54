//! Errors reported by the textual bind surface.

use thiserror::Error;

/// Errors from binding, unbinding, and binding queries.
///
/// These are bind-time failures only. A dispatch-time lookup miss is the
/// normal "event unhandled" result, not an error.
#[derive(Error, Debug)]
pub enum BindError {
    /// Device word did not resolve to a known device.
    #[error("unknown device: {0:?}")]
    UnknownDevice(String),

    /// A descriptor word is neither a modifier nor a known control.
    #[error("unknown action: {0:?}")]
    UnknownAction(String),

    /// Descriptor contained no control word.
    #[error("descriptor {0:?} names no control")]
    EmptyDescriptor(String),

    /// Descriptor contained more than one control word.
    #[error("descriptor {0:?} names more than one control")]
    AmbiguousDescriptor(String),

    /// Bind request was too short to carry a device, action, and target.
    #[error("expected device, action, and target, got {0} arguments")]
    TooFewArguments(usize),

    /// Unrecognized response-shape flag letter.
    #[error("unknown bind flag {0:?}")]
    UnknownFlag(char),

    /// A response-shape flag had no argument to consume.
    #[error("missing argument for bind flag {flag:?}")]
    MissingArgument {
        /// The flag letter left unsatisfied.
        flag: char,
    },

    /// A response-shape argument was left unconsumed.
    #[error("unused response-shape argument {0:?}")]
    UnusedArgument(String),

    /// A numeric argument failed to parse.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// The queried or unbound key has no binding.
    #[error("no binding for {device} {action:?}")]
    NotBound {
        /// Device word as given by the caller.
        device: String,
        /// Action descriptor as given by the caller.
        action: String,
    },
}

/// Convenience alias for binding-surface results.
pub type Result<T> = std::result::Result<T, BindError>;
