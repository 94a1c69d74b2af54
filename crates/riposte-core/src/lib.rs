//! Core identifiers and collaborator traits for the Riposte input stack.
//!
//! This crate holds the small set of types shared between the binding
//! subsystem and the application hosting it:
//! - [`ObjectId`]: identifier for a bound target object
//! - [`ActionCall`]: the signal delivered when a binding fires
//! - [`TargetRegistry`]: identifier-validated dispatch into live objects
//! - [`CommandRunner`]: the seam to the host's command executor

pub mod call;
pub mod id;
pub mod registry;

pub use call::ActionCall;
pub use id::ObjectId;
pub use registry::{CommandRunner, TargetRegistry};
