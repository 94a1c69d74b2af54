//! Action maps, break pairing, and input dispatch for the Riposte input
//! stack.
//!
//! Raw device events (keys, buttons, axes, hat directions, touches,
//! gestures) are resolved against named [`ActionMap`]s and fired as abstract
//! actions: command strings handed to the host's
//! [`CommandRunner`](riposte_core::CommandRunner), or named-function
//! callbacks on objects resolved through a
//! [`TargetRegistry`](riposte_core::TargetRegistry). A single [`BreakTable`]
//! pairs every make with exactly one break, even when the map or object that
//! produced the make has since been torn down.
//!
//! # Core Types
//!
//! - [`InputRouter`]: the priority stack of active maps plus the break ledger
//! - [`ActionMap`]: named per-device binding tables and the textual bind
//!   surface
//! - [`EventDescriptor`]: parsed `"ctrl shift a"` style action descriptors
//! - [`Node`]: one binding with its response shape and target
//! - [`BreakTable`]: the make/break pairing ledger
//! - [`WinitTranslator`]: adapter from winit events to [`InputEvent`]s
//!
//! # Usage
//!
//! ```ignore
//! use riposte_input::{ActionMap, DispatchContext, InputRouter};
//!
//! let mut map = ActionMap::new("gameplay");
//! map.process_bind_cmd("keyboard0", "ctrl a", "startFire();", "stopFire();")?;
//!
//! let mut router = InputRouter::new();
//! router.push_map(map);
//!
//! // In the event loop:
//! let mut ctx = DispatchContext::new(&mut console, &mut world);
//! if let Some(event) = translator.translate_window_event(&window_event) {
//!     router.dispatch(&event, &mut ctx);
//! }
//! ```

pub mod action_map;
pub mod break_table;
pub mod descriptor;
pub mod device_map;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod modifiers;
pub mod names;
pub mod node;
pub mod router;
pub mod translate;

#[cfg(test)]
mod testing;

pub use action_map::ActionMap;
pub use break_table::{BreakEntry, BreakTable};
pub use descriptor::{swap_ctrl_for_cmd, EventDescriptor};
pub use device_map::DeviceMap;
pub use dispatch::DispatchContext;
pub use error::{BindError, Result};
pub use event::{
    Axis, Control, DeviceId, DeviceKind, Gesture, InputClass, InputEdge, InputEvent, Pov,
};
pub use modifiers::Modifiers;
pub use node::{DeadZone, Node, NodeFlags, Target};
pub use router::{InputRouter, RoutingPolicy};
pub use translate::WinitTranslator;

// Re-export the pieces of the host stack that binding code touches directly
pub use riposte_core::{ActionCall, CommandRunner, ObjectId, TargetRegistry};
pub use winit::keyboard::KeyCode;
