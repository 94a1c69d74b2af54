//! Test harness for the Riposte input stack.
//!
//! [`TestRig`] wires an [`InputRouter`](riposte_input::InputRouter) to a
//! recording command runner and a live
//! [`TargetWorld`](riposte_entity::TargetWorld), so scenario tests can drive
//! the whole bind/dispatch/break pipeline from raw events.

pub mod harness;

pub use harness::{
    axis_move, button_break, button_make, gamepad, gesture_move, joystick, key_break, key_make,
    keyboard, mouse, touch_break, touch_make, touchscreen, CommandLog, TestRig,
};
