//! Wire model for raw input events.
//!
//! Everything the platform layer hands to the router is one [`InputEvent`]:
//! which device, which control on it, which edge (make, break, or continuous
//! move), the analog payload, and the modifier set held at the time.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::modifiers::Modifiers;

/// Physical device category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Keyboards.
    Keyboard,
    /// Mice and other pointing devices.
    Mouse,
    /// Flight sticks and other generic axis devices.
    Joystick,
    /// Console-style controllers.
    Gamepad,
    /// Touch surfaces.
    Touchscreen,
}

impl DeviceKind {
    /// Canonical device spelling, as used in bind descriptors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Keyboard => "keyboard",
            Self::Mouse => "mouse",
            Self::Joystick => "joystick",
            Self::Gamepad => "gamepad",
            Self::Touchscreen => "touchscreen",
        }
    }

    /// Resolve a canonical device spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "keyboard" => Some(Self::Keyboard),
            "mouse" => Some(Self::Mouse),
            "joystick" => Some(Self::Joystick),
            "gamepad" => Some(Self::Gamepad),
            "touchscreen" => Some(Self::Touchscreen),
            _ => None,
        }
    }
}

/// Identity of one physical device: category plus instance number.
///
/// Displays as the bindable device word, e.g. `keyboard0` or `joystick2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId {
    /// Device category.
    pub kind: DeviceKind,
    /// Instance number within the category, starting at zero.
    pub instance: u32,
}

impl DeviceId {
    /// Create a device identity.
    #[inline]
    #[must_use]
    pub const fn new(kind: DeviceKind, instance: u32) -> Self {
        Self { kind, instance }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.name(), self.instance)
    }
}

/// Analog axis identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Primary horizontal axis.
    X,
    /// Primary vertical axis.
    Y,
    /// Third axis; wheel or throttle on most devices.
    Z,
    /// Rotation around x.
    Rx,
    /// Rotation around y.
    Ry,
    /// Rotation around z; twist on flight sticks.
    Rz,
    /// Auxiliary slider.
    Slider,
}

impl Axis {
    /// Canonical axis spelling, as used in bind descriptors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "xaxis",
            Self::Y => "yaxis",
            Self::Z => "zaxis",
            Self::Rx => "rxaxis",
            Self::Ry => "ryaxis",
            Self::Rz => "rzaxis",
            Self::Slider => "slider",
        }
    }

    /// Resolve a canonical axis spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "xaxis" => Some(Self::X),
            "yaxis" => Some(Self::Y),
            "zaxis" => Some(Self::Z),
            "rxaxis" => Some(Self::Rx),
            "ryaxis" => Some(Self::Ry),
            "rzaxis" => Some(Self::Rz),
            "slider" => Some(Self::Slider),
            _ => None,
        }
    }
}

/// Hat-switch directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pov {
    /// Hat up.
    Up,
    /// Hat down.
    Down,
    /// Hat left.
    Left,
    /// Hat right.
    Right,
}

impl Pov {
    /// Canonical hat spelling, as used in bind descriptors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "upov",
            Self::Down => "dpov",
            Self::Left => "lpov",
            Self::Right => "rpov",
        }
    }

    /// Resolve a canonical hat spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "upov" => Some(Self::Up),
            "dpov" => Some(Self::Down),
            "lpov" => Some(Self::Left),
            "rpov" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Recognized gesture classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Two-finger pinch; value is the zoom delta.
    Pinch,
    /// Two-finger rotation; value is the angle delta in degrees.
    Rotate,
    /// Multi-finger pan; value is the pan magnitude, position the delta.
    Pan,
    /// Double tap.
    DoubleTap,
}

impl Gesture {
    /// Canonical gesture spelling, as used in bind descriptors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pinch => "pinch",
            Self::Rotate => "rotate",
            Self::Pan => "pan",
            Self::DoubleTap => "doubletap",
        }
    }

    /// Resolve a canonical gesture spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pinch" => Some(Self::Pinch),
            "rotate" => Some(Self::Rotate),
            "pan" => Some(Self::Pan),
            "doubletap" => Some(Self::DoubleTap),
            _ => None,
        }
    }
}

/// Identity of a single physical control on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// A keyboard key, by physical key code.
    Key(KeyCode),
    /// A numbered device button; mouse button 0 is the left button.
    Button(u8),
    /// An analog axis.
    Axis(Axis),
    /// A hat-switch direction.
    Pov(Pov),
    /// A touch point, by finger index.
    Touch(u8),
    /// A gesture recognizer output.
    Gesture(Gesture),
}

/// Edge carried by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEdge {
    /// Activation of a discrete control.
    Make,
    /// Deactivation of a discrete control.
    Break,
    /// Continuous change of an analog control.
    Move,
}

/// Dispatch class of an event, derived from its control and device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputClass {
    /// Keys and hat directions.
    Action,
    /// Pointer and stick buttons.
    Button,
    /// Pointer and joystick axes.
    Move,
    /// Gamepad axes.
    Controller,
    /// Touch points.
    Touch,
    /// Gesture recognizer output.
    Gesture,
}

/// One raw input event as produced by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    /// Originating device.
    pub device: DeviceId,
    /// Modifier set held while the event fired.
    pub modifiers: Modifiers,
    /// Which physical control changed.
    pub control: Control,
    /// Activation, deactivation, or continuous change.
    pub edge: InputEdge,
    /// Analog payload; 1 and 0 for digital makes and breaks.
    pub value: f32,
    /// Surface position for touches and gestures.
    pub pos: Vec2,
}

impl InputEvent {
    /// Create an event with no surface position.
    #[must_use]
    pub const fn new(
        device: DeviceId,
        modifiers: Modifiers,
        control: Control,
        edge: InputEdge,
        value: f32,
    ) -> Self {
        Self {
            device,
            modifiers,
            control,
            edge,
            value,
            pos: Vec2::ZERO,
        }
    }

    /// Attach a surface position.
    #[must_use]
    pub const fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    /// Dispatch class of this event.
    #[must_use]
    pub const fn class(&self) -> InputClass {
        match self.control {
            Control::Key(_) | Control::Pov(_) => InputClass::Action,
            Control::Button(_) => InputClass::Button,
            Control::Axis(_) => match self.device.kind {
                DeviceKind::Gamepad => InputClass::Controller,
                _ => InputClass::Move,
            },
            Control::Touch(_) => InputClass::Touch,
            Control::Gesture(_) => InputClass::Gesture,
        }
    }
}
