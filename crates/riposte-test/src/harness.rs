//! Scripted rigs for exercising the binding stack end to end.

use glam::Vec2;
use riposte_core::{CommandRunner, ObjectId};
use riposte_entity::{ActionHandlers, TargetWorld};
use riposte_input::{
    ActionMap, Axis, Control, DeviceId, DeviceKind, DispatchContext, Gesture, InputEdge,
    InputEvent, InputRouter, KeyCode, Modifiers, RoutingPolicy,
};

/// Command recorder standing in for the host's script runner.
#[derive(Debug, Default)]
pub struct CommandLog {
    commands: Vec<String>,
}

impl CommandLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands executed so far, in order.
    #[must_use]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Number of times one command string was executed.
    #[must_use]
    pub fn count_of(&self, command: &str) -> usize {
        self.commands
            .iter()
            .filter(|executed| executed.as_str() == command)
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl CommandRunner for CommandLog {
    fn run(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }
}

/// Router, target world, and command log wired together.
#[derive(Debug, Default)]
pub struct TestRig {
    /// The router under test.
    pub router: InputRouter,
    /// Live targets for callback bindings.
    pub world: TargetWorld,
    /// Everything command bindings executed.
    pub log: CommandLog,
}

impl TestRig {
    /// Rig with an empty stack and the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rig with an explicit routing policy.
    #[must_use]
    pub fn with_policy(policy: RoutingPolicy) -> Self {
        Self {
            router: InputRouter::with_policy(policy),
            world: TargetWorld::new(),
            log: CommandLog::new(),
        }
    }

    /// Spawn a target object for callback bindings.
    pub fn spawn(&mut self, handlers: ActionHandlers) -> ObjectId {
        self.world.spawn_target(handlers)
    }

    /// Dispatch one event through the router.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        let mut ctx = DispatchContext::new(&mut self.log, &mut self.world);
        self.router.dispatch(event, &mut ctx)
    }

    /// Pop the top map, firing its pending breaks.
    pub fn pop_map(&mut self) -> Option<ActionMap> {
        let mut ctx = DispatchContext::new(&mut self.log, &mut self.world);
        self.router.pop_map(&mut ctx)
    }

    /// Remove a stacked map by name, firing its pending breaks.
    pub fn remove_map(&mut self, name: &str) -> Option<ActionMap> {
        let mut ctx = DispatchContext::new(&mut self.log, &mut self.world);
        self.router.remove_map(name, &mut ctx)
    }

    /// Force-break everything currently made.
    pub fn drain(&mut self) -> usize {
        let mut ctx = DispatchContext::new(&mut self.log, &mut self.world);
        self.router.drain(&mut ctx)
    }
}

/// Keyboard instance 0.
#[must_use]
pub fn keyboard() -> DeviceId {
    DeviceId::new(DeviceKind::Keyboard, 0)
}

/// Mouse instance 0.
#[must_use]
pub fn mouse() -> DeviceId {
    DeviceId::new(DeviceKind::Mouse, 0)
}

/// Joystick instance 0.
#[must_use]
pub fn joystick() -> DeviceId {
    DeviceId::new(DeviceKind::Joystick, 0)
}

/// Gamepad instance 0.
#[must_use]
pub fn gamepad() -> DeviceId {
    DeviceId::new(DeviceKind::Gamepad, 0)
}

/// Touchscreen instance 0.
#[must_use]
pub fn touchscreen() -> DeviceId {
    DeviceId::new(DeviceKind::Touchscreen, 0)
}

/// Key press with modifiers.
#[must_use]
pub fn key_make(key: KeyCode, modifiers: Modifiers) -> InputEvent {
    InputEvent::new(keyboard(), modifiers, Control::Key(key), InputEdge::Make, 1.0)
}

/// Key release with modifiers.
#[must_use]
pub fn key_break(key: KeyCode, modifiers: Modifiers) -> InputEvent {
    InputEvent::new(keyboard(), modifiers, Control::Key(key), InputEdge::Break, 0.0)
}

/// Button press on a device.
#[must_use]
pub fn button_make(device: DeviceId, button: u8) -> InputEvent {
    InputEvent::new(
        device,
        Modifiers::empty(),
        Control::Button(button),
        InputEdge::Make,
        1.0,
    )
}

/// Button release on a device.
#[must_use]
pub fn button_break(device: DeviceId, button: u8) -> InputEvent {
    InputEvent::new(
        device,
        Modifiers::empty(),
        Control::Button(button),
        InputEdge::Break,
        0.0,
    )
}

/// Axis motion on a device.
#[must_use]
pub fn axis_move(device: DeviceId, axis: Axis, value: f32) -> InputEvent {
    InputEvent::new(
        device,
        Modifiers::empty(),
        Control::Axis(axis),
        InputEdge::Move,
        value,
    )
}

/// Touch down at a surface position.
#[must_use]
pub fn touch_make(finger: u8, at: Vec2) -> InputEvent {
    InputEvent::new(
        touchscreen(),
        Modifiers::empty(),
        Control::Touch(finger),
        InputEdge::Make,
        1.0,
    )
    .with_pos(at)
}

/// Touch up.
#[must_use]
pub fn touch_break(finger: u8) -> InputEvent {
    InputEvent::new(
        touchscreen(),
        Modifiers::empty(),
        Control::Touch(finger),
        InputEdge::Break,
        0.0,
    )
}

/// Gesture recognizer output.
#[must_use]
pub fn gesture_move(gesture: Gesture, value: f32) -> InputEvent {
    InputEvent::new(
        touchscreen(),
        Modifiers::empty(),
        Control::Gesture(gesture),
        InputEdge::Move,
        value,
    )
}
