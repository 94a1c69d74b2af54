//! Translation from winit events to the wire event model.

use glam::Vec2;
use hashbrown::HashMap;
use winit::event::{
    DeviceEvent, DeviceId as WinitDeviceId, ElementState, KeyEvent,
    MouseButton as WinitMouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent,
};
use winit::keyboard::PhysicalKey;

use crate::event::{Axis, Control, DeviceId, DeviceKind, Gesture, InputEdge, InputEvent};
use crate::modifiers::Modifiers;

/// Translates winit window and device events into [`InputEvent`]s.
///
/// The translator tracks the live modifier state and hands out stable
/// instance numbers for the opaque winit device ids it sees, so the first
/// keyboard becomes `keyboard0` for the lifetime of the translator.
#[derive(Debug, Default)]
pub struct WinitTranslator {
    modifiers: Modifiers,
    instances: HashMap<(DeviceKind, WinitDeviceId), u32>,
    counts: HashMap<DeviceKind, u32>,
}

impl WinitTranslator {
    /// Fresh translator with no devices seen and no modifiers held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Modifier set as of the last `ModifiersChanged`.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Translate a window event. Events with no wire representation,
    /// including key repeats, yield `None`.
    pub fn translate_window_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = Modifiers::from(state.state());
                None
            }
            WindowEvent::KeyboardInput {
                device_id, event, ..
            } => self.translate_key(*device_id, event),
            WindowEvent::MouseInput {
                device_id,
                state,
                button,
            } => {
                let index = mouse_button_index(*button)?;
                let device = self.device(DeviceKind::Mouse, *device_id);
                let (edge, value) = edge_of(*state);
                Some(InputEvent::new(
                    device,
                    self.modifiers,
                    Control::Button(index),
                    edge,
                    value,
                ))
            }
            WindowEvent::MouseWheel {
                device_id, delta, ..
            } => {
                let device = self.device(DeviceKind::Mouse, *device_id);
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    #[allow(clippy::cast_possible_truncation)]
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / 100.0) as f32,
                };
                Some(InputEvent::new(
                    device,
                    self.modifiers,
                    Control::Axis(Axis::Z),
                    InputEdge::Move,
                    amount,
                ))
            }
            WindowEvent::Touch(touch) => Some(self.translate_touch(touch)),
            WindowEvent::PinchGesture {
                device_id, delta, ..
            } => {
                let device = self.device(DeviceKind::Touchscreen, *device_id);
                #[allow(clippy::cast_possible_truncation)]
                let amount = *delta as f32;
                Some(InputEvent::new(
                    device,
                    self.modifiers,
                    Control::Gesture(Gesture::Pinch),
                    InputEdge::Move,
                    amount,
                ))
            }
            WindowEvent::RotationGesture {
                device_id, delta, ..
            } => {
                let device = self.device(DeviceKind::Touchscreen, *device_id);
                Some(InputEvent::new(
                    device,
                    self.modifiers,
                    Control::Gesture(Gesture::Rotate),
                    InputEdge::Move,
                    *delta,
                ))
            }
            WindowEvent::PanGesture {
                device_id, delta, ..
            } => {
                let device = self.device(DeviceKind::Touchscreen, *device_id);
                let delta = Vec2::new(delta.x, delta.y);
                Some(
                    InputEvent::new(
                        device,
                        self.modifiers,
                        Control::Gesture(Gesture::Pan),
                        InputEdge::Move,
                        delta.length(),
                    )
                    .with_pos(delta),
                )
            }
            WindowEvent::DoubleTapGesture { device_id } => {
                let device = self.device(DeviceKind::Touchscreen, *device_id);
                Some(InputEvent::new(
                    device,
                    self.modifiers,
                    Control::Gesture(Gesture::DoubleTap),
                    InputEdge::Move,
                    1.0,
                ))
            }
            _ => None,
        }
    }

    /// Translate a raw device event. Analog motion arrives here one axis at
    /// a time and is attributed to the pointer device.
    pub fn translate_device_event(
        &mut self,
        device_id: WinitDeviceId,
        event: &DeviceEvent,
    ) -> Option<InputEvent> {
        match event {
            DeviceEvent::Motion { axis, value } => {
                let axis = axis_from_code(*axis)?;
                let device = self.device(DeviceKind::Mouse, device_id);
                #[allow(clippy::cast_possible_truncation)]
                let amount = *value as f32;
                Some(InputEvent::new(
                    device,
                    self.modifiers,
                    Control::Axis(axis),
                    InputEdge::Move,
                    amount,
                ))
            }
            DeviceEvent::Button { button, state } => {
                let index = u8::try_from(*button).ok()?;
                let device = self.device(DeviceKind::Mouse, device_id);
                let (edge, value) = edge_of(*state);
                Some(InputEvent::new(
                    device,
                    self.modifiers,
                    Control::Button(index),
                    edge,
                    value,
                ))
            }
            _ => None,
        }
    }

    fn translate_key(&mut self, device_id: WinitDeviceId, event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        // Held-key repeats would re-run make commands; the first make is
        // the only one that matters here, the ledger holds until release.
        if event.repeat {
            return None;
        }
        let device = self.device(DeviceKind::Keyboard, device_id);
        let (edge, value) = edge_of(event.state);
        Some(InputEvent::new(
            device,
            self.modifiers,
            Control::Key(code),
            edge,
            value,
        ))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn translate_touch(&mut self, touch: &Touch) -> InputEvent {
        let device = self.device(DeviceKind::Touchscreen, touch.device_id);
        let finger = touch.id as u8;
        let (edge, value) = match touch.phase {
            TouchPhase::Started => (InputEdge::Make, 1.0),
            TouchPhase::Moved => (InputEdge::Move, 1.0),
            TouchPhase::Ended | TouchPhase::Cancelled => (InputEdge::Break, 0.0),
        };
        InputEvent::new(device, self.modifiers, Control::Touch(finger), edge, value)
            .with_pos(Vec2::new(touch.location.x as f32, touch.location.y as f32))
    }

    fn device(&mut self, kind: DeviceKind, id: WinitDeviceId) -> DeviceId {
        if let Some(&instance) = self.instances.get(&(kind, id)) {
            return DeviceId::new(kind, instance);
        }
        let next = self.counts.entry(kind).or_insert(0);
        let instance = *next;
        *next += 1;
        self.instances.insert((kind, id), instance);
        DeviceId::new(kind, instance)
    }
}

const fn edge_of(state: ElementState) -> (InputEdge, f32) {
    match state {
        ElementState::Pressed => (InputEdge::Make, 1.0),
        ElementState::Released => (InputEdge::Break, 0.0),
    }
}

const fn mouse_button_index(button: WinitMouseButton) -> Option<u8> {
    match button {
        WinitMouseButton::Left => Some(0),
        WinitMouseButton::Right => Some(1),
        WinitMouseButton::Middle => Some(2),
        WinitMouseButton::Back => Some(3),
        WinitMouseButton::Forward => Some(4),
        WinitMouseButton::Other(_) => None,
    }
}

const fn axis_from_code(axis: u32) -> Option<Axis> {
    match axis {
        0 => Some(Axis::X),
        1 => Some(Axis::Y),
        2 => Some(Axis::Z),
        3 => Some(Axis::Rx),
        4 => Some(Axis::Ry),
        5 => Some(Axis::Rz),
        6 => Some(Axis::Slider),
        _ => None,
    }
}
