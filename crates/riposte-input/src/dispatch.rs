//! Event classification and per-map dispatch.

use riposte_core::{ActionCall, CommandRunner, TargetRegistry};
use tracing::trace;

use crate::action_map::ActionMap;
use crate::break_table::BreakTable;
use crate::event::{InputClass, InputEdge, InputEvent};
use crate::node::{Node, Target};

/// Collaborators threaded through dispatch: the command executor and the
/// target object registry.
pub struct DispatchContext<'a> {
    /// Executes command strings attached to bindings.
    pub commands: &'a mut dyn CommandRunner,
    /// Resolves and signals bound objects.
    pub registry: &'a mut dyn TargetRegistry,
}

impl<'a> DispatchContext<'a> {
    /// Bundle the collaborators for one dispatch.
    pub fn new(
        commands: &'a mut dyn CommandRunner,
        registry: &'a mut dyn TargetRegistry,
    ) -> Self {
        Self { commands, registry }
    }
}

impl ActionMap {
    /// Offer one raw event to this map.
    ///
    /// Returns `true` if the event was consumed; `false` means unhandled,
    /// and the caller may offer the event to the next map in priority
    /// order. Dispatch never mutates the map, so a command that rebinds
    /// keys affects the next event, not the one in flight.
    pub fn process_event(
        &self,
        event: &InputEvent,
        breaks: &mut BreakTable,
        ctx: &mut DispatchContext<'_>,
    ) -> bool {
        // Breaks pair against the ledger by physical source alone; the node
        // that consumed the make, or its whole map, may be gone by now.
        if event.edge == InputEdge::Break {
            return breaks.fire(event.device, event.control, event.value, ctx);
        }

        let handled = match event.class() {
            InputClass::Action => self.process_action(event, breaks, ctx),
            InputClass::Button => self.process_button(event, breaks, ctx),
            InputClass::Touch => self.process_touch(event, breaks, ctx),
            InputClass::Gesture => self.process_gesture(event, ctx),
            InputClass::Move => self.process_move(event, breaks, ctx),
            InputClass::Controller => self.process_controller(event, breaks, ctx),
        };
        trace!(map = %self.name(), device = %event.device, handled, "event offered");
        handled
    }

    /// Keys and hat directions: discrete makes with a ledger entry.
    fn process_action(
        &self,
        event: &InputEvent,
        breaks: &mut BreakTable,
        ctx: &mut DispatchContext<'_>,
    ) -> bool {
        let Some(node) = self.find_node(event.device, event.modifiers, event.control) else {
            return false;
        };
        match event.edge {
            InputEdge::Make => self.fire_make(node, event, breaks, ctx),
            _ => false,
        }
    }

    /// Pointer and stick buttons. Same shape as key handling; buttons carry
    /// no modifier-free fallback, a chorded button is its own binding.
    fn process_button(
        &self,
        event: &InputEvent,
        breaks: &mut BreakTable,
        ctx: &mut DispatchContext<'_>,
    ) -> bool {
        let Some(node) = self.find_node(event.device, event.modifiers, event.control) else {
            return false;
        };
        match event.edge {
            InputEdge::Make => self.fire_make(node, event, breaks, ctx),
            _ => false,
        }
    }

    /// Touch points: down is a make, position rides along in the event.
    fn process_touch(
        &self,
        event: &InputEvent,
        breaks: &mut BreakTable,
        ctx: &mut DispatchContext<'_>,
    ) -> bool {
        let Some(node) = self.find_node(event.device, event.modifiers, event.control) else {
            return false;
        };
        match event.edge {
            InputEdge::Make => self.fire_make(node, event, breaks, ctx),
            _ => false,
        }
    }

    /// Gestures are continuous recognizer output: shaped magnitude, no
    /// ledger entry since there is nothing to release.
    fn process_gesture(&self, event: &InputEvent, ctx: &mut DispatchContext<'_>) -> bool {
        let Some(node) = self.find_node(event.device, event.modifiers, event.control) else {
            return false;
        };
        self.fire_move(node, event, ctx)
    }

    /// Pointer and joystick axes: shape and forward the magnitude. A make
    /// on an axis records it as engaged in the ledger.
    fn process_move(
        &self,
        event: &InputEvent,
        breaks: &mut BreakTable,
        ctx: &mut DispatchContext<'_>,
    ) -> bool {
        let Some(node) = self.find_node(event.device, event.modifiers, event.control) else {
            return false;
        };
        match event.edge {
            InputEdge::Make => self.fire_make(node, event, breaks, ctx),
            InputEdge::Move => self.fire_move(node, event, ctx),
            InputEdge::Break => false,
        }
    }

    /// Gamepad axes route exactly like pointer axes; the class split keeps
    /// the door open for controller-specific filtering.
    fn process_controller(
        &self,
        event: &InputEvent,
        breaks: &mut BreakTable,
        ctx: &mut DispatchContext<'_>,
    ) -> bool {
        self.process_move(event, breaks, ctx)
    }

    fn fire_make(
        &self,
        node: &Node,
        event: &InputEvent,
        breaks: &mut BreakTable,
        ctx: &mut DispatchContext<'_>,
    ) -> bool {
        match &node.target {
            Target::Command { make_command, .. } => {
                if !make_command.is_empty() {
                    ctx.commands.run(make_command);
                }
            }
            Target::Callback { object, function } => {
                if ctx.registry.contains(*object) {
                    ctx.registry.dispatch(*object, function, ActionCall::Make);
                } else {
                    trace!(object = %object, function = %function, "make target gone, skipping callback");
                }
            }
            Target::Unbound => return false,
        }
        // The make counts as consumed even when its callback was skipped;
        // the ledger entry keeps the eventual break paired either way.
        breaks.enter(event.device, event.control, self.name(), node);
        true
    }

    fn fire_move(&self, node: &Node, event: &InputEvent, ctx: &mut DispatchContext<'_>) -> bool {
        match &node.target {
            Target::Command { .. } => {
                // Command strings have no value channel; the binding still
                // consumes the motion.
                trace!(map = %self.name(), "analog motion on command binding");
            }
            Target::Callback { object, function } => {
                if ctx.registry.contains(*object) {
                    let shaped = node.shape(event.value);
                    ctx.registry
                        .dispatch(*object, function, ActionCall::Move(shaped));
                }
            }
            Target::Unbound => return false,
        }
        true
    }
}
