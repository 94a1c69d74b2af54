//! The make/break pairing ledger.

use riposte_core::ActionCall;
use tracing::{trace, warn};

use crate::dispatch::DispatchContext;
use crate::event::{Control, DeviceId};
use crate::node::{apply_response, DeadZone, Node, NodeFlags, Target};

/// Snapshot of one made binding, held until the matching break.
///
/// The entry copies everything it needs to fire the break on its own: the
/// node it came from, or that node's whole map, may be rebound or torn down
/// before the physical release arrives.
#[derive(Debug, Clone)]
pub struct BreakEntry {
    device: DeviceId,
    source: Control,
    origin: String,
    target: Target,
    flags: NodeFlags,
    dead_zone: DeadZone,
    scale: f32,
}

impl BreakEntry {
    /// Device the make came from.
    #[must_use]
    pub const fn device(&self) -> DeviceId {
        self.device
    }

    /// Physical control the make came from.
    #[must_use]
    pub const fn source(&self) -> Control {
        self.source
    }

    /// Name of the map whose node produced the make.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Fire the break effect for this entry.
    ///
    /// The stored object identifier is re-validated through the registry; a
    /// target destroyed since the make skips the callback, but the entry is
    /// spent either way.
    fn fire(self, value: f32, ctx: &mut DispatchContext<'_>) {
        match self.target {
            Target::Command { break_command, .. } => {
                if !break_command.is_empty() {
                    ctx.commands.run(&break_command);
                }
            }
            Target::Callback { object, function } => {
                if ctx.registry.contains(object) {
                    let call = if self.flags.contains(NodeFlags::RANGED) {
                        ActionCall::Move(apply_response(
                            value,
                            self.flags,
                            self.dead_zone,
                            self.scale,
                        ))
                    } else {
                        ActionCall::Break
                    };
                    ctx.registry.dispatch(object, &function, call);
                } else {
                    warn!(%object, function = %function, "break target gone, dropping callback");
                }
            }
            Target::Unbound => {}
        }
    }
}

/// The application-wide ledger of currently made bindings.
///
/// One table serves every active map: break pairing has to be globally
/// consistent, so the router owns a single instance and threads it through
/// all dispatch paths. Entries are keyed by physical source, never by map,
/// which is what lets a break land correctly after the map that consumed
/// the make has changed or disappeared.
#[derive(Debug, Default)]
pub struct BreakTable {
    entries: Vec<BreakEntry>,
}

impl BreakTable {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently made bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is currently made.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the physical source is currently made.
    #[must_use]
    pub fn is_made(&self, device: DeviceId, source: Control) -> bool {
        self.position(device, source).is_some()
    }

    /// Iterate the pending entries in make order.
    pub fn entries(&self) -> impl Iterator<Item = &BreakEntry> {
        self.entries.iter()
    }

    /// Record a made binding. Re-making an already-made source is a no-op,
    /// keeping one entry per physical source.
    pub fn enter(&mut self, device: DeviceId, source: Control, origin: &str, node: &Node) {
        if self.is_made(device, source) {
            return;
        }
        self.entries.push(BreakEntry {
            device,
            source,
            origin: origin.to_string(),
            target: node.target.clone(),
            flags: node.flags,
            dead_zone: node.dead_zone,
            scale: node.scale,
        });
        trace!(%device, source = ?source, pending = self.entries.len(), "make recorded");
    }

    /// Fire and remove the entry for a physical source.
    ///
    /// Returns `false` without side effects when the source has no entry;
    /// releases of unbound controls are normal and silent.
    pub fn fire(
        &mut self,
        device: DeviceId,
        source: Control,
        value: f32,
        ctx: &mut DispatchContext<'_>,
    ) -> bool {
        let Some(idx) = self.position(device, source) else {
            return false;
        };
        let entry = self.entries.remove(idx);
        entry.fire(value, ctx);
        true
    }

    /// Force-break every entry originating from the named map.
    ///
    /// Called when a map deactivates, so nothing stays logically held by a
    /// map that can no longer see its release. Returns the number fired.
    pub fn flush_map(&mut self, origin: &str, ctx: &mut DispatchContext<'_>) -> usize {
        let mut fired = 0;
        let mut idx = 0;
        while idx < self.entries.len() {
            if self.entries[idx].origin == origin {
                let entry = self.entries.remove(idx);
                entry.fire(0.0, ctx);
                fired += 1;
            } else {
                idx += 1;
            }
        }
        fired
    }

    /// Force-break every entry. Returns the number fired.
    pub fn flush_all(&mut self, ctx: &mut DispatchContext<'_>) -> usize {
        let entries = std::mem::take(&mut self.entries);
        let fired = entries.len();
        for entry in entries {
            entry.fire(0.0, ctx);
        }
        fired
    }

    fn position(&self, device: DeviceId, source: Control) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.device == device && entry.source == source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DeviceKind;
    use crate::modifiers::Modifiers;
    use crate::testing::StubRegistry;
    use riposte_core::ObjectId;
    use winit::keyboard::KeyCode;

    fn keyboard() -> DeviceId {
        DeviceId::new(DeviceKind::Keyboard, 0)
    }

    fn command_node(make: &str, brk: &str) -> Node {
        let mut node = Node::unbound(Modifiers::empty(), Control::Key(KeyCode::KeyA));
        node.flags = NodeFlags::BIND_CMD;
        node.target = Target::Command {
            make_command: make.to_string(),
            break_command: brk.to_string(),
        };
        node
    }

    fn callback_node(object: ObjectId, function: &str) -> Node {
        let mut node = Node::unbound(Modifiers::empty(), Control::Key(KeyCode::KeyA));
        node.target = Target::Callback {
            object,
            function: function.to_string(),
        };
        node
    }

    #[test]
    fn remake_is_idempotent() {
        let mut table = BreakTable::new();
        let node = command_node("startFire();", "stopFire();");

        table.enter(keyboard(), Control::Key(KeyCode::KeyA), "gameplay", &node);
        table.enter(keyboard(), Control::Key(KeyCode::KeyA), "gameplay", &node);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn fire_runs_break_command_exactly_once() {
        let mut table = BreakTable::new();
        let node = command_node("startFire();", "stopFire();");
        table.enter(keyboard(), Control::Key(KeyCode::KeyA), "gameplay", &node);

        let mut commands = Vec::new();
        let mut runner = |command: &str| commands.push(command.to_string());
        let mut registry = StubRegistry::new();
        let mut ctx = DispatchContext::new(&mut runner, &mut registry);

        assert!(table.fire(keyboard(), Control::Key(KeyCode::KeyA), 0.0, &mut ctx));
        assert!(!table.fire(keyboard(), Control::Key(KeyCode::KeyA), 0.0, &mut ctx));
        drop(ctx);
        assert_eq!(commands, ["stopFire();"]);
        assert!(table.is_empty());
    }

    #[test]
    fn unmatched_break_is_silent() {
        let mut table = BreakTable::new();
        let mut commands = Vec::new();
        let mut runner = |command: &str| commands.push(command.to_string());
        let mut registry = StubRegistry::new();
        let mut ctx = DispatchContext::new(&mut runner, &mut registry);

        assert!(!table.fire(keyboard(), Control::Button(5), 0.0, &mut ctx));
        drop(ctx);
        assert!(commands.is_empty());
    }

    #[test]
    fn callback_break_revalidates_object() {
        let mut table = BreakTable::new();
        let mut registry = StubRegistry::new();
        let object = registry.spawn();
        let node = callback_node(object, "fire");
        table.enter(keyboard(), Control::Key(KeyCode::KeyA), "gameplay", &node);

        registry.kill(object);
        let mut runner = |_: &str| {};
        let mut ctx = DispatchContext::new(&mut runner, &mut registry);
        assert!(table.fire(keyboard(), Control::Key(KeyCode::KeyA), 0.0, &mut ctx));
        drop(ctx);

        assert!(registry.calls.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn ranged_callback_break_delivers_shaped_move() {
        let mut table = BreakTable::new();
        let mut registry = StubRegistry::new();
        let object = registry.spawn();
        let mut node = callback_node(object, "throttle");
        node.flags = NodeFlags::RANGED;
        table.enter(keyboard(), Control::Axis(crate::event::Axis::Y), "flight", &node);

        let mut runner = |_: &str| {};
        let mut ctx = DispatchContext::new(&mut runner, &mut registry);
        assert!(table.fire(keyboard(), Control::Axis(crate::event::Axis::Y), 0.0, &mut ctx));
        drop(ctx);

        assert_eq!(registry.calls.len(), 1);
        let (called, function, call) = &registry.calls[0];
        assert_eq!(*called, object);
        assert_eq!(function, "throttle");
        assert_eq!(*call, ActionCall::Move(-1.0));
    }

    #[test]
    fn flush_map_only_touches_its_origin() {
        let mut table = BreakTable::new();
        let node_a = command_node("a();", "unA();");
        let node_b = command_node("b();", "unB();");
        table.enter(keyboard(), Control::Key(KeyCode::KeyA), "gameplay", &node_a);
        table.enter(keyboard(), Control::Key(KeyCode::KeyB), "chat", &node_b);

        let mut commands = Vec::new();
        let mut runner = |command: &str| commands.push(command.to_string());
        let mut registry = StubRegistry::new();
        let mut ctx = DispatchContext::new(&mut runner, &mut registry);
        assert_eq!(table.flush_map("gameplay", &mut ctx), 1);
        drop(ctx);

        assert_eq!(commands, ["unA();"]);
        assert_eq!(table.len(), 1);
        assert!(table.is_made(keyboard(), Control::Key(KeyCode::KeyB)));
    }

    #[test]
    fn flush_all_drains_everything() {
        let mut table = BreakTable::new();
        table.enter(
            keyboard(),
            Control::Key(KeyCode::KeyA),
            "gameplay",
            &command_node("a();", "unA();"),
        );
        table.enter(
            keyboard(),
            Control::Key(KeyCode::KeyB),
            "chat",
            &command_node("b();", "unB();"),
        );

        let mut commands = Vec::new();
        let mut runner = |command: &str| commands.push(command.to_string());
        let mut registry = StubRegistry::new();
        let mut ctx = DispatchContext::new(&mut runner, &mut registry);
        assert_eq!(table.flush_all(&mut ctx), 2);
        drop(ctx);

        assert_eq!(commands, ["unA();", "unB();"]);
        assert!(table.is_empty());
    }
}
