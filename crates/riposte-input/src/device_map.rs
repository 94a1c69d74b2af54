//! Per-device binding tables.

use crate::event::{Control, DeviceId};
use crate::modifiers::Modifiers;
use crate::node::Node;

/// Binding table for one physical device.
///
/// Nodes are keyed by exact (modifiers, control) equality. Tables stay
/// small, so lookup is a linear scan in insertion order.
#[derive(Debug)]
pub struct DeviceMap {
    device: DeviceId,
    nodes: Vec<Node>,
}

impl DeviceMap {
    /// Empty table for a device.
    #[must_use]
    pub const fn new(device: DeviceId) -> Self {
        Self {
            device,
            nodes: Vec::new(),
        }
    }

    /// Device this table belongs to.
    #[inline]
    #[must_use]
    pub const fn device(&self) -> DeviceId {
        self.device
    }

    /// Number of bindings in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the table has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Read-only probe for a binding.
    #[must_use]
    pub fn find_node(&self, modifiers: Modifiers, control: Control) -> Option<&Node> {
        self.position(modifiers, control).map(|idx| &self.nodes[idx])
    }

    /// Binding slot for mutation, created zero-initialized when the key is
    /// not present. Rebinding a key therefore replaces in place and never
    /// duplicates.
    pub fn get_node(&mut self, modifiers: Modifiers, control: Control) -> &mut Node {
        let idx = match self.position(modifiers, control) {
            Some(idx) => idx,
            None => {
                self.nodes.push(Node::unbound(modifiers, control));
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[idx]
    }

    /// Remove a binding; `None` when the key was absent.
    pub fn remove_node(&mut self, modifiers: Modifiers, control: Control) -> Option<Node> {
        self.position(modifiers, control)
            .map(|idx| self.nodes.remove(idx))
    }

    /// Iterate the bindings in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    fn position(&self, modifiers: Modifiers, control: Control) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| node.modifiers == modifiers && node.control == control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DeviceKind;
    use crate::modifiers::Modifiers;
    use crate::node::Target;
    use winit::keyboard::KeyCode;

    fn map() -> DeviceMap {
        DeviceMap::new(DeviceId::new(DeviceKind::Keyboard, 0))
    }

    #[test]
    fn get_node_creates_one_slot_per_key() {
        let mut map = map();
        map.get_node(Modifiers::empty(), Control::Key(KeyCode::KeyA)).scale = 2.0;
        map.get_node(Modifiers::empty(), Control::Key(KeyCode::KeyA)).scale = 3.0;
        assert_eq!(map.len(), 1);
        let node = map
            .find_node(Modifiers::empty(), Control::Key(KeyCode::KeyA))
            .unwrap();
        assert_eq!(node.scale, 3.0);
    }

    #[test]
    fn modifier_sets_split_slots() {
        let mut map = map();
        map.get_node(Modifiers::empty(), Control::Key(KeyCode::KeyA));
        map.get_node(Modifiers::CTRL, Control::Key(KeyCode::KeyA));
        assert_eq!(map.len(), 2);
        assert!(map.find_node(Modifiers::SHIFT, Control::Key(KeyCode::KeyA)).is_none());
    }

    #[test]
    fn remove_node_returns_the_binding() {
        let mut map = map();
        map.get_node(Modifiers::empty(), Control::Button(0)).target = Target::Command {
            make_command: "fire();".to_string(),
            break_command: String::new(),
        };
        let removed = map.remove_node(Modifiers::empty(), Control::Button(0)).unwrap();
        assert!(removed.targets("fire();"));
        assert!(map.is_empty());
        assert!(map.remove_node(Modifiers::empty(), Control::Button(0)).is_none());
    }
}
