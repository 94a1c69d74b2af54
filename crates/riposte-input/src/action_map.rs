//! Named binding maps and the textual bind surface.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use riposte_core::ObjectId;
use tracing::debug;

use crate::descriptor::EventDescriptor;
use crate::device_map::DeviceMap;
use crate::error::{BindError, Result};
use crate::event::{Control, DeviceId};
use crate::modifiers::Modifiers;
use crate::names;
use crate::node::{DeadZone, Node, NodeFlags, Target};

/// A named set of per-device binding tables.
///
/// Maps hold bindings and nothing else: bound target objects are referenced
/// by identifier only, and the make/break ledger lives in the router, so a
/// map can be built, stacked, and torn down freely. Map names should be
/// unique among the maps handed to one router, since the ledger and the
/// stack address maps by name.
#[derive(Debug, Default)]
pub struct ActionMap {
    name: String,
    device_maps: Vec<DeviceMap>,
}

impl ActionMap {
    /// Create an empty map with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_maps: Vec::new(),
        }
    }

    /// Map name, as referenced by the router and the break ledger.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of bindings across all devices.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.device_maps.iter().map(DeviceMap::len).sum()
    }

    /// Binding table for `device`, if one exists yet.
    #[must_use]
    pub fn device_map(&self, device: DeviceId) -> Option<&DeviceMap> {
        self.device_maps.iter().find(|map| map.device() == device)
    }

    /// Binding table for `device`, created on first use.
    pub fn device_map_mut(&mut self, device: DeviceId) -> &mut DeviceMap {
        let idx = match self.device_maps.iter().position(|map| map.device() == device) {
            Some(idx) => idx,
            None => {
                self.device_maps.push(DeviceMap::new(device));
                self.device_maps.len() - 1
            }
        };
        &mut self.device_maps[idx]
    }

    /// Read-only probe across this map's devices.
    #[must_use]
    pub fn find_node(
        &self,
        device: DeviceId,
        modifiers: Modifiers,
        control: Control,
    ) -> Option<&Node> {
        self.device_map(device)
            .and_then(|map| map.find_node(modifiers, control))
    }

    /// Binding slot for mutation, created zero-initialized when absent.
    pub fn get_node(
        &mut self,
        device: DeviceId,
        modifiers: Modifiers,
        control: Control,
    ) -> &mut Node {
        self.device_map_mut(device).get_node(modifiers, control)
    }

    /// Remove a binding slot; `None` when the key was never bound.
    pub fn remove_node(
        &mut self,
        device: DeviceId,
        modifiers: Modifiers,
        control: Control,
    ) -> Option<Node> {
        self.device_maps
            .iter_mut()
            .find(|map| map.device() == device)
            .and_then(|map| map.remove_node(modifiers, control))
    }

    /// Iterate every binding whose target refers to `command`, with the
    /// device it is bound on.
    pub fn bound_nodes<'a>(
        &'a self,
        command: &'a str,
    ) -> impl Iterator<Item = (DeviceId, &'a Node)> + 'a {
        self.device_maps.iter().flat_map(move |map| {
            let device = map.device();
            map.nodes()
                .filter(move |node| node.targets(command))
                .map(move |node| (device, node))
        })
    }

    /// First binding whose target refers to `command`, if any.
    #[must_use]
    pub fn find_bound_node<'a>(&'a self, command: &'a str) -> Option<(DeviceId, &'a Node)> {
        self.bound_nodes(command).next()
    }

    /// Process a textual bind request.
    ///
    /// `args` is `[device, action, response-shape..., target]`. The optional
    /// response-shape block is one word of flag letters (`R`, `S`, `D`, `I`,
    /// `N`, in any order) followed by one argument per `S` (a scale factor)
    /// and per `D` (a `"begin end"` pair), consumed in letter order. With
    /// `object` set, the target names a callback function on that object;
    /// otherwise it is the command executed on make.
    ///
    /// A malformed request is rejected whole and leaves no partial state.
    pub fn process_bind(&mut self, args: &[&str], object: Option<ObjectId>) -> Result<()> {
        let [device_spec, action_spec, rest @ ..] = args else {
            return Err(BindError::TooFewArguments(args.len()));
        };
        if rest.is_empty() {
            return Err(BindError::TooFewArguments(args.len()));
        }

        let device = names::parse_device(device_spec)
            .ok_or_else(|| BindError::UnknownDevice((*device_spec).to_string()))?;
        let descriptor = EventDescriptor::parse(action_spec)?;

        let target_arg = rest[rest.len() - 1];
        let (mut flags, dead_zone, scale) = parse_shape(&rest[..rest.len() - 1])?;

        let target = match object {
            Some(object) => Target::Callback {
                object,
                function: target_arg.to_string(),
            },
            None => {
                flags |= NodeFlags::BIND_CMD;
                Target::Command {
                    make_command: target_arg.to_string(),
                    break_command: String::new(),
                }
            }
        };

        let node = self.get_node(device, descriptor.modifiers, descriptor.control);
        node.flags = flags;
        node.dead_zone = dead_zone;
        node.scale = scale;
        node.target = target;

        debug!(map = %self.name, device = %device, action = %action_spec, "bound");
        Ok(())
    }

    /// Bind an explicit make/break command pair to a key.
    pub fn process_bind_cmd(
        &mut self,
        device: &str,
        action: &str,
        make_command: &str,
        break_command: &str,
    ) -> Result<()> {
        let id = names::parse_device(device)
            .ok_or_else(|| BindError::UnknownDevice(device.to_string()))?;
        let descriptor = EventDescriptor::parse(action)?;

        let node = self.get_node(id, descriptor.modifiers, descriptor.control);
        node.flags = NodeFlags::BIND_CMD;
        node.dead_zone = DeadZone::default();
        node.scale = 0.0;
        node.target = Target::Command {
            make_command: make_command.to_string(),
            break_command: break_command.to_string(),
        };

        debug!(map = %self.name, device = %device, action = %action, "bound command pair");
        Ok(())
    }

    /// Remove a binding; fails when the key is not bound.
    pub fn process_unbind(&mut self, device: &str, action: &str) -> Result<()> {
        let id = names::parse_device(device)
            .ok_or_else(|| BindError::UnknownDevice(device.to_string()))?;
        let descriptor = EventDescriptor::parse(action)?;

        self.remove_node(id, descriptor.modifiers, descriptor.control)
            .ok_or_else(|| BindError::NotBound {
                device: device.to_string(),
                action: action.to_string(),
            })?;

        debug!(map = %self.name, device = %device, action = %action, "unbound");
        Ok(())
    }

    /// Device and descriptor a command is bound to, formatted as a bindable
    /// pair such as `"keyboard0 ctrl a"`.
    #[must_use]
    pub fn get_binding(&self, command: &str) -> Option<String> {
        self.find_bound_node(command).map(|(device, node)| {
            format!(
                "{device} {}",
                names::descriptor_string(node.modifiers, node.control)
            )
        })
    }

    /// Command or callback function bound to a device/action pair.
    pub fn get_command(&self, device: &str, action: &str) -> Result<&str> {
        let node = self.query_node(device, action)?;
        Ok(match &node.target {
            Target::Command { make_command, .. } => make_command,
            Target::Callback { function, .. } => function,
            Target::Unbound => "",
        })
    }

    /// Whether the binding on a device/action pair inverts its output.
    pub fn is_inverted(&self, device: &str, action: &str) -> Result<bool> {
        Ok(self
            .query_node(device, action)?
            .flags
            .contains(NodeFlags::INVERTED))
    }

    /// Scale of the binding on a device/action pair; identity when unset.
    pub fn get_scale(&self, device: &str, action: &str) -> Result<f32> {
        let node = self.query_node(device, action)?;
        Ok(if node.flags.contains(NodeFlags::HAS_SCALE) {
            node.scale
        } else {
            1.0
        })
    }

    /// Dead zone of the binding on a device/action pair, formatted as
    /// `"begin end"`.
    pub fn get_dead_zone(&self, device: &str, action: &str) -> Result<String> {
        let node = self.query_node(device, action)?;
        Ok(format!("{} {}", node.dead_zone.begin, node.dead_zone.end))
    }

    /// Write a bindable listing of every binding in this map.
    pub fn dump(&self, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "// Action map: {}", self.name)?;
        for map in &self.device_maps {
            for node in map.nodes() {
                let descriptor = names::descriptor_string(node.modifiers, node.control);
                let shape = shape_spec(node);
                match &node.target {
                    Target::Command {
                        make_command,
                        break_command,
                    } if !break_command.is_empty() => writeln!(
                        out,
                        "bindcmd {} \"{descriptor}\" \"{make_command}\" \"{break_command}\"",
                        map.device()
                    )?,
                    Target::Command { make_command, .. } => writeln!(
                        out,
                        "bind {} \"{descriptor}\"{shape} \"{make_command}\"",
                        map.device()
                    )?,
                    Target::Callback { object, function } => writeln!(
                        out,
                        "bind {} \"{descriptor}\"{shape} {object}::{function}",
                        map.device()
                    )?,
                    Target::Unbound => {}
                }
            }
        }
        Ok(())
    }

    /// The dump listing as a string.
    #[must_use]
    pub fn dump_string(&self) -> String {
        let mut out = Vec::new();
        if self.dump(&mut out).is_ok() {
            String::from_utf8_lossy(&out).into_owned()
        } else {
            String::new()
        }
    }

    /// Dump to a file, appending or truncating.
    pub fn dump_to_file(&self, path: impl AsRef<Path>, append: bool) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)?;
        self.dump(&mut file)
    }

    fn query_node(&self, device: &str, action: &str) -> Result<&Node> {
        let id = names::parse_device(device)
            .ok_or_else(|| BindError::UnknownDevice(device.to_string()))?;
        let descriptor = EventDescriptor::parse(action)?;
        self.find_node(id, descriptor.modifiers, descriptor.control)
            .ok_or_else(|| BindError::NotBound {
                device: device.to_string(),
                action: action.to_string(),
            })
    }
}

/// Parse the response-shape block of a bind request. The whole block is
/// validated before any node is touched.
fn parse_shape(shape_args: &[&str]) -> Result<(NodeFlags, DeadZone, f32)> {
    let mut flags = NodeFlags::empty();
    let mut dead_zone = DeadZone::default();
    let mut scale = 0.0_f32;

    if shape_args.is_empty() {
        return Ok((flags, dead_zone, scale));
    }

    let letters = shape_args[0];
    let mut numbers = shape_args[1..].iter();
    for letter in letters.chars() {
        match letter.to_ascii_uppercase() {
            'R' => flags |= NodeFlags::RANGED,
            'I' => flags |= NodeFlags::INVERTED,
            'N' => flags |= NodeFlags::NON_LINEAR,
            'S' => {
                let arg = numbers
                    .next()
                    .ok_or(BindError::MissingArgument { flag: 'S' })?;
                scale = parse_float(arg)?;
                flags |= NodeFlags::HAS_SCALE;
            }
            'D' => {
                let arg = numbers
                    .next()
                    .ok_or(BindError::MissingArgument { flag: 'D' })?;
                dead_zone = parse_dead_zone(arg)?;
                flags |= NodeFlags::HAS_DEAD_ZONE;
            }
            other => return Err(BindError::UnknownFlag(other)),
        }
    }
    if let Some(extra) = numbers.next() {
        return Err(BindError::UnusedArgument((*extra).to_string()));
    }

    Ok((flags, dead_zone, scale))
}

fn parse_float(arg: &str) -> Result<f32> {
    arg.trim()
        .parse()
        .map_err(|_| BindError::InvalidNumber(arg.to_string()))
}

fn parse_dead_zone(arg: &str) -> Result<DeadZone> {
    let mut parts = arg.split_whitespace();
    let (Some(begin), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(BindError::InvalidNumber(arg.to_string()));
    };
    Ok(DeadZone::new(parse_float(begin)?, parse_float(end)?))
}

/// Response-shape block for the dump format, with a leading space when any
/// flag is set. Arguments follow in letter order, so the line re-parses to
/// the same node.
fn shape_spec(node: &Node) -> String {
    let mut letters = String::new();
    let mut args = String::new();
    if node.flags.contains(NodeFlags::RANGED) {
        letters.push('R');
    }
    if node.flags.contains(NodeFlags::HAS_SCALE) {
        letters.push('S');
        args.push_str(&format!(" {}", node.scale));
    }
    if node.flags.contains(NodeFlags::HAS_DEAD_ZONE) {
        letters.push('D');
        args.push_str(&format!(
            " \"{} {}\"",
            node.dead_zone.begin, node.dead_zone.end
        ));
    }
    if node.flags.contains(NodeFlags::INVERTED) {
        letters.push('I');
    }
    if node.flags.contains(NodeFlags::NON_LINEAR) {
        letters.push('N');
    }

    if letters.is_empty() {
        String::new()
    } else {
        format!(" {letters}{args}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DeviceKind;
    use winit::keyboard::KeyCode;

    #[test]
    fn bind_populates_a_node() {
        let mut map = ActionMap::new("gameplay");
        map.process_bind(&["keyboard0", "ctrl a", "startFire();"], None)
            .unwrap();

        let keyboard = DeviceId::new(DeviceKind::Keyboard, 0);
        let node = map
            .find_node(keyboard, Modifiers::CTRL, Control::Key(KeyCode::KeyA))
            .unwrap();
        assert!(node.is_command());
        assert!(node.targets("startFire();"));
    }

    #[test]
    fn bind_with_shape_block() {
        let mut map = ActionMap::new("flight");
        map.process_bind(&["joystick0", "yaxis", "RSDI", "2.5", "-0.1 0.1", "pitch"], Some(ObjectId::from_bits(7)))
            .unwrap();

        let joystick = DeviceId::new(DeviceKind::Joystick, 0);
        let node = map
            .find_node(joystick, Modifiers::empty(), Control::Axis(crate::event::Axis::Y))
            .unwrap();
        assert_eq!(
            node.flags,
            NodeFlags::RANGED | NodeFlags::HAS_SCALE | NodeFlags::HAS_DEAD_ZONE | NodeFlags::INVERTED
        );
        assert_eq!(node.scale, 2.5);
        assert_eq!(node.dead_zone, DeadZone::new(-0.1, 0.1));
        assert_eq!(
            node.target,
            Target::Callback {
                object: ObjectId::from_bits(7),
                function: "pitch".to_string()
            }
        );
    }

    #[test]
    fn malformed_bind_leaves_no_state() {
        let mut map = ActionMap::new("gameplay");

        assert!(matches!(
            map.process_bind(&["keyboard0", "a", "S", "jump();"], None),
            Err(BindError::InvalidNumber(_))
        ));
        assert!(matches!(
            map.process_bind(&["keyboard0", "a", "D", "fire();"], None),
            Err(BindError::MissingArgument { flag: 'D' })
        ));
        assert!(matches!(
            map.process_bind(&["keyboard0", "a", "Q", "0.5", "fire();"], None),
            Err(BindError::UnknownFlag('Q'))
        ));
        assert!(matches!(
            map.process_bind(&["keyboard0", "a", "S", "0.5", "1.5", "fire();"], None),
            Err(BindError::UnusedArgument(_))
        ));
        assert!(matches!(
            map.process_bind(&["keyboard0", "a"], None),
            Err(BindError::TooFewArguments(2))
        ));
        assert!(matches!(
            map.process_bind(&["trackball0", "a", "fire();"], None),
            Err(BindError::UnknownDevice(_))
        ));

        assert_eq!(map.binding_count(), 0);
    }

    #[test]
    fn rebinding_replaces_in_place() {
        let mut map = ActionMap::new("gameplay");
        map.process_bind(&["keyboard0", "a", "jump();"], None).unwrap();
        map.process_bind(&["keyboard0", "a", "crouch();"], None).unwrap();
        assert_eq!(map.binding_count(), 1);
        assert_eq!(map.get_command("keyboard0", "a").unwrap(), "crouch();");
    }

    #[test]
    fn unbind_removes_and_reports_missing() {
        let mut map = ActionMap::new("gameplay");
        map.process_bind(&["keyboard0", "a", "jump();"], None).unwrap();
        map.process_unbind("keyboard0", "a").unwrap();
        assert_eq!(map.binding_count(), 0);
        assert!(matches!(
            map.process_unbind("keyboard0", "a"),
            Err(BindError::NotBound { .. })
        ));
    }

    #[test]
    fn queries_report_response_settings() {
        let mut map = ActionMap::new("flight");
        map.process_bind(&["mouse0", "xaxis", "SDI", "0.5", "-0.2 0.2", "yaw();"], None)
            .unwrap();

        assert_eq!(map.get_command("mouse0", "xaxis").unwrap(), "yaw();");
        assert!(map.is_inverted("mouse0", "xaxis").unwrap());
        assert_eq!(map.get_scale("mouse0", "xaxis").unwrap(), 0.5);
        assert_eq!(map.get_dead_zone("mouse0", "xaxis").unwrap(), "-0.2 0.2");
        assert!(matches!(
            map.get_command("mouse0", "yaxis"),
            Err(BindError::NotBound { .. })
        ));
    }

    #[test]
    fn unscaled_bindings_report_identity_scale() {
        let mut map = ActionMap::new("gameplay");
        map.process_bind(&["keyboard0", "a", "jump();"], None).unwrap();
        assert_eq!(map.get_scale("keyboard0", "a").unwrap(), 1.0);
    }

    #[test]
    fn reverse_lookup_finds_device_and_descriptor() {
        let mut map = ActionMap::new("gameplay");
        map.process_bind(&["keyboard0", "ctrl a", "startFire();"], None)
            .unwrap();
        map.process_bind(&["mouse0", "button0", "startFire();"], None)
            .unwrap();

        assert_eq!(
            map.get_binding("startFire();").unwrap(),
            "keyboard0 ctrl a"
        );
        assert_eq!(map.bound_nodes("startFire();").count(), 2);
        assert!(map.get_binding("warp();").is_none());
    }

    #[test]
    fn dump_lines_rebind_the_same_nodes() {
        let mut map = ActionMap::new("flight");
        map.process_bind(
            &["joystick0", "yaxis", "RSDN", "2", "-0.1 0.1", "pitch();"],
            None,
        )
        .unwrap();
        map.process_bind_cmd("keyboard0", "ctrl a", "startFire();", "stopFire();")
            .unwrap();

        let dump = map.dump_string();
        assert!(dump.contains("// Action map: flight"));
        assert!(dump.contains("bind joystick0 \"yaxis\" RSDN 2 \"-0.1 0.1\" \"pitch();\""));
        assert!(dump.contains("bindcmd keyboard0 \"ctrl a\" \"startFire();\" \"stopFire();\""));
    }
}
