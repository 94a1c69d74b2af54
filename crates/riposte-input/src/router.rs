//! Priority-ordered routing across active maps.

use tracing::{debug, trace};

use crate::action_map::ActionMap;
use crate::break_table::BreakTable;
use crate::dispatch::DispatchContext;
use crate::event::{InputEdge, InputEvent};

/// Routing policy knobs.
#[derive(Debug, Clone, Copy)]
pub struct RoutingPolicy {
    /// Consult the always-on map before the stack. The always-on map is
    /// consulted regardless; this only orders the two passes.
    pub global_first: bool,
    /// Offer events to every stacked map instead of stopping at the first
    /// consumer.
    pub broadcast: bool,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            global_first: true,
            broadcast: false,
        }
    }
}

/// Owns the active-map stack, the always-on map, and the break ledger.
///
/// One router per application instance. The ledger must be globally
/// consistent, so every dispatch path runs through this single table; two
/// routers would let one of them miss releases the other consumed.
#[derive(Debug)]
pub struct InputRouter {
    stack: Vec<ActionMap>,
    global: ActionMap,
    breaks: BreakTable,
    policy: RoutingPolicy,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    /// Router with an empty stack and the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(RoutingPolicy::default())
    }

    /// Router with an explicit policy.
    #[must_use]
    pub fn with_policy(policy: RoutingPolicy) -> Self {
        Self {
            stack: Vec::new(),
            global: ActionMap::new("global"),
            breaks: BreakTable::new(),
            policy,
        }
    }

    /// The always-on map.
    #[must_use]
    pub fn global_map(&self) -> &ActionMap {
        &self.global
    }

    /// The always-on map, for binding.
    pub fn global_map_mut(&mut self) -> &mut ActionMap {
        &mut self.global
    }

    /// The make/break ledger, read-only.
    #[must_use]
    pub fn break_table(&self) -> &BreakTable {
        &self.breaks
    }

    /// Number of stacked maps, not counting the always-on map.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Borrow a stacked map by name.
    #[must_use]
    pub fn map(&self, name: &str) -> Option<&ActionMap> {
        self.stack.iter().find(|map| map.name() == name)
    }

    /// Borrow a stacked map by name, for binding.
    pub fn map_mut(&mut self, name: &str) -> Option<&mut ActionMap> {
        self.stack.iter_mut().find(|map| map.name() == name)
    }

    /// Activate a map above everything already stacked.
    pub fn push_map(&mut self, map: ActionMap) {
        debug!(map = map.name(), depth = self.stack.len() + 1, "action map activated");
        self.stack.push(map);
    }

    /// Deactivate the top map, force-breaking everything it has made.
    pub fn pop_map(&mut self, ctx: &mut DispatchContext<'_>) -> Option<ActionMap> {
        let map = self.stack.pop()?;
        let fired = self.breaks.flush_map(map.name(), ctx);
        debug!(map = map.name(), fired, "action map deactivated");
        Some(map)
    }

    /// Deactivate a map by name wherever it sits in the stack,
    /// force-breaking everything it has made.
    pub fn remove_map(&mut self, name: &str, ctx: &mut DispatchContext<'_>) -> Option<ActionMap> {
        let idx = self.stack.iter().position(|map| map.name() == name)?;
        let map = self.stack.remove(idx);
        let fired = self.breaks.flush_map(map.name(), ctx);
        debug!(map = map.name(), fired, "action map deactivated");
        Some(map)
    }

    /// Route one event through the always-on map and the stack.
    ///
    /// Returns `true` when any consumer handled the event; `false` tells
    /// the platform layer the event fell through everything.
    pub fn dispatch(&mut self, event: &InputEvent, ctx: &mut DispatchContext<'_>) -> bool {
        // A break pairs against the ledger exactly once, no matter how many
        // maps are stacked or in which order they would be consulted.
        if event.edge == InputEdge::Break {
            let handled = self
                .breaks
                .fire(event.device, event.control, event.value, ctx);
            trace!(device = %event.device, handled, "break routed");
            return handled;
        }

        if self.policy.global_first {
            let global = self.dispatch_global(event, ctx);
            let stacked = self.dispatch_stack(event, ctx);
            global || stacked
        } else {
            let stacked = self.dispatch_stack(event, ctx);
            let global = self.dispatch_global(event, ctx);
            stacked || global
        }
    }

    /// Offer the event to the always-on map only.
    pub fn dispatch_global(&mut self, event: &InputEvent, ctx: &mut DispatchContext<'_>) -> bool {
        self.global.process_event(event, &mut self.breaks, ctx)
    }

    /// Offer the event to the stacked maps, most recently activated first.
    pub fn dispatch_stack(&mut self, event: &InputEvent, ctx: &mut DispatchContext<'_>) -> bool {
        let mut handled = false;
        for map in self.stack.iter().rev() {
            if map.process_event(event, &mut self.breaks, ctx) {
                handled = true;
                if !self.policy.broadcast {
                    break;
                }
            }
        }
        handled
    }

    /// Force-break every made binding. Returns the number fired.
    pub fn drain(&mut self, ctx: &mut DispatchContext<'_>) -> usize {
        self.breaks.flush_all(ctx)
    }
}
