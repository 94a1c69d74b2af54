//! Small in-crate stubs for exercising dispatch.

use hashbrown::HashSet;

use riposte_core::{ActionCall, ObjectId, TargetRegistry};

/// Registry stub: objects are plain ids, calls are recorded verbatim.
#[derive(Debug, Default)]
pub struct StubRegistry {
    next: u64,
    alive: HashSet<ObjectId>,
    pub calls: Vec<(ObjectId, String, ActionCall)>,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> ObjectId {
        let id = ObjectId::from_bits(self.next);
        self.next += 1;
        self.alive.insert(id);
        id
    }

    pub fn kill(&mut self, id: ObjectId) {
        self.alive.remove(&id);
    }

    pub fn calls_to(&self, function: &str) -> Vec<ActionCall> {
        self.calls
            .iter()
            .filter(|(_, name, _)| name == function)
            .map(|(_, _, call)| *call)
            .collect()
    }
}

impl TargetRegistry for StubRegistry {
    fn contains(&self, id: ObjectId) -> bool {
        self.alive.contains(&id)
    }

    fn dispatch(&mut self, id: ObjectId, function: &str, call: ActionCall) -> bool {
        if !self.alive.contains(&id) {
            return false;
        }
        self.calls.push((id, function.to_string(), call));
        true
    }
}
