//! Entity-backed target registry for the Riposte input stack.
//!
//! Bound targets live as entities in a [`hecs`] world. Entity ids carry a
//! generation, so an [`ObjectId`] stored by a binding re-validates cleanly
//! instead of dangling when its object despawns: the binding layer asks
//! again at dispatch time and simply skips targets that are gone.

use hashbrown::HashMap;
use riposte_core::{ActionCall, ObjectId, TargetRegistry};

pub use hecs::{Entity, World};

type Handler = Box<dyn FnMut(ActionCall) + Send + Sync>;

/// Named-function table a target exposes to the binding layer.
///
/// Each function receives the [`ActionCall`] of the binding that fired:
/// make, break, or a shaped move magnitude.
#[derive(Default)]
pub struct ActionHandlers {
    functions: HashMap<String, Handler>,
}

impl ActionHandlers {
    /// Empty handler table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` under `name`, replacing any previous handler.
    #[must_use]
    pub fn on(
        mut self,
        name: impl Into<String>,
        function: impl FnMut(ActionCall) + Send + Sync + 'static,
    ) -> Self {
        self.functions.insert(name.into(), Box::new(function));
        self
    }

    /// Invoke a named function.
    ///
    /// Returns `false` if nothing is registered under `name`.
    pub fn call(&mut self, name: &str, call: ActionCall) -> bool {
        match self.functions.get_mut(name) {
            Some(function) => {
                function(call);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if a function is registered under `name`.
    #[must_use]
    pub fn handles(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

impl std::fmt::Debug for ActionHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionHandlers")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Object store whose entities can be targeted by bindings.
///
/// A thin wrapper over a [`hecs::World`]: targets are entities with an
/// [`ActionHandlers`] component, and the world doubles as the
/// [`TargetRegistry`] the router dispatches through.
#[derive(Default)]
pub struct TargetWorld {
    world: World,
}

impl std::fmt::Debug for TargetWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetWorld")
            .field("objects", &self.world.len())
            .finish()
    }
}

impl TargetWorld {
    /// Empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a target exposing the given handlers. The returned id is what
    /// bindings store.
    pub fn spawn_target(&mut self, handlers: ActionHandlers) -> ObjectId {
        let entity = self.world.spawn((handlers,));
        ObjectId::from_bits(entity.to_bits().get())
    }

    /// Destroy a target. Stale ids that named it keep resolving to "gone".
    pub fn despawn(&mut self, id: ObjectId) -> bool {
        match Self::entity(id) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.world.len()
    }

    /// Returns `true` when no objects are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    /// The underlying world, for hosts that hang more components off
    /// target entities.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The underlying world, mutable.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn entity(id: ObjectId) -> Option<Entity> {
        Entity::from_bits(id.to_bits())
    }
}

impl TargetRegistry for TargetWorld {
    fn contains(&self, id: ObjectId) -> bool {
        Self::entity(id).is_some_and(|entity| self.world.contains(entity))
    }

    fn dispatch(&mut self, id: ObjectId, function: &str, call: ActionCall) -> bool {
        let Some(entity) = Self::entity(id) else {
            return false;
        };
        let Ok(mut handlers) = self.world.get::<&mut ActionHandlers>(entity) else {
            return false;
        };
        handlers.call(function, call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn handlers_dispatch_by_name() {
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);

        let mut world = TargetWorld::new();
        let object = world.spawn_target(ActionHandlers::new().on("jump", move |call| {
            if call.is_make() {
                counter.fetch_add(1, Ordering::Relaxed);
            }
        }));

        assert!(world.contains(object));
        assert!(world.dispatch(object, "jump", ActionCall::Make));
        assert!(world.dispatch(object, "jump", ActionCall::Break));
        assert!(!world.dispatch(object, "crouch", ActionCall::Make));
        assert_eq!(fired.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn despawned_targets_stop_resolving() {
        let mut world = TargetWorld::new();
        let object = world.spawn_target(ActionHandlers::new().on("fire", |_| {}));

        assert!(world.despawn(object));
        assert!(!world.contains(object));
        assert!(!world.dispatch(object, "fire", ActionCall::Make));
        assert!(!world.despawn(object));
        assert!(world.is_empty());
    }

    #[test]
    fn ids_never_alias_across_respawns() {
        let mut world = TargetWorld::new();
        let first = world.spawn_target(ActionHandlers::new().on("fire", |_| {}));
        world.despawn(first);
        let second = world.spawn_target(ActionHandlers::new().on("fire", |_| {}));

        assert_ne!(first, second);
        assert!(!world.contains(first));
        assert!(world.contains(second));
    }

    #[test]
    fn move_calls_carry_magnitude() {
        let last = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&last);

        let mut world = TargetWorld::new();
        let object = world.spawn_target(ActionHandlers::new().on("pitch", move |call| {
            seen.store(call.value().to_bits(), Ordering::Relaxed);
        }));

        assert!(world.dispatch(object, "pitch", ActionCall::Move(-0.5)));
        assert_eq!(f32::from_bits(last.load(Ordering::Relaxed)), -0.5);
    }
}
