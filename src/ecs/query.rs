//! Bitmask component queries, with an optional eagerly-materialized cache.
//!
//! A [`Query`] does not borrow its [`World`] -- the world is passed to
//! [`Query::next`] on every call, the same way a caller may freely mutate
//! the world between calls (the cached form simply won't see it).

use crate::ecs::world::{EntityId, World};

/// Iterates entities whose pools are all active for every bit set in `mask`.
///
/// `next` (lazy) re-evaluates the mask against live pool state every call --
/// O(number of registered types) per call. [`Query::init_cached`] scans once
/// up front and replays that snapshot -- O(1) per call, but blind to
/// component changes made after the snapshot was taken.
pub struct Query {
    mask: u32,
    cursor: EntityId,
    cached: Option<Vec<EntityId>>,
    cache_index: usize,
}

impl Query {
    /// A lazy query over `mask`. Call [`Query::next`] to advance it.
    pub fn init(mask: u32) -> Self {
        Self { mask, cursor: 1, cached: None, cache_index: 0 }
    }

    /// Eagerly scan `world` now and replay that snapshot regardless of any
    /// later structural mutation to `world`.
    pub fn init_cached(world: &World, mask: u32) -> Self {
        let matches: Vec<EntityId> = (1..world.next_entity_id()).filter(|&e| world.matches(e, mask)).collect();
        Self { mask, cursor: 1, cached: Some(matches), cache_index: 0 }
    }

    /// Rewind the cursor (lazy mode) or replay index (cached mode) to the start.
    pub fn reset(&mut self) {
        self.cursor = 1;
        self.cache_index = 0;
    }

    /// Free the materialized cache, reverting to lazy iteration from
    /// wherever the cursor last was.
    pub fn destroy(&mut self) {
        self.cached = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Advance the query and return the next matching entity, or `None`
    /// once exhausted.
    pub fn next(&mut self, world: &World) -> Option<EntityId> {
        if let Some(cache) = &self.cached {
            let item = cache.get(self.cache_index).copied();
            if item.is_some() {
                self.cache_index += 1;
            }
            return item;
        }

        while self.cursor < world.next_entity_id() {
            let candidate = self.cursor;
            self.cursor += 1;
            if world.matches(candidate, self.mask) {
                return Some(candidate);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct Transform;
    #[derive(Clone, Copy)]
    struct Velocity;

    const TRANSFORM: u32 = 0;
    const VELOCITY: u32 = 1;

    fn populated_world() -> World {
        let mut world = World::new(16);
        let a = world.create_entity().unwrap();
        let b = world.create_entity().unwrap();
        let c = world.create_entity().unwrap();
        world.add(TRANSFORM, a, Transform).unwrap();
        world.add(TRANSFORM, b, Transform).unwrap();
        world.add(VELOCITY, b, Velocity).unwrap();
        world.add(TRANSFORM, c, Transform).unwrap();
        world.add(VELOCITY, c, Velocity).unwrap();
        world
    }

    fn collect_all(query: &mut Query, world: &World) -> Vec<EntityId> {
        let mut out = Vec::new();
        while let Some(e) = query.next(world) {
            out.push(e);
        }
        out
    }

    #[test]
    fn query_yields_only_entities_with_every_required_component() {
        let world = populated_world();
        let mask = (1 << TRANSFORM) | (1 << VELOCITY);
        let mut q = Query::init(mask);
        assert_eq!(collect_all(&mut q, &world), vec![2, 3]);
    }

    #[test]
    fn cached_and_lazy_queries_agree() {
        let world = populated_world();
        let mask = 1 << TRANSFORM;
        let mut lazy = Query::init(mask);
        let mut cached = Query::init_cached(&world, mask);
        assert_eq!(collect_all(&mut lazy, &world), collect_all(&mut cached, &world));
    }

    #[test]
    fn cached_query_ignores_subsequent_mutation() {
        let mut world = populated_world();
        let mask = 1 << TRANSFORM;
        let mut cached = Query::init_cached(&world, mask);

        let d = world.create_entity().unwrap();
        world.add(TRANSFORM, d, Transform).unwrap();

        assert_eq!(collect_all(&mut cached, &world), vec![1, 2, 3]);
    }

    #[test]
    fn reset_rewinds_the_cursor() {
        let world = populated_world();
        let mask = 1 << TRANSFORM;
        let mut q = Query::init(mask);
        q.next(&world);
        q.reset();
        assert_eq!(q.next(&world), Some(1));
    }
}
