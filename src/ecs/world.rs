//! Entity IDs and component pools.

use std::collections::HashMap;
use std::mem::size_of;

use crate::error::{GravitasError, Result};

/// 1-based entity identifier; 0 is reserved as invalid.
pub type EntityId = u32;

/// Hard cap on the number of entities a [`World`] can address.
pub const MAX_ENTITY_CAPACITY: u32 = 10_000;

/// Hard cap on the number of distinct component types a [`World`] may hold.
pub const MAX_COMPONENT_TYPES: usize = 32;

/// A dense, per-type store: a raw byte buffer sized `capacity * element_size`
/// and a parallel active-flag buffer.
///
/// Invariant: if `active[e]` is true, the bytes at
/// `data[e*element_size .. (e+1)*element_size]` are a valid instance of the
/// type registered for this pool. Destroying an entity only clears the flag
/// -- the bytes may remain but are unreachable.
pub(crate) struct ComponentPool {
    pub(crate) element_size: usize,
    pub(crate) data: Vec<u8>,
    pub(crate) active: Vec<bool>,
}

impl ComponentPool {
    fn new(element_size: usize, capacity: u32) -> Self {
        Self {
            element_size,
            data: vec![0u8; element_size * capacity as usize],
            active: vec![false; capacity as usize],
        }
    }

    fn slot_mut(&mut self, entity: EntityId) -> &mut [u8] {
        let start = entity as usize * self.element_size;
        &mut self.data[start..start + self.element_size]
    }

    pub(crate) fn slot(&self, entity: EntityId) -> &[u8] {
        let start = entity as usize * self.element_size;
        &self.data[start..start + self.element_size]
    }

    pub(crate) fn clear_active(&mut self) {
        for flag in self.active.iter_mut() {
            *flag = false;
        }
    }
}

/// The ECS world: an entity-ID counter plus up to [`MAX_COMPONENT_TYPES`]
/// component pools, keyed by an arbitrary `u32` type ID (the same ID is
/// also used as a query bitmask bit, so callers should keep their type IDs
/// in `0..32`).
pub struct World {
    pub(crate) next_entity_id: EntityId,
    pub(crate) capacity: u32,
    pub(crate) pools: HashMap<u32, ComponentPool>,
}

impl World {
    pub fn new(capacity: u32) -> Self {
        Self { next_entity_id: 1, capacity: capacity.min(MAX_ENTITY_CAPACITY), pools: HashMap::new() }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn next_entity_id(&self) -> EntityId {
        self.next_entity_id
    }

    /// Create a new entity, incrementing the internal counter.
    pub fn create_entity(&mut self) -> Result<EntityId> {
        if self.next_entity_id >= self.capacity {
            return Err(GravitasError::EntityOutOfRange { entity: self.next_entity_id, capacity: self.capacity });
        }
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        Ok(id)
    }

    /// Flip this entity's active flag to false in every registered pool.
    /// The raw bytes are left in place -- only reachability changes.
    pub fn destroy_entity(&mut self, entity: EntityId) -> Result<()> {
        self.check_range(entity)?;
        for pool in self.pools.values_mut() {
            pool.active[entity as usize] = false;
        }
        Ok(())
    }

    fn check_range(&self, entity: EntityId) -> Result<()> {
        if entity == 0 || entity >= self.next_entity_id {
            return Err(GravitasError::EntityOutOfRange { entity, capacity: self.capacity });
        }
        Ok(())
    }

    /// Register (on first use) and write a component of type `T` for `entity`
    /// under `type_id`. A later call with a different `size_of::<T>()` for
    /// the same `type_id` is a hard error.
    pub fn add<T: Copy>(&mut self, type_id: u32, entity: EntityId, value: T) -> Result<()> {
        self.check_range(entity)?;
        let size = size_of::<T>();

        if !self.pools.contains_key(&type_id) {
            if self.pools.len() >= MAX_COMPONENT_TYPES {
                return Err(GravitasError::PoolAllocFailed { type_id });
            }
            self.pools.insert(type_id, ComponentPool::new(size, self.capacity));
        }

        let pool = self.pools.get_mut(&type_id).unwrap();
        if pool.element_size != size {
            return Err(GravitasError::ComponentSizeMismatch { type_id, expected: pool.element_size, actual: size });
        }

        let bytes = unsafe { std::slice::from_raw_parts(&value as *const T as *const u8, size) };
        pool.slot_mut(entity).copy_from_slice(bytes);
        pool.active[entity as usize] = true;
        Ok(())
    }

    /// Read the component of type `T` registered under `type_id` for
    /// `entity`, or `None` if that pool doesn't exist or the entity's slot
    /// isn't active.
    pub fn get<T: Copy>(&self, type_id: u32, entity: EntityId) -> Option<T> {
        if entity == 0 || entity >= self.next_entity_id {
            return None;
        }
        let pool = self.pools.get(&type_id)?;
        if pool.element_size != size_of::<T>() || !pool.active[entity as usize] {
            return None;
        }
        let bytes = pool.slot(entity);
        let mut value = std::mem::MaybeUninit::<T>::uninit();
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), value.as_mut_ptr() as *mut u8, bytes.len());
            Some(value.assume_init())
        }
    }

    pub fn has(&self, type_id: u32, entity: EntityId) -> bool {
        self.pools.get(&type_id).map(|p| entity != 0 && (entity as usize) < p.active.len() && p.active[entity as usize]).unwrap_or(false)
    }

    /// Flip this entity's active flag to false for a single component type.
    pub fn remove(&mut self, type_id: u32, entity: EntityId) {
        if let Some(pool) = self.pools.get_mut(&type_id) {
            if (entity as usize) < pool.active.len() {
                pool.active[entity as usize] = false;
            }
        }
    }

    pub(crate) fn matches(&self, entity: EntityId, mask: u32) -> bool {
        for bit in 0..MAX_COMPONENT_TYPES as u32 {
            if mask & (1 << bit) == 0 {
                continue;
            }
            match self.pools.get(&bit) {
                Some(pool) if (entity as usize) < pool.active.len() && pool.active[entity as usize] => {}
                _ => return false,
            }
        }
        true
    }

    pub(crate) fn clear_all_active(&mut self) {
        for pool in self.pools.values_mut() {
            pool.clear_active();
        }
    }

    pub(crate) fn ensure_pool(&mut self, type_id: u32, element_size: usize) -> Option<&mut ComponentPool> {
        if !self.pools.contains_key(&type_id) {
            if self.pools.len() >= MAX_COMPONENT_TYPES {
                return None;
            }
            self.pools.insert(type_id, ComponentPool::new(element_size, self.capacity));
        }
        self.pools.get_mut(&type_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Debug)]
    struct Transform {
        x: f64,
        y: f64,
        z: f64,
    }

    #[test]
    fn entity_zero_is_reserved_invalid() {
        let world = World::new(16);
        assert!(!world.has(0, 0));
        assert!(world.get::<Transform>(0, 0).is_none());
    }

    #[test]
    fn add_then_get_round_trips() {
        let mut world = World::new(16);
        let e = world.create_entity().unwrap();
        world.add(0, e, Transform { x: 1.0, y: 2.0, z: 3.0 }).unwrap();
        assert_eq!(world.get::<Transform>(0, e), Some(Transform { x: 1.0, y: 2.0, z: 3.0 }));
    }

    #[test]
    fn size_mismatch_is_a_hard_error() {
        let mut world = World::new(16);
        let e = world.create_entity().unwrap();
        world.add(0, e, Transform { x: 0.0, y: 0.0, z: 0.0 }).unwrap();
        let err = world.add(0, e, 42u8).unwrap_err();
        assert!(matches!(err, GravitasError::ComponentSizeMismatch { .. }));
    }

    #[test]
    fn destroy_clears_active_but_not_bytes() {
        let mut world = World::new(16);
        let e = world.create_entity().unwrap();
        world.add(0, e, Transform { x: 9.0, y: 9.0, z: 9.0 }).unwrap();
        world.destroy_entity(e).unwrap();
        assert!(!world.has(0, e));
        assert_eq!(&world.pools.get(&0).unwrap().slot(e)[0..8], &9.0f64.to_ne_bytes()[..]);
    }

    #[test]
    fn out_of_range_entity_is_rejected() {
        let mut world = World::new(4);
        assert!(matches!(
            world.add(0, 99, Transform { x: 0.0, y: 0.0, z: 0.0 }).unwrap_err(),
            GravitasError::EntityOutOfRange { .. }
        ));
    }
}
