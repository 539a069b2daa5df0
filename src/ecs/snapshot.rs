//! Binary snapshot I/O ("BHS1" format).
//!
//! Little-endian throughout. Header: `magic`, `version`, `num_entities`
//! (the world's `next_entity_id`), `num_component_types`. Then zero or more
//! chunks of `(type_id, element_size, count)` followed by `count` entries of
//! `(entity_id, raw_bytes)`. No footer, no checksum.

use crate::ecs::world::World;
use crate::error::{GravitasError, Result};

const MAGIC: u32 = 0x4248_5331; // "BHS1"
const VERSION: u32 = 1;

/// Non-fatal diagnostics collected while loading a snapshot.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub warnings: Vec<String>,
}

/// Serialize every active component across every registered pool.
pub fn save(world: &World) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC.to_le_bytes());
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&world.next_entity_id().to_le_bytes());
    out.extend_from_slice(&(world.pools.len() as u32).to_le_bytes());

    let mut type_ids: Vec<&u32> = world.pools.keys().collect();
    type_ids.sort();

    for &type_id in type_ids {
        let pool = &world.pools[type_id];
        let active_ids: Vec<u32> =
            (1..world.next_entity_id()).filter(|&e| pool.active[e as usize]).collect();

        out.extend_from_slice(&type_id.to_le_bytes());
        out.extend_from_slice(&(pool.element_size as u32).to_le_bytes());
        out.extend_from_slice(&(active_ids.len() as u32).to_le_bytes());

        for e in active_ids {
            out.extend_from_slice(&e.to_le_bytes());
            out.extend_from_slice(pool.slot(e));
        }
    }

    out
}

/// Load a snapshot into `world`, clearing every existing pool's active flags
/// first. Pools missing from `world` are created; an existing pool whose
/// element size disagrees with the chunk's has that chunk's bytes skipped
/// (recorded as a warning) rather than corrupting its layout.
pub fn load(world: &mut World, bytes: &[u8]) -> Result<LoadReport> {
    let mut report = LoadReport::default();
    let mut cursor = Cursor::new(bytes);

    let magic = cursor.u32()?;
    if magic != MAGIC {
        return Err(GravitasError::SaveFormatInvalid { found_magic: magic });
    }
    let version = cursor.u32()?;
    if version != VERSION {
        return Err(GravitasError::SaveVersionMismatch { found_version: version, expected_version: VERSION });
    }
    let num_entities = cursor.u32()?;
    let num_component_types = cursor.u32()?;

    world.clear_all_active();
    world.next_entity_id = num_entities;

    for _ in 0..num_component_types {
        let Some(type_id) = cursor.try_u32() else { break };
        let element_size = cursor.u32()? as usize;
        let count = cursor.u32()?;

        let size_matches = world.pools.get(&type_id).map(|p| p.element_size == element_size);

        match size_matches {
            Some(false) => {
                report.warnings.push(format!(
                    "skipped component type {type_id}: pool element size mismatch (existing vs. snapshot)"
                ));
                cursor.skip(count as usize * (4 + element_size))?;
            }
            Some(true) | None => {
                if world.ensure_pool(type_id, element_size).is_none() {
                    report
                        .warnings
                        .push(format!("skipped component type {type_id}: component-type table is full"));
                    cursor.skip(count as usize * (4 + element_size))?;
                    continue;
                }
                for _ in 0..count {
                    let entity = cursor.u32()?;
                    let data = cursor.bytes(element_size)?;
                    let pool = world.pools.get_mut(&type_id).unwrap();
                    if (entity as usize) < pool.active.len() {
                        let start = entity as usize * pool.element_size;
                        pool.data[start..start + pool.element_size].copy_from_slice(data);
                        pool.active[entity as usize] = true;
                    }
                }
            }
        }
    }

    Ok(report)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn u32(&mut self) -> Result<u32> {
        self.try_u32().ok_or(GravitasError::SaveFormatInvalid { found_magic: 0 })
    }

    fn try_u32(&mut self) -> Option<u32> {
        if self.pos + 4 > self.bytes.len() {
            return None;
        }
        let v = u32::from_le_bytes(self.bytes[self.pos..self.pos + 4].try_into().unwrap());
        self.pos += 4;
        Some(v)
    }

    fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.bytes.len() {
            return Err(GravitasError::SaveFormatInvalid { found_magic: 0 });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn skip(&mut self, n: usize) -> Result<()> {
        if self.pos + n > self.bytes.len() {
            return Err(GravitasError::SaveFormatInvalid { found_magic: 0 });
        }
        self.pos += n;
        Ok(())
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

    #[derive(Clone, Copy, PartialEq, Debug)]
    struct Velocity {
        dx: f64,
        dy: f64,
    }

    const TRANSFORM: u32 = 0;
    const VELOCITY: u32 = 1;

    #[test]
    fn round_trips_every_active_component() {
        let mut world = World::new(16);
        let mut expect = Vec::new();
        for i in 0..3u32 {
            let e = world.create_entity().unwrap();
            let t = Transform { x: i as f64, y: i as f64 * 2.0, z: i as f64 * 3.0 };
            let v = Velocity { dx: i as f64 + 0.5, dy: -(i as f64) };
            world.add(TRANSFORM, e, t).unwrap();
            world.add(VELOCITY, e, v).unwrap();
            expect.push((e, t, v));
        }

        let bytes = save(&world);
        let mut loaded = World::new(16);
        let report = load(&mut loaded, &bytes).unwrap();
        assert!(report.warnings.is_empty());
        assert_eq!(loaded.next_entity_id(), 4);

        for (e, t, v) in expect {
            assert_eq!(loaded.get::<Transform>(TRANSFORM, e), Some(t));
            assert_eq!(loaded.get::<Velocity>(VELOCITY, e), Some(v));
        }
    }

    #[test]
    fn rejects_bad_magic() {
        let bytes = vec![0u8; 16];
        let mut world = World::new(16);
        let err = load(&mut world, &bytes).unwrap_err();
        assert!(matches!(err, GravitasError::SaveFormatInvalid { .. }));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut world = World::new(16);
        let e = world.create_entity().unwrap();
        world.add(TRANSFORM, e, Transform { x: 1.0, y: 1.0, z: 1.0 }).unwrap();
        let mut bytes = save(&world);
        bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
        let err = load(&mut world, &bytes).unwrap_err();
        assert!(matches!(err, GravitasError::SaveVersionMismatch { .. }));
    }

    #[test]
    fn size_mismatch_skips_the_chunk_with_a_warning() {
        let mut world = World::new(16);
        let e = world.create_entity().unwrap();
        world.add(TRANSFORM, e, Transform { x: 1.0, y: 2.0, z: 3.0 }).unwrap();
        let bytes = save(&world);

        let mut other = World::new(16);
        let e2 = other.create_entity().unwrap();
        other.add(TRANSFORM, e2, 7u8).unwrap(); // same type_id, different size

        let report = load(&mut other, &bytes).unwrap();
        assert_eq!(report.warnings.len(), 1);
    }
}
