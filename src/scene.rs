//! Scene orchestrator: owns bodies, an optional disk, and an optional Kerr
//! black hole descriptor, and advances the N-body simulation by `dt`.
//!
//! Unlike [`crate::nbody::System`] (a fixed-capacity array used internally
//! by the integrators for scratch copies), a `Scene` owns a dynamically
//! sized body list -- the public, externally-addressed surface described in
//! the data model.

use crate::metric::Kerr;
use crate::nbody::{Body, IntegratorScheme, NBodyConfig};

/// Accretion disk geometry: inner/outer radius, dimensionless accretion
/// rate, and inclination relative to the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskDescriptor {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub accretion_rate: f64,
    pub inclination: f64,
}

/// Holds bodies, at most one disk, and at most one black hole; advances
/// simulation time via the configured integrator scheme.
///
/// Bodies are referenced externally by index. Indices are stable across a
/// single frame but may be compacted by [`Scene::remove_body`]; callers must
/// not hold a body reference across an `update` or `remove_body` call.
pub struct Scene {
    bodies: Vec<Body>,
    disk: Option<DiskDescriptor>,
    black_hole: Option<Kerr>,
    time: f64,
    scheme: IntegratorScheme,
    config: NBodyConfig,
    dt_hint: f64,
}

impl Scene {
    pub fn new(scheme: IntegratorScheme, config: NBodyConfig) -> Self {
        Self { bodies: Vec::new(), disk: None, black_hole: None, time: 0.0, scheme, config, dt_hint: 0.01 }
    }

    pub fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Remove the body at `index`, shifting the trailing bodies down by one
    /// (compacting) so indices below `index` stay valid.
    pub fn remove_body(&mut self, index: usize) -> Option<Body> {
        if index >= self.bodies.len() {
            return None;
        }
        Some(self.bodies.remove(index))
    }

    pub fn set_disk(&mut self, disk: DiskDescriptor) {
        self.disk = Some(disk);
    }

    pub fn clear_disk(&mut self) {
        self.disk = None;
    }

    pub fn set_black_hole(&mut self, bh: Kerr) {
        self.black_hole = Some(bh);
    }

    pub fn clear_black_hole(&mut self) {
        self.black_hole = None;
    }

    pub fn set_scheme(&mut self, scheme: IntegratorScheme) {
        self.scheme = scheme;
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn disk(&self) -> Option<&DiskDescriptor> {
        self.disk.as_ref()
    }

    pub fn black_hole(&self) -> Option<&Kerr> {
        self.black_hole.as_ref()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn config(&self) -> &NBodyConfig {
        &self.config
    }

    /// Advance every body by `dt` under the scene's configured integrator.
    /// This is the scene's single public mutator of simulation state; a
    /// conservation-monitor baseline (see [`crate::nbody::compute_invariants`])
    /// remains the caller's to check against before and after.
    pub fn update(&mut self, dt: f64) {
        crate::nbody::step(&mut self.bodies, &mut self.time, self.scheme, &self.config, dt, &mut self.dt_hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::nbody::BodyKind;

    #[test]
    fn update_advances_time_and_moves_bodies() {
        let mut scene = Scene::new(IntegratorScheme::Leapfrog, NBodyConfig::default());
        scene.add_body(Body::new("sun", BodyKind::Star, 1.0, 1.0, Vec3::ZERO, Vec3::ZERO).fixed());
        scene.add_body(Body::new(
            "planet",
            BodyKind::Planet,
            1e-6,
            1.0,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ));

        scene.update(0.01);
        assert!((scene.time() - 0.01).abs() < 1e-12);
        assert_ne!(scene.bodies()[1].position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(scene.bodies()[0].position, Vec3::ZERO); // fixed body never moves
    }

    #[test]
    fn remove_body_compacts_trailing_indices() {
        let mut scene = Scene::new(IntegratorScheme::Rk4, NBodyConfig::default());
        scene.add_body(Body::new("a", BodyKind::Moon, 1.0, 1.0, Vec3::ZERO, Vec3::ZERO));
        scene.add_body(Body::new("b", BodyKind::Moon, 2.0, 1.0, Vec3::ZERO, Vec3::ZERO));
        scene.add_body(Body::new("c", BodyKind::Moon, 3.0, 1.0, Vec3::ZERO, Vec3::ZERO));

        scene.remove_body(0);
        assert_eq!(scene.bodies().len(), 2);
        assert_eq!(scene.bodies()[0].name, "b");
        assert_eq!(scene.bodies()[1].name, "c");
    }
}
