//! Procedural surface descriptor: the contract between a planet/star/black
//! hole and an external texture generator.
//!
//! This module defines only the callback contract and the UV/Cartesian
//! conversion the external generator is expected to use -- the generator
//! itself (the thing that walks a texture buffer and writes RGBA8 pixels)
//! is plumbing, outside this crate's scope.

use crate::math::Vec3;

/// `get_surface_color`: given a point on the unit sphere, return a color
/// with components in `[0, 1]`.
pub type SurfaceColorFn = Box<dyn Fn(Vec3) -> Vec3 + Send + Sync>;

/// A planet/star/black-hole surface descriptor: a base color, a couple of
/// scalar physical parameters, and an optional surface-color callback.
pub struct PlanetDescriptor {
    pub base_color: Vec3,
    pub radius: f64,
    pub mass: f64,
    pub get_surface_color: Option<SurfaceColorFn>,
}

impl PlanetDescriptor {
    pub fn new(base_color: Vec3, radius: f64, mass: f64) -> Self {
        Self { base_color, radius, mass, get_surface_color: None }
    }

    pub fn with_surface_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec3) -> Vec3 + Send + Sync + 'static,
    {
        self.get_surface_color = Some(Box::new(f));
        self
    }

    /// Sample the surface color at a point on the unit sphere, falling back
    /// to `base_color` when no callback is set. Each channel is clamped to
    /// `[0, 1]`.
    pub fn sample(&self, point_on_unit_sphere: Vec3) -> Vec3 {
        let raw = match &self.get_surface_color {
            Some(f) => f(point_on_unit_sphere),
            None => self.base_color,
        };
        clamp01(raw)
    }
}

fn clamp01(v: Vec3) -> Vec3 {
    Vec3::new(v.x.clamp(0.0, 1.0), v.y.clamp(0.0, 1.0), v.z.clamp(0.0, 1.0))
}

/// Equirectangular UV -> unit-sphere point, ISO convention: `u in [0,1]`
/// maps to longitude in `[-pi, pi]`, `v in [0,1]` maps to latitude in
/// `[pi/2, -pi/2]`, and `x = cos(lat) cos(lon)`, `y = cos(lat) sin(lon)`,
/// `z = sin(lat)`.
///
/// This is the conversion the external texture generator applies before
/// calling [`PlanetDescriptor::sample`]; it's provided here so both sides
/// of the contract agree on the same convention.
pub fn equirect_to_unit_sphere(u: f64, v: f64) -> Vec3 {
    let lon = (u * 2.0 - 1.0) * std::f64::consts::PI;
    let lat = (0.5 - v) * std::f64::consts::PI;
    Vec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_callback_falls_back_to_base_color() {
        let d = PlanetDescriptor::new(Vec3::new(0.2, 0.4, 0.6), 1.0, 1.0);
        assert_eq!(d.sample(Vec3::new(0.0, 0.0, 1.0)), Vec3::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn callback_output_is_clamped_to_unit_range() {
        let d = PlanetDescriptor::new(Vec3::ZERO, 1.0, 1.0).with_surface_fn(|_p| Vec3::new(1.5, -0.5, 0.5));
        assert_eq!(d.sample(Vec3::new(0.0, 1.0, 0.0)), Vec3::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn equirect_corners_land_on_expected_poles_and_meridian() {
        let north_pole = equirect_to_unit_sphere(0.5, 0.0);
        assert!((north_pole.z - 1.0).abs() < 1e-10);

        let south_pole = equirect_to_unit_sphere(0.5, 1.0);
        assert!((south_pole.z + 1.0).abs() < 1e-10);

        let prime_meridian_equator = equirect_to_unit_sphere(0.5, 0.5);
        assert!((prime_meridian_equator.x - 1.0).abs() < 1e-10);
    }
}
