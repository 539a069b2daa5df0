//! Camera-ray construction: map a pixel on the observer's image plane to an
//! initial null [`GeodesicState`] through the local spacetime.

use crate::geodesic::GeodesicState;
use crate::math::Vec3;
use crate::metric::Metric;

/// Build the initial null-geodesic state for a camera ray.
///
/// `camera_pos` and `forward`/`up` are given in the Cartesian frame local to
/// the camera; `(u, v)` are normalized pixel coordinates in `[-1, 1]` and
/// `half_fov` is the half-angle field of view (radians).
///
/// The Cartesian ray direction is projected onto the local spherical basis
/// (the Jacobian of spherical w.r.t. Cartesian coordinates at `camera_pos`)
/// to obtain a contravariant spatial direction `(d_r, d_theta, d_phi)`, which
/// is then handed to [`GeodesicState::null_ray`] to solve for `u^t` from the
/// null condition `g_{mu nu} u^mu u^nu = 0`.
pub fn camera_ray<M: Metric>(
    camera_pos: Vec3,
    forward: Vec3,
    up: Vec3,
    u: f64,
    v: f64,
    half_fov: f64,
    metric: &M,
) -> GeodesicState {
    let forward_n = forward.normalize();
    let right = forward_n.cross(up).normalize();
    let up_n = right.cross(forward_n);

    let tan_half = half_fov.tan();
    let dir = forward_n
        .add(right.scale(u * tan_half))
        .add(up_n.scale(v * tan_half))
        .normalize();

    let (r, theta, phi) = camera_pos.to_spherical();
    let sin_theta = theta.sin();

    // Local spherical unit basis at the camera position.
    let r_hat = Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), theta.cos());
    let theta_hat = Vec3::new(
        theta.cos() * phi.cos(),
        theta.cos() * phi.sin(),
        -sin_theta,
    );
    let phi_hat = Vec3::new(-phi.sin(), phi.cos(), 0.0);

    let d_r = dir.dot(r_hat);
    let d_theta = if r.abs() > 1e-12 { dir.dot(theta_hat) / r } else { 0.0 };
    let d_phi = if r.abs() > 1e-12 && sin_theta.abs() > 1e-12 {
        dir.dot(phi_hat) / (r * sin_theta)
    } else {
        0.0
    };

    GeodesicState::null_ray(metric, r, theta, phi, d_r, d_theta, d_phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::hamiltonian;
    use crate::metric::Schwarzschild;

    #[test]
    fn camera_ray_is_null() {
        let bh = Schwarzschild::new(1.0);
        let cam = Vec3::new(0.0, -20.0, 0.0);
        let forward = Vec3::new(0.0, 1.0, 0.0);
        let up = Vec3::new(0.0, 0.0, 1.0);
        let state = camera_ray(cam, forward, up, 0.0, 0.0, 0.5, &bh);
        assert!(hamiltonian(&state, &bh).abs() < 1e-8);
    }

    #[test]
    fn off_center_pixels_carry_nonzero_transverse_momentum() {
        let bh = Schwarzschild::new(1.0);
        let cam = Vec3::new(0.0, -20.0, 0.0);
        let forward = Vec3::new(0.0, 1.0, 0.0);
        let up = Vec3::new(0.0, 0.0, 1.0);
        let centered = camera_ray(cam, forward, up, 0.0, 0.0, 0.5, &bh);
        let offset = camera_ray(cam, forward, up, 0.8, 0.0, 0.5, &bh);
        assert_ne!(centered.u[3], offset.u[3]);
    }
}
