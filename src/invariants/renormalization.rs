//! 4-velocity renormalization for null geodesics.
//!
//! Projects the radial component u^r onto the null constraint surface
//! g_{mu nu} u^mu u^nu = 0 to correct numerical drift accumulated during
//! integration.

use crate::geodesic::GeodesicState;
use crate::metric::Metric;

/// Renormalize the 4-velocity to strictly satisfy the null condition
/// `g_{mu nu} u^mu u^nu = 0`.
///
/// Solves for `u^r` from the quadratic `A*(u^r)^2 + B*u^r + C = 0`, holding
/// `u^t`, `u^theta`, `u^phi` fixed, and choosing the root closest to the
/// current `u^r` to preserve ray direction.
pub fn renormalize_null<M: Metric>(state: &mut GeodesicState, metric: &M) {
    let r = state.x[1];
    let theta = state.x[2];
    let g = metric.covariant(r, theta);
    let arr = g.as_array();

    let u_t = state.u[0];
    let u_r = state.u[1];
    let u_th = state.u[2];
    let u_ph = state.u[3];

    // Quadratic in u^r: A*(u^r)^2 + B*u^r + C = 0
    let a_quad = arr[5]; // g_rr
    let b_quad = 2.0 * (arr[1] * u_t + arr[7] * u_ph); // 2(g_tr*u^t + g_rphi*u^phi)
    let c_quad = arr[0] * u_t * u_t
        + arr[10] * u_th * u_th
        + arr[15] * u_ph * u_ph
        + 2.0 * arr[3] * u_t * u_ph;

    if a_quad.abs() > 1e-12 {
        let discriminant = b_quad * b_quad - 4.0 * a_quad * c_quad;
        if discriminant >= 0.0 {
            let sqrt_d = discriminant.sqrt();
            let sol1 = (-b_quad + sqrt_d) / (2.0 * a_quad);
            let sol2 = (-b_quad - sqrt_d) / (2.0 * a_quad);

            // Choose root closest to current u^r
            state.u[1] = if (sol1 - u_r).abs() < (sol2 - u_r).abs() {
                sol1
            } else {
                sol2
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Schwarzschild;

    #[test]
    fn renormalization_preserves_null_condition() {
        let bh = Schwarzschild::new(1.0);
        let mut state = GeodesicState::null_ray(
            &bh, 15.0, std::f64::consts::FRAC_PI_2, 0.0, -1.0, 0.0, 2.0,
        );
        // Perturb u^r slightly to simulate drift, then renormalize.
        state.u[1] += 0.05;
        renormalize_null(&mut state, &bh);
        assert!(crate::invariants::hamiltonian(&state, &bh).abs() < 1e-9);
    }
}
