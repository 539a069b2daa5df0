//! Geodesic integration: ray states, integrators, and trajectory computation.
//!
//! This module provides the core machinery to trace null geodesics (photon paths)
//! through any spacetime that implements [`Metric`](crate::metric::Metric).

mod camera;
mod hamiltonian;
mod integrator;
mod termination;

pub use camera::camera_ray;
pub use hamiltonian::get_state_derivative;
pub use integrator::{step_rk4, step_symplectic, AdaptiveStepper, IntegrationMethod, IntegrationOptions};
pub use termination::{DiskGeometry, TerminationReason};

use crate::metric::Metric;

/// 8-dimensional phase space state for a geodesic, in velocity form.
///
/// Coordinates x^mu = (t, r, theta, phi) in Boyer-Lindquist or Kerr-Schild.
/// Contravariant 4-velocity u^mu = (u^t, u^r, u^theta, u^phi) = dx^mu/dlambda.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct GeodesicState {
    /// Spacetime coordinates (t, r, theta, phi).
    pub x: [f64; 4],
    /// Contravariant 4-velocity (u^t, u^r, u^theta, u^phi).
    pub u: [f64; 4],
}

impl GeodesicState {
    /// Create a new geodesic state directly from coordinates and 4-velocity.
    pub fn new(
        t: f64, r: f64, theta: f64, phi: f64,
        ut: f64, ur: f64, utheta: f64, uphi: f64,
    ) -> Self {
        Self {
            x: [t, r, theta, phi],
            u: [ut, ur, utheta, uphi],
        }
    }

    /// Current radial coordinate.
    #[inline]
    pub fn r(&self) -> f64 { self.x[1] }

    /// Current polar angle.
    #[inline]
    pub fn theta(&self) -> f64 { self.x[2] }

    /// Create a null ray at `(r, theta, phi)` whose spatial direction is
    /// `(d_r, d_theta, d_phi)`, solving the null condition
    /// `g_{mu nu} u^mu u^nu = 0` for `u^t`.
    ///
    /// This is quadratic in `u^t` whenever the metric carries a
    /// frame-dragging cross term `g_tphi != 0` (any spinning Kerr black
    /// hole): `g_tt*(u^t)^2 + 2*g_tphi*d_phi*u^t + C = 0`, where `C` collects
    /// the purely spatial terms. The future-directed root is kept; falls
    /// back to `u^t = 1` when the discriminant goes negative, which happens
    /// near the coordinate singularity in `g_tt` at the horizon.
    pub fn null_ray<M: Metric>(
        metric: &M,
        r: f64,
        theta: f64,
        phi: f64,
        d_r: f64,
        d_theta: f64,
        d_phi: f64,
    ) -> Self {
        let g = metric.covariant(r, theta);
        let arr = g.as_array();
        let g_tt = arr[0];
        let g_tph = arr[3];
        let g_rr = arr[5];
        let g_thth = arr[10];
        let g_phph = arr[15];

        let a_quad = g_tt;
        let b_quad = 2.0 * g_tph * d_phi;
        let c_quad = g_rr * d_r * d_r + g_thth * d_theta * d_theta + g_phph * d_phi * d_phi;

        let discriminant = b_quad * b_quad - 4.0 * a_quad * c_quad;
        let u_t = if a_quad.abs() > 1e-12 && discriminant >= 0.0 {
            (-b_quad - discriminant.sqrt()) / (2.0 * a_quad)
        } else {
            1.0
        };

        Self {
            x: [0.0, r, theta, phi],
            u: [u_t, d_r, d_theta, d_phi],
        }
    }

    /// Lower the contravariant 4-velocity to covariant momentum:
    /// p_mu = g_{mu nu} u^nu.
    pub fn covariant_momentum<M: Metric>(&self, metric: &M) -> [f64; 4] {
        let g = metric.covariant(self.x[1], self.x[2]);
        g.raise_index(&self.u)
    }
}

// ===== Linear-combination helpers used by the integrators =====
impl GeodesicState {
    pub(crate) fn add_scaled(&self, k: Self, s: f64) -> Self {
        let mut n = *self;
        for i in 0..4 {
            n.x[i] += k.x[i] * s;
            n.u[i] += k.u[i] * s;
        }
        n
    }
}

/// The result of integrating a geodesic to completion.
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// The final state after integration.
    pub final_state: GeodesicState,
    /// Reason integration stopped.
    pub termination: TerminationReason,
    /// Number of integration steps taken.
    pub steps_taken: usize,
    /// Maximum absolute value of the null-condition invariant `g_{mu nu}
    /// u^mu u^nu` seen during integration (should be ~0 for null rays).
    pub max_hamiltonian_drift: f64,
    /// Optionally, all intermediate states (if `record_path` was true).
    pub path: Option<Vec<GeodesicState>>,
}

/// Reflect `theta` back into `[0, pi]` and wrap `phi` into `(-pi, pi]`.
///
/// Crossing the polar axis (theta < 0 or theta > pi) reflects theta about
/// the nearer pole and shifts phi by pi, since continuing past a pole means
/// continuing on the opposite azimuthal side.
fn wrap_coordinates(x: &mut [f64; 4]) {
    use std::f64::consts::PI;

    let mut theta = x[2];
    let mut phi = x[3];

    while theta < 0.0 || theta > PI {
        if theta < 0.0 {
            theta = -theta;
            phi += PI;
        } else {
            theta = 2.0 * PI - theta;
            phi += PI;
        }
    }
    x[2] = theta;

    let two_pi = 2.0 * PI;
    let mut wrapped = phi % two_pi;
    if wrapped > PI {
        wrapped -= two_pi;
    } else if wrapped <= -PI {
        wrapped += two_pi;
    }
    x[3] = wrapped;
}

/// Integrate a geodesic through a given spacetime.
///
/// This is the primary high-level API for tracing photon paths.
///
/// # Example
///
/// ```
/// use gravitas::prelude::*;
/// use gravitas::metric::Metric;
/// use gravitas::geodesic::{integrate, GeodesicState};
///
/// let bh = Kerr::new(1.0, 0.9);
/// let ray = GeodesicState::null_ray(&bh, 20.0, std::f64::consts::FRAC_PI_2, 0.0, -1.0, 0.0, 3.5);
///
/// let traj = integrate(&ray, &bh, &IntegrationOptions::default());
/// println!("Ray terminated at r = {:.4}", traj.final_state.r());
/// ```
pub fn integrate<M: Metric>(
    initial: &GeodesicState,
    metric: &M,
    options: &IntegrationOptions,
) -> Trajectory {
    let mut state = *initial;
    let mut stepper = AdaptiveStepper::new(options.tolerance);
    let mut h = options.initial_step;

    let horizon = metric.event_horizon();
    let mut max_drift = 0.0;
    let mut steps = 0;

    let mut path = if options.record_path {
        Some(vec![state])
    } else {
        None
    };

    // Renormalize onto the null constraint surface at start.
    crate::invariants::renormalize_null(&mut state, metric);

    for _ in 0..options.max_steps {
        // Check termination
        let term = state.check_termination(horizon, options.escape_radius, options.disk.as_ref());
        if term != TerminationReason::None {
            return Trajectory {
                final_state: state,
                termination: term,
                steps_taken: steps,
                max_hamiltonian_drift: max_drift,
                path,
            };
        }

        // Step
        match options.method {
            IntegrationMethod::AdaptiveRKF45 => {
                h = stepper.step(&mut state, metric, h);
            }
            IntegrationMethod::RK4 { step_size } => {
                step_rk4(&mut state, metric, step_size);
            }
            IntegrationMethod::Symplectic { step_size } => {
                step_symplectic(&mut state, metric, step_size);
            }
        }

        wrap_coordinates(&mut state.x);

        // Renormalize periodically
        if steps % options.renormalize_interval == 0 {
            crate::invariants::renormalize_null(&mut state, metric);
        }

        // Track drift
        let h_val = crate::invariants::hamiltonian(&state, metric).abs();
        if h_val > max_drift {
            max_drift = h_val;
        }

        steps += 1;

        if let Some(ref mut p) = path {
            p.push(state);
        }
    }

    Trajectory {
        final_state: state,
        termination: TerminationReason::MaxSteps,
        steps_taken: steps,
        max_hamiltonian_drift: max_drift,
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Kerr, Schwarzschild};

    fn options(escape_radius: f64) -> IntegrationOptions {
        IntegrationOptions {
            method: IntegrationMethod::AdaptiveRKF45,
            tolerance: 1e-10,
            initial_step: 0.05,
            max_steps: 2000,
            escape_radius,
            renormalize_interval: 5,
            record_path: false,
            disk: None,
        }
    }

    #[test]
    fn radially_infalling_photon_is_captured() {
        let bh = Schwarzschild::new(1.0);
        let ray = GeodesicState::null_ray(&bh, 10.0, std::f64::consts::FRAC_PI_2, 0.0, -1.0, 0.0, 0.0);
        let traj = integrate(&ray, &bh, &options(100.0));
        assert_eq!(traj.termination, TerminationReason::Horizon);
        assert!(traj.final_state.r() < bh.event_horizon() * 1.01 + 0.1);
    }

    #[test]
    fn wide_impact_parameter_photon_escapes() {
        let bh = Schwarzschild::new(1.0);
        // Large transverse direction relative to the radial one pushes the
        // impact parameter well past the critical 3*sqrt(3)*M, so the ray escapes.
        let ray = GeodesicState::null_ray(&bh, 10.0, std::f64::consts::FRAC_PI_2, 0.0, -1.0, 0.0, 20.0);
        let traj = integrate(&ray, &bh, &options(100.0));
        assert_eq!(traj.termination, TerminationReason::Escape);
        assert!(traj.final_state.r() > 100.0);
    }

    #[test]
    fn equatorial_ray_through_disk_band_reports_disk_crossing() {
        let bh = Schwarzschild::new(1.0);
        let mut opts = options(100.0);
        opts.disk = Some(DiskGeometry::new(6.0, 20.0, 0.5));
        // Starts outside the disk band and falls radially inward through it;
        // purely equatorial (theta stays at pi/2), so r*cos(theta) == 0.
        let ray = GeodesicState::null_ray(&bh, 25.0, std::f64::consts::FRAC_PI_2, 0.0, -1.0, 0.0, 0.0);
        let traj = integrate(&ray, &bh, &opts);
        assert_eq!(traj.termination, TerminationReason::DiskCrossing);
    }

    #[test]
    fn null_ray_satisfies_null_condition_on_spinning_kerr() {
        // g_tphi != 0 here, exercising the quadratic (not the degenerate
        // Schwarzschild sqrt) branch of the u^t solve.
        let bh = Kerr::new(1.0, 0.9);
        let ray = GeodesicState::null_ray(&bh, 15.0, std::f64::consts::FRAC_PI_2, 0.0, -1.0, 0.0, 2.5);
        assert!(crate::invariants::hamiltonian(&ray, &bh).abs() < 1e-9);
    }

    #[test]
    fn theta_reflection_shifts_phi_by_pi() {
        let mut x = [0.0, 10.0, -0.1, 0.2];
        wrap_coordinates(&mut x);
        assert!((x[2] - 0.1).abs() < 1e-12);
        assert!((x[3] - (0.2 + std::f64::consts::PI)).abs() < 1e-12);
    }

    #[test]
    fn phi_wraps_into_principal_range() {
        let mut x = [0.0, 10.0, 1.0, 4.0 * std::f64::consts::PI + 0.3];
        wrap_coordinates(&mut x);
        assert!(x[3] > -std::f64::consts::PI && x[3] <= std::f64::consts::PI);
        assert!((x[3] - 0.3).abs() < 1e-9);
    }
}

impl GeodesicState {
    fn check_termination(
        &self,
        horizon: f64,
        escape_r: f64,
        disk: Option<&termination::DiskGeometry>,
    ) -> TerminationReason {
        let r = self.x[1];
        let theta = self.x[2];
        if r < horizon * 1.001 {
            TerminationReason::Horizon
        } else if r > escape_r {
            TerminationReason::Escape
        } else if disk.is_some_and(|d| d.contains(r, theta)) {
            TerminationReason::DiskCrossing
        } else {
            TerminationReason::None
        }
    }
}
