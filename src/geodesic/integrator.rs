//! Numerical integrators for geodesic equations.
//!
//! Three methods are available:
//!
//! 1. **Adaptive Richardson** -- RK4 at step `h` vs. two steps of `h/2`,
//!    extrapolating the error between them to control step size.
//! 2. **RK4** -- Fixed-step 4th-order Runge-Kutta.
//! 3. **Symplectic Implicit Midpoint** -- 2nd-order, energy-conserving.

use crate::geodesic::{termination::DiskGeometry, hamiltonian::get_state_derivative, GeodesicState};
use crate::metric::Metric;

/// Method used for geodesic integration.
#[derive(Debug, Clone, Copy)]
pub enum IntegrationMethod {
    /// Adaptive Richardson extrapolation with error control.
    AdaptiveRKF45,
    /// Fixed-step 4th-order Runge-Kutta.
    RK4 { step_size: f64 },
    /// 2nd-order Implicit Midpoint (symplectic, energy-conserving).
    Symplectic { step_size: f64 },
}

/// Options for geodesic integration.
#[derive(Debug, Clone)]
pub struct IntegrationOptions {
    pub method: IntegrationMethod,
    pub tolerance: f64,
    pub initial_step: f64,
    pub max_steps: usize,
    pub escape_radius: f64,
    pub renormalize_interval: usize,
    pub record_path: bool,
    /// Accretion disk geometry to test for a `DiskCrossing` termination.
    /// `None` means the ray never terminates on disk intersection.
    pub disk: Option<DiskGeometry>,
}

impl Default for IntegrationOptions {
    fn default() -> Self {
        Self {
            method: IntegrationMethod::AdaptiveRKF45,
            tolerance: 1e-8,
            initial_step: 0.01,
            max_steps: 10_000,
            escape_radius: 100.0,
            renormalize_interval: 10,
            record_path: false,
            disk: None,
        }
    }
}

/// Adaptive step-size controller using Richardson extrapolation.
///
/// Each trial step compares one RK4 step of size `h` against two RK4 steps
/// of size `h/2`; the Euclidean norm of the coordinate difference between
/// the two estimates is the local error, and the half-step result is kept
/// on acceptance.
pub struct AdaptiveStepper {
    pub min_step: f64,
    pub max_step: f64,
    pub tolerance: f64,
}

impl AdaptiveStepper {
    pub fn new(tolerance: f64) -> Self {
        Self {
            min_step: 1e-6,
            max_step: 10.0,
            tolerance,
        }
    }

    /// Perform a single adaptive step. Updates `state` in place.
    /// Returns the recommended step size for the next step.
    pub fn step<M: Metric>(
        &mut self,
        state: &mut GeodesicState,
        metric: &M,
        h_try: f64,
    ) -> f64 {
        let mut h = h_try.clamp(-self.max_step, self.max_step);
        if h.abs() < self.min_step {
            h = self.min_step * h.signum();
        }

        loop {
            let (candidate, err) = richardson_step(state, metric, h);

            let growth = (0.9 * (self.tolerance / (err + 1e-15)).powf(1.0 / 5.0))
                .clamp(0.1, 4.0);
            let next_h = (h * growth).clamp(-self.max_step, self.max_step);

            if err <= self.tolerance || h.abs() <= self.min_step {
                *state = candidate;
                return next_h;
            }

            h = next_h;
            if h.abs() < self.min_step {
                h = self.min_step * h.signum();
            }
        }
    }
}

/// One Richardson-extrapolation trial: RK4 over `h` vs. two RK4 steps of
/// `h/2`. Returns the half-step state (the higher-accuracy estimate) and
/// the Euclidean norm of the coordinate difference between the two.
fn richardson_step<M: Metric>(
    state: &GeodesicState,
    metric: &M,
    h: f64,
) -> (GeodesicState, f64) {
    let mut full = *state;
    step_rk4(&mut full, metric, h);

    let mut half = *state;
    step_rk4(&mut half, metric, h * 0.5);
    step_rk4(&mut half, metric, h * 0.5);

    let mut sum_sq = 0.0;
    for i in 0..4 {
        let d = half.x[i] - full.x[i];
        sum_sq += d * d;
    }

    (half, sum_sq.sqrt())
}

/// 4th-order Runge-Kutta fixed step.
pub fn step_rk4<M: Metric>(state: &mut GeodesicState, metric: &M, h: f64) {
    let k1 = get_state_derivative(state, metric);
    let k2 = get_state_derivative(&state.add_scaled(k1, 0.5 * h), metric);
    let k3 = get_state_derivative(&state.add_scaled(k2, 0.5 * h), metric);
    let k4 = get_state_derivative(&state.add_scaled(k3, h), metric);

    for i in 0..4 {
        state.x[i] += (h / 6.0) * (k1.x[i] + 2.0 * k2.x[i] + 2.0 * k3.x[i] + k4.x[i]);
        state.u[i] += (h / 6.0) * (k1.u[i] + 2.0 * k2.u[i] + 2.0 * k3.u[i] + k4.u[i]);
    }
}

/// 2nd-order Implicit Midpoint (symplectic integrator).
///
/// Uses fixed-point iteration (2 iterations) for the implicit solve.
/// Exactly conserves the Hamiltonian over long integrations.
pub fn step_symplectic<M: Metric>(state: &mut GeodesicState, metric: &M, h: f64) {
    let mut s_mid = *state;
    for _ in 0..2 {
        let d = get_state_derivative(&s_mid, metric);
        let mut s_next = *state;
        for i in 0..4 {
            s_next.x[i] = state.x[i] + d.x[i] * h;
            s_next.u[i] = state.u[i] + d.u[i] * h;
            s_mid.x[i] = 0.5 * (state.x[i] + s_next.x[i]);
            s_mid.u[i] = 0.5 * (state.u[i] + s_next.u[i]);
        }
    }
    let d_final = get_state_derivative(&s_mid, metric);
    for i in 0..4 {
        state.x[i] += d_final.x[i] * h;
        state.u[i] += d_final.u[i] * h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Schwarzschild;

    #[test]
    fn richardson_step_size_grows_when_error_well_under_tolerance() {
        let bh = Schwarzschild::new(1.0);
        let ray = GeodesicState::null_ray(&bh, 30.0, std::f64::consts::FRAC_PI_2, 0.0, -1.0, 0.0, 0.5);
        let mut stepper = AdaptiveStepper::new(1e-6);
        let mut state = ray;
        let h_next = stepper.step(&mut state, &bh, 0.01);
        assert!(h_next > 0.0);
    }

    #[test]
    fn rk4_step_advances_coordinates() {
        let bh = Schwarzschild::new(1.0);
        let mut state = GeodesicState::null_ray(&bh, 30.0, std::f64::consts::FRAC_PI_2, 0.0, -1.0, 0.0, 0.0);
        let r0 = state.r();
        step_rk4(&mut state, &bh, 0.1);
        assert!(state.r() < r0);
    }
}
