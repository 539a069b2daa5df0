//! Geodesic equation of motion in velocity form.

use crate::geodesic::GeodesicState;
use crate::metric::Metric;
use crate::tensor::christoffel_from_metric_derivs;

/// Finite-difference step used to build the numerical Christoffel symbols.
const CHRISTOFFEL_EPS: f64 = 1e-6;

/// Compute the time derivative of the phase space state.
///
/// dx^mu/dlambda = u^mu
/// du^alpha/dlambda = -Gamma^alpha_{mu nu} u^mu u^nu
///
/// The connection coefficients are obtained numerically at every call via
/// [`christoffel_from_metric_derivs`], rather than from an analytic
/// per-metric Hamiltonian derivative.
pub fn get_state_derivative<M: Metric>(state: &GeodesicState, metric: &M) -> GeodesicState {
    let r = state.x[1];
    let theta = state.x[2];
    let u = state.u;

    let gamma = christoffel_from_metric_derivs(metric, r, theta, CHRISTOFFEL_EPS);

    let mut du = [0.0; 4];
    for (alpha, du_alpha) in du.iter_mut().enumerate() {
        let mut sum = 0.0;
        for mu in 0..4 {
            for nu in 0..4 {
                sum += gamma[alpha][mu][nu] * u[mu] * u[nu];
            }
        }
        *du_alpha = -sum;
    }

    GeodesicState { x: u, u: du }
}
