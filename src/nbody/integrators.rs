//! Fixed-capacity body array and the four integration schemes: RK4,
//! Leapfrog (KDK), Yoshida 4th-order symplectic, and RKF45 (a Richardson
//! extrapolation built on RK4, not an embedded Fehlberg pair).

use crate::math::Vec3;
use crate::nbody::body::Body;
use crate::nbody::forces::{accumulate, BodyDerivative};
use crate::nbody::units::NBodyConfig;

/// Default capacity of a [`System`]'s body array.
pub const DEFAULT_CAPACITY: usize = 128;

/// Which scheme [`System::step`] / [`step`] should advance the bodies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorScheme {
    Rk4,
    Leapfrog,
    Yoshida4,
    Rkf45,
}

/// A fixed-capacity array of bodies plus simulation time. Integrators
/// construct ephemeral scratch copies of this state for RK stages and
/// Richardson half-steps.
#[derive(Debug, Clone)]
pub struct System {
    bodies: Vec<Body>,
    capacity: usize,
    pub time: f64,
    /// Current adaptive step size, used and updated by [`IntegratorScheme::Rkf45`].
    pub dt_hint: f64,
}

impl System {
    pub fn new(capacity: usize) -> Self {
        Self { bodies: Vec::with_capacity(capacity), capacity, time: 0.0, dt_hint: 0.01 }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Append a body. Returns `None` without mutating state if the system is
    /// already at capacity.
    pub fn push(&mut self, body: Body) -> Option<usize> {
        if self.bodies.len() >= self.capacity {
            return None;
        }
        self.bodies.push(body);
        Some(self.bodies.len() - 1)
    }

    /// Advance the system by `dt` under `scheme`.
    pub fn step(&mut self, scheme: IntegratorScheme, config: &NBodyConfig, dt: f64) {
        step(&mut self.bodies, &mut self.time, scheme, config, dt, &mut self.dt_hint);
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Advance `bodies` by `dt` under `scheme`. Used directly by
/// [`crate::scene::Scene`], which owns a dynamically-sized body list rather
/// than a `System`'s fixed-capacity one.
pub fn step(
    bodies: &mut [Body],
    time: &mut f64,
    scheme: IntegratorScheme,
    config: &NBodyConfig,
    dt: f64,
    dt_hint: &mut f64,
) {
    match scheme {
        IntegratorScheme::Rk4 => {
            step_rk4(bodies, config, dt);
            *time += dt;
        }
        IntegratorScheme::Leapfrog => {
            step_leapfrog(bodies, config, dt);
            *time += dt;
        }
        IntegratorScheme::Yoshida4 => {
            step_yoshida4(bodies, config, dt);
            *time += dt;
        }
        IntegratorScheme::Rkf45 => {
            // Adaptive: the step actually taken is the current hint, not the
            // caller's `dt` -- the caller only seeds the very first step.
            let used = *dt_hint;
            *dt_hint = step_rkf45(bodies, config, used);
            *time += used;
        }
    }
}

fn active(b: &Body) -> bool {
    b.is_alive
}

fn movable(b: &Body) -> bool {
    b.is_alive && !b.is_fixed
}

fn apply_rotation(bodies: &mut [Body], derivs: &[BodyDerivative], dt: f64) {
    for (b, d) in bodies.iter_mut().zip(derivs) {
        if !active(b) {
            continue;
        }
        b.angular_velocity = b.angular_velocity.add(d.torque.scale(dt / b.moment_of_inertia));
        b.rotation_angle += b.angular_velocity.norm() * dt;
    }
}

// ===== RK4 =====

fn scratch_with(base: &[Body], derivs: &[BodyDerivative], scale: f64) -> Vec<Body> {
    let mut out = base.to_vec();
    for (b, d) in out.iter_mut().zip(derivs) {
        if !movable(b) {
            continue;
        }
        b.position = b.position.add(d.velocity.scale(scale));
        b.velocity = b.velocity.add(d.acceleration.scale(scale));
    }
    out
}

fn step_rk4(bodies: &mut [Body], config: &NBodyConfig, dt: f64) {
    let base = bodies.to_vec();
    let k1 = accumulate(&base, config);

    let s2 = scratch_with(&base, &k1, dt * 0.5);
    let k2 = accumulate(&s2, config);

    let s3 = scratch_with(&base, &k2, dt * 0.5);
    let k3 = accumulate(&s3, config);

    let s4 = scratch_with(&base, &k3, dt);
    let k4 = accumulate(&s4, config);

    for i in 0..bodies.len() {
        if !movable(&bodies[i]) {
            continue;
        }
        let dv = k1[i]
            .velocity
            .add(k2[i].velocity.scale(2.0))
            .add(k3[i].velocity.scale(2.0))
            .add(k4[i].velocity)
            .scale(dt / 6.0);
        let da = k1[i]
            .acceleration
            .add(k2[i].acceleration.scale(2.0))
            .add(k3[i].acceleration.scale(2.0))
            .add(k4[i].acceleration)
            .scale(dt / 6.0);
        bodies[i].position = bodies[i].position.add(dv);
        bodies[i].velocity = bodies[i].velocity.add(da);
    }

    apply_rotation(bodies, &k1, dt);
}

// ===== Leapfrog (Kick-Drift-Kick) =====

fn step_leapfrog(bodies: &mut [Body], config: &NBodyConfig, dt: f64) {
    let d0 = accumulate(bodies, config);
    for (b, d) in bodies.iter_mut().zip(&d0) {
        if movable(b) {
            b.velocity = b.velocity.add(d.acceleration.scale(dt * 0.5));
        }
    }
    for b in bodies.iter_mut() {
        if movable(b) {
            b.position = b.position.add(b.velocity.scale(dt));
        }
    }
    let d1 = accumulate(bodies, config);
    for (b, d) in bodies.iter_mut().zip(&d1) {
        if movable(b) {
            b.velocity = b.velocity.add(d.acceleration.scale(dt * 0.5));
        }
    }

    apply_rotation(bodies, &d0, dt);
}

// ===== Yoshida 4th-order symplectic =====

fn step_yoshida4(bodies: &mut [Body], config: &NBodyConfig, dt: f64) {
    let cbrt2 = 2.0_f64.powf(1.0 / 3.0);
    let w1 = 1.0 / (2.0 - cbrt2);
    let w0 = -cbrt2 * w1;

    let c = [w1 / 2.0, (w0 + w1) / 2.0, (w0 + w1) / 2.0, w1 / 2.0];
    let d = [w1, w0, w1];

    let d0 = accumulate(bodies, config);

    for stage in 0..3 {
        drift(bodies, c[stage] * dt);
        let derivs = accumulate(bodies, config);
        kick(bodies, &derivs, d[stage] * dt);
    }
    drift(bodies, c[3] * dt);

    apply_rotation(bodies, &d0, dt);
}

fn drift(bodies: &mut [Body], dt: f64) {
    for b in bodies.iter_mut() {
        if movable(b) {
            b.position = b.position.add(b.velocity.scale(dt));
        }
    }
}

fn kick(bodies: &mut [Body], derivs: &[BodyDerivative], dt: f64) {
    for (b, d) in bodies.iter_mut().zip(derivs) {
        if movable(b) {
            b.velocity = b.velocity.add(d.acceleration.scale(dt));
        }
    }
}

// ===== RKF45 (Richardson variant over RK4) =====

/// Integrate once with `dt` and twice with `dt/2`, report the finer result,
/// and return the rescaled step size for the caller's next call. `bodies` is
/// advanced by the fine (two half-step) result.
fn step_rkf45(bodies: &mut [Body], config: &NBodyConfig, dt: f64) -> f64 {
    let mut coarse = bodies.to_vec();
    step_rk4(&mut coarse, config, dt);

    let mut fine = bodies.to_vec();
    step_rk4(&mut fine, config, dt * 0.5);
    step_rk4(&mut fine, config, dt * 0.5);

    let mut err = 0.0_f64;
    for (c, f) in coarse.iter().zip(&fine) {
        if !movable(c) {
            continue;
        }
        let diff = c.position.sub(f.position).norm();
        if diff > err {
            err = diff;
        }
    }

    bodies.clone_from_slice(&fine);

    let tol = 1e-8_f64;
    let scale = if err < 1e-15 { 5.0 } else { (0.9 * (tol / err).powf(0.2)).clamp(0.1, 5.0) };
    (dt * scale).clamp(1e-6, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nbody::body::BodyKind;

    fn kepler_pair() -> System {
        let mut sys = System::new(DEFAULT_CAPACITY);
        sys.push(Body::new("sun", BodyKind::Star, 1.0, 1.0, Vec3::ZERO, Vec3::ZERO).fixed());
        sys.push(Body::new(
            "planet",
            BodyKind::Planet,
            1e-6,
            1.0,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ));
        sys
    }

    #[test]
    fn leapfrog_keeps_a_two_body_kepler_orbit_on_the_unit_circle() {
        let mut sys = kepler_pair();
        let config = NBodyConfig::default();
        for _ in 0..10_000 {
            sys.step(IntegratorScheme::Leapfrog, &config, 0.01);
        }
        let r = sys.bodies()[1].position.norm();
        assert!((0.95..=1.05).contains(&r), "r = {r}");
    }

    #[test]
    fn fixed_bodies_never_move() {
        let mut sys = kepler_pair();
        let config = NBodyConfig::default();
        sys.step(IntegratorScheme::Rk4, &config, 0.01);
        assert_eq!(sys.bodies()[0].position, Vec3::ZERO);
    }

    #[test]
    fn push_past_capacity_is_rejected() {
        let mut sys = System::new(1);
        assert!(sys.push(Body::new("a", BodyKind::Moon, 1.0, 1.0, Vec3::ZERO, Vec3::ZERO)).is_some());
        assert!(sys.push(Body::new("b", BodyKind::Moon, 1.0, 1.0, Vec3::ZERO, Vec3::ZERO)).is_none());
    }

    #[test]
    fn yoshida4_is_also_stable_over_many_orbits() {
        let mut sys = kepler_pair();
        let config = NBodyConfig::default();
        for _ in 0..5_000 {
            sys.step(IntegratorScheme::Yoshida4, &config, 0.01);
        }
        let r = sys.bodies()[1].position.norm();
        assert!((0.9..=1.1).contains(&r), "r = {r}");
    }
}
