//! Conservation monitor: energy, linear momentum, and angular momentum
//! under Kahan accumulation, with a relative-drift check.

use crate::math::{KahanSum, KahanVec3, Vec3};
use crate::nbody::body::Body;
use crate::nbody::units::NBodyConfig;

/// A snapshot of the conserved quantities of an N-body system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invariants {
    pub energy: f64,
    pub momentum: Vec3,
    pub angular_momentum: Vec3,
}

/// Compute kinetic + potential energy, linear momentum, and angular momentum,
/// all under Kahan summation. Dead bodies are excluded; fixed bodies are
/// included (they still carry mass and, usually, zero velocity).
pub fn compute_invariants(bodies: &[Body], config: &NBodyConfig) -> Invariants {
    let eps2 = config.softening * config.softening;

    let mut kinetic = KahanSum::init();
    let mut potential = KahanSum::init();
    let mut momentum = KahanVec3::init();
    let mut angular_momentum = KahanVec3::init();

    for b in bodies.iter().filter(|b| b.is_alive) {
        kinetic.add(0.5 * b.mass * b.velocity.norm2());
        momentum.add(b.velocity.scale(b.mass));
        angular_momentum.add(b.position.cross(b.velocity.scale(b.mass)));
    }

    let alive: Vec<&Body> = bodies.iter().filter(|b| b.is_alive).collect();
    for i in 0..alive.len() {
        for j in (i + 1)..alive.len() {
            let r_ij = alive[j].position.sub(alive[i].position);
            let dist = (r_ij.norm2() + eps2).sqrt();
            if dist > 0.0 {
                potential.add(-alive[i].gm * alive[j].mass / dist);
            }
        }
    }

    Invariants {
        energy: kinetic.read() + potential.read(),
        momentum: momentum.read(),
        angular_momentum: angular_momentum.read(),
    }
}

fn relative_drift(initial: f64, current: f64) -> f64 {
    let diff = (current - initial).abs();
    if initial.abs() < 1e-20 {
        diff
    } else {
        diff / initial.abs()
    }
}

/// Check whether `current` has drifted from `initial` by more than
/// `rel_tol` in any component. Returns `(passed, diagnostic)`; the
/// diagnostic names every component that exceeded tolerance and by how much.
/// Never fatal -- this is a reported warning, not a panic or `Result::Err`.
pub fn check_conservation(initial: &Invariants, current: &Invariants, rel_tol: f64) -> (bool, String) {
    let mut violations = Vec::new();

    let energy_drift = relative_drift(initial.energy, current.energy);
    if energy_drift > rel_tol {
        violations.push(format!("energy drifted by {energy_drift:.3e} (tolerance {rel_tol:.3e})"));
    }

    for (label, init, cur) in [
        ("momentum.x", initial.momentum.x, current.momentum.x),
        ("momentum.y", initial.momentum.y, current.momentum.y),
        ("momentum.z", initial.momentum.z, current.momentum.z),
        ("angular_momentum.x", initial.angular_momentum.x, current.angular_momentum.x),
        ("angular_momentum.y", initial.angular_momentum.y, current.angular_momentum.y),
        ("angular_momentum.z", initial.angular_momentum.z, current.angular_momentum.z),
    ] {
        let drift = relative_drift(init, cur);
        if drift > rel_tol {
            violations.push(format!("{label} drifted by {drift:.3e} (tolerance {rel_tol:.3e})"));
        }
    }

    if violations.is_empty() {
        (true, "all invariants within tolerance".to_string())
    } else {
        (false, violations.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nbody::body::BodyKind;
    use crate::nbody::integrators::{IntegratorScheme, System};

    #[test]
    fn leapfrog_conserves_energy_over_a_kepler_orbit() {
        let mut sys = System::new(128);
        sys.push(Body::new("sun", BodyKind::Star, 1.0, 1.0, Vec3::ZERO, Vec3::ZERO).fixed());
        sys.push(Body::new(
            "planet",
            BodyKind::Planet,
            1e-6,
            1.0,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ));

        let config = NBodyConfig::default();
        let initial = compute_invariants(sys.bodies(), &config);

        for _ in 0..10_000 {
            sys.step(IntegratorScheme::Leapfrog, &config, 0.01);
        }

        let current = compute_invariants(sys.bodies(), &config);
        let (passed, msg) = check_conservation(&initial, &current, 1e-6);
        assert!(passed, "{msg}");
    }

    #[test]
    fn drift_below_threshold_magnitude_uses_absolute_comparison() {
        let initial = Invariants { energy: 0.0, momentum: Vec3::ZERO, angular_momentum: Vec3::ZERO };
        let current = Invariants { energy: 1e-25, momentum: Vec3::ZERO, angular_momentum: Vec3::ZERO };
        let (passed, _) = check_conservation(&initial, &current, 1e-10);
        assert!(passed);
    }
}
