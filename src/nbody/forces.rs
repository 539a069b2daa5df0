//! Pairwise force/torque assembly: Plummer-softened gravity, 1PN correction,
//! J2 oblateness, and tidal torque.
//!
//! Every accumulation here runs over a single `i < j` pass and is deposited
//! into per-body [`KahanVec3`] registers, per the crate's summation-order
//! policy (see [`crate::math::kahan`]).

use crate::math::{KahanVec3, Vec3};
use crate::nbody::body::Body;
use crate::nbody::units::NBodyConfig;

/// Per-body derivative of the translational and rotational state.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyDerivative {
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub torque: Vec3,
}

/// Assemble accelerations and tidal torques for every body in `bodies`.
///
/// Dead bodies (`is_alive = false`) neither give nor receive force. Fixed
/// bodies still exert gravity, 1PN, and J2 corrections on others -- only
/// their own acceleration is discarded by the integrator's commit phase.
pub fn accumulate(bodies: &[Body], config: &NBodyConfig) -> Vec<BodyDerivative> {
    let n = bodies.len();
    let mut accel = vec![KahanVec3::init(); n];
    let mut torque = vec![KahanVec3::init(); n];

    let eps2 = config.softening * config.softening;
    let c2 = config.speed_of_light * config.speed_of_light;

    for i in 0..n {
        if !bodies[i].is_alive {
            continue;
        }
        for j in (i + 1)..n {
            if !bodies[j].is_alive {
                continue;
            }
            let bi = &bodies[i];
            let bj = &bodies[j];

            // r_ij points from i to j.
            let r_ij = bj.position.sub(bi.position);
            let dist2 = r_ij.norm2();
            let softened = (dist2 + eps2).powf(1.5);
            if softened > 0.0 {
                let a_i = r_ij.scale(bj.gm / softened);
                let a_j = r_ij.scale(-bi.gm / softened);
                accel[i].add(a_i);
                accel[j].add(a_j);
            }

            let dist = dist2.sqrt();
            if dist > 1e-12 {
                // 1PN: asymmetric, applied only to the receiver whose
                // partner exceeds the relativistic-mass threshold.
                if bj.gm > config.pn_threshold {
                    accel[i].add(pn_correction(bi, bj, r_ij, dist, c2));
                }
                if bi.gm > config.pn_threshold {
                    let r_ji = r_ij.neg();
                    accel[j].add(pn_correction(bj, bi, r_ji, dist, c2));
                }

                // J2 oblateness: the acting body's quadrupole field, evaluated
                // in the frame where its equator lies in the xy-plane.
                if bi.j2 > 0.0 && bi.radius > 0.0 {
                    accel[j].add(j2_correction(bi, r_ij, dist));
                }
                if bj.j2 > 0.0 && bj.radius > 0.0 {
                    accel[i].add(j2_correction(bj, r_ij.neg(), dist));
                }

                // Tidal torque: asymmetric, partner must exceed 10% of the
                // receiver's own mass.
                let dv = bj.velocity.sub(bi.velocity);
                if bj.mass > 0.1 * bi.mass {
                    torque[i].add(tidal_torque(bi, bj, r_ij, dv, dist2, config.tidal_k));
                }
                if bi.mass > 0.1 * bj.mass {
                    torque[j].add(tidal_torque(bj, bi, r_ij.neg(), dv.neg(), dist2, config.tidal_k));
                }
            }
        }
    }

    (0..n)
        .map(|i| BodyDerivative {
            velocity: bodies[i].velocity,
            acceleration: accel[i].read(),
            torque: torque[i].read(),
        })
        .collect()
}

/// First post-Newtonian correction felt by `receiver` due to massive `source`.
/// `r_to_source` points from receiver to source; `dist` is its length.
fn pn_correction(receiver: &Body, source: &Body, r_to_source: Vec3, dist: f64, c2: f64) -> Vec3 {
    let r_hat = r_to_source.scale(1.0 / dist);
    let v = receiver.velocity;
    let v2 = v.norm2();
    let v_radial = v.dot(r_hat);
    let gm_c = source.gm;

    let term = r_hat.scale(4.0 * gm_c / dist - v2).add(v.scale(4.0 * v_radial));
    term.scale(gm_c / (dist * dist * c2))
}

/// J2 quadrupole acceleration felt at `r_from_source` (source -> receiver)
/// due to `source`'s oblateness, evaluated in the source's equatorial frame.
fn j2_correction(source: &Body, r_from_source: Vec3, dist: f64) -> Vec3 {
    let r2 = dist * dist;
    let r5 = r2 * r2 * dist;
    let z2_over_r2 = (r_from_source.z * r_from_source.z) / r2;
    let factor = -1.5 * source.j2 * source.gm * source.radius * source.radius / r5;
    Vec3::new(
        factor * (5.0 * z2_over_r2 - 1.0) * r_from_source.x,
        factor * (5.0 * z2_over_r2 - 1.0) * r_from_source.y,
        factor * (5.0 * z2_over_r2 - 3.0) * r_from_source.z,
    )
}

/// Torque on `receiver`'s spin induced by `partner`'s orbit.
/// `r_to_partner` points from receiver to partner; `dv` is partner - receiver velocity.
fn tidal_torque(receiver: &Body, partner: &Body, r_to_partner: Vec3, dv: Vec3, dist2: f64, k: f64) -> Vec3 {
    let omega_orb = r_to_partner.cross(dv).scale(1.0 / dist2);
    let delta_omega = receiver.angular_velocity.sub(omega_orb);
    let dist6 = dist2 * dist2 * dist2;
    let factor = (k * partner.gm * partner.gm / dist6).min(1.0);
    delta_omega.scale(-factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nbody::body::BodyKind;

    fn two_body(m1: f64, m2: f64, sep: f64) -> Vec<Body> {
        vec![
            Body::new("a", BodyKind::Star, m1, 1.0, Vec3::ZERO, Vec3::ZERO),
            Body::new("b", BodyKind::Planet, m2, 1.0, Vec3::new(sep, 0.0, 0.0), Vec3::ZERO),
        ]
    }

    #[test]
    fn newtonian_pair_attracts_along_the_separation_axis() {
        let bodies = two_body(1.0, 1e-6, 1.0);
        let config = NBodyConfig::from_preset(crate::nbody::units::UnitsPreset::Natural);
        let derivs = accumulate(&bodies, &config);
        assert!(derivs[0].acceleration.x > 0.0, "a is pulled toward b");
        assert!(derivs[1].acceleration.x < 0.0, "b is pulled toward a");
    }

    #[test]
    fn dead_bodies_exert_no_force() {
        let mut bodies = two_body(1.0, 1.0, 1.0);
        bodies[1].is_alive = false;
        let config = NBodyConfig::default();
        let derivs = accumulate(&bodies, &config);
        assert_eq!(derivs[0].acceleration, Vec3::ZERO);
    }

    #[test]
    fn pn_correction_only_applies_above_threshold() {
        let bodies = two_body(1.0, 1e-6, 5.0);
        let mut config = NBodyConfig::default();
        config.pn_threshold = 10.0; // neither body's GM exceeds this
        let baseline = accumulate(&bodies, &config);

        config.pn_threshold = 0.5; // body a's GM=1.0 now exceeds it
        let with_pn = accumulate(&bodies, &config);

        assert_ne!(baseline[1].acceleration, with_pn[1].acceleration);
    }
}
