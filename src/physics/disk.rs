//! Novikov-Thorne thin accretion disk model: ISCO-anchored temperature and
//! flux profile, ZAMO-frame orbital velocity, and combined gravitational +
//! Doppler redshift coloring.
//!
//! # References
//!
//! - Novikov, I. D. & Thorne, K. S. (1973). "Astrophysics of Black Holes"
//! - Page, D. N. & Thorne, K. S. (1974). "Disk-Accretion onto a Black Hole"

use crate::metric::{Kerr, Metric, Orbit};
use crate::physics::spectrum;

/// Keplerian orbital angular velocity of a circular equatorial orbit.
///
/// Omega_K(r) = sqrt(M) / (r^{3/2} + a*sqrt(M))
pub fn angular_velocity(r: f64, m: f64, a: f64) -> f64 {
    m.sqrt() / (r.powf(1.5) + a * m.sqrt())
}

/// Specific energy of a circular equatorial orbit at radius `r`.
///
/// E(r) = (1 - 2M/r + a*sqrt(M)/r^{3/2}) / sqrt(1 - 3M/r + 2a*sqrt(M)/r^{3/2})
///
/// `None` inside the photon orbit, where the denominator goes imaginary.
fn circular_orbit_energy(r: f64, m: f64, a: f64) -> Option<f64> {
    let sqrt_m = m.sqrt();
    let num = 1.0 - 2.0 * m / r + a * sqrt_m / r.powf(1.5);
    let den_sq = 1.0 - 3.0 * m / r + 2.0 * a * sqrt_m / r.powf(1.5);
    if den_sq <= 0.0 {
        None
    } else {
        Some(num / den_sq.sqrt())
    }
}

/// Novikov-Thorne torque-free efficiency factor.
///
/// Q(r) = (1 - sqrt(r_isco/r))^{1/4}, clamped to [0, 1]. Zero at and inside
/// the ISCO (the no-torque inner boundary condition).
fn efficiency_factor(r: f64, r_isco: f64) -> f64 {
    if r <= r_isco {
        return 0.0;
    }
    (1.0 - (r_isco / r).sqrt()).max(0.0).powf(0.25).min(1.0)
}

/// Disk temperature profile, normalized to [0, 1].
///
/// Zero outside `[r_isco, outer_radius]`; inside, proportional to
/// `(r_isco/r)^{3/4}` times the Novikov-Thorne efficiency factor `Q(r)`.
pub fn temperature(r: f64, bh: &Kerr, outer_radius: f64) -> f64 {
    let r_isco = bh.isco(Orbit::Prograde);
    if r <= r_isco || r >= outer_radius {
        return 0.0;
    }
    (r_isco / r).powf(0.75) * efficiency_factor(r, r_isco)
}

/// Radiative flux F(r) = (m_dot / r^3) * (1 / (-E(r))) * Q(r).
///
/// Zero at and inside the ISCO, and in the denominator-negative region
/// inside the photon orbit where no circular orbit exists.
pub fn flux(r: f64, bh: &Kerr, m_dot: f64) -> f64 {
    let m = bh.mass();
    let a = bh.a();
    let r_isco = bh.isco(Orbit::Prograde);
    if r <= r_isco {
        return 0.0;
    }
    match circular_orbit_energy(r, m, a) {
        Some(e) if e.abs() > 1e-30 => {
            let q = efficiency_factor(r, r_isco);
            (m_dot / r.powi(3)) * (1.0 / -e) * q
        }
        _ => 0.0,
    }
}

/// Tangential velocity of the disk material relative to the ZAMO frame.
///
/// v^phi = r * (Omega_K(r) - omega(r)), where omega is the frame-drag
/// angular velocity at the equator.
pub fn zamo_tangential_velocity(r: f64, bh: &Kerr) -> f64 {
    let omega_k = angular_velocity(r, bh.mass(), bh.a());
    let omega = bh.frame_dragging_equator(r);
    r * (omega_k - omega)
}

/// Gravitational redshift of disk emission at radius `r`.
///
/// z_grav = 1/sqrt(1 - rs/r) - 1; returns a sentinel (1e30) once
/// `1 - rs/r` drops below 0.01, i.e. close to the Schwarzschild radius.
fn gravitational_redshift(r: f64, m: f64) -> f64 {
    let f = 1.0 - 2.0 * m / r;
    if f < 0.01 {
        return 1e30;
    }
    1.0 / f.sqrt() - 1.0
}

/// Combined gravitational and Doppler redshift for emission at disk radius
/// `r`, azimuthal position `phi`, as seen by an observer at inclination
/// `incl`.
///
/// v_los = v^phi * sin(phi) * sin(incl)
/// 1 + z = (1 + z_grav) * (1 + v_los) - 1
pub fn combined_redshift(r: f64, phi: f64, incl: f64, bh: &Kerr) -> f64 {
    let z_grav = gravitational_redshift(r, bh.mass());
    if z_grav >= 1e30 {
        return z_grav;
    }
    let v_los = zamo_tangential_velocity(r, bh) * phi.sin() * incl.sin();
    (1.0 + z_grav) * (1.0 + v_los) - 1.0
}

/// Doppler factor g = 1/(1+z).
pub fn doppler_g_factor(z: f64) -> f64 {
    if z >= 1e30 {
        0.0
    } else {
        1.0 / (1.0 + z)
    }
}

/// Per-radius disk color: the blackbody color of the local temperature,
/// adjusted for the combined gravitational/Doppler redshift.
pub fn disk_color(r: f64, phi: f64, incl: f64, bh: &Kerr, outer_radius: f64) -> [f32; 3] {
    let tau = temperature(r, bh, outer_radius);
    let z = combined_redshift(r, phi, incl, bh);
    let base = spectrum::blackbody_color(tau);
    spectrum::apply_redshift(base, z)
}

/// Generate a lookup table of disk temperature from r_isco to `outer_radius`.
///
/// Returns a `Vec<f32>` already normalized to [0, 1], suitable for GPU
/// texture upload.
pub fn generate_temperature_lut(bh: &Kerr, outer_radius: f64, width: usize) -> Vec<f32> {
    let rin = bh.isco(Orbit::Prograde);
    (0..width)
        .map(|i| {
            let t = i as f64 / (width - 1).max(1) as f64;
            let r = rin + t * (outer_radius - rin);
            temperature(r, bh, outer_radius) as f32
        })
        .collect()
}

/// Temperature profile sampled at `n_points` radii from ISCO to `outer_radius`.
///
/// Returns `(radii, temperatures)` as parallel vectors, useful for plotting.
pub fn temperature_profile(bh: &Kerr, outer_radius: f64, n_points: usize) -> (Vec<f64>, Vec<f64>) {
    let rin = bh.isco(Orbit::Prograde);
    let mut radii = Vec::with_capacity(n_points);
    let mut temps = Vec::with_capacity(n_points);

    for i in 0..n_points {
        let t = i as f64 / (n_points - 1).max(1) as f64;
        let r = rin + t * (outer_radius - rin);
        radii.push(r);
        temps.push(temperature(r, bh, outer_radius));
    }

    (radii, temps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_is_zero_at_and_inside_isco() {
        let bh = Kerr::new(1.0, 0.0);
        let isco = bh.isco(Orbit::Prograde);
        assert_eq!(temperature(isco, &bh, 15.0), 0.0);
        assert_eq!(temperature(isco * 0.5, &bh, 15.0), 0.0);
    }

    #[test]
    fn temperature_is_zero_outside_outer_radius() {
        let bh = Kerr::new(1.0, 0.0);
        assert_eq!(temperature(20.0, &bh, 15.0), 0.0);
    }

    #[test]
    fn temperature_profile_decreases_outward_and_stays_in_unit_range() {
        // Scenario E: Kerr M=1, a=0.5, disk inner=ISCO, outer=15, sample
        // r = 1.5*ISCO, 8, 14 -- expect strictly decreasing, all in [0, 1].
        let bh = Kerr::new(1.0, 0.5);
        let isco = bh.isco(Orbit::Prograde);
        let t_near = temperature(1.5 * isco, &bh, 15.0);
        let t_mid = temperature(8.0, &bh, 15.0);
        let t_far = temperature(14.0, &bh, 15.0);

        assert!(t_near > t_mid, "{} should exceed {}", t_near, t_mid);
        assert!(t_mid > t_far, "{} should exceed {}", t_mid, t_far);
        for t in [t_near, t_mid, t_far] {
            assert!((0.0..=1.0).contains(&t), "temperature {} out of [0,1]", t);
        }
    }

    #[test]
    fn flux_is_zero_at_and_inside_isco() {
        let bh = Kerr::new(1.0, 0.0);
        let isco = bh.isco(Orbit::Prograde);
        assert_eq!(flux(isco, &bh, 1.0), 0.0);
    }

    #[test]
    fn flux_decays_with_radius() {
        let bh = Kerr::new(1.0, 0.0);
        let f_near = flux(10.0, &bh, 1.0).abs();
        let f_far = flux(40.0, &bh, 1.0).abs();
        assert!(f_near > f_far, "flux should decay with radius: {} vs {}", f_near, f_far);
    }

    #[test]
    fn zamo_velocity_vanishes_for_schwarzschild_at_rest_frame() {
        // a=0 means the frame-drag term omega=0, so v^phi reduces to r*Omega_K.
        let bh = Kerr::new(1.0, 0.0);
        let v = zamo_tangential_velocity(10.0, &bh);
        let expected = 10.0 * angular_velocity(10.0, 1.0, 0.0);
        assert!((v - expected).abs() < 1e-12);
    }

    #[test]
    fn gravitational_redshift_sentinel_near_horizon() {
        let bh = Kerr::new(1.0, 0.0);
        // r just above rs=2: (1 - rs/r) < 0.01
        let z = combined_redshift(2.005, 0.0, std::f64::consts::FRAC_PI_2, &bh);
        assert!(z >= 1e30);
    }

    #[test]
    fn doppler_g_factor_is_reciprocal_of_one_plus_z() {
        assert!((doppler_g_factor(1.0) - 0.5).abs() < 1e-12);
        assert_eq!(doppler_g_factor(1e30), 0.0);
    }

    #[test]
    fn disk_color_channels_stay_in_valid_range() {
        let bh = Kerr::new(1.0, 0.5);
        let isco = bh.isco(Orbit::Prograde);
        let rgb = disk_color(1.5 * isco, 0.3, 0.5, &bh, 15.0);
        for c in rgb {
            assert!((0.0..=5.0).contains(&c), "channel {} out of expected range", c);
        }
    }
}
