//! 3-vectors: the purely spatial building block used by the N-body
//! integrator, the disk model, and spherical<->Cartesian conversions.

/// A Euclidean 3-vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn add(&self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    #[inline]
    pub fn sub(&self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    #[inline]
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    #[inline]
    pub fn neg(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }

    #[inline]
    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn norm2(&self) -> f64 {
        self.dot(*self)
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    /// Unit vector in the direction of `self`. Returns the zero vector
    /// instead of dividing by (near-)zero when `norm < 1e-15`.
    #[inline]
    pub fn normalize(&self) -> Self {
        let n = self.norm();
        if n < 1e-15 {
            Self::ZERO
        } else {
            self.scale(1.0 / n)
        }
    }

    /// Cartesian -> spherical. theta (polar) in [0, pi], phi (azimuth) in
    /// (-pi, pi]. The origin maps to (r=0, theta=0, phi=0).
    pub fn to_spherical(&self) -> (f64, f64, f64) {
        let r = self.norm();
        if r < 1e-15 {
            return (0.0, 0.0, 0.0);
        }
        let theta = (self.z / r).acos();
        let phi = self.y.atan2(self.x);
        (r, theta, phi)
    }

    /// Spherical -> Cartesian.
    pub fn from_spherical(r: f64, theta: f64, phi: f64) -> Self {
        let sin_theta = theta.sin();
        Self::new(r * sin_theta * phi.cos(), r * sin_theta * phi.sin(), r * theta.cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_product_is_anticommutative() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(a.cross(b), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(b.cross(a), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn normalize_zero_vector_stays_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn spherical_round_trip() {
        let v = Vec3::new(3.0, -4.0, 5.0);
        let (r, theta, phi) = v.to_spherical();
        let back = Vec3::from_spherical(r, theta, phi);
        assert!((back.x - v.x).abs() < 1e-10);
        assert!((back.y - v.y).abs() < 1e-10);
        assert!((back.z - v.z).abs() < 1e-10);
    }

    #[test]
    fn origin_maps_to_zero_spherical() {
        assert_eq!(Vec3::ZERO.to_spherical(), (0.0, 0.0, 0.0));
    }
}
