//! Compensated (Kahan) summation.
//!
//! The integrator and the conservation monitor accumulate many terms of
//! widely varying magnitude (a close pair's force term next to a distant
//! body's tiny contribution); naive summation would lose low-order bits.
//! The two-float (sum, compensation) state below is the contract -- not an
//! implementation detail -- and must not be replaced by a single running
//! total.

use super::Vec3;

/// A scalar Kahan compensated accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanSum {
    sum: f64,
    compensation: f64,
}

impl KahanSum {
    #[inline]
    pub fn init() -> Self {
        Self { sum: 0.0, compensation: 0.0 }
    }

    #[inline]
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    #[inline]
    pub fn read(&self) -> f64 {
        self.sum
    }
}

/// Three independent [`KahanSum`] compensators, one per Cartesian axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanVec3 {
    x: KahanSum,
    y: KahanSum,
    z: KahanSum,
}

impl KahanVec3 {
    #[inline]
    pub fn init() -> Self {
        Self { x: KahanSum::init(), y: KahanSum::init(), z: KahanSum::init() }
    }

    #[inline]
    pub fn add(&mut self, value: Vec3) {
        self.x.add(value.x);
        self.y.add(value.y);
        self.z.add(value.z);
    }

    #[inline]
    pub fn read(&self) -> Vec3 {
        Vec3::new(self.x.read(), self.y.read(), self.z.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kahan_beats_naive_summation_for_disparate_magnitudes() {
        let mut kahan = KahanSum::init();
        let mut naive = 0.0_f64;
        let big = 1.0e16;
        kahan.add(big);
        naive += big;
        for _ in 0..1000 {
            kahan.add(1.0);
            naive += 1.0;
        }
        kahan.add(-big);
        naive += -big;

        assert!((kahan.read() - 1000.0).abs() < 1e-6);
        assert!((naive - 1000.0).abs() > 1.0);
    }

    #[test]
    fn kahan_vec3_accumulates_componentwise() {
        let mut acc = KahanVec3::init();
        acc.add(Vec3::new(1.0, 2.0, 3.0));
        acc.add(Vec3::new(0.5, 0.5, 0.5));
        let total = acc.read();
        assert!((total.x - 1.5).abs() < 1e-12);
        assert!((total.y - 2.5).abs() < 1e-12);
        assert!((total.z - 3.5).abs() < 1e-12);
    }
}
