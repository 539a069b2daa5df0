//! Math primitives: 3- and 4-vectors, and compensated summation.

mod kahan;
mod vec3;
mod vec4;

pub use kahan::{KahanSum, KahanVec3};
pub use vec3::Vec3;
pub use vec4::Vec4;
