//! Complex dielectric permittivity models
//!
//! - [`water`] - Debye relaxation model for liquid water
//! - [`soil`] - soil mixing models and the name → formula registry

pub mod soil;
pub mod water;

pub use soil::{dobson, mironov, resolve, wang, SoilComposition, SoilModel, SoilPermittivityFn};
pub use water::debye;
