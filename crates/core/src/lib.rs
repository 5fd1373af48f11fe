//! Canopy and Soil Dielectric Core Library
//!
//! Physical medium description for microwave remote sensing of vegetated
//! land: a layered vegetation canopy over a soil surface, viewed by a
//! passive microwave sensor.
//!
//! ## Medium
//!
//! - [`Layer`] - one vegetation stratum with derived water content, biomass
//!   and live fuel moisture
//! - [`Canopy`] - bottom-to-top stack of layers with aggregate quantities and
//!   stacking (`combine` / `+`)
//! - [`Soil`] - ground composition, roughness and dielectric model choice
//! - [`Sensor`] - frequencies, incidence angles and polarizations
//!
//! ## Dielectrics
//!
//! - [`dielectrics::water::debye`] - Debye relaxation model for water
//! - [`dielectrics::soil`] - Dobson, Mironov and Wang soil mixing models,
//!   selected through [`SoilModel`] or [`dielectrics::resolve`] by name
//!
//! ```
//! use canort_core::{Sensor, Soil, SoilModel, SoilParams};
//!
//! let soil = Soil::new(SoilParams {
//!     moisture: 0.3,
//!     sand: 0.6,
//!     clay: 0.2,
//!     diel_model: SoilModel::Dobson,
//!     ..SoilParams::default()
//! })?;
//! let sensor = Sensor::new(&[1.41], &[40.0])?;
//!
//! let eps = soil.dielectric_constant(&sensor);
//! assert!(eps[0].re > 1.0 && eps[0].im > 0.0);
//! # Ok::<(), canort_core::Error>(())
//! ```

// Core types and utilities
pub mod core_types;

// Permittivity models
pub mod dielectrics;

pub mod error;

// Re-export core types
pub use core_types::{Canopy, Layer, LayerParams, Polarization, Sensor, Soil, SoilParams};

// Re-export dielectric model types
pub use dielectrics::{SoilComposition, SoilModel};

pub use error::{CanopyError, DielectricError, Error, Result, ValidationError};
