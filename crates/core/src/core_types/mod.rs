//! Core types: units and the physical medium (canopy, soil, sensor)

pub mod canopy;
pub mod layer;
pub mod sensor;
pub mod soil;
pub mod units;

pub use canopy::Canopy;
pub use layer::{Layer, LayerParams, WATER_DENSITY};
pub use sensor::{Polarization, Sensor, MICROWAVE_FLOOR, SPEED_OF_LIGHT};
pub use soil::{Soil, SoilParams};
pub use units::*;
