//! Ground boundary condition beneath the canopy.
//!
//! A [`Soil`] is an immutable value describing the surface roughness and
//! composition of the ground, plus the dielectric model used to turn that
//! composition into a complex permittivity for a given sensor.

use crate::core_types::sensor::Sensor;
use crate::core_types::units::{Gigahertz, GramsPerCubicCentimeter, Kelvin, Meters};
use crate::dielectrics::soil::{SoilComposition, SoilModel};
use crate::error::ValidationError;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Construction parameters for a [`Soil`].
///
/// Roughness and density fields are optional; `None` resolves to the
/// documented default once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilParams {
    /// Soil temperature
    pub temperature: Kelvin,
    /// Volumetric moisture (m³/m³)
    pub moisture: f64,
    /// Sand fraction (0-1)
    pub sand: f64,
    /// Clay fraction (0-1)
    pub clay: f64,
    /// Dielectric model
    pub diel_model: SoilModel,
    /// RMS surface height
    pub rms_height: Option<Meters>,
    /// Surface correlation length
    pub correlation_length: Option<Meters>,
    /// Dry bulk density
    pub bulk_density: Option<GramsPerCubicCentimeter>,
    /// Specific (particle) density of the mineral fraction
    pub specific_density: Option<GramsPerCubicCentimeter>,
}

impl Default for SoilParams {
    fn default() -> Self {
        Self {
            temperature: Soil::DEFAULT_TEMPERATURE,
            moisture: Soil::DEFAULT_MOISTURE,
            sand: Soil::DEFAULT_SAND,
            clay: Soil::DEFAULT_CLAY,
            diel_model: SoilModel::default(),
            rms_height: None,
            correlation_length: None,
            bulk_density: None,
            specific_density: None,
        }
    }
}

/// Validated soil surface state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SoilParams", into = "SoilParams")]
pub struct Soil {
    temperature: Kelvin,
    moisture: f64,
    sand: f64,
    clay: f64,
    diel_model: SoilModel,
    rms_height: Meters,
    correlation_length: Meters,
    bulk_density: GramsPerCubicCentimeter,
    specific_density: GramsPerCubicCentimeter,
}

impl Soil {
    /// Default temperature (20°C)
    pub const DEFAULT_TEMPERATURE: Kelvin = Kelvin::new(293.15);
    /// Default volumetric moisture (m³/m³)
    pub const DEFAULT_MOISTURE: f64 = 0.2;
    /// Default sand fraction
    pub const DEFAULT_SAND: f64 = 0.5;
    /// Default clay fraction
    pub const DEFAULT_CLAY: f64 = 0.2;
    /// Default RMS surface height (m)
    pub const DEFAULT_RMS_HEIGHT: Meters = Meters::new(0.01);
    /// Default correlation length (m)
    pub const DEFAULT_CORRELATION_LENGTH: Meters = Meters::new(0.1);
    /// Default bulk density (g/cm³)
    pub const DEFAULT_BULK_DENSITY: GramsPerCubicCentimeter = GramsPerCubicCentimeter::new(1.3);
    /// Default specific density of quartz-dominated minerals (g/cm³)
    pub const DEFAULT_SPECIFIC_DENSITY: GramsPerCubicCentimeter =
        GramsPerCubicCentimeter::new(2.65);

    /// Create a soil from validated parameters.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the first invalid field:
    /// - moisture, sand or clay outside `[0, 1]`
    /// - sand + clay above 1
    /// - temperature, roughness or densities not strictly positive
    pub fn new(params: SoilParams) -> Result<Self, ValidationError> {
        ValidationError::check_range("moisture", params.moisture, 0.0, 1.0)?;
        ValidationError::check_range("sand", params.sand, 0.0, 1.0)?;
        ValidationError::check_range("clay", params.clay, 0.0, 1.0)?;
        if params.sand + params.clay > 1.0 {
            return Err(ValidationError::CompositionExceeded {
                sand: params.sand,
                clay: params.clay,
            });
        }
        ValidationError::check_positive("temperature", *params.temperature)?;

        let rms_height = params.rms_height.unwrap_or(Self::DEFAULT_RMS_HEIGHT);
        let correlation_length = params
            .correlation_length
            .unwrap_or(Self::DEFAULT_CORRELATION_LENGTH);
        let bulk_density = params.bulk_density.unwrap_or(Self::DEFAULT_BULK_DENSITY);
        let specific_density = params
            .specific_density
            .unwrap_or(Self::DEFAULT_SPECIFIC_DENSITY);

        ValidationError::check_positive("rms_height", *rms_height)?;
        ValidationError::check_positive("correlation_length", *correlation_length)?;
        ValidationError::check_positive("bulk_density", *bulk_density)?;
        ValidationError::check_positive("specific_density", *specific_density)?;

        Ok(Self {
            temperature: params.temperature,
            moisture: params.moisture,
            sand: params.sand,
            clay: params.clay,
            diel_model: params.diel_model,
            rms_height,
            correlation_length,
            bulk_density,
            specific_density,
        })
    }

    /// Dielectric model this soil is evaluated with
    pub fn diel_model(&self) -> SoilModel {
        self.diel_model
    }

    /// RMS surface height
    pub fn rms_height(&self) -> Meters {
        self.rms_height
    }

    /// Surface correlation length
    pub fn correlation_length(&self) -> Meters {
        self.correlation_length
    }

    /// Silt fraction, the remainder after sand and clay
    pub fn silt(&self) -> f64 {
        1.0 - self.sand - self.clay
    }

    /// Complex permittivity at each of the sensor's frequencies, in order.
    pub fn dielectric_constant(&self, sensor: &Sensor) -> Vec<Complex64> {
        sensor
            .frequencies()
            .iter()
            .map(|&frequency| self.dielectric_constant_at(frequency))
            .collect()
    }

    /// Complex permittivity at a single frequency.
    pub fn dielectric_constant_at(&self, frequency: Gigahertz) -> Complex64 {
        self.diel_model.permittivity(self, frequency)
    }
}

impl SoilComposition for Soil {
    fn moisture(&self) -> f64 {
        self.moisture
    }

    fn sand(&self) -> f64 {
        self.sand
    }

    fn clay(&self) -> f64 {
        self.clay
    }

    fn temperature(&self) -> Kelvin {
        self.temperature
    }

    fn bulk_density(&self) -> GramsPerCubicCentimeter {
        self.bulk_density
    }

    fn specific_density(&self) -> GramsPerCubicCentimeter {
        self.specific_density
    }
}

impl TryFrom<SoilParams> for Soil {
    type Error = ValidationError;

    fn try_from(params: SoilParams) -> Result<Self, Self::Error> {
        Soil::new(params)
    }
}

impl From<Soil> for SoilParams {
    fn from(soil: Soil) -> Self {
        Self {
            temperature: soil.temperature,
            moisture: soil.moisture,
            sand: soil.sand,
            clay: soil.clay,
            diel_model: soil.diel_model,
            rms_height: Some(soil.rms_height),
            correlation_length: Some(soil.correlation_length),
            bulk_density: Some(soil.bulk_density),
            specific_density: Some(soil.specific_density),
        }
    }
}
