//! A single horizontal vegetation stratum.
//!
//! A layer carries physical attributes (thickness, temperature, leaf
//! geometry and water status) and derives per-ground-area quantities from
//! them on every read:
//!
//! - water content  Mw = Vw · ρw · LAI · d_leaf          (kg/m²)
//! - biomass        Md = (1 − Vw) · ρd · LAI · d_leaf    (kg/m²)
//! - LFMC           Mw / Md                              (kg/kg)
//!
//! where `Vw` is the leaf volumetric water fraction and `d_leaf` the leaf
//! thickness in meters.

use crate::core_types::units::{GramsPerCubicCentimeter, Kelvin, Meters, Millimeters};
use crate::error::ValidationError;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Density of liquid water at 20°C (kg/m³)
pub const WATER_DENSITY: f64 = 1000.0;

/// Construction parameters for a [`Layer`].
///
/// `thickness` and `temperature` are required; everything else has a
/// documented default. Build with [`LayerParams::new`] and struct update
/// syntax, then validate with [`Layer::from_params`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerParams {
    /// Layer thickness
    pub thickness: Meters,
    /// Layer temperature
    pub temperature: Kelvin,
    /// Leaf thickness
    #[serde(default = "LayerParams::default_leaf_thickness")]
    pub leaf_thickness: Millimeters,
    /// Leaf volumetric water fraction (m³/m³)
    #[serde(default)]
    pub water_volumetric_fraction: f64,
    /// Leaf area index (m²/m²)
    #[serde(default)]
    pub lai: f64,
    /// Density of the dry leaf matter
    #[serde(default = "LayerParams::default_dry_mass_density")]
    pub dry_mass_density: GramsPerCubicCentimeter,
    /// Precomputed complex dielectric constant, if known
    #[serde(default)]
    pub dielectric_constant: Option<Complex64>,
}

impl LayerParams {
    /// Default leaf thickness (mm)
    pub const DEFAULT_LEAF_THICKNESS: Millimeters = Millimeters::new(0.17);
    /// Default dry mass density (g/cm³)
    pub const DEFAULT_DRY_MASS_DENSITY: GramsPerCubicCentimeter = GramsPerCubicCentimeter::new(0.3);

    /// Parameters with the required fields set and the rest at defaults.
    pub fn new(thickness: Meters, temperature: Kelvin) -> Self {
        Self {
            thickness,
            temperature,
            leaf_thickness: Self::DEFAULT_LEAF_THICKNESS,
            water_volumetric_fraction: 0.0,
            lai: 0.0,
            dry_mass_density: Self::DEFAULT_DRY_MASS_DENSITY,
            dielectric_constant: None,
        }
    }

    fn default_leaf_thickness() -> Millimeters {
        Self::DEFAULT_LEAF_THICKNESS
    }

    fn default_dry_mass_density() -> GramsPerCubicCentimeter {
        Self::DEFAULT_DRY_MASS_DENSITY
    }
}

/// One canopy stratum.
///
/// Thickness, LAI and water fraction are range-checked at construction and
/// by their setters. Temperature, leaf thickness and dry mass density are
/// accepted as given.
///
/// `Clone` is a full deep copy; a layer never shares state with another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayerParams", into = "LayerParams")]
pub struct Layer {
    thickness: Meters,
    temperature: Kelvin,
    leaf_thickness: Millimeters,
    water_volumetric_fraction: f64,
    lai: f64,
    dry_mass_density: GramsPerCubicCentimeter,
    dielectric_constant: Option<Complex64>,
}

impl Layer {
    /// Minimum layer thickness (m)
    pub const MIN_THICKNESS: f64 = 0.01;
    /// Maximum layer thickness (m)
    pub const MAX_THICKNESS: f64 = 100.0;
    /// Minimum leaf area index (m²/m²)
    pub const MIN_LAI: f64 = 0.0;
    /// Maximum leaf area index (m²/m²)
    pub const MAX_LAI: f64 = 10.0;
    /// Thickness of layers added by `Canopy::resize`
    pub const DEFAULT_THICKNESS: Meters = Meters::new(1.0);
    /// Temperature of layers added by `Canopy::resize`
    pub const DEFAULT_TEMPERATURE: Kelvin = Kelvin::new(300.0);

    /// Create a layer with default leaf properties and no foliage (LAI = 0).
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if `thickness` is out of range.
    pub fn new(thickness: Meters, temperature: Kelvin) -> Result<Self, ValidationError> {
        Self::from_params(LayerParams::new(thickness, temperature))
    }

    /// Create a layer from a full parameter set.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the first invalid field:
    /// - thickness outside `[MIN_THICKNESS, MAX_THICKNESS]`
    /// - LAI outside `[MIN_LAI, MAX_LAI]`
    /// - water volumetric fraction outside `[0, 1]`
    pub fn from_params(params: LayerParams) -> Result<Self, ValidationError> {
        check_thickness(params.thickness)?;
        check_lai(params.lai)?;
        check_water_fraction(params.water_volumetric_fraction)?;
        Ok(Self::assemble(params))
    }

    fn assemble(params: LayerParams) -> Self {
        let LayerParams {
            thickness,
            temperature,
            leaf_thickness,
            water_volumetric_fraction,
            lai,
            dry_mass_density,
            dielectric_constant,
        } = params;
        Self {
            thickness,
            temperature,
            leaf_thickness,
            water_volumetric_fraction,
            lai,
            dry_mass_density,
            dielectric_constant,
        }
    }

    /// Layer thickness
    pub fn thickness(&self) -> Meters {
        self.thickness
    }

    /// Layer temperature
    pub fn temperature(&self) -> Kelvin {
        self.temperature
    }

    /// Leaf thickness
    pub fn leaf_thickness(&self) -> Millimeters {
        self.leaf_thickness
    }

    /// Leaf volumetric water fraction (m³/m³)
    pub fn water_volumetric_fraction(&self) -> f64 {
        self.water_volumetric_fraction
    }

    /// Leaf area index (m²/m²)
    pub fn lai(&self) -> f64 {
        self.lai
    }

    /// Dry leaf matter density
    pub fn dry_mass_density(&self) -> GramsPerCubicCentimeter {
        self.dry_mass_density
    }

    /// Precomputed complex dielectric constant, if any
    pub fn dielectric_constant(&self) -> Option<Complex64> {
        self.dielectric_constant
    }

    /// Set the thickness, keeping the range invariant.
    pub fn set_thickness(&mut self, thickness: Meters) -> Result<(), ValidationError> {
        check_thickness(thickness)?;
        self.thickness = thickness;
        Ok(())
    }

    /// Set the leaf area index, keeping the range invariant.
    pub fn set_lai(&mut self, lai: f64) -> Result<(), ValidationError> {
        check_lai(lai)?;
        self.lai = lai;
        Ok(())
    }

    /// Set the leaf water fraction, keeping the range invariant.
    pub fn set_water_volumetric_fraction(&mut self, fraction: f64) -> Result<(), ValidationError> {
        check_water_fraction(fraction)?;
        self.water_volumetric_fraction = fraction;
        Ok(())
    }

    /// Set the layer temperature (not range checked)
    pub fn set_temperature(&mut self, temperature: Kelvin) {
        self.temperature = temperature;
    }

    /// Set the leaf thickness
    pub fn set_leaf_thickness(&mut self, leaf_thickness: Millimeters) {
        self.leaf_thickness = leaf_thickness;
    }

    /// Set the dry leaf matter density
    pub fn set_dry_mass_density(&mut self, density: GramsPerCubicCentimeter) {
        self.dry_mass_density = density;
    }

    /// Attach or clear a precomputed dielectric constant
    pub fn set_dielectric_constant(&mut self, dielectric_constant: Option<Complex64>) {
        self.dielectric_constant = dielectric_constant;
    }

    /// Water content per unit ground area (kg/m²)
    ///
    /// Mw = Vw · ρw · LAI · d_leaf
    pub fn water_content(&self) -> f64 {
        self.water_volumetric_fraction * WATER_DENSITY * self.lai * *self.leaf_thickness.to_meters()
    }

    /// Above-ground (dry) biomass per unit ground area (kg/m²)
    ///
    /// Md = (1 − Vw) · ρd · LAI · d_leaf
    pub fn agb(&self) -> f64 {
        (1.0 - self.water_volumetric_fraction)
            * self.dry_mass_density.to_kg_per_cubic_meter()
            * self.lai
            * *self.leaf_thickness.to_meters()
    }

    /// Live fuel moisture content (kg/kg)
    ///
    /// `None` when there is no dry biomass (LAI or leaf thickness of zero,
    /// or a water fraction of one), where the ratio is undefined.
    pub fn lfmc(&self) -> Option<f64> {
        moisture_ratio(self.water_content(), self.agb())
    }
}

impl Default for Layer {
    /// A bare 1 m layer at 300 K with default leaf properties.
    fn default() -> Self {
        let params = LayerParams::new(Self::DEFAULT_THICKNESS, Self::DEFAULT_TEMPERATURE);
        Self::assemble(params)
    }
}

impl TryFrom<LayerParams> for Layer {
    type Error = ValidationError;

    fn try_from(params: LayerParams) -> Result<Self, Self::Error> {
        Layer::from_params(params)
    }
}

impl From<Layer> for LayerParams {
    fn from(layer: Layer) -> Self {
        Self {
            thickness: layer.thickness,
            temperature: layer.temperature,
            leaf_thickness: layer.leaf_thickness,
            water_volumetric_fraction: layer.water_volumetric_fraction,
            lai: layer.lai,
            dry_mass_density: layer.dry_mass_density,
            dielectric_constant: layer.dielectric_constant,
        }
    }
}

/// Water-to-dry-mass ratio, undefined for zero dry mass.
pub(crate) fn moisture_ratio(water: f64, dry_mass: f64) -> Option<f64> {
    if dry_mass == 0.0 {
        None
    } else {
        Some(water / dry_mass)
    }
}

fn check_thickness(thickness: Meters) -> Result<(), ValidationError> {
    ValidationError::check_range(
        "thickness",
        *thickness,
        Layer::MIN_THICKNESS,
        Layer::MAX_THICKNESS,
    )
}

fn check_lai(lai: f64) -> Result<(), ValidationError> {
    ValidationError::check_range("lai", lai, Layer::MIN_LAI, Layer::MAX_LAI)
}

fn check_water_fraction(fraction: f64) -> Result<(), ValidationError> {
    ValidationError::check_range("water_volumetric_fraction", fraction, 0.0, 1.0)
}
