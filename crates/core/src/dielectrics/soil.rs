//! Soil dielectric mixing models and the model registry.
//!
//! Three interchangeable formulas, each a pure function of soil composition,
//! temperature and frequency, built on the Debye water model:
//!
//! - [`dobson`] - semi-empirical mixing model (Dobson et al. 1985)
//! - [`mironov`] - linear water-fraction mixing (Mironov et al. 2009 entry point)
//! - [`wang`] - linear water-fraction mixing (Wang & Schmugge 1980 entry point)
//!
//! `mironov` and `wang` currently evaluate the same linear mixing expression.
//! They remain separately selectable so either can be replaced with its full
//! published form without touching callers.
//!
//! # Scientific References
//!
//! - Dobson, M.C., et al. (1985). "Microwave dielectric behavior of wet soil -
//!   Part II: Dielectric mixing models" IEEE TGRS, GE-23(1), 35-46
//! - Mironov, V.L., et al. (2009). "Physically and mineralogically based
//!   spectroscopic dielectric model for moist soils" IEEE TGRS, 47(7), 2059-2070
//! - Wang, J.R. & Schmugge, T.J. (1980). "An empirical model for the complex
//!   dielectric permittivity of soils as a function of water content"
//!   IEEE TGRS, GE-18(4), 288-295

use crate::core_types::units::{Gigahertz, GramsPerCubicCentimeter, Kelvin};
use crate::dielectrics::water;
use crate::error::DielectricError;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Fields a soil dielectric formula reads.
///
/// Any soil-like value exposing these six quantities can be evaluated,
/// independent of the concrete [`Soil`](crate::core_types::soil::Soil) type.
pub trait SoilComposition {
    /// Volumetric moisture (m³/m³)
    fn moisture(&self) -> f64;
    /// Sand mass fraction (0-1)
    fn sand(&self) -> f64;
    /// Clay mass fraction (0-1)
    fn clay(&self) -> f64;
    /// Soil temperature
    fn temperature(&self) -> Kelvin;
    /// Dry bulk density
    fn bulk_density(&self) -> GramsPerCubicCentimeter;
    /// Specific (particle) density of the mineral fraction
    fn specific_density(&self) -> GramsPerCubicCentimeter;
}

/// Signature shared by every soil permittivity formula.
pub type SoilPermittivityFn = fn(&dyn SoilComposition, Gigahertz) -> Complex64;

/// Dobson et al. (1985) mixing model.
///
/// Porosity and the bound/free water split are derived as part of the model
/// and traced, but the returned value depends only on bulk density, moisture
/// and the water permittivity:
///
/// ε = √((1 + 0.65·ρb + m^0.65·εw − m)²)  (principal branch)
pub fn dobson(soil: &dyn SoilComposition, frequency: Gigahertz) -> Complex64 {
    let moisture = soil.moisture();
    let bulk_density = *soil.bulk_density();

    let porosity = 1.0 - bulk_density / *soil.specific_density();
    let bound_water = 0.06774 - 0.06473 * soil.sand() + 0.478 * soil.clay();
    let free_water = (moisture - bound_water).max(0.0);
    trace!(porosity, bound_water, free_water, "dobson water partition");

    let water_permittivity = water::debye(soil.temperature(), frequency);

    let mixed = water_permittivity * moisture.powf(0.65) + (1.0 + 0.65 * bulk_density - moisture);
    (mixed * mixed).sqrt()
}

/// Linear mixing model selected as `"mironov"`.
///
/// ε = 1 + (εw − 1)·m
pub fn mironov(soil: &dyn SoilComposition, frequency: Gigahertz) -> Complex64 {
    linear_water_mixing(soil, frequency)
}

/// Linear mixing model selected as `"wang"`.
///
/// ε = 1 + (εw − 1)·m
pub fn wang(soil: &dyn SoilComposition, frequency: Gigahertz) -> Complex64 {
    linear_water_mixing(soil, frequency)
}

fn linear_water_mixing(soil: &dyn SoilComposition, frequency: Gigahertz) -> Complex64 {
    let water_permittivity = water::debye(soil.temperature(), frequency);
    (water_permittivity - 1.0) * soil.moisture() + 1.0
}

/// Closed set of soil dielectric models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilModel {
    /// Dobson et al. (1985)
    #[default]
    Dobson,
    /// Mironov et al. (2009)
    Mironov,
    /// Wang & Schmugge (1980)
    Wang,
}

impl SoilModel {
    /// Every model, in registry order
    pub const ALL: [SoilModel; 3] = [SoilModel::Dobson, SoilModel::Mironov, SoilModel::Wang];

    /// Registry name of this model
    pub const fn name(&self) -> &'static str {
        match self {
            SoilModel::Dobson => "dobson",
            SoilModel::Mironov => "mironov",
            SoilModel::Wang => "wang",
        }
    }

    /// Formula implementing this model
    pub fn formula(&self) -> SoilPermittivityFn {
        match self {
            SoilModel::Dobson => dobson,
            SoilModel::Mironov => mironov,
            SoilModel::Wang => wang,
        }
    }

    /// Evaluate this model for `soil` at `frequency`
    pub fn permittivity(&self, soil: &dyn SoilComposition, frequency: Gigahertz) -> Complex64 {
        debug!(
            model = self.name(),
            frequency = *frequency,
            "evaluating soil permittivity"
        );
        (self.formula())(soil, frequency)
    }
}

impl fmt::Display for SoilModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoilModel {
    type Err = DielectricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoilModel::ALL
            .into_iter()
            .find(|model| model.name() == s)
            .ok_or_else(|| DielectricError::ModelNotFound(s.to_string()))
    }
}

/// Look up a soil permittivity formula by registry name.
///
/// # Errors
/// [`DielectricError::ModelNotFound`] for any name outside
/// `"dobson" | "mironov" | "wang"`. There is no fallback model.
pub fn resolve(model_name: &str) -> Result<SoilPermittivityFn, DielectricError> {
    let model: SoilModel = model_name.parse()?;
    debug!(model = model.name(), "resolved soil dielectric model");
    Ok(model.formula())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Minimal soil-like value, independent of the validated `Soil` entity.
    struct Sample {
        moisture: f64,
        sand: f64,
        clay: f64,
    }

    impl SoilComposition for Sample {
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
            Kelvin::new(293.15)
        }
        fn bulk_density(&self) -> GramsPerCubicCentimeter {
            GramsPerCubicCentimeter::new(1.3)
        }
        fn specific_density(&self) -> GramsPerCubicCentimeter {
            GramsPerCubicCentimeter::new(2.65)
        }
    }

    fn sample(moisture: f64) -> Sample {
        Sample {
            moisture,
            sand: 0.5,
            clay: 0.2,
        }
    }

    #[test]
    fn test_resolve_known_models() {
        let soil = sample(0.25);
        let f = Gigahertz::new(1.4);
        for model in SoilModel::ALL {
            let formula = resolve(model.name()).unwrap();
            assert_eq!(formula(&soil, f), model.formula()(&soil, f));
        }
    }

    #[test]
    fn test_resolve_unknown_model() {
        let err = resolve("unknown").unwrap_err();
        assert_eq!(err, DielectricError::ModelNotFound("unknown".to_string()));
        // Names are case-sensitive, like the registry keys.
        assert!(resolve("Dobson").is_err());
    }

    #[test]
    fn test_linear_models_reduce_to_one_when_dry() {
        let soil = sample(0.0);
        let f = Gigahertz::new(1.4);
        assert_eq!(mironov(&soil, f), Complex64::new(1.0, 0.0));
        assert_eq!(wang(&soil, f), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_linear_models_reduce_to_water_when_saturated() {
        let soil = sample(1.0);
        let f = Gigahertz::new(1.4);
        let water = water::debye(Kelvin::new(293.15), f);
        let eps = mironov(&soil, f);
        assert_relative_eq!(eps.re, water.re, epsilon = 1e-12);
        assert_relative_eq!(eps.im, water.im, epsilon = 1e-12);
    }

    #[test]
    fn test_mironov_and_wang_agree() {
        let soil = sample(0.3);
        let f = Gigahertz::new(6.9);
        assert_eq!(mironov(&soil, f), wang(&soil, f));
    }

    #[test]
    fn test_dobson_matches_closed_form() {
        let soil = sample(0.3);
        let f = Gigahertz::new(1.41);
        let ew = water::debye(Kelvin::new(293.15), f);
        let base = ew * 0.3_f64.powf(0.65) + (1.0 + 0.65 * 1.3 - 0.3);
        let eps = dobson(&soil, f);
        // Principal square root of a square with positive real part is the base itself.
        assert_relative_eq!(eps.re, base.re, epsilon = 1e-9);
        assert_relative_eq!(eps.im, base.im, epsilon = 1e-9);
    }

    #[test]
    fn test_dobson_dry_soil_is_real() {
        let eps = dobson(&sample(0.0), Gigahertz::new(1.4));
        assert_relative_eq!(eps.re, 1.0 + 0.65 * 1.3, epsilon = 1e-12);
        assert_eq!(eps.im, 0.0);
    }

    #[test]
    fn test_all_models_finite_over_moisture_range() {
        let f = Gigahertz::new(1.4);
        for step in 0..=10 {
            let soil = sample(f64::from(step) / 10.0);
            for model in SoilModel::ALL {
                let eps = model.permittivity(&soil, f);
                assert!(
                    eps.re.is_finite() && eps.im.is_finite(),
                    "{model} at {step}"
                );
            }
        }
    }

    #[test]
    fn test_model_names_round_trip() {
        for model in SoilModel::ALL {
            assert_eq!(model.to_string().parse::<SoilModel>().unwrap(), model);
        }
        assert_eq!(SoilModel::default(), SoilModel::Dobson);
    }
}
