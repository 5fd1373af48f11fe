//! Passive microwave sensor configuration.
//!
//! A sensor carries one or more frequencies, one or more incidence angles,
//! a polarization set and an optional name. Frequency and angle lists must
//! broadcast: equal lengths, or one of them a single value.

use crate::core_types::units::{Degrees, Gigahertz};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Lowest frequency treated as microwave; anything below usually means the
/// value was not given in GHz.
pub const MICROWAVE_FLOOR: Gigahertz = Gigahertz::new(0.3);

/// Linear polarization channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarization {
    /// Horizontal
    H,
    /// Vertical
    V,
}

impl Polarization {
    /// Both channels, vertical first
    pub const BOTH: [Polarization; 2] = [Polarization::V, Polarization::H];

    /// Parse a compact set such as `"VH"` or `"h"`.
    ///
    /// # Errors
    /// - [`ValidationError::UnknownPolarization`] on any other character
    /// - [`ValidationError::DuplicatePolarization`] if a channel repeats
    pub fn parse_set(s: &str) -> Result<Vec<Polarization>, ValidationError> {
        let set = s
            .chars()
            .map(Polarization::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        check_distinct(&set)?;
        Ok(set)
    }

    fn as_char(self) -> char {
        match self {
            Polarization::H => 'H',
            Polarization::V => 'V',
        }
    }
}

/// Each channel may appear at most once.
fn check_distinct(polarizations: &[Polarization]) -> Result<(), ValidationError> {
    for (i, p) in polarizations.iter().enumerate() {
        if polarizations[..i].contains(p) {
            return Err(ValidationError::DuplicatePolarization(p.as_char()));
        }
    }
    Ok(())
}

impl TryFrom<char> for Polarization {
    type Error = ValidationError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'H' => Ok(Polarization::H),
            'V' => Ok(Polarization::V),
            _ => Err(ValidationError::UnknownPolarization(c)),
        }
    }
}

impl FromStr for Polarization {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Polarization::try_from(c),
            (Some(_), Some(extra)) => Err(ValidationError::UnknownPolarization(extra)),
            (None, _) => Err(ValidationError::Empty {
                parameter: "polarization",
            }),
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Serialized form of a [`Sensor`], validated on the way in.
#[derive(Deserialize)]
struct SensorConfig {
    frequencies: Vec<f64>,
    angles: Vec<f64>,
    #[serde(default = "default_polarizations")]
    polarizations: Vec<Polarization>,
    #[serde(default)]
    name: Option<String>,
}

fn default_polarizations() -> Vec<Polarization> {
    Polarization::BOTH.to_vec()
}

impl TryFrom<SensorConfig> for Sensor {
    type Error = ValidationError;

    fn try_from(config: SensorConfig) -> Result<Self, Self::Error> {
        let sensor = Sensor::new(&config.frequencies, &config.angles)?
            .with_polarizations(&config.polarizations)?;
        Ok(match config.name {
            Some(name) => sensor.with_name(name),
            None => sensor,
        })
    }
}

/// Measurement geometry and band of a passive microwave instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SensorConfig")]
pub struct Sensor {
    frequencies: Vec<Gigahertz>,
    angles: Vec<Degrees>,
    polarizations: Vec<Polarization>,
    name: Option<String>,
}

impl Default for Sensor {
    /// L-band (1.4 GHz) at nadir, both polarizations.
    fn default() -> Self {
        Self {
            frequencies: vec![Self::DEFAULT_FREQUENCY],
            angles: vec![Self::DEFAULT_ANGLE],
            polarizations: default_polarizations(),
            name: None,
        }
    }
}

impl Sensor {
    /// Default frequency (GHz)
    pub const DEFAULT_FREQUENCY: Gigahertz = Gigahertz::new(1.4);
    /// Default incidence angle (degrees from vertical)
    pub const DEFAULT_ANGLE: Degrees = Degrees::new(0.0);
    /// Largest incidence angle (degrees)
    pub const MAX_ANGLE: f64 = 90.0;

    /// Create a sensor from frequency and incidence angle lists.
    ///
    /// Polarization defaults to `[V, H]`; change it with
    /// [`with_polarizations`](Self::with_polarizations).
    ///
    /// # Errors
    /// - [`ValidationError::Empty`] if either list is empty
    /// - [`ValidationError::NotPositive`] for any frequency ≤ 0
    /// - [`ValidationError::OutOfRange`] for any angle outside `[0, 90]`
    /// - [`ValidationError::ShapeMismatch`] if the lists cannot broadcast
    pub fn new(frequencies: &[f64], angles: &[f64]) -> Result<Self, ValidationError> {
        if frequencies.is_empty() {
            return Err(ValidationError::Empty {
                parameter: "frequency",
            });
        }
        if angles.is_empty() {
            return Err(ValidationError::Empty { parameter: "theta" });
        }
        for &f in frequencies {
            ValidationError::check_positive("frequency", f)?;
        }
        for &theta in angles {
            ValidationError::check_range("theta", theta, 0.0, Self::MAX_ANGLE)?;
        }

        let (nf, na) = (frequencies.len(), angles.len());
        if nf != na && nf != 1 && na != 1 {
            return Err(ValidationError::ShapeMismatch {
                frequencies: nf,
                angles: na,
            });
        }

        Ok(Self {
            frequencies: frequencies.iter().copied().map(Gigahertz::new).collect(),
            angles: angles.iter().copied().map(Degrees::new).collect(),
            polarizations: Polarization::BOTH.to_vec(),
            name: None,
        })
    }

    /// Single-frequency, single-angle sensor.
    ///
    /// # Errors
    /// Same as [`new`](Self::new).
    pub fn single(frequency: Gigahertz, angle: Degrees) -> Result<Self, ValidationError> {
        Self::new(&[*frequency], &[*angle])
    }

    /// Passive radiometer configuration with the microwave plausibility check.
    ///
    /// Same as [`new`](Self::new) followed by [`basic_checks`](Self::basic_checks).
    pub fn passive(
        frequencies: &[f64],
        angles: &[f64],
        polarizations: &[Polarization],
        name: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let mut sensor = Self::new(frequencies, angles)?;
        sensor = sensor.with_polarizations(polarizations)?;
        sensor.name = name.map(str::to_string);
        sensor.basic_checks()?;
        Ok(sensor)
    }

    /// Replace the polarization set.
    ///
    /// # Errors
    /// - [`ValidationError::Empty`] for an empty set
    /// - [`ValidationError::DuplicatePolarization`] if a channel repeats
    pub fn with_polarizations(
        mut self,
        polarizations: &[Polarization],
    ) -> Result<Self, ValidationError> {
        if polarizations.is_empty() {
            return Err(ValidationError::Empty {
                parameter: "polarization",
            });
        }
        check_distinct(polarizations)?;
        self.polarizations = polarizations.to_vec();
        Ok(self)
    }

    /// Attach an instrument name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Reject frequencies below [`MICROWAVE_FLOOR`].
    ///
    /// # Errors
    /// [`ValidationError::NotMicrowave`] naming the lowest frequency.
    pub fn basic_checks(&self) -> Result<(), ValidationError> {
        let Some(lowest) = self.frequencies.iter().copied().min() else {
            return Ok(());
        };
        if lowest < MICROWAVE_FLOOR {
            return Err(ValidationError::NotMicrowave {
                frequency: *lowest,
                floor: *MICROWAVE_FLOOR,
            });
        }
        Ok(())
    }

    /// Operating frequencies
    pub fn frequencies(&self) -> &[Gigahertz] {
        &self.frequencies
    }

    /// First (or only) operating frequency
    pub fn frequency(&self) -> Gigahertz {
        self.frequencies[0]
    }

    /// Incidence angles from vertical
    pub fn angles(&self) -> &[Degrees] {
        &self.angles
    }

    /// Polarization channels
    pub fn polarizations(&self) -> &[Polarization] {
        &self.polarizations
    }

    /// Instrument name, if one was given
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Incidence angles in radians
    pub fn theta(&self) -> Vec<f64> {
        self.angles.iter().map(|a| a.to_radians()).collect()
    }

    /// Cosine of each incidence angle (μ)
    pub fn mu(&self) -> Vec<f64> {
        self.angles
            .iter()
            .map(|angle| angle.to_radians().cos())
            .collect()
    }

    /// Free-space wavelength per frequency (m)
    pub fn wavelengths(&self) -> Vec<f64> {
        self.frequencies
            .iter()
            .map(|f| SPEED_OF_LIGHT / f.to_hertz())
            .collect()
    }

    /// Free-space wavenumber 2π/λ per frequency (m⁻¹)
    pub fn wavenumbers(&self) -> Vec<f64> {
        self.wavelengths()
            .into_iter()
            .map(|lambda| 2.0 * PI / lambda)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_sensor() {
        let sensor = Sensor::default();
        assert_eq!(sensor.frequency(), Gigahertz::new(1.4));
        assert_eq!(sensor.angles(), &[Degrees::new(0.0)]);
        assert_eq!(sensor.polarizations(), &[Polarization::V, Polarization::H]);
        assert_eq!(sensor.name(), None);
    }

    #[test]
    fn test_frequency_must_be_positive() {
        let err = Sensor::new(&[1.4, 0.0], &[40.0]).unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { .. }));
        assert_eq!(err.parameter(), "frequency");
    }

    #[test]
    fn test_angle_range() {
        assert!(Sensor::new(&[1.4], &[0.0, 90.0]).is_ok());
        let err = Sensor::new(&[1.4], &[90.5]).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
        assert_eq!(err.parameter(), "theta");
        assert!(Sensor::new(&[1.4], &[-1.0]).is_err());
    }

    #[test]
    fn test_broadcast_shapes() {
        assert!(Sensor::new(&[1.4, 6.9, 10.7], &[40.0]).is_ok());
        assert!(Sensor::new(&[1.4], &[30.0, 40.0, 50.0]).is_ok());
        assert!(Sensor::new(&[1.4, 6.9], &[30.0, 40.0]).is_ok());
        let err = Sensor::new(&[1.4, 6.9], &[30.0, 40.0, 50.0]).unwrap_err();
        let expected = ValidationError::ShapeMismatch {
            frequencies: 2,
            angles: 3,
        };
        assert_eq!(err, expected);
        assert!(Sensor::new(&[], &[40.0]).is_err());
    }

    #[test]
    fn test_passive_plausibility_floor() {
        let err = Sensor::passive(&[0.1], &[40.0], &Polarization::BOTH, None).unwrap_err();
        assert!(matches!(err, ValidationError::NotMicrowave { .. }));

        // The plain constructor only requires a positive frequency.
        assert!(Sensor::new(&[0.1], &[40.0]).is_ok());

        let smap = Sensor::passive(&[1.41], &[40.0], &[Polarization::H], Some("SMAP")).unwrap();
        assert_eq!(smap.name(), Some("SMAP"));
        assert_eq!(smap.polarizations(), &[Polarization::H]);
    }

    #[test]
    fn test_derived_geometry() {
        let sensor = Sensor::new(&[1.0], &[0.0, 60.0]).unwrap();
        let mu = sensor.mu();
        assert_relative_eq!(mu[0], 1.0);
        assert_relative_eq!(mu[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(sensor.theta()[1], PI / 3.0, epsilon = 1e-12);

        assert_relative_eq!(sensor.wavelengths()[0], 0.299792458, epsilon = 1e-12);
        assert_relative_eq!(
            sensor.wavenumbers()[0],
            2.0 * PI / 0.299792458,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_polarization_parsing() {
        assert_eq!(
            Polarization::parse_set("VH").unwrap(),
            vec![Polarization::V, Polarization::H]
        );
        assert_eq!("h".parse::<Polarization>().unwrap(), Polarization::H);
        assert_eq!(
            Polarization::parse_set("VX").unwrap_err(),
            ValidationError::UnknownPolarization('X')
        );
        assert_eq!(
            "HV".parse::<Polarization>().unwrap_err(),
            ValidationError::UnknownPolarization('V')
        );
    }

    #[test]
    fn test_polarization_set_rejects_repeats() {
        assert_eq!(
            Polarization::parse_set("VVH").unwrap_err(),
            ValidationError::DuplicatePolarization('V')
        );
        assert_eq!(
            Polarization::parse_set("hH").unwrap_err(),
            ValidationError::DuplicatePolarization('H')
        );

        let err = Sensor::default()
            .with_polarizations(&[Polarization::V, Polarization::V, Polarization::V])
            .unwrap_err();
        assert_eq!(err, ValidationError::DuplicatePolarization('V'));

        let json = r#"{"frequencies": [1.41], "angles": [40.0], "polarizations": ["H", "H"]}"#;
        assert!(serde_json::from_str::<Sensor>(json).is_err());

        let json = r#"{"frequencies": [1.41], "angles": [40.0], "polarizations": ["H", "V"]}"#;
        let sensor: Sensor = serde_json::from_str(json).unwrap();
        assert_eq!(sensor.polarizations(), &[Polarization::H, Polarization::V]);
    }

    #[test]
    fn test_deserialization_is_validated() {
        let sensor: Sensor =
            serde_json::from_str(r#"{"frequencies": [1.41], "angles": [40.0]}"#).unwrap();
        assert_eq!(sensor.polarizations(), &Polarization::BOTH);

        let bad = serde_json::from_str::<Sensor>(r#"{"frequencies": [1.41], "angles": [95.0]}"#);
        assert!(bad.is_err());
    }
}
