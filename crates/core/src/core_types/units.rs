//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers keep Kelvin apart from Celsius, millimetres apart from
//! metres and GHz apart from everything else at the API boundary. The
//! dielectric formulas in particular take `(Kelvin, Gigahertz)`, so a
//! swapped temperature/frequency argument pair does not type-check.
//!
//! # Design Philosophy
//! - Every type wraps `f64`; the dielectric polynomials are evaluated in
//!   double precision end to end
//! - `Deref<Target = f64>` for reading the raw value inside formulas
//! - Total ordering via `f64::total_cmp` (NaN sorts above all values)
//! - Transparent serde representation (a bare number)
//!
//! # Usage
//! ```
//! use canort_core::core_types::units::{Celsius, Kelvin, Millimeters};
//!
//! let temp = Celsius::new(20.0);
//! let kelvin: Kelvin = temp.into();
//! assert!((*kelvin - 293.15).abs() < 1e-9);
//!
//! let leaf = Millimeters::new(0.17);
//! assert!((*leaf.to_meters() - 0.00017).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Deref, Sub};

/// Shared trait plumbing for `f64` newtypes.
///
/// Generates `Eq`/`Ord` (via `total_cmp`), `Deref`, `From<f64>`,
/// `From<Self> for f64`, `Add`, `Sub`, `PartialEq<f64>` and a `Display`
/// that appends `$suffix`.
macro_rules! impl_scalar_unit {
    ($name:ident, $suffix:expr) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name(self.0 - rhs.0)
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if let Some(precision) = f.precision() {
                    write!(f, "{:.*}{}", precision, self.0, $suffix)
                } else {
                    write!(f, "{}{}", self.0, $suffix)
                }
            }
        }
    };
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Celsius to Kelvin conversion offset (0°C = 273.15 K)
const CELSIUS_KELVIN_OFFSET: f64 = 273.15;

/// Absolute temperature in Kelvin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kelvin(f64);

impl_scalar_unit!(Kelvin, " K");

impl Kelvin {
    /// Water freezing point
    pub const FREEZING: Kelvin = Kelvin(CELSIUS_KELVIN_OFFSET);

    /// Create a new absolute temperature.
    ///
    /// No range check is applied here; entities that require a positive
    /// temperature validate it at construction.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kelvin(value)
    }

    /// Convert to Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius(self.0 - CELSIUS_KELVIN_OFFSET)
    }
}

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Kelvin {
        c.to_kelvin()
    }
}

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Celsius(f64);

impl_scalar_unit!(Celsius, "°C");

impl Celsius {
    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Convert to Kelvin
    #[inline]
    #[must_use]
    pub fn to_kelvin(self) -> Kelvin {
        Kelvin(self.0 + CELSIUS_KELVIN_OFFSET)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Celsius {
        k.to_celsius()
    }
}

// ============================================================================
// LENGTH
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Meters(f64);

impl_scalar_unit!(Meters, " m");

impl Meters {
    /// Create a new length in meters
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }
}

/// Length in millimeters (leaf thickness)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Millimeters(f64);

impl_scalar_unit!(Millimeters, " mm");

impl Millimeters {
    const MM_TO_M: f64 = 1e-3;

    /// Create a new length in millimeters
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Millimeters(value)
    }

    /// Convert to meters
    #[inline]
    #[must_use]
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * Self::MM_TO_M)
    }
}

// ============================================================================
// DENSITY
// ============================================================================

/// Density in g/cm³ (dry leaf matter, soil bulk and particle density)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct GramsPerCubicCentimeter(f64);

impl_scalar_unit!(GramsPerCubicCentimeter, " g/cm³");

impl GramsPerCubicCentimeter {
    /// 1 g/cm³ = 1000 kg/m³
    const TO_KG_PER_M3: f64 = 1e3;

    /// Create a new density in g/cm³
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        GramsPerCubicCentimeter(value)
    }

    /// Value in kg/m³
    #[inline]
    #[must_use]
    pub fn to_kg_per_cubic_meter(self) -> f64 {
        self.0 * Self::TO_KG_PER_M3
    }
}

// ============================================================================
// FREQUENCY & ANGLE
// ============================================================================

/// Frequency in GHz
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Gigahertz(f64);

impl_scalar_unit!(Gigahertz, " GHz");

impl Gigahertz {
    const GHZ_TO_HZ: f64 = 1e9;

    /// Create a new frequency in GHz
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Gigahertz(value)
    }

    /// Frequency in Hz
    #[inline]
    #[must_use]
    pub fn to_hertz(self) -> f64 {
        self.0 * Self::GHZ_TO_HZ
    }

    /// Angular frequency ω = 2πf in rad/s
    #[inline]
    #[must_use]
    pub fn angular(self) -> f64 {
        2.0 * PI * self.to_hertz()
    }
}

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Degrees(f64);

impl_scalar_unit!(Degrees, "°");

impl Degrees {
    /// Create a new angle in degrees
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Degrees(value)
    }

    /// Angle in radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}
