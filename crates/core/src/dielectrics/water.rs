//! Single-relaxation Debye model for the complex permittivity of pure water.
//!
//! ε(ω) = ε∞ + (εs − ε∞) / (1 − jωτ), written with a positive imaginary
//! (loss) part as used throughout the soil mixing models.
//!
//! # Scientific References
//!
//! - Ulaby, F.T. & Long, D.G. (2014). "Microwave Radar and Radiometric Remote
//!   Sensing", University of Michigan Press, problem 4.1
//! - Klein, L.A. & Swift, C.T. (1977). "An improved model for the dielectric
//!   constant of sea water at microwave frequencies"
//!   IEEE Transactions on Antennas and Propagation, 25(1), 104-111
//! - Lane, J.A. & Saxton, J.A. (1952). "Dielectric dispersion in pure polar
//!   liquids at very high radio frequencies"
//!   Proceedings of the Royal Society A, 213(1114), 400-408
//! - Stogryn, A. (1971). "Equations for calculating the dielectric constant of
//!   saline water" IEEE Transactions on Microwave Theory and Techniques, 19(8)

use crate::core_types::units::{Celsius, Gigahertz, Kelvin};
use num_complex::Complex64;

/// High-frequency permittivity limit ε∞ (Lane & Saxton 1952)
pub const WATER_HIGH_FREQUENCY_PERMITTIVITY: f64 = 4.9;

/// Static permittivity εs of pure water (Klein & Swift 1977).
///
/// Cubic in temperature (°C); decreases monotonically over the liquid range.
#[must_use]
pub fn static_permittivity(temperature: Celsius) -> f64 {
    let t = *temperature;
    88.045 - 0.4147 * t + 6.295e-4 * t.powi(2) + 1.075e-5 * t.powi(3)
}

/// Relaxation time τ of pure water in seconds (Stogryn 1971).
#[must_use]
pub fn relaxation_time(temperature: Celsius) -> f64 {
    let t = *temperature;
    1.1109e-10 - 3.824e-12 * t + 6.938e-14 * t.powi(2) - 5.096e-16 * t.powi(3)
}

/// Complex permittivity of water from the single-relaxation Debye model.
///
/// Total over its numeric domain: no range checks are applied, so frozen or
/// implausible temperatures still produce a value. Callers validate inputs.
///
/// # Arguments
/// * `temperature` - Water temperature
/// * `frequency` - Operating frequency
///
/// # Returns
/// Relative permittivity with positive imaginary (loss) part
#[must_use]
pub fn debye(temperature: Kelvin, frequency: Gigahertz) -> Complex64 {
    let celsius = temperature.to_celsius();
    let es = static_permittivity(celsius);
    let einf = WATER_HIGH_FREQUENCY_PERMITTIVITY;
    let tau = relaxation_time(celsius);

    let omega_tau = frequency.angular() * tau;
    let denominator = 1.0 + omega_tau.powi(2);

    Complex64::new(
        einf + (es - einf) / denominator,
        (es - einf) * omega_tau / denominator,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_static_permittivity_at_zero_celsius() {
        assert_relative_eq!(static_permittivity(Celsius::new(0.0)), 88.045);
        assert_relative_eq!(relaxation_time(Celsius::new(0.0)), 1.1109e-10);
    }

    #[test]
    fn test_static_permittivity_decreases_with_temperature() {
        let cold = static_permittivity(Kelvin::new(273.15).to_celsius());
        let warm = static_permittivity(Kelvin::new(293.15).to_celsius());
        assert!(cold > warm, "cold {cold} should exceed warm {warm}");
    }

    #[test]
    fn test_debye_at_l_band() {
        let eps = debye(Kelvin::new(293.15), Gigahertz::new(1.4));
        assert!(eps.re > 25.0 && eps.re < 85.0, "real part was {}", eps.re);
        assert!(eps.im > 0.0, "loss should be positive, got {}", eps.im);
    }

    #[test]
    fn test_debye_static_limit() {
        // At zero frequency the model collapses onto εs with no loss.
        let eps = debye(Kelvin::new(293.15), Gigahertz::new(0.0));
        assert_relative_eq!(
            eps.re,
            static_permittivity(Celsius::new(20.0)),
            epsilon = 1e-9
        );
        assert_eq!(eps.im, 0.0);
    }

    #[test]
    fn test_debye_optical_limit() {
        let eps = debye(Kelvin::new(293.15), Gigahertz::new(1e6));
        assert_relative_eq!(eps.re, WATER_HIGH_FREQUENCY_PERMITTIVITY, epsilon = 1e-3);
    }

    #[test]
    fn test_debye_accepts_implausible_inputs() {
        let eps = debye(Kelvin::new(0.0), Gigahertz::new(-3.0));
        assert!(eps.re.is_finite());
        assert!(eps.im.is_finite());
    }
}
