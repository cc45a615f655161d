//! Temperature conversion between the canonical Celsius data and the
//! user's display unit system.

use crate::model::Units;

/// Convert a Celsius temperature into the requested display units.
///
/// Metric is the identity; imperial applies `c * 9/5 + 32`. Humidity,
/// pressure and wind are unit-system independent and never converted.
pub fn convert_temperature(temp_c: f64, units: Units) -> f64 {
    match units {
        Units::Metric => temp_c,
        Units::Imperial => temp_c * 9.0 / 5.0 + 32.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_is_identity() {
        assert_eq!(convert_temperature(0.0, Units::Metric), 0.0);
        assert_eq!(convert_temperature(-12.5, Units::Metric), -12.5);
        assert_eq!(convert_temperature(36.6, Units::Metric), 36.6);
    }

    #[test]
    fn imperial_freezing_and_boiling_points() {
        assert_eq!(convert_temperature(0.0, Units::Imperial), 32.0);
        assert_eq!(convert_temperature(100.0, Units::Imperial), 212.0);
    }

    #[test]
    fn imperial_negative_temperatures() {
        // -40 is the crossover point of the two scales.
        assert_eq!(convert_temperature(-40.0, Units::Imperial), -40.0);
        assert!((convert_temperature(-10.0, Units::Imperial) - 14.0).abs() < 1e-9);
    }
}
