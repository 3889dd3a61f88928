//! Insulation materials and their conductivity models.

mod model;

pub use model::ConductivityModel;

use std::fmt;

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{ThermalConductivity, ThermodynamicTemperature},
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::ThermalError;

/// Temperature interval, in °C, over which a conductivity model is valid.
///
/// Deserialized ranges are checked like [`TemperatureRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct TemperatureRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawRange> for TemperatureRange {
    type Error = ThermalError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl TemperatureRange {
    /// Creates a range from bounds in °C.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidInput`] if a bound is not finite or
    /// `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ThermalError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ThermalError::InvalidInput {
                parameter: "valid_range",
                reason: "bounds must be finite",
            });
        }
        if min > max {
            return Err(ThermalError::InvalidInput {
                parameter: "valid_range",
                reason: "minimum must not exceed maximum",
            });
        }
        Ok(Self { min, max })
    }

    /// Lower bound in °C.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound in °C.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns true if `temperature` (°C) lies within the range, inclusive.
    #[must_use]
    pub fn contains(&self, temperature: f64) -> bool {
        (self.min..=self.max).contains(&temperature)
    }
}

impl fmt::Display for TemperatureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {} °C", self.min, self.max)
    }
}

/// A named insulation material.
///
/// Materials are immutable snapshots for the duration of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    name: String,
    #[serde(flatten)]
    model: ConductivityModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    valid_range: Option<TemperatureRange>,
}

impl Material {
    /// Creates a material with no declared valid range.
    pub fn new(name: impl Into<String>, model: ConductivityModel) -> Self {
        Self {
            name: name.into(),
            model,
            valid_range: None,
        }
    }

    /// The same material with surrounding whitespace stripped from its name.
    pub(crate) fn into_trimmed(mut self) -> Self {
        let trimmed = self.name.trim();
        if trimmed.len() != self.name.len() {
            self.name = trimmed.to_string();
        }
        self
    }

    /// Declares the temperature range over which `model` is valid.
    #[must_use]
    pub fn with_valid_range(mut self, range: TemperatureRange) -> Self {
        self.valid_range = Some(range);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn model(&self) -> &ConductivityModel {
        &self.model
    }

    #[must_use]
    pub fn valid_range(&self) -> Option<TemperatureRange> {
        self.valid_range
    }

    /// Returns false only if a valid range is declared and `temperature`
    /// (°C) lies outside it.
    #[must_use]
    pub fn is_valid_at(&self, temperature: f64) -> bool {
        self.valid_range
            .is_none_or(|range| range.contains(temperature))
    }

    /// Evaluates k at a layer mean temperature.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidConductivity`] if k is not positive and
    /// finite.
    pub fn conductivity(
        &self,
        mean_temperature: ThermodynamicTemperature,
    ) -> Result<ThermalConductivity, ThermalError> {
        let k = self.conductivity_at(0, mean_temperature.get::<degree_celsius>())?;
        Ok(ThermalConductivity::new::<watt_per_meter_kelvin>(k))
    }

    /// Evaluates k in W/(m·K) at a mean temperature in °C for a given layer.
    pub(crate) fn conductivity_at(
        &self,
        layer: usize,
        mean_temperature: f64,
    ) -> Result<f64, ThermalError> {
        let k = self.model.evaluate(mean_temperature);
        if k.is_finite() && k > 0.0 {
            Ok(k)
        } else {
            Err(ThermalError::InvalidConductivity {
                layer,
                material: self.name.clone(),
                mean_temperature,
                value: k,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::units::celsius;

    #[test]
    fn conductivity_in_watts_per_meter_kelvin() {
        let material = Material::new(
            "mineral wool",
            ConductivityModel::Linear {
                k0: 0.03,
                k1: 1e-4,
            },
        );

        let k = material.conductivity(celsius(150.0)).expect("positive k");

        assert_relative_eq!(
            k.get::<watt_per_meter_kelvin>(),
            0.045,
            max_relative = 1e-12
        );
    }

    #[test]
    fn non_positive_conductivity_is_rejected() {
        let material = Material::new(
            "bad fit",
            ConductivityModel::Linear {
                k0: 0.03,
                k1: -1e-3,
            },
        );

        let err = material.conductivity(celsius(100.0)).unwrap_err();

        assert!(matches!(
            err,
            ThermalError::InvalidConductivity { ref material, value, .. }
                if material == "bad fit" && value < 0.0
        ));
    }

    #[test]
    fn non_finite_conductivity_is_rejected() {
        let material = Material::new(
            "runaway",
            ConductivityModel::Exponential { a: 1.0, b: 10.0 },
        );
        assert!(material.conductivity(celsius(500.0)).is_err());
    }

    #[test]
    fn valid_range_is_optional() {
        let unbounded = Material::new("glass wool", ConductivityModel::Constant { k0: 0.04 });
        assert!(unbounded.is_valid_at(1200.0));

        let bounded = unbounded.with_valid_range(TemperatureRange::new(-50.0, 250.0).expect("valid"));
        assert!(bounded.is_valid_at(250.0));
        assert!(!bounded.is_valid_at(250.1));
        assert!(!bounded.is_valid_at(-60.0));
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        assert!(TemperatureRange::new(100.0, 0.0).is_err());
        assert!(TemperatureRange::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn deserialized_ranges_are_checked() {
        let good: Material = toml::from_str(
            "name = \"wool\"\nmodel = \"constant\"\nk0 = 0.04\nvalid_range = { min = -50.0, max = 250.0 }",
        )
        .expect("valid table");
        assert_eq!(good.valid_range(), Some(TemperatureRange::new(-50.0, 250.0).expect("valid")));

        for range in ["{ min = 250.0, max = -50.0 }", "{ min = nan, max = 250.0 }"] {
            let table = format!("name = \"wool\"\nmodel = \"constant\"\nk0 = 0.04\nvalid_range = {range}");
            assert!(toml::from_str::<Material>(&table).is_err(), "{range} should be rejected");
        }
    }
}
