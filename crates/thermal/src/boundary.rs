use uom::si::{
    f64::{Ratio, ThermodynamicTemperature, Velocity},
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

use crate::{Geometry, ThermalError};

/// Direction of heat flow relative to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// The process is hotter than ambient; heat flows outward.
    Hot,
    /// The process is colder than ambient; heat flows inward.
    Cold,
}

/// Process and ambient conditions for one calculation.
///
/// Built per request; [`BoundaryCondition::new`] fills in a gray surface
/// (emissivity 0.9), plane geometry, still air, and no humidity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryCondition {
    /// Temperature of the process side (the inner face of the first layer).
    pub process_temperature: ThermodynamicTemperature,
    pub ambient_temperature: ThermodynamicTemperature,
    /// Ambient relative humidity in `(0, 1]`, needed only for condensation.
    pub relative_humidity: Option<Ratio>,
    /// Emissivity of the outer surface, in `[0, 1]`.
    pub emissivity: Ratio,
    pub geometry: Geometry,
    /// Wind speed; below the forced-convection threshold the air is still.
    pub wind_speed: Velocity,
}

impl BoundaryCondition {
    #[must_use]
    pub fn new(
        process_temperature: ThermodynamicTemperature,
        ambient_temperature: ThermodynamicTemperature,
    ) -> Self {
        Self {
            process_temperature,
            ambient_temperature,
            relative_humidity: None,
            emissivity: Ratio::new::<ratio>(0.9),
            geometry: Geometry::Plane,
            wind_speed: Velocity::new::<meter_per_second>(0.0),
        }
    }

    #[must_use]
    pub fn with_relative_humidity(mut self, relative_humidity: Ratio) -> Self {
        self.relative_humidity = Some(relative_humidity);
        self
    }

    #[must_use]
    pub fn with_emissivity(mut self, emissivity: Ratio) -> Self {
        self.emissivity = emissivity;
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    #[must_use]
    pub fn with_wind_speed(mut self, wind_speed: Velocity) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    /// Validates every field and reports the direction of heat flow.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidBoundaryCondition`] for non-finite or
    /// equal temperatures, an emissivity outside `[0, 1]`, a humidity outside
    /// `(0, 1]`, or a negative wind speed, and
    /// [`ThermalError::InvalidGeometry`] for a degenerate pipe diameter.
    pub fn service(&self) -> Result<Service, ThermalError> {
        let invalid = |parameter, reason| {
            Err(ThermalError::InvalidBoundaryCondition { parameter, reason })
        };

        let process = self.process_temperature.get::<degree_celsius>();
        let ambient = self.ambient_temperature.get::<degree_celsius>();
        if !process.is_finite() {
            return invalid("process_temperature", "must be finite");
        }
        if !ambient.is_finite() {
            return invalid("ambient_temperature", "must be finite");
        }

        let emissivity = self.emissivity.get::<ratio>();
        if !(0.0..=1.0).contains(&emissivity) {
            return invalid("emissivity", "must lie between 0 and 1");
        }

        if let Some(humidity) = self.relative_humidity {
            let humidity = humidity.get::<ratio>();
            if !(humidity > 0.0 && humidity <= 1.0) {
                return invalid("relative_humidity", "must lie in (0, 100] %");
            }
        }

        let wind = self.wind_speed.get::<meter_per_second>();
        if !wind.is_finite() || wind < 0.0 {
            return invalid("wind_speed", "must be finite and non-negative");
        }

        self.geometry.validate()?;

        if process > ambient {
            Ok(Service::Hot)
        } else if process < ambient {
            Ok(Service::Cold)
        } else {
            invalid(
                "process_temperature",
                "must differ from the ambient temperature",
            )
        }
    }

    /// Validates the conditions for an analysis that needs a hot process.
    ///
    /// # Errors
    ///
    /// As [`BoundaryCondition::service`], and
    /// [`ThermalError::InvalidBoundaryCondition`] if the process is colder
    /// than ambient.
    pub fn require_hot(&self) -> Result<(), ThermalError> {
        match self.service()? {
            Service::Hot => Ok(()),
            Service::Cold => Err(ThermalError::InvalidBoundaryCondition {
                parameter: "process_temperature",
                reason: "must exceed the ambient temperature",
            }),
        }
    }

    /// Validates the conditions for an analysis that needs a cold process.
    ///
    /// # Errors
    ///
    /// As [`BoundaryCondition::service`], and
    /// [`ThermalError::InvalidBoundaryCondition`] if the ambient is not
    /// warmer than the process.
    pub fn require_cold(&self) -> Result<(), ThermalError> {
        match self.service()? {
            Service::Cold => Ok(()),
            Service::Hot => Err(ThermalError::InvalidBoundaryCondition {
                parameter: "ambient_temperature",
                reason: "must exceed the process temperature",
            }),
        }
    }
}
