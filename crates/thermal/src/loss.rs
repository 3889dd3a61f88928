use uom::si::{
    f64::ThermodynamicTemperature, ratio::ratio, thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

use crate::{
    BoundaryCondition, ThermalError,
    convection::{self, ConvectionConfig, Surface},
    radiation,
    units::{HeatFlux, heat_flux},
};

/// Heat flux dissipated from an outer surface by convection and radiation:
/// `h·(Ts − Ta) + ε·σ·(Ts⁴ − Ta⁴)`.
///
/// The process temperature and geometry of `boundary` are not used; the
/// shape of the exposed surface is given by `surface`.
///
/// # Errors
///
/// Returns an error if the ambient conditions or `config` are invalid.
pub fn surface_heat_loss(
    surface_temperature: ThermodynamicTemperature,
    boundary: &BoundaryCondition,
    surface: Surface,
    config: &ConvectionConfig,
) -> Result<HeatFlux, ThermalError> {
    let h = convection::heat_transfer_coefficient(
        surface_temperature,
        boundary.ambient_temperature,
        surface,
        boundary.wind_speed,
        config,
    )?;
    let emissivity = boundary.emissivity.get::<ratio>();
    if !(0.0..=1.0).contains(&emissivity) {
        return Err(ThermalError::InvalidBoundaryCondition {
            parameter: "emissivity",
            reason: "must lie between 0 and 1",
        });
    }

    let ambient = Ambient::of(boundary);
    let ts = surface_temperature.get::<degree_celsius>();
    Ok(heat_flux(
        h.value * (ts - ambient.temperature) + radiation::flux(emissivity, ts, ambient.temperature),
    ))
}

/// Ambient conditions in plain SI numbers for repeated evaluation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ambient {
    /// °C
    pub temperature: f64,
    pub emissivity: f64,
    /// m/s
    pub wind_speed: f64,
}

impl Ambient {
    pub(crate) fn of(boundary: &BoundaryCondition) -> Self {
        Self {
            temperature: boundary.ambient_temperature.get::<degree_celsius>(),
            emissivity: boundary.emissivity.get::<ratio>(),
            wind_speed: boundary.wind_speed.get::<meter_per_second>(),
        }
    }

    /// Dissipated flux in W/m² at a surface temperature in °C.
    pub(crate) fn loss(&self, surface_temperature: f64, surface: Surface, config: &ConvectionConfig) -> f64 {
        let h = convection::coefficient(
            surface_temperature,
            self.temperature,
            surface,
            self.wind_speed,
            config,
        );
        h * (surface_temperature - self.temperature)
            + radiation::flux(self.emissivity, surface_temperature, self.temperature)
    }
}
