use uom::si::{
    f64::{Ratio, ThermodynamicTemperature},
    ratio::ratio,
    thermodynamic_temperature::kelvin,
};

use crate::units::{CELSIUS_OFFSET, HeatFlux, STEFAN_BOLTZMANN, heat_flux};

/// Net radiative flux from a gray surface to large surroundings at ambient
/// temperature: `ε·σ·(Ts⁴ − Ta⁴)`.
///
/// The flux is negative when the surface is colder than its surroundings.
#[must_use]
pub fn radiative_flux(
    emissivity: Ratio,
    surface_temperature: ThermodynamicTemperature,
    ambient_temperature: ThermodynamicTemperature,
) -> HeatFlux {
    let ts = surface_temperature.get::<kelvin>();
    let ta = ambient_temperature.get::<kelvin>();
    heat_flux(emissivity.get::<ratio>() * STEFAN_BOLTZMANN * (ts.powi(4) - ta.powi(4)))
}

/// Radiative flux in W/m² from temperatures in °C.
pub(crate) fn flux(emissivity: f64, surface_temperature: f64, ambient_temperature: f64) -> f64 {
    let ts = surface_temperature + CELSIUS_OFFSET;
    let ta = ambient_temperature + CELSIUS_OFFSET;
    emissivity * STEFAN_BOLTZMANN * (ts.powi(4) - ta.powi(4))
}
