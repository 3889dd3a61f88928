//! Derived quantities and physical constants.

use uom::{
    si::{
        ISQ, Quantity, SI,
        area::square_meter,
        f64::{Area, Length, Power, ThermodynamicTemperature},
        length::meter,
        power::watt,
        thermodynamic_temperature::degree_celsius,
    },
    typenum::{N3, P1, Z0},
};

/// Heat flux through a surface, W/m² in SI.
pub type HeatFlux = Quantity<ISQ<Z0, P1, N3, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Heat rate per unit length of pipe, W/m in SI.
pub type LinearHeatRate = Quantity<ISQ<P1, P1, N3, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Stefan–Boltzmann constant, W/(m²·K⁴).
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// Offset between the Celsius and Kelvin scales.
pub const CELSIUS_OFFSET: f64 = 273.15;

/// Creates a [`HeatFlux`] from a value in W/m².
#[must_use]
pub fn heat_flux(watts_per_square_meter: f64) -> HeatFlux {
    Power::new::<watt>(watts_per_square_meter) / Area::new::<square_meter>(1.0)
}

/// Creates a [`LinearHeatRate`] from a value in W/m.
#[must_use]
pub fn linear_heat_rate(watts_per_meter: f64) -> LinearHeatRate {
    Power::new::<watt>(watts_per_meter) / Length::new::<meter>(1.0)
}

/// Shorthand for a temperature in degrees Celsius.
#[must_use]
pub fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}
