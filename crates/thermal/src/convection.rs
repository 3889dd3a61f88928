//! Convective heat transfer from an outer surface to ambient air.
//!
//! Air properties are evaluated at the film temperature with power-law
//! corrections about 293.15 K. Still air uses a natural convection
//! correlation chosen by surface shape; at or above
//! [`ConvectionConfig::forced_threshold`] a flat-plate forced convection
//! correlation applies instead.
//!
//! Plane surfaces carry their characteristic length in [`Surface::Plane`].
//! The solver resolves it from [`ConvectionConfig::plane_length`], which is
//! either a fixed length or the total insulation thickness.

use uom::si::{
    f64::{HeatTransfer, Length, ThermodynamicTemperature, Velocity},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

use crate::{ThermalError, units::CELSIUS_OFFSET};

const GRAVITY: f64 = 9.81;
const REFERENCE_TEMPERATURE: f64 = 293.15;
const TRANSITION_REYNOLDS: f64 = 5e5;
const TRANSITION_RAYLEIGH_HORIZONTAL: f64 = 1e7;

/// Plane length for a large wall, in meters. Also used for bare planes when
/// the length follows the insulation thickness.
const LARGE_WALL_LENGTH: f64 = 1.0;
/// Plane length for the local horizontal plate correlation, in meters.
const LOCAL_PLATE_LENGTH: f64 = 0.1;

/// Natural convection correlation for plane surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaneCorrelation {
    /// Churchill–Chu for a vertical plate over the full Rayleigh range.
    #[default]
    VerticalPlate,
    /// Power law for a horizontal plate:
    /// `0.27·Ra^(1/4)` below `Ra = 1e7`, `0.15·Ra^(1/3)` above.
    ///
    /// This is a local correlation meant for a short length; see
    /// [`ConvectionConfig::local_horizontal_plate`].
    HorizontalPlate,
}

/// Where the characteristic length of a plane surface comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneLength {
    /// The same length for every plane surface.
    Fixed(Length),
    /// The total insulation thickness, taken as the plate height.
    ///
    /// A bare plane has no thickness and falls back to 1 m.
    InsulationThickness,
}

impl Default for PlaneLength {
    fn default() -> Self {
        Self::Fixed(Length::new::<meter>(LARGE_WALL_LENGTH))
    }
}

impl PlaneLength {
    /// Resolves the length in meters for a total thickness in meters.
    pub(crate) fn resolve(self, total_thickness: f64) -> f64 {
        match self {
            Self::Fixed(length) => length.get::<meter>(),
            Self::InsulationThickness if total_thickness > 0.0 => total_thickness,
            Self::InsulationThickness => LARGE_WALL_LENGTH,
        }
    }
}

/// Settings for the convection correlations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvectionConfig {
    pub plane_correlation: PlaneCorrelation,
    /// Characteristic length of plane surfaces.
    pub plane_length: PlaneLength,
    /// Wind speed at and above which convection is forced.
    pub forced_threshold: Velocity,
}

impl Default for ConvectionConfig {
    fn default() -> Self {
        Self {
            plane_correlation: PlaneCorrelation::default(),
            plane_length: PlaneLength::default(),
            forced_threshold: Velocity::new::<meter_per_second>(1.0),
        }
    }
}

impl ConvectionConfig {
    /// Horizontal plate power law over a fixed 0.1 m length.
    #[must_use]
    pub fn local_horizontal_plate() -> Self {
        Self {
            plane_correlation: PlaneCorrelation::HorizontalPlate,
            plane_length: PlaneLength::Fixed(Length::new::<meter>(LOCAL_PLATE_LENGTH)),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a reason if a fixed plane length is not positive and finite or
    /// the forced convection threshold is negative or not finite.
    pub fn validate(&self) -> Result<(), &'static str> {
        if let PlaneLength::Fixed(length) = self.plane_length {
            let length = length.get::<meter>();
            if !length.is_finite() || length <= 0.0 {
                return Err("plane_length must be positive and finite");
            }
        }
        let threshold = self.forced_threshold.get::<meter_per_second>();
        if !threshold.is_finite() || threshold < 0.0 {
            return Err("forced_threshold must be non-negative and finite");
        }
        Ok(())
    }
}

/// A surface losing heat to ambient air.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    Plane { length: Length },
    /// Horizontal cylinder; the diameter is the characteristic length.
    Cylinder { diameter: Length },
}

impl Surface {
    #[must_use]
    pub fn characteristic_length(&self) -> Length {
        match *self {
            Self::Plane { length } => length,
            Self::Cylinder { diameter } => diameter,
        }
    }
}

/// Air properties at a film temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirProperties {
    /// Kinematic viscosity, m²/s.
    pub kinematic_viscosity: f64,
    /// Thermal diffusivity, m²/s.
    pub thermal_diffusivity: f64,
    /// Thermal conductivity, W/(m·K).
    pub conductivity: f64,
    /// Volumetric expansion coefficient of an ideal gas, 1/K.
    pub expansion: f64,
}

impl AirProperties {
    /// Evaluates properties at the mean of two temperatures in °C.
    #[must_use]
    pub fn at_film(surface: f64, ambient: f64) -> Self {
        let film = (surface + ambient) / 2.0 + CELSIUS_OFFSET;
        let ratio = film / REFERENCE_TEMPERATURE;
        Self {
            kinematic_viscosity: 1.589e-5 * ratio.powf(0.7),
            thermal_diffusivity: 2.25e-5 * ratio.powf(0.8),
            conductivity: 0.0263 * ratio.powf(0.8),
            expansion: 1.0 / film,
        }
    }

    #[must_use]
    pub fn prandtl(&self) -> f64 {
        self.kinematic_viscosity / self.thermal_diffusivity
    }
}

/// Convective heat transfer coefficient between a surface and ambient air.
///
/// Returns zero when the two temperatures are equal.
///
/// # Errors
///
/// Returns [`ThermalError::InvalidConfig`] for an invalid config,
/// [`ThermalError::InvalidGeometry`] for a degenerate surface length, and
/// [`ThermalError::InvalidBoundaryCondition`] for non-finite temperatures or
/// a negative wind speed.
pub fn heat_transfer_coefficient(
    surface_temperature: ThermodynamicTemperature,
    ambient_temperature: ThermodynamicTemperature,
    surface: Surface,
    wind_speed: Velocity,
    config: &ConvectionConfig,
) -> Result<HeatTransfer, ThermalError> {
    config
        .validate()
        .map_err(|reason| ThermalError::InvalidConfig { reason })?;
    let length = surface.characteristic_length().get::<meter>();
    if !length.is_finite() || length <= 0.0 {
        return Err(ThermalError::InvalidGeometry {
            parameter: match surface {
                Surface::Plane { .. } => "length",
                Surface::Cylinder { .. } => "diameter",
            },
            value: length,
        });
    }
    let ts = surface_temperature.get::<degree_celsius>();
    let ta = ambient_temperature.get::<degree_celsius>();
    if !ts.is_finite() || !ta.is_finite() {
        return Err(ThermalError::InvalidBoundaryCondition {
            parameter: "temperatures",
            reason: "must be finite",
        });
    }
    let wind = wind_speed.get::<meter_per_second>();
    if !wind.is_finite() || wind < 0.0 {
        return Err(ThermalError::InvalidBoundaryCondition {
            parameter: "wind_speed",
            reason: "must be finite and non-negative",
        });
    }

    Ok(HeatTransfer::new::<watt_per_square_meter_kelvin>(
        coefficient(ts, ta, surface, wind, config),
    ))
}

/// Unchecked coefficient in W/(m²·K) from temperatures in °C and wind in m/s.
pub(crate) fn coefficient(
    surface_temperature: f64,
    ambient_temperature: f64,
    surface: Surface,
    wind_speed: f64,
    config: &ConvectionConfig,
) -> f64 {
    let delta = surface_temperature - ambient_temperature;
    if delta == 0.0 {
        return 0.0;
    }

    let air = AirProperties::at_film(surface_temperature, ambient_temperature);
    let length = surface.characteristic_length().get::<meter>();

    let nusselt = if wind_speed >= config.forced_threshold.get::<meter_per_second>() {
        forced_nusselt(wind_speed * length / air.kinematic_viscosity, air.prandtl())
    } else {
        let rayleigh = GRAVITY * air.expansion * delta.abs() * length.powi(3)
            / (air.kinematic_viscosity * air.thermal_diffusivity);
        natural_nusselt(rayleigh, air.prandtl(), surface, config.plane_correlation)
    };

    nusselt * air.conductivity / length
}

fn forced_nusselt(reynolds: f64, prandtl: f64) -> f64 {
    if reynolds < TRANSITION_REYNOLDS {
        0.664 * reynolds.sqrt() * prandtl.cbrt()
    } else {
        0.037 * reynolds.powf(0.8) * prandtl.cbrt()
    }
}

fn natural_nusselt(
    rayleigh: f64,
    prandtl: f64,
    surface: Surface,
    plane: PlaneCorrelation,
) -> f64 {
    match (surface, plane) {
        (Surface::Plane { .. }, PlaneCorrelation::VerticalPlate) => {
            churchill_chu(rayleigh, prandtl, 0.825, 0.492)
        }
        (Surface::Plane { .. }, PlaneCorrelation::HorizontalPlate) => {
            if rayleigh < TRANSITION_RAYLEIGH_HORIZONTAL {
                0.27 * rayleigh.powf(0.25)
            } else {
                0.15 * rayleigh.cbrt()
            }
        }
        (Surface::Cylinder { .. }, _) => churchill_chu(rayleigh, prandtl, 0.60, 0.559),
    }
}

/// `Nu = (a + 0.387·Ra^(1/6) / (1 + (b/Pr)^(9/16))^(8/27))²`
fn churchill_chu(rayleigh: f64, prandtl: f64, a: f64, b: f64) -> f64 {
    let shape = (1.0 + (b / prandtl).powf(9.0 / 16.0)).powf(8.0 / 27.0);
    (a + 0.387 * rayleigh.powf(1.0 / 6.0) / shape).powi(2)
}
