//! Energy cost avoided by insulating a hot surface.
//!
//! The insulated loss comes from the steady-state solver. The bare loss is
//! the convection and radiation leaving the uninsulated surface at the
//! process temperature. The difference, over the insulated extent and the
//! operating schedule, is priced as useful heat from the chosen fuel.

mod fuel;

pub use fuel::{Fuel, FuelTable};

use std::f64::consts::PI;

use tracing::debug;
use uom::si::{
    area::square_meter,
    f64::{Area, Length, Power, Ratio, TemperatureInterval, ThermodynamicTemperature},
    length::meter,
    power::watt,
    ratio::ratio,
    temperature_interval::kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    BoundaryCondition, ConvectionConfig, Geometry, Insulation, SolverConfig, ThermalError,
    ThermalProfile,
    loss::Ambient,
    solver,
    units::{HeatFlux, LinearHeatRate, heat_flux, linear_heat_rate},
};

/// Average number of weeks in a month.
pub const WEEKS_PER_MONTH: f64 = 4.33;

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Operating hours of the insulated equipment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingSchedule {
    hours_per_day: f64,
    days_per_week: f64,
}

impl OperatingSchedule {
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidInput`] unless hours per day lie in
    /// `(0, 24]` and days per week in `(0, 7]`.
    pub fn new(hours_per_day: f64, days_per_week: f64) -> Result<Self, ThermalError> {
        if !(hours_per_day > 0.0 && hours_per_day <= 24.0) {
            return Err(ThermalError::InvalidInput {
                parameter: "hours_per_day",
                reason: "must lie in (0, 24]",
            });
        }
        if !(days_per_week > 0.0 && days_per_week <= 7.0) {
            return Err(ThermalError::InvalidInput {
                parameter: "days_per_week",
                reason: "must lie in (0, 7]",
            });
        }
        Ok(Self {
            hours_per_day,
            days_per_week,
        })
    }

    /// Round-the-clock operation.
    #[must_use]
    pub fn continuous() -> Self {
        Self {
            hours_per_day: 24.0,
            days_per_week: 7.0,
        }
    }

    #[must_use]
    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    #[must_use]
    pub fn days_per_week(&self) -> f64 {
        self.days_per_week
    }

    #[must_use]
    pub fn hours_per_month(&self) -> f64 {
        self.hours_per_day * self.days_per_week * WEEKS_PER_MONTH
    }
}

/// Size of the insulated surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extent {
    /// Wall area, for plane geometry.
    Area(Area),
    /// Pipe length, for cylinder geometry.
    Length(Length),
}

impl Extent {
    /// Value in m² or m.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Area(area) => area.get::<square_meter>(),
            Self::Length(length) => length.get::<meter>(),
        }
    }
}

/// Inputs to [`savings`] beyond the thermal problem itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsInput<'a> {
    pub fuel: &'a Fuel,
    /// Replaces the fuel's own price.
    pub price_override: Option<f64>,
    pub extent: Extent,
    pub schedule: OperatingSchedule,
}

/// A heat loss per unit of insulated extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatLoss {
    PerArea(HeatFlux),
    PerLength(LinearHeatRate),
}

impl HeatLoss {
    /// Total heat rate over an extent of matching kind.
    fn over(self, extent: Extent) -> Result<Power, ThermalError> {
        match (self, extent) {
            (Self::PerArea(flux), Extent::Area(area)) => Ok(flux * area),
            (Self::PerLength(rate), Extent::Length(length)) => Ok(rate * length),
            _ => Err(ThermalError::InvalidInput {
                parameter: "extent",
                reason: "use an area for plane geometry and a length for cylinders",
            }),
        }
    }

    /// Value in W/m² or W/m.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::PerArea(flux) => flux.value,
            Self::PerLength(rate) => rate.value,
        }
    }
}

/// Savings from insulating a hot surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsReport {
    pub insulated_loss: HeatLoss,
    pub bare_loss: HeatLoss,
    /// Heat no longer lost over the whole extent.
    pub saved_power: Power,
    /// Price of one kWh of useful heat from the chosen fuel.
    pub cost_per_useful_kwh: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    /// Fraction of the bare loss avoided.
    pub loss_reduction: Ratio,
    pub insulated_surface_temperature: ThermodynamicTemperature,
    /// Drop from the bare surface, at process temperature, to the insulated
    /// outer face.
    pub surface_temperature_drop: TemperatureInterval,
    pub profile: ThermalProfile,
}

/// Heat flux lost by the uninsulated surface at the process temperature.
///
/// A bare pipe uses its own outer diameter as the convection length. A bare
/// plane uses the fixed plane length, or 1 m when the length follows the
/// insulation thickness.
///
/// # Errors
///
/// Returns an error if the boundary condition or config is invalid.
pub fn bare_surface_loss(
    boundary: &BoundaryCondition,
    config: &ConvectionConfig,
) -> Result<HeatFlux, ThermalError> {
    boundary.service()?;
    config
        .validate()
        .map_err(|reason| ThermalError::InvalidConfig { reason })?;

    let surface = boundary.geometry.exposed_surface(0.0, config.plane_length);
    let process = boundary.process_temperature.get::<degree_celsius>();
    Ok(heat_flux(Ambient::of(boundary).loss(process, surface, config)))
}

/// Compares insulated and bare losses and prices the difference.
///
/// # Errors
///
/// Returns [`ThermalError::InvalidBoundaryCondition`] unless the process is
/// hotter than ambient, [`ThermalError::InvalidInput`] for an invalid fuel,
/// price, or an extent that does not match the geometry, and propagates
/// solver errors, including [`ThermalError::DidNotConverge`].
pub fn savings(
    insulation: &Insulation,
    boundary: &BoundaryCondition,
    input: &SavingsInput<'_>,
    config: &SolverConfig,
) -> Result<SavingsReport, ThermalError> {
    boundary.require_hot()?;
    input.fuel.validate()?;
    let price = input.price_override.unwrap_or(input.fuel.price);
    if !price.is_finite() || price < 0.0 {
        return Err(ThermalError::InvalidInput {
            parameter: "price_override",
            reason: "must be non-negative and finite",
        });
    }

    let profile = solver::solve(insulation, boundary, config)?;
    let bare_flux = bare_surface_loss(boundary, &config.convection)?;

    let (insulated_loss, bare_loss) = match (boundary.geometry, profile.linear_heat_rate) {
        (Geometry::Cylinder { outer_base_diameter }, Some(rate)) => {
            let perimeter = PI * outer_base_diameter.get::<meter>();
            (
                HeatLoss::PerLength(rate),
                HeatLoss::PerLength(linear_heat_rate(bare_flux.value * perimeter)),
            )
        }
        _ => (
            HeatLoss::PerArea(profile.heat_flux),
            HeatLoss::PerArea(bare_flux),
        ),
    };

    let saved_power = bare_loss.over(input.extent)? - insulated_loss.over(input.extent)?;
    let cost_per_useful_kwh = input.fuel.cost_per_useful_kwh(price);
    let monthly_savings =
        saved_power.get::<watt>() / 1000.0 * cost_per_useful_kwh * input.schedule.hours_per_month();
    let annual_savings = monthly_savings * MONTHS_PER_YEAR;
    let loss_reduction = 1.0 - insulated_loss.value() / bare_loss.value();

    let outer = profile.outer_face();
    let temperature_drop =
        boundary.process_temperature.get::<degree_celsius>() - outer.get::<degree_celsius>();

    debug!(
        fuel = %input.fuel.name,
        saved_watts = saved_power.get::<watt>(),
        monthly_savings,
        annual_savings,
        "computed insulation savings"
    );

    Ok(SavingsReport {
        insulated_loss,
        bare_loss,
        saved_power,
        cost_per_useful_kwh,
        monthly_savings,
        annual_savings,
        loss_reduction: Ratio::new::<ratio>(loss_reduction),
        insulated_surface_temperature: outer,
        surface_temperature_drop: TemperatureInterval::new::<kelvin>(temperature_drop),
        profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::millimeter;

    use crate::{ConductivityModel, Layer, Material, units::celsius};

    fn wool(mm: f64) -> Insulation {
        Insulation::single(
            Layer::new(
                Length::new::<millimeter>(mm),
                Material::new("rock wool", ConductivityModel::Constant { k0: 0.035 }),
            )
            .expect("valid layer"),
        )
    }

    #[test]
    fn schedule_bounds() {
        assert!(OperatingSchedule::new(24.0, 7.0).is_ok());
        assert!(OperatingSchedule::new(0.0, 5.0).is_err());
        assert!(OperatingSchedule::new(8.0, 7.5).is_err());
        assert_relative_eq!(
            OperatingSchedule::continuous().hours_per_month(),
            24.0 * 7.0 * 4.33,
            max_relative = 1e-12
        );
    }

    #[test]
    fn bare_surface_loses_more_than_insulated() {
        let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));
        let table = FuelTable::default();
        let input = SavingsInput {
            fuel: table.get("Natural gas").expect("default fuel"),
            price_override: None,
            extent: Extent::Area(Area::new::<square_meter>(10.0)),
            schedule: OperatingSchedule::new(8.0, 5.0).expect("valid"),
        };

        let report = savings(&wool(51.0), &boundary, &input, &SolverConfig::default())
            .expect("valid inputs");

        assert!(report.bare_loss.value() > report.insulated_loss.value());
        assert!(report.saved_power.get::<watt>() > 0.0);
        let reduction = report.loss_reduction.get::<ratio>();
        assert!(reduction > 0.9 && reduction < 1.0, "reduction = {reduction}");

        let expected_monthly = report.saved_power.get::<watt>() / 1000.0
            * (3.60 / (9.65 * 0.75))
            * (8.0 * 5.0 * 4.33);
        assert_relative_eq!(report.monthly_savings, expected_monthly, max_relative = 1e-12);
        assert_relative_eq!(report.annual_savings, 12.0 * expected_monthly, max_relative = 1e-12);
        assert!(report.surface_temperature_drop.get::<kelvin>() > 150.0);
    }

    #[test]
    fn price_override_scales_savings() {
        let boundary = BoundaryCondition::new(celsius(180.0), celsius(25.0));
        let table = FuelTable::default();
        let base = SavingsInput {
            fuel: table.get("Electricity").expect("default fuel"),
            price_override: None,
            extent: Extent::Area(Area::new::<square_meter>(1.0)),
            schedule: OperatingSchedule::continuous(),
        };
        let doubled = SavingsInput {
            price_override: Some(1.50),
            ..base
        };
        let config = SolverConfig::default();

        let a = savings(&wool(40.0), &boundary, &base, &config).expect("valid");
        let b = savings(&wool(40.0), &boundary, &doubled, &config).expect("valid");

        assert_relative_eq!(b.monthly_savings, 2.0 * a.monthly_savings, max_relative = 1e-12);
    }

    #[test]
    fn extent_must_match_geometry() {
        let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));
        let table = FuelTable::default();
        let input = SavingsInput {
            fuel: table.get("Steam").expect("default fuel"),
            price_override: None,
            extent: Extent::Length(Length::new::<meter>(10.0)),
            schedule: OperatingSchedule::continuous(),
        };

        assert!(matches!(
            savings(&wool(51.0), &boundary, &input, &SolverConfig::default()),
            Err(ThermalError::InvalidInput {
                parameter: "extent",
                ..
            })
        ));
    }

    #[test]
    fn pipe_losses_are_per_meter() {
        let boundary = BoundaryCondition::new(celsius(200.0), celsius(25.0)).with_geometry(
            Geometry::Cylinder {
                outer_base_diameter: Length::new::<millimeter>(114.3),
            },
        );
        let table = FuelTable::default();
        let input = SavingsInput {
            fuel: table.get("Heavy fuel oil").expect("default fuel"),
            price_override: None,
            extent: Extent::Length(Length::new::<meter>(25.0)),
            schedule: OperatingSchedule::continuous(),
        };

        let report = savings(&wool(50.0), &boundary, &input, &SolverConfig::default())
            .expect("valid inputs");

        assert!(matches!(report.insulated_loss, HeatLoss::PerLength(_)));
        let bare_flux = bare_surface_loss(&boundary, &ConvectionConfig::default()).expect("valid");
        assert_relative_eq!(
            report.bare_loss.value(),
            bare_flux.value * PI * 0.1143,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            report.saved_power.get::<watt>(),
            25.0 * (report.bare_loss.value() - report.insulated_loss.value()),
            max_relative = 1e-9
        );
    }

    #[test]
    fn cold_process_is_rejected() {
        let boundary = BoundaryCondition::new(celsius(5.0), celsius(25.0));
        let table = FuelTable::default();
        let input = SavingsInput {
            fuel: table.get("Electricity").expect("default fuel"),
            price_override: None,
            extent: Extent::Area(Area::new::<square_meter>(1.0)),
            schedule: OperatingSchedule::continuous(),
        };

        assert!(matches!(
            savings(&wool(50.0), &boundary, &input, &SolverConfig::default()),
            Err(ThermalError::InvalidBoundaryCondition { .. })
        ));
    }
}
