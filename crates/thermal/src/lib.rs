//! Steady-state heat loss through multi-layer insulation.
//!
//! Heat conducted through one to three layers with temperature-dependent
//! conductivity must leave the outer face by natural or forced convection
//! and radiation. [`solve`] finds the outer-face temperature at which the
//! two balance and returns the full [`ThermalProfile`]; the analyses in
//! [`condensation`] and [`savings`] are built on it.
//!
//! ```no_run
//! use isola_thermal::{
//!     BoundaryCondition, ConductivityModel, Insulation, Layer, Material, SolverConfig, celsius,
//!     solve,
//! };
//! use uom::si::{f64::Length, length::millimeter};
//!
//! let wool = Material::new("rock wool", ConductivityModel::Constant { k0: 0.035 });
//! let insulation = Insulation::single(Layer::new(Length::new::<millimeter>(51.0), wool)?);
//! let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));
//!
//! let profile = solve(&insulation, &boundary, &SolverConfig::default())?;
//! println!("outer face at {:?}", profile.outer_face());
//! # Ok::<(), isola_thermal::ThermalError>(())
//! ```
//!
//! Temperatures in conductivity models and in reported scalar fields are in
//! degrees Celsius; everything else crossing the API is a `uom` quantity.

mod boundary;
mod catalog;
mod error;
mod geometry;
mod layer;
mod loss;
mod material;
mod profile;
mod solver;

pub mod condensation;
pub mod convection;
pub mod radiation;
pub mod savings;
pub mod units;

pub use boundary::{BoundaryCondition, Service};
pub use catalog::{Catalog, CatalogError};
pub use condensation::{
    CondensationReport, ScanAction, ScanConfig, ScanEvent, ScanOutcome, dew_point,
    minimum_thickness, minimum_thickness_observed,
};
pub use convection::{ConvectionConfig, PlaneCorrelation, PlaneLength, Surface};
pub use error::ThermalError;
pub use geometry::Geometry;
pub use layer::{Insulation, Layer, MAX_LAYERS};
pub use loss::surface_heat_loss;
pub use material::{ConductivityModel, Material, TemperatureRange};
pub use profile::{LayerState, ProfileStatus, RangeWarning, ThermalProfile};
pub use radiation::radiative_flux;
pub use savings::{
    Extent, Fuel, FuelTable, HeatLoss, OperatingSchedule, SavingsInput, SavingsReport,
    bare_surface_loss, savings,
};
pub use solver::{RangePolicy, SolveEvent, SolverConfig, solve, solve_observed};
pub use units::{HeatFlux, LinearHeatRate, celsius};

pub use isola_solve::{Observer, damped::Action as SearchAction};
