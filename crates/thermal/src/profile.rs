use std::fmt;

use uom::si::f64::{Length, ThermalConductivity, ThermodynamicTemperature};

use crate::{
    TemperatureRange,
    units::{HeatFlux, LinearHeatRate},
};

/// Whether the steady-state search met its residual tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStatus {
    Converged,
    /// The search stopped early; the profile is its best estimate.
    NotConverged,
}

/// Conditions inside one layer at steady state.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerState {
    pub material: String,
    pub thickness: Length,
    /// Arithmetic mean of the two bounding interface temperatures.
    pub mean_temperature: ThermodynamicTemperature,
    /// Conductivity evaluated at `mean_temperature`.
    pub conductivity: ThermalConductivity,
}

/// A conductivity evaluated outside its material's declared valid range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeWarning {
    pub layer: usize,
    pub material: String,
    /// Mean layer temperature in °C.
    pub mean_temperature: f64,
    pub range: TemperatureRange,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conductivity of `{}` (layer index {}) extrapolated at {:.1} °C, outside its valid range of {}",
            self.material, self.layer, self.mean_temperature, self.range
        )
    }
}

/// Steady-state temperature profile through an insulation stack.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalProfile {
    /// Process face, each intermediate interface, then the outer face.
    pub interface_temperatures: Vec<ThermodynamicTemperature>,
    /// One entry per layer, from the process side outward.
    pub layers: Vec<LayerState>,
    /// Conducted heat flux per unit outer surface area.
    ///
    /// Negative when heat flows inward toward a cold process.
    pub heat_flux: HeatFlux,
    /// Heat rate per meter of pipe, for cylinders.
    pub linear_heat_rate: Option<LinearHeatRate>,
    /// Conducted minus dissipated flux at the outer face.
    pub residual: HeatFlux,
    /// Evaluations performed by the outer-face search.
    pub iterations: usize,
    pub status: ProfileStatus,
    /// Layers whose conductivity was extrapolated.
    pub warnings: Vec<RangeWarning>,
}

impl ThermalProfile {
    #[must_use]
    pub fn process_face(&self) -> ThermodynamicTemperature {
        self.interface_temperatures[0]
    }

    /// Temperature of the surface exposed to ambient air.
    #[must_use]
    pub fn outer_face(&self) -> ThermodynamicTemperature {
        self.interface_temperatures[self.interface_temperatures.len() - 1]
    }

    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == ProfileStatus::Converged
    }
}
