//! # Hot Wall
//!
//! Insulates a 250 °C furnace wall with two layers drawn from a material
//! table, prints the steady-state temperature profile, and prices the heat
//! saved against the bare wall for each default fuel.
//!
//! ## Running the Example
//!
//! ```sh
//! RUST_LOG=isola_thermal=debug cargo run --example hot_wall
//! ```

use isola_thermal::{
    BoundaryCondition, Catalog, Extent, FuelTable, Insulation, Layer, Material, OperatingSchedule,
    SavingsInput, SearchAction, SolveEvent, SolverConfig, celsius, savings, solve_observed,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use uom::si::{
    area::square_meter,
    f64::{Area, Length},
    length::millimeter,
    ratio::percent,
    temperature_interval::kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

const MATERIALS: &str = r#"
[[material]]
name = "Calcium silicate"
model = "linear"
k0 = 0.0480
k1 = 0.000110
valid_range = { min = 0.0, max = 650.0 }

[[material]]
name = "Rock wool 64 kg/m3"
model = "polynomial"
coefficients = [0.0337, 0.000151, 0.0, 0.0, 0.0]
valid_range = { min = -50.0, max = 300.0 }
"#;

#[derive(Debug, Deserialize)]
struct MaterialTable {
    material: Vec<Material>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let table: MaterialTable = toml::from_str(MATERIALS)?;
    let catalog = Catalog::from_materials(table.material)?;
    for material in catalog.iter() {
        println!("{:<20} {}", material.name(), material.model());
    }

    let layer = |name: &str, mm: f64| -> Result<Layer, Box<dyn std::error::Error>> {
        let material = catalog
            .get(name)
            .ok_or_else(|| format!("`{name}` is not in the catalog"))?;
        Ok(Layer::new(Length::new::<millimeter>(mm), material.clone())?)
    };
    let insulation = Insulation::new(vec![
        layer("Calcium silicate", 38.0)?,
        layer("Rock wool 64 kg/m3", 51.0)?,
    ])?;
    let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));
    let config = SolverConfig::default();

    let mut iterations = 0;
    let observer = |event: &SolveEvent| -> Option<SearchAction> {
        iterations = event.iteration;
        tracing::trace!(
            iteration = event.iteration,
            surface = event.surface_temperature.get::<degree_celsius>(),
            residual = event.residual.value,
            step = event.step.get::<kelvin>(),
            "search step"
        );
        None
    };
    let profile = solve_observed(&insulation, &boundary, &config, observer)?;

    println!("\nConverged after {iterations} evaluations");
    for (i, t) in profile.interface_temperatures.iter().enumerate() {
        println!("  T{i} = {:7.2} °C", t.get::<degree_celsius>());
    }
    for layer in &profile.layers {
        println!(
            "  {:<20} mean {:6.1} °C  k = {:.4} W/(m·K)",
            layer.material,
            layer.mean_temperature.get::<degree_celsius>(),
            layer.conductivity.get::<watt_per_meter_kelvin>()
        );
    }
    println!("  Heat flux: {:.1} W/m²", profile.heat_flux.value);
    for warning in &profile.warnings {
        println!("  warning: {warning}");
    }

    let area = Extent::Area(Area::new::<square_meter>(20.0));
    let schedule = OperatingSchedule::new(24.0, 6.0)?;
    let fuels = FuelTable::default();

    println!("\nSavings over {} m², 24 h/day, 6 days/week:", area.value());
    for fuel in fuels.iter() {
        let input = SavingsInput {
            fuel,
            price_override: None,
            extent: area,
            schedule,
        };
        let report = savings(&insulation, &boundary, &input, &config)?;
        println!(
            "  {:<36} {:>10.2}/month {:>11.2}/year  ({:.1} % less heat lost)",
            fuel.name,
            report.monthly_savings,
            report.annual_savings,
            report.loss_reduction.get::<percent>()
        );
    }

    Ok(())
}
