//! # Cold Pipe
//!
//! Finds the thinnest elastomeric foam jacket that keeps a 5 °C chilled-water
//! pipe free of condensation in a 25 °C, 70 % RH plant room, then checks how
//! the answer changes with a draught across the pipe.
//!
//! ## Running the Example
//!
//! ```sh
//! RUST_LOG=isola_thermal=debug cargo run --example cold_pipe
//! ```

use isola_thermal::{
    BoundaryCondition, ConductivityModel, Geometry, Material, ScanAction, ScanConfig, ScanEvent,
    ScanOutcome, SolverConfig, TemperatureRange, celsius, minimum_thickness_observed,
};
use tracing_subscriber::EnvFilter;
use uom::si::{
    f64::{Length, Ratio, Velocity},
    length::millimeter,
    ratio::percent,
    thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let foam = Material::new(
        "Elastomeric foam",
        ConductivityModel::from_tag("linear", &[0.033, 0.0001])?,
    )
    .with_valid_range(TemperatureRange::new(-50.0, 105.0)?);

    let still = BoundaryCondition::new(celsius(5.0), celsius(25.0))
        .with_relative_humidity(Ratio::new::<percent>(70.0))
        .with_geometry(Geometry::Cylinder {
            outer_base_diameter: Length::new::<millimeter>(60.3),
        });
    let draughty = still.with_wind_speed(Velocity::new::<meter_per_second>(2.0));

    let scan = ScanConfig::default();
    let config = SolverConfig::default();

    for (label, boundary) in [("still air", still), ("2 m/s draught", draughty)] {
        let observer = |event: &ScanEvent| -> Option<ScanAction> {
            if let Some(surface) = event.surface_temperature {
                tracing::debug!(
                    candidate = event.candidate,
                    thickness_mm = event.thickness.get::<millimeter>(),
                    surface = surface.get::<degree_celsius>(),
                    "candidate"
                );
            }
            None
        };
        let report = minimum_thickness_observed(&foam, &boundary, &scan, &config, observer)?;

        println!(
            "{label}: dew point {:.2} °C",
            report.dew_point.get::<degree_celsius>()
        );
        match report.outcome {
            ScanOutcome::Found { thickness, profile } => println!(
                "  minimum thickness {:.0} mm, surface at {:.2} °C, {:.2} W/m gained",
                thickness.get::<millimeter>(),
                profile.outer_face().get::<degree_celsius>(),
                profile
                    .linear_heat_rate
                    .map_or(0.0, |rate| -rate.value)
            ),
            ScanOutcome::Exhausted => println!("  no thickness up to 500 mm is enough"),
            ScanOutcome::Stopped { last_thickness } => println!(
                "  stopped at {:.0} mm",
                last_thickness.get::<millimeter>()
            ),
        }
    }

    Ok(())
}
