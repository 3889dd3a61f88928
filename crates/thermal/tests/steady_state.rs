use std::f64::consts::PI;

use approx::assert_relative_eq;
use isola_thermal::{
    BoundaryCondition, ConductivityModel, Geometry, Insulation, Layer, Material, SolverConfig,
    ThermalError, ThermalProfile, celsius, solve,
};
use uom::si::{
    f64::{Length, Velocity},
    length::{meter, millimeter},
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

fn mm(value: f64) -> Length {
    Length::new::<millimeter>(value)
}

fn constant(k0: f64) -> Material {
    Material::new("constant", ConductivityModel::Constant { k0 })
}

fn single(thickness_mm: f64, material: Material) -> Insulation {
    Insulation::single(Layer::new(mm(thickness_mm), material).expect("valid layer"))
}

fn hot_wall() -> BoundaryCondition {
    BoundaryCondition::new(celsius(250.0), celsius(30.0))
}

fn temperatures(profile: &ThermalProfile) -> Vec<f64> {
    profile
        .interface_temperatures
        .iter()
        .map(|t| t.get::<degree_celsius>())
        .collect()
}

fn outer(profile: &ThermalProfile) -> f64 {
    profile.outer_face().get::<degree_celsius>()
}

#[test]
fn reference_wall_converges_between_ambient_and_process() {
    let profile = solve(&single(51.0, constant(0.035)), &hot_wall(), &SolverConfig::default())
        .expect("converges");

    assert!(profile.is_converged());
    let tf = outer(&profile);
    assert!(tf > 30.0 && tf < 250.0, "Tf = {tf}");
    assert!(profile.heat_flux.value > 0.0);
    assert!(profile.residual.value.abs() < 0.5);
    // Natural convection plus radiation puts a well insulated wall a little
    // above ambient.
    assert!(tf > 40.0 && tf < 55.0, "Tf = {tf}");
    assert!(profile.linear_heat_rate.is_none());
}

#[test]
fn single_constant_layer_matches_fourier() {
    let profile = solve(&single(51.0, constant(0.035)), &hot_wall(), &SolverConfig::default())
        .expect("converges");

    let q = profile.heat_flux.value;
    let expected = 250.0 - q * 0.051 / 0.035;
    assert_relative_eq!(outer(&profile), expected, epsilon = 1e-6);
}

#[test]
fn outer_face_stays_between_ambient_and_process_and_cools_with_thickness() {
    let config = SolverConfig::default();
    let faces: Vec<f64> = [10.0, 25.0, 51.0, 100.0, 200.0]
        .into_iter()
        .map(|t| {
            let profile = solve(&single(t, constant(0.035)), &hot_wall(), &config)
                .expect("converges");
            outer(&profile)
        })
        .collect();

    assert!(faces.iter().all(|&tf| tf > 30.0 && tf < 250.0), "{faces:?}");
    assert!(faces.windows(2).all(|w| w[1] < w[0]), "{faces:?}");
}

#[test]
fn flux_is_continuous_through_layers() {
    let layers = vec![
        Layer::new(
            mm(40.0),
            Material::new(
                "ceramic fiber",
                ConductivityModel::Polynomial {
                    coefficients: [0.0317, 1e-4, 1e-7, 0.0, 0.0],
                },
            ),
        ),
        Layer::new(
            mm(30.0),
            Material::new("rock wool", ConductivityModel::Linear { k0: 0.0337, k1: 1.51e-4 }),
        ),
        Layer::new(
            mm(20.0),
            Material::new("glass wool", ConductivityModel::Exponential { a: 0.0387, b: 0.0019 }),
        ),
    ];
    let insulation =
        Insulation::new(layers.into_iter().collect::<Result<_, _>>().expect("valid layers"))
            .expect("three layers");
    let boundary = BoundaryCondition::new(celsius(600.0), celsius(25.0));

    let profile = solve(&insulation, &boundary, &SolverConfig::default()).expect("converges");

    let t = temperatures(&profile);
    assert_eq!(t.len(), 4);
    assert!(t.windows(2).all(|w| w[1] < w[0]), "{t:?}");

    for (i, layer) in profile.layers.iter().enumerate() {
        let k = layer.conductivity.get::<watt_per_meter_kelvin>();
        let q = k * (t[i] - t[i + 1]) / layer.thickness.get::<meter>();
        assert_relative_eq!(q, profile.heat_flux.value, max_relative = 1e-6);
        assert_relative_eq!(
            layer.mean_temperature.get::<degree_celsius>(),
            (t[i] + t[i + 1]) / 2.0,
            epsilon = 1e-9
        );
    }
}

#[test]
fn repeated_solves_are_identical() {
    let insulation = single(
        60.0,
        Material::new("rock wool", ConductivityModel::Linear { k0: 0.0337, k1: 1.51e-4 }),
    );
    let config = SolverConfig::default();

    let first = solve(&insulation, &hot_wall(), &config).expect("converges");
    let second = solve(&insulation, &hot_wall(), &config).expect("converges");

    assert_eq!(first, second);
}

#[test]
fn equal_process_and_ambient_is_rejected() {
    let boundary = BoundaryCondition::new(celsius(30.0), celsius(30.0));
    assert!(matches!(
        solve(&single(51.0, constant(0.035)), &boundary, &SolverConfig::default()),
        Err(ThermalError::InvalidBoundaryCondition { .. })
    ));
}

#[test]
fn two_halves_equal_one_whole_layer() {
    let config = SolverConfig::default();
    let whole = solve(&single(60.0, constant(0.04)), &hot_wall(), &config).expect("converges");

    let halves = Insulation::new(vec![
        Layer::new(mm(30.0), constant(0.04)).expect("valid layer"),
        Layer::new(mm(30.0), constant(0.04)).expect("valid layer"),
    ])
    .expect("two layers");
    let split = solve(&halves, &hot_wall(), &config).expect("converges");

    assert_relative_eq!(outer(&split), outer(&whole), epsilon = 1e-6);
    assert_relative_eq!(
        split.heat_flux.value,
        whole.heat_flux.value,
        max_relative = 1e-6
    );
    let middle = temperatures(&split)[1];
    assert_relative_eq!(middle, (250.0 + outer(&whole)) / 2.0, epsilon = 1e-6);
}

#[test]
fn cylinder_uses_radial_conduction() {
    let boundary = BoundaryCondition::new(celsius(180.0), celsius(20.0)).with_geometry(
        Geometry::Cylinder {
            outer_base_diameter: mm(88.9),
        },
    );
    let profile = solve(&single(50.0, constant(0.04)), &boundary, &SolverConfig::default())
        .expect("converges");

    let tf = outer(&profile);
    assert!(tf > 20.0 && tf < 180.0, "Tf = {tf}");

    let inner_radius: f64 = 0.0889 / 2.0;
    let outer_radius = inner_radius + 0.05;
    let per_length = 2.0 * PI * 0.04 * (180.0 - tf) / (outer_radius / inner_radius).ln();

    let rate = profile.linear_heat_rate.expect("cylinder reports W/m");
    assert_relative_eq!(rate.value, per_length, max_relative = 1e-6);
    assert_relative_eq!(
        rate.value,
        profile.heat_flux.value * 2.0 * PI * outer_radius,
        max_relative = 1e-9
    );
}

#[test]
fn cold_process_draws_heat_inward() {
    let boundary = BoundaryCondition::new(celsius(5.0), celsius(25.0));
    let profile = solve(&single(20.0, constant(0.035)), &boundary, &SolverConfig::default())
        .expect("converges");

    let tf = outer(&profile);
    assert!(tf > 5.0 && tf < 25.0, "Tf = {tf}");
    assert!(profile.heat_flux.value < 0.0);
}

#[test]
fn wind_pulls_the_outer_face_toward_ambient() {
    let config = SolverConfig::default();
    let still = solve(&single(25.0, constant(0.035)), &hot_wall(), &config).expect("converges");
    let windy = solve(
        &single(25.0, constant(0.035)),
        &hot_wall().with_wind_speed(Velocity::new::<meter_per_second>(5.0)),
        &config,
    )
    .expect("converges");

    assert!(outer(&windy) < outer(&still));
    assert!(windy.heat_flux.value > still.heat_flux.value);
}
