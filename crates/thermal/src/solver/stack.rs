use crate::{Geometry, Insulation, ThermalError};

/// Series conduction path through an insulation stack.
///
/// Each layer's resistance per unit extent is its shape factor over its
/// conductivity at the layer mean temperature. With both faces fixed, the
/// interior temperatures are found by fixed-point iteration: evaluate every
/// conductivity, share the temperature drop in proportion to resistance,
/// repeat until no interior temperature moves by more than the tolerance.
pub(super) struct Stack<'a> {
    insulation: &'a Insulation,
    shapes: Vec<f64>,
    outer_area: f64,
}

/// Steady conduction with both face temperatures fixed.
#[derive(Debug, Clone)]
pub(super) struct Conduction {
    /// Interface temperatures in °C, process face first.
    pub temperatures: Vec<f64>,
    /// Conductivity of each layer in W/(m·K).
    pub conductivities: Vec<f64>,
    /// Heat rate per unit extent: W/m² for a plane, W/m for a cylinder.
    pub rate: f64,
    /// Heat flux through the outer surface, W/m².
    pub flux: f64,
    /// Fixed-point passes performed.
    pub passes: usize,
}

impl<'a> Stack<'a> {
    pub(super) fn new(insulation: &'a Insulation, geometry: &Geometry) -> Self {
        let thicknesses = insulation.thicknesses();
        let total: f64 = thicknesses.iter().sum();
        Self {
            insulation,
            shapes: geometry.shape_factors(&thicknesses),
            outer_area: geometry.outer_area(total),
        }
    }

    pub(super) fn conduct(
        &self,
        process: f64,
        outer: f64,
        tol: f64,
        max_passes: usize,
    ) -> Result<Conduction, ThermalError> {
        let mut temperatures = self.initial_temperatures(process, outer);
        let mut passes = 0;

        loop {
            let (conductivities, resistances, rate) = self.resistances(&temperatures)?;
            passes += 1;

            let mut change: f64 = 0.0;
            for i in 1..resistances.len() {
                let next = temperatures[i - 1] - rate * resistances[i - 1];
                change = change.max((next - temperatures[i]).abs());
                temperatures[i] = next;
            }

            if change <= tol || passes >= max_passes {
                if change > tol {
                    tracing::trace!(passes, change, "layer temperatures not settled");
                }
                let (conductivities, rate) = if change > 0.0 {
                    let (k, _, rate) = self.resistances(&temperatures)?;
                    (k, rate)
                } else {
                    (conductivities, rate)
                };
                return Ok(Conduction {
                    temperatures,
                    conductivities,
                    rate,
                    flux: rate / self.outer_area,
                    passes,
                });
            }
        }
    }

    /// Temperatures falling linearly with cumulative shape factor, which is
    /// exact for constant conductivity.
    fn initial_temperatures(&self, process: f64, outer: f64) -> Vec<f64> {
        let total: f64 = self.shapes.iter().sum();
        let mut cumulative = 0.0;
        let mut temperatures = Vec::with_capacity(self.shapes.len() + 1);
        temperatures.push(process);
        for shape in &self.shapes[..self.shapes.len() - 1] {
            cumulative += shape;
            temperatures.push(process - (process - outer) * cumulative / total);
        }
        temperatures.push(outer);
        temperatures
    }

    fn resistances(&self, temperatures: &[f64]) -> Result<(Vec<f64>, Vec<f64>, f64), ThermalError> {
        let conductivities = self
            .insulation
            .layers()
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                let mean = (temperatures[i] + temperatures[i + 1]) / 2.0;
                layer.material().conductivity_at(i, mean)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let resistances: Vec<f64> = self
            .shapes
            .iter()
            .zip(&conductivities)
            .map(|(shape, k)| shape / k)
            .collect();

        let drop = temperatures[0] - temperatures[temperatures.len() - 1];
        let rate = drop / resistances.iter().sum::<f64>();
        Ok((conductivities, resistances, rate))
    }
}
