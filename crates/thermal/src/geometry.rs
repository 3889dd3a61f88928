use std::f64::consts::PI;

use uom::si::{f64::Length, length::meter};

use crate::{
    ThermalError,
    convection::{PlaneLength, Surface},
};

/// Shape of the insulated object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// A flat wall; fluxes and losses are per square meter.
    Plane,
    /// A pipe, insulated from its bare outer diameter outward.
    ///
    /// Losses are reported per meter of pipe as well as per square meter of
    /// outer surface.
    Cylinder { outer_base_diameter: Length },
}

impl Geometry {
    /// Checks that a cylinder diameter is positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidGeometry`] naming the diameter.
    pub fn validate(&self) -> Result<(), ThermalError> {
        match *self {
            Self::Plane => Ok(()),
            Self::Cylinder {
                outer_base_diameter,
            } => {
                let d = outer_base_diameter.get::<meter>();
                if d.is_finite() && d > 0.0 {
                    Ok(())
                } else {
                    Err(ThermalError::InvalidGeometry {
                        parameter: "outer_base_diameter",
                        value: d,
                    })
                }
            }
        }
    }

    /// Conduction shape factor of each layer, in meters.
    ///
    /// A layer's thermal resistance per unit extent is its shape factor over
    /// its conductivity: `L` for a plane wall, `ln(r_out/r_in)/(2π)` for a
    /// cylindrical shell, with radii accumulated outward from the bare pipe.
    pub(crate) fn shape_factors(&self, thicknesses: &[f64]) -> Vec<f64> {
        match *self {
            Self::Plane => thicknesses.to_vec(),
            Self::Cylinder {
                outer_base_diameter,
            } => {
                let mut inner = outer_base_diameter.get::<meter>() / 2.0;
                thicknesses
                    .iter()
                    .map(|thickness| {
                        let outer = inner + thickness;
                        let shape = (outer / inner).ln() / (2.0 * PI);
                        inner = outer;
                        shape
                    })
                    .collect()
            }
        }
    }

    /// Outer surface area per unit extent: 1 m²/m² for a plane, `π·D` m²/m
    /// for a cylinder of outer diameter `D`.
    pub(crate) fn outer_area(&self, total_thickness: f64) -> f64 {
        match self.outer_diameter(total_thickness) {
            Some(d) => PI * d,
            None => 1.0,
        }
    }

    /// Outer diameter after insulation, in meters, for a cylinder.
    pub(crate) fn outer_diameter(&self, total_thickness: f64) -> Option<f64> {
        match *self {
            Self::Plane => None,
            Self::Cylinder {
                outer_base_diameter,
            } => Some(outer_base_diameter.get::<meter>() + 2.0 * total_thickness),
        }
    }

    /// The surface exposed to ambient air once `total_thickness` is applied.
    pub(crate) fn exposed_surface(&self, total_thickness: f64, plane_length: PlaneLength) -> Surface {
        match self.outer_diameter(total_thickness) {
            Some(d) => Surface::Cylinder {
                diameter: Length::new::<meter>(d),
            },
            None => Surface::Plane {
                length: Length::new::<meter>(plane_length.resolve(total_thickness)),
            },
        }
    }
}
