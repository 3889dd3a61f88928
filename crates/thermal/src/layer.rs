use uom::si::{f64::Length, length::meter};

use crate::{Material, ThermalError};

/// Largest number of layers an insulation stack may have.
pub const MAX_LAYERS: usize = 3;

/// One insulation layer: a thickness of a single material.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    thickness: Length,
    material: Material,
}

impl Layer {
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidGeometry`] if the thickness is not
    /// positive and finite.
    pub fn new(thickness: Length, material: Material) -> Result<Self, ThermalError> {
        let value = thickness.get::<meter>();
        if !value.is_finite() || value <= 0.0 {
            return Err(ThermalError::InvalidGeometry {
                parameter: "thickness",
                value,
            });
        }
        Ok(Self {
            thickness,
            material,
        })
    }

    #[must_use]
    pub fn thickness(&self) -> Length {
        self.thickness
    }

    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }
}

/// An ordered stack of layers, from the process side outward.
#[derive(Debug, Clone, PartialEq)]
pub struct Insulation {
    layers: Vec<Layer>,
}

impl Insulation {
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidInput`] unless there are between one
    /// and [`MAX_LAYERS`] layers.
    pub fn new(layers: Vec<Layer>) -> Result<Self, ThermalError> {
        if layers.is_empty() || layers.len() > MAX_LAYERS {
            return Err(ThermalError::InvalidInput {
                parameter: "layers",
                reason: "insulation needs one to three layers",
            });
        }
        Ok(Self { layers })
    }

    /// A single-layer stack.
    #[must_use]
    pub fn single(layer: Layer) -> Self {
        Self {
            layers: vec![layer],
        }
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn total_thickness(&self) -> Length {
        self.layers
            .iter()
            .map(Layer::thickness)
            .fold(Length::new::<meter>(0.0), |total, t| total + t)
    }

    pub(crate) fn thicknesses(&self) -> Vec<f64> {
        self.layers
            .iter()
            .map(|layer| layer.thickness.get::<meter>())
            .collect()
    }
}
