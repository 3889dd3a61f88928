use serde::{Deserialize, Serialize};

use crate::ThermalError;

/// A fuel or purchased energy carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fuel {
    pub name: String,
    /// Unit the price and heating value refer to, such as `kg` or `m³`.
    pub unit: String,
    /// Price per unit of fuel.
    pub price: f64,
    /// Lower heating value in kWh per unit of fuel.
    pub heating_value: f64,
    /// Fraction of the heating value delivered as useful heat.
    pub efficiency: f64,
}

impl Fuel {
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        price: f64,
        heating_value: f64,
        efficiency: f64,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            price,
            heating_value,
            efficiency,
        }
    }

    /// Checks that the price is non-negative, the heating value positive, and
    /// the efficiency in `(0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidInput`] naming the offending field.
    pub fn validate(&self) -> Result<(), ThermalError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ThermalError::InvalidInput {
                parameter: "price",
                reason: "must be non-negative and finite",
            });
        }
        if !self.heating_value.is_finite() || self.heating_value <= 0.0 {
            return Err(ThermalError::InvalidInput {
                parameter: "heating_value",
                reason: "must be positive and finite",
            });
        }
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(ThermalError::InvalidInput {
                parameter: "efficiency",
                reason: "must lie in (0, 1]",
            });
        }
        Ok(())
    }

    /// Cost of one kWh of useful heat at the given unit price.
    #[must_use]
    pub fn cost_per_useful_kwh(&self, price: f64) -> f64 {
        price / (self.heating_value * self.efficiency)
    }
}

/// Fuels available to the savings analysis, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelTable {
    fuels: Vec<Fuel>,
}

impl Default for FuelTable {
    fn default() -> Self {
        Self {
            fuels: vec![
                Fuel::new("Heavy fuel oil", "kg", 3.50, 11.34, 0.80),
                Fuel::new("Natural gas", "m³", 3.60, 9.65, 0.75),
                Fuel::new("Eucalyptus firewood (30% moisture)", "t", 200.00, 3500.00, 0.70),
                Fuel::new("Steam", "t", 100.00, 650.00, 1.00),
                Fuel::new("Electricity", "kWh", 0.75, 1.00, 1.00),
            ],
        }
    }
}

impl FuelTable {
    #[must_use]
    pub fn new(fuels: Vec<Fuel>) -> Self {
        Self { fuels }
    }

    /// Looks up a fuel by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Fuel> {
        let name = name.trim();
        self.fuels
            .iter()
            .find(|fuel| fuel.name.eq_ignore_ascii_case(name))
    }

    /// Adds a fuel, replacing any fuel with the same name.
    pub fn insert(&mut self, fuel: Fuel) {
        match self
            .fuels
            .iter_mut()
            .find(|existing| existing.name.eq_ignore_ascii_case(&fuel.name))
        {
            Some(existing) => *existing = fuel,
            None => self.fuels.push(fuel),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fuel> {
        self.fuels.iter()
    }
}
