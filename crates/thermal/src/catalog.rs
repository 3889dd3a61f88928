use std::collections::BTreeMap;

use thiserror::Error;

use crate::Material;

/// Errors raised when editing a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("material name must not be empty")]
    EmptyName,

    #[error("material `{name}` already exists")]
    DuplicateName { name: String },

    #[error("material `{name}` is not in the catalog")]
    UnknownMaterial { name: String },
}

/// An in-memory snapshot of materials, keyed by unique name.
///
/// Calculations read from the catalog before they start and never write to
/// it, so a catalog can be shared freely between independent calculations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    materials: BTreeMap<String, Material>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a sequence of materials.
    ///
    /// # Errors
    ///
    /// Returns the first error that [`Catalog::add`] would raise.
    pub fn from_materials<I>(materials: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Material>,
    {
        let mut catalog = Self::new();
        for material in materials {
            catalog.add(material)?;
        }
        Ok(catalog)
    }

    /// Adds a material.
    ///
    /// Surrounding whitespace is stripped from the name before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] for a blank name and
    /// [`CatalogError::DuplicateName`] if the name is already taken.
    pub fn add(&mut self, material: Material) -> Result<(), CatalogError> {
        let material = material.into_trimmed();
        let name = material.name().to_string();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.materials.contains_key(&name) {
            return Err(CatalogError::DuplicateName { name });
        }
        self.materials.insert(name, material);
        Ok(())
    }

    /// Removes and returns the named material.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownMaterial`] if no material has that name.
    pub fn remove(&mut self, name: &str) -> Result<Material, CatalogError> {
        self.materials
            .remove(name.trim())
            .ok_or_else(|| CatalogError::UnknownMaterial {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name.trim())
    }

    /// Material names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    /// Materials in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
