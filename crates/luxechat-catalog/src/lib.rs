// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static property and agent reference data.
//!
//! The catalog is read-only marketing content, compiled into the binary.
//! The resolver consumes a reduced projection with single-letter field
//! names to keep the completion prompt small.

use serde::{Deserialize, Serialize};

use luxechat_core::{LuxeError, PropertyId};

/// Embedded demo catalog. A production deployment would swap this file.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// A property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    /// Display price string, e.g. "Rp 2.1 M".
    pub price: String,
    pub location: String,
    pub image: String,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub area_sqm: u32,
}

/// A member of the agent roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAgent {
    pub id: u32,
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
}

/// Reduced projection of a property for the resolver prompt.
///
/// Field names are shortened to one letter to bound payload size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyContext {
    pub id: PropertyId,
    #[serde(rename = "t")]
    pub title: String,
    #[serde(rename = "p")]
    pub price: String,
    #[serde(rename = "l")]
    pub location: String,
}

/// The full reference catalog: properties and the agent roster.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub properties: Vec<Property>,
    pub agents: Vec<PropertyAgent>,
}

impl Catalog {
    /// Loads the compiled-in catalog.
    pub fn builtin() -> Result<Self, LuxeError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parses a catalog from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, LuxeError> {
        serde_json::from_str(json).map_err(|e| LuxeError::Config(format!(
            "invalid catalog document: {e}"
        )))
    }

    /// Looks up a property by id.
    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// Returns the reduced projection sent with every resolver request.
    pub fn context(&self) -> Vec<PropertyContext> {
        self.properties
            .iter()
            .map(|p| PropertyContext {
                id: p.id,
                title: p.title.clone(),
                price: p.price.clone(),
                location: p.location.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().expect("embedded catalog must be valid");
        assert!(!catalog.properties.is_empty());
        assert!(!catalog.agents.is_empty());
    }

    #[test]
    fn property_lookup_by_id() {
        let catalog = Catalog::builtin().unwrap();
        let first = &catalog.properties[0];
        assert_eq!(catalog.property(first.id), Some(first));
        assert_eq!(catalog.property(PropertyId(9999)), None);
    }

    #[test]
    fn context_uses_short_field_names() {
        let catalog = Catalog::builtin().unwrap();
        let ctx = catalog.context();
        assert_eq!(ctx.len(), catalog.properties.len());

        let json = serde_json::to_string(&ctx[0]).unwrap();
        assert!(json.contains("\"t\":"), "got: {json}");
        assert!(json.contains("\"p\":"), "got: {json}");
        assert!(json.contains("\"l\":"), "got: {json}");
        assert!(!json.contains("title"), "got: {json}");
    }

    #[test]
    fn malformed_catalog_is_a_config_error() {
        let err = Catalog::from_json("{\"properties\": 3}").unwrap_err();
        assert!(err.to_string().contains("invalid catalog document"));
    }
}
