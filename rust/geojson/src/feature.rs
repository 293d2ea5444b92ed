//! GeoJSON features and feature collections.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::geometry::Geometry;

/// A GeoJSON feature: a geometry with an optional identifier and a property
/// bag.
///
/// `geometry` is optional because the GeoJSON grammar allows `"geometry":
/// null`; such features carry no coordinates and are skipped by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub properties: Map<String, Value>,
    pub geometry: Option<Geometry>,
}

// "properties": null is legal GeoJSON; treat it as the empty bag.
fn null_to_empty<'de, D>(d: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Map<String, Value>> = Option::deserialize(d)?;
    Ok(value.unwrap_or_default())
}

impl Feature {
    /// Creates a feature wrapping `geometry`, with no id and no properties.
    pub fn new(geometry: Geometry) -> Self {
        Feature {
            id: None,
            properties: Map::new(),
            geometry: Some(geometry),
        }
    }

    /// Sets a property, replacing any previous value under the same key.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Returns a property as a string slice, if present and a string.
    pub fn property_string(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

/// An ordered collection of features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        FeatureCollection::default()
    }

    /// Appends a feature, preserving insertion order.
    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Parses a collection from a GeoJSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the collection to a GeoJSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
