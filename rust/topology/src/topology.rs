// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The topology result types.
//!
//! A [`Topology`] is the immutable output of a build: an optional grid
//! transform, a bounding box, the rebuilt objects, and the shared arc table.
//! Objects never own arc coordinates — they hold [`ArcIndex`] references
//! into the table, so any number of objects can share a boundary without
//! aliasing concerns.
//!
//! The serde representation matches the TopoJSON document shape: the
//! top-level value is tagged `"type": "Topology"`, object geometries are
//! tagged with their GeoJSON type and carry `arcs` (line/polygon kinds) or
//! `coordinates` (point kinds).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use topo_lite_geojson::{BoundingBox, Position};

use crate::error::{Error, Result};

/// A signed reference to an arc in the arc table.
///
/// A non-negative value `r` denotes arc `r` traversed forward; a negative
/// value denotes arc `!r` (bitwise complement) traversed in reverse. The
/// complement — rather than plain negation — keeps `0` and its reversal
/// distinguishable: `!0 == -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArcIndex(i32);

impl ArcIndex {
    /// Reference to arc `index`, traversed forward.
    pub fn forward(index: usize) -> Self {
        ArcIndex(index as i32)
    }

    /// Reference to arc `index`, traversed in reverse.
    pub fn reversed(index: usize) -> Self {
        ArcIndex(!(index as i32))
    }

    /// The arc table index this reference points at.
    pub fn index(self) -> usize {
        if self.0 < 0 {
            !self.0 as usize
        } else {
            self.0 as usize
        }
    }

    /// `true` if the arc is traversed in reverse.
    pub fn is_reversed(self) -> bool {
        self.0 < 0
    }

    /// The same arc, traversed the other way. An involution: `r.rev().rev() == r`.
    pub fn rev(self) -> Self {
        ArcIndex(!self.0)
    }

    /// The raw signed encoding.
    pub fn raw(self) -> i32 {
        self.0
    }
}

impl From<i32> for ArcIndex {
    fn from(raw: i32) -> Self {
        ArcIndex(raw)
    }
}

/// The affine transform between real and grid coordinates.
///
/// `quantized = round((real - translate) / scale)` and
/// `real = quantized * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Transform {
    /// Maps a real coordinate onto the integer grid.
    pub fn quantize(&self, p: &Position) -> Position {
        [
            ((p[0] - self.translate[0]) / self.scale[0]).round(),
            ((p[1] - self.translate[1]) / self.scale[1]).round(),
        ]
    }

    /// Maps a grid coordinate back to real space.
    pub fn unquantize(&self, q: &Position) -> Position {
        [
            q[0] * self.scale[0] + self.translate[0],
            q[1] * self.scale[1] + self.translate[1],
        ]
    }
}

/// Geometry of a topology object: the input shape with coordinate sequences
/// replaced by signed arc references. Point kinds keep literal coordinates —
/// isolated points never enter the arc table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectGeometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { arcs: Vec<ArcIndex> },
    MultiLineString { arcs: Vec<Vec<ArcIndex>> },
    Polygon { arcs: Vec<Vec<ArcIndex>> },
    MultiPolygon { arcs: Vec<Vec<Vec<ArcIndex>>> },
    GeometryCollection { geometries: Vec<TopologyObject> },
}

impl ObjectGeometry {
    /// Returns the GeoJSON type name of this geometry.
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectGeometry::Point { .. } => "Point",
            ObjectGeometry::MultiPoint { .. } => "MultiPoint",
            ObjectGeometry::LineString { .. } => "LineString",
            ObjectGeometry::MultiLineString { .. } => "MultiLineString",
            ObjectGeometry::Polygon { .. } => "Polygon",
            ObjectGeometry::MultiPolygon { .. } => "MultiPolygon",
            ObjectGeometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }
}

/// One output object: identifier, property bag and arc-referencing geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub geometry: ObjectGeometry,
}

impl TopologyObject {
    /// Creates an object with no id and no properties.
    pub fn new(geometry: ObjectGeometry) -> Self {
        TopologyObject {
            id: None,
            properties: Map::new(),
            geometry,
        }
    }
}

/// A built topology: the sole externally visible result of the pipeline.
///
/// When `transform` is present the arcs hold delta-encoded integer grid
/// coordinates (first point absolute, then successive differences);
/// otherwise they hold absolute real coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Topology")]
pub struct Topology {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    #[serde(rename = "bbox", skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    // The document always carries these members, at least as [].
    #[serde(default)]
    pub objects: Vec<TopologyObject>,
    #[serde(default)]
    pub arcs: Vec<Vec<Position>>,
}

impl Topology {
    /// Serializes the topology to a JSON document.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Reads a topology back from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Looks up a top-level object by identifier.
    pub fn object(&self, id: &str) -> Option<&TopologyObject> {
        self.objects.iter().find(|o| o.id.as_deref() == Some(id))
    }
}
