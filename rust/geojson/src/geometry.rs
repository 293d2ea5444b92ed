//! GeoJSON geometry variants.
//!
//! Coordinates are `[x, y]` pairs of IEEE-754 doubles. Equality between two
//! positions is exact value equality; nothing in this crate applies an
//! epsilon tolerance.

use serde::{Deserialize, Serialize};

/// A single coordinate pair `[x, y]`.
pub type Position = [f64; 2];

/// A GeoJSON geometry.
///
/// The serde representation matches the GeoJSON wire format: the variant is
/// selected by the `"type"` member, coordinates live under `"coordinates"`
/// (or `"geometries"` for collections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// Creates a Point geometry.
    pub fn point(coordinates: Position) -> Self {
        Geometry::Point { coordinates }
    }

    /// Creates a MultiPoint geometry.
    pub fn multi_point(coordinates: Vec<Position>) -> Self {
        Geometry::MultiPoint { coordinates }
    }

    /// Creates a LineString geometry.
    pub fn line_string(coordinates: Vec<Position>) -> Self {
        Geometry::LineString { coordinates }
    }

    /// Creates a MultiLineString geometry.
    pub fn multi_line_string(coordinates: Vec<Vec<Position>>) -> Self {
        Geometry::MultiLineString { coordinates }
    }

    /// Creates a Polygon geometry. The first ring is the outer boundary,
    /// any further rings are holes.
    pub fn polygon(coordinates: Vec<Vec<Position>>) -> Self {
        Geometry::Polygon { coordinates }
    }

    /// Creates a MultiPolygon geometry.
    pub fn multi_polygon(coordinates: Vec<Vec<Vec<Position>>>) -> Self {
        Geometry::MultiPolygon { coordinates }
    }

    /// Creates a GeometryCollection.
    pub fn collection(geometries: Vec<Geometry>) -> Self {
        Geometry::GeometryCollection { geometries }
    }

    /// Returns the GeoJSON type name of this geometry.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::MultiPoint { .. } => "MultiPoint",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
            Geometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    /// Visits every position of this geometry, depth-first, in input order.
    pub fn each_position<F: FnMut(&Position)>(&self, f: &mut F) {
        match self {
            Geometry::Point { coordinates } => f(coordinates),
            Geometry::MultiPoint { coordinates } => coordinates.iter().for_each(|p| f(p)),
            Geometry::LineString { coordinates } => coordinates.iter().for_each(|p| f(p)),
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                for line in coordinates {
                    line.iter().for_each(|p| f(p));
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    for ring in polygon {
                        ring.iter().for_each(|p| f(p));
                    }
                }
            }
            Geometry::GeometryCollection { geometries } => {
                for g in geometries {
                    g.each_position(f);
                }
            }
        }
    }
}
