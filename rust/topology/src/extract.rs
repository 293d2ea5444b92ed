// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 3: extraction.
//!
//! Decomposes every feature's geometry into elementary open lines and
//! closed rings over the shared coordinate arena, and records per object
//! how to reassemble it. Point coordinates pass through untouched — they
//! never become arcs.
//!
//! Malformed parts (a missing geometry member, a line with fewer than two
//! points, an empty ring) are skipped locally with a warning; the object
//! survives extraction with an empty slot and falls to the pruner instead
//! of failing the build.

use log::{debug, warn};
use serde_json::Value;

use topo_lite_geojson::{Feature, Geometry, Position};

use crate::builder::{BuildGeometry, BuildObject, Builder, CutUnit};

impl Builder {
    /// Walks every feature depth-first and populates the line/ring arenas
    /// and the object mirror structures.
    pub(crate) fn extract(&mut self) {
        let features = std::mem::take(&mut self.features);
        self.objects.reserve(features.len());
        for (index, feature) in features.into_iter().enumerate() {
            let object = self.extract_feature(feature, index);
            self.objects.push(object);
        }
    }

    fn extract_feature(&mut self, feature: Feature, index: usize) -> BuildObject {
        let id = resolve_id(&feature, &self.opts.id_property, index);
        let geometry = match feature.geometry {
            Some(g) => Some(self.extract_geometry(g)),
            None => {
                warn!("feature {index} has no geometry and will produce no output object");
                None
            }
        };
        BuildObject {
            id: Some(id),
            properties: feature.properties,
            geometry,
        }
    }

    fn extract_geometry(&mut self, geometry: Geometry) -> BuildGeometry {
        match geometry {
            Geometry::Point { coordinates } => BuildGeometry::Point(coordinates),
            Geometry::MultiPoint { coordinates } => BuildGeometry::MultiPoint(coordinates),
            Geometry::LineString { coordinates } => {
                BuildGeometry::LineString(self.extract_line(coordinates))
            }
            Geometry::MultiLineString { coordinates } => BuildGeometry::MultiLineString(
                coordinates
                    .into_iter()
                    .map(|line| self.extract_line(line))
                    .collect(),
            ),
            Geometry::Polygon { coordinates } => BuildGeometry::Polygon(
                coordinates
                    .into_iter()
                    .map(|ring| self.extract_ring(ring))
                    .collect(),
            ),
            Geometry::MultiPolygon { coordinates } => BuildGeometry::MultiPolygon(
                coordinates
                    .into_iter()
                    .map(|polygon| {
                        polygon
                            .into_iter()
                            .map(|ring| self.extract_ring(ring))
                            .collect()
                    })
                    .collect(),
            ),
            Geometry::GeometryCollection { geometries } => BuildGeometry::Collection(
                geometries
                    .into_iter()
                    .map(|member| BuildObject {
                        id: None,
                        properties: Default::default(),
                        geometry: Some(self.extract_geometry(member)),
                    })
                    .collect(),
            ),
        }
    }

    /// Copies an open line into the arena. Lines keep their endpoints fixed;
    /// fewer than two points is not a line.
    fn extract_line(&mut self, points: Vec<Position>) -> Option<usize> {
        if points.len() < 2 {
            warn!("skipping line with {} point(s)", points.len());
            return None;
        }
        let start = self.coords.len();
        self.coords.extend(points);
        let end = self.coords.len() - 1;
        self.lines.push(CutUnit::new(start, end));
        Some(self.lines.len() - 1)
    }

    /// Copies a ring into the arena, repairing it if necessary: an unclosed
    /// ring is closed by repeating its first coordinate, and a single-point
    /// ring becomes the minimal 2-point closed loop.
    fn extract_ring(&mut self, mut points: Vec<Position>) -> Option<usize> {
        if points.is_empty() {
            warn!("skipping empty ring");
            return None;
        }
        if points.len() == 1 || points.first() != points.last() {
            debug!("closing unclosed ring of {} point(s)", points.len());
            points.push(points[0]);
        }
        let start = self.coords.len();
        self.coords.extend(points);
        let end = self.coords.len() - 1;
        self.rings.push(CutUnit::new(start, end));
        Some(self.rings.len() - 1)
    }
}

/// Resolves an object identifier: the explicit `id` member wins, then the
/// configured property key, then the feature's ordinal index.
fn resolve_id(feature: &Feature, id_property: &str, index: usize) -> String {
    if let Some(id) = &feature.id {
        if let Some(s) = value_to_id(id) {
            return s;
        }
    }
    if let Some(value) = feature.properties.get(id_property) {
        if let Some(s) = value_to_id(value) {
            return s;
        }
    }
    index.to_string()
}

fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
