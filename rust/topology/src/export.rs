// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Projecting a topology back into standalone features.
//!
//! Resolves every signed arc reference to its coordinate sequence (reversed
//! when the sign says so) and concatenates consecutive references, dropping
//! the duplicated junction point at each seam. On a quantized topology the
//! arcs are first delta-decoded with a running sum and mapped through the
//! inverse transform; literal point coordinates are inverse-mapped as well.

use serde_json::Value;

use topo_lite_geojson::{Feature, FeatureCollection, Geometry, Position};

use crate::error::{Error, Result};
use crate::topology::{ArcIndex, ObjectGeometry, Topology, TopologyObject};

impl Topology {
    /// Rebuilds a feature collection equivalent to the build input (up to
    /// quantization/simplification, and exactly when both were disabled).
    pub fn to_features(&self) -> Result<FeatureCollection> {
        let arcs = self.absolute_arcs();
        let mut fc = FeatureCollection::new();
        for object in &self.objects {
            fc.add_feature(self.object_to_feature(object, &arcs)?);
        }
        Ok(fc)
    }

    /// The arc table with delta encoding and quantization undone.
    fn absolute_arcs(&self) -> Vec<Vec<Position>> {
        match &self.transform {
            None => self.arcs.clone(),
            Some(t) => self
                .arcs
                .iter()
                .map(|arc| {
                    let mut x = 0.0;
                    let mut y = 0.0;
                    arc.iter()
                        .map(|p| {
                            // running sum in the integer domain, then back
                            // to real space
                            x += p[0];
                            y += p[1];
                            t.unquantize(&[x, y])
                        })
                        .collect()
                })
                .collect(),
        }
    }

    fn object_to_feature(
        &self,
        object: &TopologyObject,
        arcs: &[Vec<Position>],
    ) -> Result<Feature> {
        let mut feature = Feature::new(self.resolve_geometry(&object.geometry, arcs)?);
        feature.id = object.id.clone().map(Value::String);
        feature.properties = object.properties.clone();
        Ok(feature)
    }

    fn resolve_geometry(
        &self,
        geometry: &ObjectGeometry,
        arcs: &[Vec<Position>],
    ) -> Result<Geometry> {
        Ok(match geometry {
            ObjectGeometry::Point { coordinates } => {
                Geometry::point(self.resolve_point(coordinates))
            }
            ObjectGeometry::MultiPoint { coordinates } => Geometry::multi_point(
                coordinates.iter().map(|p| self.resolve_point(p)).collect(),
            ),
            ObjectGeometry::LineString { arcs: refs } => {
                Geometry::line_string(stitch(refs, arcs)?)
            }
            ObjectGeometry::MultiLineString { arcs: lines } => Geometry::multi_line_string(
                lines
                    .iter()
                    .map(|refs| stitch(refs, arcs))
                    .collect::<Result<_>>()?,
            ),
            ObjectGeometry::Polygon { arcs: rings } => Geometry::polygon(
                rings
                    .iter()
                    .map(|refs| stitch(refs, arcs))
                    .collect::<Result<_>>()?,
            ),
            ObjectGeometry::MultiPolygon { arcs: polygons } => Geometry::multi_polygon(
                polygons
                    .iter()
                    .map(|rings| {
                        rings
                            .iter()
                            .map(|refs| stitch(refs, arcs))
                            .collect::<Result<_>>()
                    })
                    .collect::<Result<_>>()?,
            ),
            ObjectGeometry::GeometryCollection { geometries } => Geometry::collection(
                geometries
                    .iter()
                    .map(|member| self.resolve_geometry(&member.geometry, arcs))
                    .collect::<Result<_>>()?,
            ),
        })
    }

    /// Literal point coordinates live on the grid when a transform exists.
    fn resolve_point(&self, p: &Position) -> Position {
        match &self.transform {
            Some(t) => t.unquantize(p),
            None => *p,
        }
    }
}

/// Concatenates resolved arcs into one coordinate sequence. Consecutive
/// arcs share their junction coordinate; the duplicate is dropped at each
/// seam.
fn stitch(refs: &[ArcIndex], arcs: &[Vec<Position>]) -> Result<Vec<Position>> {
    let mut out: Vec<Position> = Vec::new();
    for &reference in refs {
        let index = reference.index();
        let arc = arcs.get(index).ok_or(Error::ArcOutOfRange {
            index,
            len: arcs.len(),
        })?;

        if !out.is_empty() {
            out.pop();
        }
        if reference.is_reversed() {
            out.extend(arc.iter().rev());
        } else {
            out.extend(arc.iter());
        }
    }
    Ok(out)
}
