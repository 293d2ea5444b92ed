// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 9: empty-object pruning.
//!
//! Simplification and degenerate input can leave objects without arcs.
//! Lines and rings with zero references disappear; a polygon whose outer
//! (first) ring emptied is dropped whole, while empty inner rings are just
//! omitted. Collections prune recursively and vanish when left memberless.
//! Point and multipoint objects are never pruned here.

use crate::topology::{ArcIndex, ObjectGeometry, TopologyObject};

pub(crate) fn prune_empty(objects: Vec<TopologyObject>) -> Vec<TopologyObject> {
    objects.into_iter().filter_map(prune_object).collect()
}

fn prune_object(mut object: TopologyObject) -> Option<TopologyObject> {
    object.geometry = prune_geometry(object.geometry)?;
    Some(object)
}

fn prune_geometry(geometry: ObjectGeometry) -> Option<ObjectGeometry> {
    match geometry {
        ObjectGeometry::Point { .. } | ObjectGeometry::MultiPoint { .. } => Some(geometry),
        ObjectGeometry::LineString { arcs } => {
            (!arcs.is_empty()).then_some(ObjectGeometry::LineString { arcs })
        }
        ObjectGeometry::MultiLineString { arcs } => {
            let lines: Vec<Vec<ArcIndex>> =
                arcs.into_iter().filter(|line| !line.is_empty()).collect();
            (!lines.is_empty()).then_some(ObjectGeometry::MultiLineString { arcs: lines })
        }
        ObjectGeometry::Polygon { arcs } => {
            prune_polygon(arcs).map(|arcs| ObjectGeometry::Polygon { arcs })
        }
        ObjectGeometry::MultiPolygon { arcs } => {
            let polygons: Vec<Vec<Vec<ArcIndex>>> =
                arcs.into_iter().filter_map(prune_polygon).collect();
            (!polygons.is_empty()).then_some(ObjectGeometry::MultiPolygon { arcs: polygons })
        }
        ObjectGeometry::GeometryCollection { geometries } => {
            let members: Vec<TopologyObject> =
                geometries.into_iter().filter_map(prune_object).collect();
            (!members.is_empty())
                .then_some(ObjectGeometry::GeometryCollection { geometries: members })
        }
    }
}

/// An empty outer ring invalidates the whole polygon; empty inner rings are
/// dropped silently.
fn prune_polygon(rings: Vec<Vec<ArcIndex>>) -> Option<Vec<Vec<ArcIndex>>> {
    if rings.first().map_or(true, |outer| outer.is_empty()) {
        return None;
    }
    Some(rings.into_iter().filter(|ring| !ring.is_empty()).collect())
}
