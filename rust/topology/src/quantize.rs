// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 2 and stage 10a: coordinate quantization.
//!
//! Pre-quantization snaps input coordinates onto an integer grid before any
//! topology inference, which is what makes junction detection by exact
//! coordinate equality effective on real-world data. Post-quantization
//! decides the coordinate space of the *output*: integer grid coordinates
//! plus the transform when a post resolution was requested, real
//! coordinates (transform inverted and dropped) otherwise.
//!
//! Consecutive coordinates that collapse onto the same grid cell are merged
//! within lines and rings — but a line keeps at least 2 points and a ring at
//! least 4, so a fully degenerate shape still closes. Point and multipoint
//! geometries are never collapsed.

use topo_lite_geojson::{BoundingBox, Geometry, Position};

use crate::builder::Builder;
use crate::topology::{ObjectGeometry, TopologyObject, Transform};

/// Minimum retained points when collapsing an open line.
const LINE_MINIMUM: usize = 2;
/// Minimum retained points when collapsing a ring.
const RING_MINIMUM: usize = 4;

/// Derives the grid transform for a bounding box.
///
/// `q0` is the working (pre) resolution and `q1` the output (post)
/// resolution; the extra `q0 / q1` factor sizes the working grid so that the
/// later rescale to the output grid is a clean division. An axis with zero
/// extent gets unit scale instead of a division by zero.
pub(crate) fn derive_transform(bbox: &BoundingBox, q0: f64, q1: f64) -> Transform {
    let kx = if bbox.width() != 0.0 {
        (q1 - 1.0) / bbox.width() * q0 / q1
    } else {
        1.0
    };
    let ky = if bbox.height() != 0.0 {
        (q1 - 1.0) / bbox.height() * q0 / q1
    } else {
        1.0
    };

    Transform {
        scale: [1.0 / kx, 1.0 / ky],
        translate: [bbox.min_x, bbox.min_y],
    }
}

/// Maps every point of a line/ring through `f`, dropping a point that lands
/// on the same cell as its predecessor. The result is padded back up to
/// `minimum` points (repeating the start/closing point) so degenerate
/// shapes stay closed rather than vanishing.
fn transform_line<F: Fn(&Position) -> Position>(
    points: &[Position],
    f: F,
    minimum: usize,
) -> Vec<Position> {
    let mut out: Vec<Position> = Vec::with_capacity(points.len());
    for p in points {
        let q = f(p);
        if out.last() != Some(&q) {
            out.push(q);
        }
    }
    if out.is_empty() {
        return out;
    }
    while out.len() < minimum {
        out.push(out[0]);
    }
    out
}

fn quantize_geometry(g: &mut Geometry, t: &Transform) {
    match g {
        Geometry::Point { coordinates } => *coordinates = t.quantize(coordinates),
        Geometry::MultiPoint { coordinates } => {
            for p in coordinates.iter_mut() {
                *p = t.quantize(p);
            }
        }
        Geometry::LineString { coordinates } => {
            *coordinates = transform_line(coordinates, |p| t.quantize(p), LINE_MINIMUM);
        }
        Geometry::MultiLineString { coordinates } => {
            for line in coordinates.iter_mut() {
                *line = transform_line(line, |p| t.quantize(p), LINE_MINIMUM);
            }
        }
        Geometry::Polygon { coordinates } => {
            for ring in coordinates.iter_mut() {
                *ring = transform_line(ring, |p| t.quantize(p), RING_MINIMUM);
            }
        }
        Geometry::MultiPolygon { coordinates } => {
            for polygon in coordinates.iter_mut() {
                for ring in polygon.iter_mut() {
                    *ring = transform_line(ring, |p| t.quantize(p), RING_MINIMUM);
                }
            }
        }
        Geometry::GeometryCollection { geometries } => {
            for member in geometries.iter_mut() {
                quantize_geometry(member, t);
            }
        }
    }
}

/// Maps the literal point coordinates of rebuilt objects through `f`.
/// Arc-referencing geometries carry no coordinates of their own.
fn map_object_points<F: Fn(&Position) -> Position>(objects: &mut [TopologyObject], f: &F) {
    for obj in objects {
        match &mut obj.geometry {
            ObjectGeometry::Point { coordinates } => *coordinates = f(coordinates),
            ObjectGeometry::MultiPoint { coordinates } => {
                for p in coordinates.iter_mut() {
                    *p = f(p);
                }
            }
            ObjectGeometry::GeometryCollection { geometries } => {
                map_object_points(geometries, f);
            }
            _ => {}
        }
    }
}

impl Builder {
    /// Stage 2: derive the grid transform and snap every input coordinate.
    pub(crate) fn pre_quantize(&mut self) {
        let Some(q0) = self.opts.pre_resolution() else {
            return;
        };
        if self.bbox.is_empty() {
            return;
        }
        let q1 = self.opts.post_resolution().unwrap_or(q0);
        let transform = derive_transform(&self.bbox, q0, q1);

        for feature in &mut self.features {
            if let Some(geometry) = feature.geometry.as_mut() {
                quantize_geometry(geometry, &transform);
            }
        }
        self.transform = Some(transform);
    }

    /// Stage 10a: settle the output coordinate space.
    ///
    /// With a post resolution, arcs and literal points end up on the output
    /// grid and the transform is kept so consumers can invert it. Without
    /// one, the working grid (if any) is inverted away and the topology
    /// stores real coordinates with no transform.
    pub(crate) fn post_quantize(&mut self, objects: &mut Vec<TopologyObject>) {
        let pre = self.opts.pre_resolution();
        let post = self.opts.post_resolution();

        match (pre, post) {
            (None, None) => {}
            (None, Some(q1)) => {
                // Nothing was quantized yet: snap the finished arcs directly
                // onto the output grid.
                if self.bbox.is_empty() {
                    return;
                }
                let t = derive_transform(&self.bbox, q1, q1);
                for arc in &mut self.arcs {
                    *arc = transform_line(arc, |p| t.quantize(p), LINE_MINIMUM);
                }
                map_object_points(objects, &|p| t.quantize(p));
                self.transform = Some(t);
            }
            (Some(_), None) => {
                // Integer output was not requested: back to real coordinates.
                if let Some(t) = self.transform.take() {
                    for arc in &mut self.arcs {
                        for p in arc.iter_mut() {
                            *p = t.unquantize(p);
                        }
                    }
                    map_object_points(objects, &|p| t.unquantize(p));
                }
            }
            (Some(q0), Some(q1)) => {
                if q0 == q1 {
                    return; // already on the output grid
                }
                let k = q1 / q0;
                for arc in &mut self.arcs {
                    *arc = transform_line(
                        arc,
                        |p| [(p[0] * k).round(), (p[1] * k).round()],
                        LINE_MINIMUM,
                    );
                }
                map_object_points(objects, &|p| [(p[0] * k).round(), (p[1] * k).round()]);
                if let Some(t) = self.transform.as_mut() {
                    t.scale = [t.scale[0] / k, t.scale[1] / k];
                }
            }
        }
    }
}
