// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The build context.
//!
//! One [`Builder`] value owns every piece of transient state a topology
//! build needs: the shared coordinate arena, the extracted line/ring units,
//! the junction set and the growing arc table. Stages are methods on the
//! builder, implemented in their own modules, and run in a fixed order.
//! Because the context is a plain owned value, independent builds share
//! nothing and can run concurrently without synchronization.
//!
//! Lines, rings and arcs reference coordinates by index range into the
//! arena rather than owning slices; objects in turn reference lines/rings
//! by index. Index-based ownership sidesteps aliasing entirely — many
//! objects can point at the same arc without smart pointers.

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};
use smallvec::SmallVec;

use topo_lite_geojson::{BoundingBox, Feature, FeatureCollection, Position};

use crate::options::TopologyOptions;
use crate::prune::prune_empty;
use crate::topology::{ArcIndex, Topology, Transform};

/// Hashable identity of a coordinate: the IEEE-754 bit patterns, with
/// negative zero normalized so `-0.0` and `0.0` coalesce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct PointKey(u64, u64);

impl PointKey {
    pub(crate) fn of(p: &Position) -> Self {
        let x = if p[0] == 0.0 { 0.0 } else { p[0] };
        let y = if p[1] == 0.0 { 0.0 } else { p[1] };
        PointKey(x.to_bits(), y.to_bits())
    }
}

/// An inclusive coordinate range `[start, end]` in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub start: usize,
    pub end: usize,
}

/// One extracted line or ring: its arena range, the pieces the cutter split
/// it into, and the signed arc references the deduplicator assigned to those
/// pieces.
#[derive(Debug)]
pub(crate) struct CutUnit {
    pub start: usize,
    pub end: usize,
    pub pieces: SmallVec<[Segment; 2]>,
    pub refs: SmallVec<[ArcIndex; 2]>,
}

impl CutUnit {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        CutUnit {
            start,
            end,
            pieces: SmallVec::new(),
            refs: SmallVec::new(),
        }
    }
}

/// Extraction-time mirror of an input object, with coordinate sequences
/// replaced by line/ring indices. `None` slots mark geometry parts that were
/// malformed and produced nothing.
#[derive(Debug)]
pub(crate) struct BuildObject {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Option<BuildGeometry>,
}

#[derive(Debug)]
pub(crate) enum BuildGeometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Option<usize>),
    MultiLineString(Vec<Option<usize>>),
    Polygon(Vec<Option<usize>>),
    MultiPolygon(Vec<Vec<Option<usize>>>),
    Collection(Vec<BuildObject>),
}

/// Run-scoped topology build state.
pub(crate) struct Builder {
    pub opts: TopologyOptions,
    pub features: Vec<Feature>,
    pub bbox: BoundingBox,
    pub transform: Option<Transform>,
    /// Shared coordinate arena; lines, rings and pieces index into it.
    pub coords: Vec<Position>,
    pub lines: Vec<CutUnit>,
    pub rings: Vec<CutUnit>,
    pub objects: Vec<BuildObject>,
    pub junctions: FxHashSet<PointKey>,
    /// The deduplicated arc table, materialized by the dedup stage.
    pub arcs: Vec<Vec<Position>>,
}

impl Builder {
    pub(crate) fn new(features: Vec<Feature>, opts: TopologyOptions) -> Self {
        Builder {
            opts,
            features,
            bbox: BoundingBox::new(),
            transform: None,
            coords: Vec::new(),
            lines: Vec::new(),
            rings: Vec::new(),
            objects: Vec::new(),
            junctions: FxHashSet::default(),
            arcs: Vec::new(),
        }
    }

    /// Runs the pipeline to completion. Stages execute in strict order;
    /// each consumes the previous stage's output on `self`.
    pub(crate) fn build(mut self) -> Topology {
        self.compute_bounds();
        self.pre_quantize();
        self.extract();
        self.join();
        self.cut();
        self.dedup();
        self.simplify();

        let objects = self.rebuild_objects();
        let mut objects = prune_empty(objects);

        self.post_quantize(&mut objects);
        self.delta_encode();

        Topology {
            transform: self.transform,
            bounding_box: (!self.bbox.is_empty()).then_some(self.bbox),
            objects,
            arcs: self.arcs,
        }
    }

    /// Returns whether `p` was classified as a junction.
    pub(crate) fn is_junction(&self, p: &Position) -> bool {
        self.junctions.contains(&PointKey::of(p))
    }
}

impl Topology {
    /// Builds a topology from a feature collection.
    ///
    /// The build never fails: malformed geometries are skipped (and logged)
    /// rather than aborting, per-feature, so one bad feature cannot poison
    /// the rest of the dataset.
    pub fn from_features(collection: FeatureCollection, options: TopologyOptions) -> Topology {
        Builder::new(collection.features, options).build()
    }
}
