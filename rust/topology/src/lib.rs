// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Topo-Lite Topology
//!
//! Shared-arc topology construction for GeoJSON feature collections.
//!
//! Independent features duplicate every shared boundary: two adjacent
//! polygons each carry their own copy of the border between them. This crate
//! converts a feature collection into a *topology* — a single deduplicated
//! arc table plus, per object, lists of signed arc references — so that
//! every distinct boundary segment is stored exactly once. Adjacent-polygon
//! datasets (administrative boundaries, cadastral parcels) shrink
//! dramatically while remaining exactly reconstructable.
//!
//! ## Pipeline
//!
//! A build runs a fixed sequence of stages over one owned build context:
//! bounds → pre-quantize → extract → join → cut → dedup → simplify →
//! rebuild → prune → post-quantize → delta. Junctions (coordinates shared
//! between lines/rings, or self-touches within a ring) become the cut
//! points; arcs between junctions are deduplicated up to reversal, with the
//! traversal direction packed into the reference via bitwise complement.
//!
//! ## Example
//!
//! ```
//! use topo_lite_geojson::{Feature, FeatureCollection, Geometry};
//! use topo_lite_topology::{Topology, TopologyOptions};
//!
//! let mut fc = FeatureCollection::new();
//! fc.add_feature(Feature::new(Geometry::polygon(vec![vec![
//!     [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
//! ]])));
//!
//! let topo = Topology::from_features(fc, TopologyOptions::default());
//! assert_eq!(topo.objects.len(), 1);
//! assert_eq!(topo.arcs.len(), 1);
//! ```

pub mod error;
pub mod options;
pub mod topology;

mod bounds;
mod builder;
mod cut;
mod dedup;
mod delta;
mod export;
mod extract;
mod filter;
mod join;
mod prune;
mod quantize;
mod rebuild;
mod simplify;

pub use error::{Error, Result};
pub use options::TopologyOptions;
pub use topology::{ArcIndex, ObjectGeometry, Topology, TopologyObject, Transform};
