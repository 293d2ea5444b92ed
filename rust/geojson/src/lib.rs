//! Topo-Lite GeoJSON Feature Model
//!
//! A minimal GeoJSON-shaped data model: features, feature collections and
//! the seven geometry variants, (de)serialized with serde. This crate is the
//! input/output surface of the topology encoder; it performs no geometric
//! inference of its own.

pub mod bbox;
pub mod error;
pub mod feature;
pub mod geometry;

pub use bbox::BoundingBox;
pub use error::{Error, Result};
pub use feature::{Feature, FeatureCollection};
pub use geometry::{Geometry, Position};
