// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for topology operations.
//!
//! The build pipeline itself never fails: malformed geometries degrade to
//! dropped objects (see the extraction stage). Errors surface only where a
//! topology is consumed — resolving arc references of a hand-built or
//! deserialized document, and JSON (de)serialization.

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while consuming a topology.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An object references an arc index outside the arc table.
    #[error("arc reference out of range: {index} (arc table has {len} entries)")]
    ArcOutOfRange { index: usize, len: usize },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
