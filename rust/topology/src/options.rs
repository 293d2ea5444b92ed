// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Build configuration.

/// Options controlling a topology build.
///
/// Zero values disable their stage: a quantization resolution ≤ 1 leaves
/// coordinates unquantized (a one-cell grid cannot distinguish anything),
/// and a simplification tolerance ≤ 0 keeps every point.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyOptions {
    /// Grid resolution applied to input coordinates before topology
    /// inference. Quantization is what makes "same coordinate" decidable
    /// for junction detection, so adjacent datasets with nearly-equal
    /// boundary coordinates usually need this.
    pub pre_quantize: f64,

    /// Grid resolution of the output arcs. When > 1 the topology stores
    /// integer grid coordinates plus the transform to invert them, and arcs
    /// are delta-encoded. When ≤ 1 stored arcs carry real coordinates and
    /// no transform is emitted.
    pub post_quantize: f64,

    /// Maximum effective-area error for line simplification, in the square
    /// of the coordinate units in effect (grid cells when pre-quantized).
    /// Set to 0 to disable.
    pub simplify: f64,

    /// Property key consulted for an object identifier when a feature has
    /// no explicit `id` member.
    pub id_property: String,
}

impl Default for TopologyOptions {
    fn default() -> Self {
        TopologyOptions {
            pre_quantize: 0.0,
            post_quantize: 0.0,
            simplify: 0.0,
            id_property: "id".to_string(),
        }
    }
}

impl TopologyOptions {
    /// Pre-quantization resolution, if the stage is enabled.
    pub(crate) fn pre_resolution(&self) -> Option<f64> {
        (self.pre_quantize > 1.0).then_some(self.pre_quantize)
    }

    /// Post-quantization resolution, if integer output was requested.
    pub(crate) fn post_resolution(&self) -> Option<f64> {
        (self.post_quantize > 1.0).then_some(self.post_quantize)
    }

    /// Simplification tolerance, if the stage is enabled.
    pub(crate) fn simplify_tolerance(&self) -> Option<f64> {
        (self.simplify > 0.0).then_some(self.simplify)
    }
}
