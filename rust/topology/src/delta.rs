// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stage 10b: delta encoding.
//!
//! On a quantized topology every arc coordinate is an integer, and
//! successive boundary points are close together; storing each point as the
//! difference from its predecessor makes the common case a small integer.
//! The first point stays absolute so a running sum restores the arc.
//!
//! Without a transform there is no integer grid: float differences are not
//! exactly reversible, so unquantized arcs stay absolute.

use crate::builder::Builder;

impl Builder {
    pub(crate) fn delta_encode(&mut self) {
        if self.transform.is_none() {
            return;
        }
        for arc in &mut self.arcs {
            let mut prev = match arc.first() {
                Some(p) => *p,
                None => continue,
            };
            for p in arc.iter_mut().skip(1) {
                let cur = *p;
                *p = [cur[0] - prev[0], cur[1] - prev[1]];
                prev = cur;
            }
        }
    }
}
