//! Axis-aligned bounding boxes.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

use crate::geometry::Position;

/// An axis-aligned bounding box, serialized as `[min_x, min_y, max_x, max_y]`.
///
/// A freshly created box is inverted (`+∞ .. -∞`) and only becomes valid once
/// at least one position has been folded in via [`BoundingBox::expand`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates an inverted box that any observed position will widen.
    pub fn new() -> Self {
        BoundingBox {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Widens the box to cover `p`.
    pub fn expand(&mut self, p: &Position) {
        if p[0] < self.min_x {
            self.min_x = p[0];
        }
        if p[0] > self.max_x {
            self.max_x = p[0];
        }
        if p[1] < self.min_y {
            self.min_y = p[1];
        }
        if p[1] > self.max_y {
            self.max_y = p[1];
        }
    }

    /// Returns `true` while no position has been observed.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Horizontal extent. Zero for a single-point box.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent. Zero for a single-point box.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(4)?;
        tup.serialize_element(&self.min_x)?;
        tup.serialize_element(&self.min_y)?;
        tup.serialize_element(&self.max_x)?;
        tup.serialize_element(&self.max_y)?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BboxVisitor;

        impl<'de> Visitor<'de> for BboxVisitor {
            type Value = BoundingBox;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a [min_x, min_y, max_x, max_y] array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let min_x = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let min_y = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let max_x = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let max_y = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                Ok(BoundingBox {
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                })
            }
        }

        deserializer.deserialize_tuple(4, BboxVisitor)
    }
}
