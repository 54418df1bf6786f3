//! Inclusive block-space bounding boxes.
//!
//! A box is never validated on construction. An inverted box (any `min > max`)
//! is a legal value that simply contains nothing.

use serde::{Deserialize, Serialize};

/// Inclusive bounding box in block coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl BoundingBox {
    /// The full range of `i32` on every axis.
    pub const UNBOUNDED: BoundingBox = BoundingBox {
        min_x: i32::MIN,
        max_x: i32::MAX,
        min_y: i32::MIN,
        max_y: i32::MAX,
        min_z: i32::MIN,
        max_z: i32::MAX,
    };

    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32, min_z: i32, max_z: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// True if no block lies inside the box.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y || self.min_z > self.max_z
    }

    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x)
            && (self.min_y..=self.max_y).contains(&y)
            && (self.min_z..=self.max_z).contains(&z)
    }

    /// Overlap of two boxes, or `None` when they share no block.
    pub fn intersect(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let clipped = BoundingBox {
            min_x: self.min_x.max(other.min_x),
            max_x: self.max_x.min(other.max_x),
            min_y: self.min_y.max(other.min_y),
            max_y: self.max_y.min(other.max_y),
            min_z: self.min_z.max(other.min_z),
            max_z: self.max_z.min(other.max_z),
        };
        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
