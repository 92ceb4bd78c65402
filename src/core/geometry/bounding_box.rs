//=========================================================================
// Bounding Box
//
// Axis-aligned rectangle used for all overlap testing.
//
// Responsibilities:
// - Represent an entity's occupied region as an immutable snapshot
// - Answer the pairwise AABB intersection query
// - Produce translated copies for motion prediction
//
// Design:
// - Integer coordinates: deterministic, hash-stable, no epsilon games
// - Copy value type: a box is a snapshot, never a live reference into
//   an entity's state
// - Strict intersection: boxes that merely share an edge do not overlap,
//   and a box with non-positive extent overlaps nothing
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Direction;

//=== BoundingBox =========================================================

/// Axis-aligned bounding box with integer coordinates.
///
/// `(x, y)` is the top-left corner; `width` and `height` extend right and
/// down. Two boxes are equal iff all four fields match.
///
/// # Example
///
/// ```
/// use ludic_engine::prelude::*;
///
/// let a = BoundingBox::new(0, 0, 10, 10);
/// let b = BoundingBox::new(8, 0, 10, 10);
/// assert!(a.intersects(&b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Left edge.
    pub x: i32,

    /// Top edge.
    pub y: i32,

    /// Horizontal extent. Non-positive widths describe a degenerate box.
    pub width: i32,

    /// Vertical extent. Non-positive heights describe a degenerate box.
    pub height: i32,
}

impl BoundingBox {
    //--- Construction -----------------------------------------------------

    /// Creates a box from its top-left corner and extents.
    ///
    /// Well-formed boxes have positive extents; callers are responsible
    /// for upholding that. Degenerate boxes are representable but never
    /// intersect anything.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    //--- Queries ----------------------------------------------------------

    /// Tests whether this box and `other` occupy common area.
    ///
    /// The test is symmetric and requires strictly positive overlap on
    /// both axes: boxes that only touch along an edge or corner do not
    /// intersect. Degenerate boxes (non-positive extent) intersect
    /// nothing, including themselves.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }

        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    //--- Transforms -------------------------------------------------------

    /// Returns a copy of this box translated by `delta`.
    ///
    /// Used by the overlap engine to predict a mover's next-tick position;
    /// the box itself is never mutated.
    pub fn translated(&self, delta: Direction) -> Self {
        Self {
            x: self.x + delta.dx,
            y: self.y + delta.dy,
            ..*self
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
