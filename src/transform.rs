//! Staged/committed rectangle used by the growth loop.
//!
//! A [`Transform`] holds two copies of a box's padded rectangle. Every step
//! first commits the current staged rect, then mutates the staged copy.
//! When the mutated rect turns out to violate a constraint the caller rolls
//! back, so the committed copy is always the last rectangle that passed.

use crate::geometry::{Coord, Rect};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transform<T = i32> {
    padding: T,
    staged: Rect<T>,
    committed: Rect<T>,
}

impl<T: Coord> Transform<T> {
    /// Wrap `rect`, expanded by `padding` on every side.
    pub fn new(rect: Rect<T>, padding: T) -> Self {
        let padded = rect.inflate(padding);
        Self {
            padding,
            staged: padded,
            committed: padded,
        }
    }

    pub fn padding(&self) -> T {
        self.padding
    }

    /// The rect under test. May violate constraints until rolled back.
    pub fn staged(&self) -> Rect<T> {
        self.staged
    }

    /// The last accepted rect.
    pub fn committed(&self) -> Rect<T> {
        self.committed
    }

    /// Whether `other`'s staged rect lies inside this one's.
    pub fn contains(&self, other: &Self) -> bool {
        self.staged.contains(&other.staged)
    }

    /// Whether the staged rects intersect. Edge contact counts.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.staged.overlaps(&other.staged)
    }

    pub fn commit(&mut self) {
        self.committed = self.staged;
    }

    pub fn rollback(&mut self) {
        self.staged = self.committed;
    }

    /// Commit, then move the staged rect by `(dx, dy)`.
    pub fn translate(&mut self, dx: T, dy: T) {
        self.commit();
        self.staged = self.staged.offset(dx, dy);
    }

    /// Commit, then grow the staged rect by `|dx|`, `|dy|`.
    ///
    /// The sign picks the edge that moves: negative deltas push the left or
    /// top edge outward, positive deltas push the right or bottom edge.
    pub fn scale(&mut self, dx: T, dy: T) {
        self.commit();
        if dx < T::zero() {
            self.staged.x = self.staged.x + dx;
            self.staged.width = self.staged.width - dx;
        } else {
            self.staged.width = self.staged.width + dx;
        }

        if dy < T::zero() {
            self.staged.y = self.staged.y + dy;
            self.staged.height = self.staged.height - dy;
        } else {
            self.staged.height = self.staged.height + dy;
        }
    }

    /// Resize the staged rect to `width × height` around its current center.
    ///
    /// Halves truncate independently, so an odd leftover pushes the result
    /// one unit toward the leading edge.
    pub fn contract(&mut self, width: T, height: T) {
        let two = T::one() + T::one();
        self.staged.x = self.staged.x + (self.staged.width / two - width / two);
        self.staged.y = self.staged.y + (self.staged.height / two - height / two);
        self.staged.width = width;
        self.staged.height = height;
    }

    /// The committed rect with the padding stripped: what the owning box
    /// should be resized to.
    pub fn apply(&self) -> Rect<T> {
        self.committed.inflate(-self.padding)
    }
}
