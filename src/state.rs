//! Per-child bookkeeping kept between layout passes.

use crate::geometry::{Coord, Size};

/// Remembered minimum size and placement flag for one child box.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayoutState<Id, T = i32> {
    pub id: Id,
    /// Size the box is reset to at the start of every pass.
    pub min: Size<T>,
    /// Set once an instruction for this box has run in the current pass.
    /// Placed boxes are obstacles for every later instruction.
    pub placed: bool,
}

impl<Id, T: Coord> LayoutState<Id, T> {
    pub fn new(id: Id, min: Size<T>) -> Self {
        Self {
            id,
            min,
            placed: false,
        }
    }
}
