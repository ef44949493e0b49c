//! The collaborator that owns the boxes being laid out.
//!
//! A [`Flow`](crate::Flow) never owns its children. It reaches them through a
//! `Host`, which enumerates the current children in order and reads or
//! writes their geometry. Child bounds use the same coordinate space as the
//! flow's own bounds; the solver handles the conversion to flow-local
//! coordinates.

use core::fmt::Debug;

use crate::geometry::{Coord, Rect};

pub trait Host {
    /// Stable identity of a child box. Compared by equality only.
    type Id: Copy + Eq + Debug;
    type Coord: Coord;

    fn child_count(&self) -> usize;

    /// Child at `index` in host order, or `None` past the end.
    fn child_at(&self, index: usize) -> Option<Self::Id>;

    /// Position of `id` among the current children.
    fn index_of(&self, id: Self::Id) -> Option<usize> {
        (0..self.child_count()).find(|&i| self.child_at(i) == Some(id))
    }

    fn is_child(&self, id: Self::Id) -> bool {
        self.index_of(id).is_some()
    }

    fn bounds(&self, id: Self::Id) -> Rect<Self::Coord>;

    /// Move and resize a child. Hosts that nest flows resize the child's own
    /// flow from here.
    fn set_bounds(&mut self, id: Self::Id, bounds: Rect<Self::Coord>);

    /// Ask for the container to be repainted. Fire and forget.
    fn request_redraw(&mut self) {}
}
