//! The two layout passes.
//!
//! [`Solver::prepare`] reconciles the flow's bookkeeping with the host's
//! current children and stacks every child at the container's bottom-right
//! corner. [`Solver::process`] then runs the instructions in declaration
//! order. Each instruction steps its box one unit at a time until the next
//! step would leave the container or touch a box that is already placed,
//! and keeps the last step that fit.
//!
//! Declaration order is the only tie-break: a box only becomes an obstacle
//! after one of its own instructions has run, so earlier rules claim space
//! first.

use alloc::vec::Vec;

use crate::geometry::{Coord, Rect};
use crate::host::Host;
use crate::instruction::{Instruction, Verb};
use crate::state::LayoutState;
use crate::transform::Transform;

pub(crate) struct Solver<'a, Id, T> {
    /// Container bounds in host coordinates.
    pub bounds: Rect<T>,
    pub padding: T,
    pub instructions: &'a mut Vec<Instruction<Id>>,
    pub states: &'a mut Vec<LayoutState<Id, T>>,
}

impl<Id, T> Solver<'_, Id, T>
where
    Id: Copy + Eq + core::fmt::Debug,
    T: Coord,
{
    /// Host-space rect to container-local space.
    fn local(&self, rect: Rect<T>) -> Rect<T> {
        rect.offset(-self.bounds.x, -self.bounds.y)
    }

    /// Container-local rect to host space.
    fn global(&self, rect: Rect<T>) -> Rect<T> {
        rect.offset(self.bounds.x, self.bounds.y)
    }

    pub fn prepare<H>(&mut self, host: &mut H)
    where
        H: Host<Id = Id, Coord = T> + ?Sized,
    {
        let before = self.states.len();
        self.states.retain(|s| host.is_child(s.id));
        let dropped_states = before - self.states.len();

        let before = self.instructions.len();
        self.instructions.retain(|i| host.is_child(i.target));
        let dropped_instructions = before - self.instructions.len();

        let mut added = 0usize;
        for index in 0..host.child_count() {
            let Some(id) = host.child_at(index) else {
                continue;
            };
            if self.states.iter().any(|s| s.id == id) {
                continue;
            }
            self.states.push(LayoutState::new(id, host.bounds(id).size()));
            added += 1;
        }

        if dropped_states + dropped_instructions + added > 0 {
            tracing::debug!(
                dropped_states,
                dropped_instructions,
                added,
                "reconciled layout state with children"
            );
        }

        for state in self.states.iter_mut() {
            state.placed = false;
            let anchor = Rect::new(
                self.bounds.width - state.min.width - self.padding,
                self.bounds.height - state.min.height - self.padding,
                state.min.width,
                state.min.height,
            );
            host.set_bounds(state.id, anchor.offset(self.bounds.x, self.bounds.y));
        }
    }

    pub fn process<H>(&mut self, host: &mut H)
    where
        H: Host<Id = Id, Coord = T> + ?Sized,
    {
        let container = Transform::new(Rect::from_size(self.bounds.size()), T::zero());

        for instruction in self.instructions.iter() {
            let target = instruction.target;
            let op = instruction.op;
            let (dx, dy) = op.direction.step::<T>();

            let mut transform = Transform::new(self.local(host.bounds(target)), self.padding);
            let original = transform.staged().size();

            let mut steps = 0usize;
            loop {
                if op.grows() {
                    transform.scale(dx, dy);
                } else {
                    transform.translate(dx, dy);
                }

                if !container.contains(&transform) {
                    break;
                }

                let blocked = self
                    .states
                    .iter()
                    .filter(|s| s.placed && s.id != target)
                    .any(|s| {
                        let obstacle = Transform::new(self.local(host.bounds(s.id)), T::zero());
                        transform.overlaps(&obstacle)
                    });
                if blocked {
                    break;
                }
                steps += 1;
            }

            // The last step went too far.
            transform.rollback();

            if op.verb == Verb::Center {
                transform.contract(original.width, original.height);
                transform.commit();
            }

            let placed = transform.apply();
            tracing::trace!(?target, %op, steps, ?placed, "instruction applied");
            host.set_bounds(target, self.global(placed));

            if let Some(state) = self.states.iter_mut().find(|s| s.id == target) {
                state.placed = true;
            }
        }
    }
}
