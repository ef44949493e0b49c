//! The layout engine facade.
//!
//! A [`Flow`] collects rules and minimum-size overrides, then re-solves the
//! layout on resize or lazily before the next paint.
//!
//! ```
//! use boxflow::{Flow, Host, Rect};
//!
//! // A host with a single child box.
//! struct One(Rect);
//!
//! impl Host for One {
//!     type Id = u8;
//!     type Coord = i32;
//!     fn child_count(&self) -> usize { 1 }
//!     fn child_at(&self, index: usize) -> Option<u8> { (index == 0).then_some(0) }
//!     fn bounds(&self, _: u8) -> Rect { self.0 }
//!     fn set_bounds(&mut self, _: u8, bounds: Rect) { self.0 = bounds; }
//! }
//!
//! let mut host = One(Rect::new(0, 0, 50, 20));
//! let mut flow = Flow::new(Rect::new(0, 0, 200, 100)).with_padding(5);
//! flow.rule(&host, 0, "<^");
//! flow.resize(&mut host, Rect::new(0, 0, 200, 100));
//! assert_eq!(host.0, Rect::new(5, 5, 50, 20));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use num_traits::NumCast;

use crate::geometry::{Coord, Rect, Size};
use crate::host::Host;
use crate::instruction::Instruction;
use crate::rule::{self, RuleReport};
use crate::solver::Solver;
use crate::state::LayoutState;

/// Padding used by [`Flow::new`].
pub const DEFAULT_PADDING: i32 = 5;

/// Callback run on every [`Flow::resize`], after the new bounds are stored
/// and before the layout is solved.
///
/// Typical hooks derive padding or minimum sizes from the new bounds. Any
/// context the hook needs is captured by the closure.
pub type ResizeHook<Id, T> = Box<dyn FnMut(&mut Flow<Id, T>, &mut dyn Host<Id = Id, Coord = T>)>;

pub struct Flow<Id, T = i32> {
    bounds: Rect<T>,
    padding: T,
    instructions: Vec<Instruction<Id>>,
    states: Vec<LayoutState<Id, T>>,
    stale: bool,
    resize_hook: Option<ResizeHook<Id, T>>,
    /// Bumped whenever the hook slot is written, so a hook that replaces
    /// itself isn't restored over its replacement.
    hook_generation: u64,
}

impl<Id, T> Flow<Id, T>
where
    Id: Copy + Eq + Debug,
    T: Coord,
{
    /// Create an empty flow covering `bounds` with [`DEFAULT_PADDING`].
    pub fn new(bounds: Rect<T>) -> Self {
        let padding = <T as NumCast>::from(DEFAULT_PADDING).unwrap_or_else(T::zero);
        Self {
            bounds,
            padding,
            instructions: Vec::new(),
            states: Vec::new(),
            stale: true,
            resize_hook: None,
            hook_generation: 0,
        }
    }

    /// Set the padding kept around every box.
    pub fn with_padding(mut self, padding: T) -> Self {
        self.padding = padding;
        self
    }

    pub fn bounds(&self) -> Rect<T> {
        self.bounds
    }

    pub fn padding(&self) -> T {
        self.padding
    }

    /// Change the padding. The layout is marked stale but not re-solved, so
    /// this is safe to call from a resize hook.
    pub fn set_padding(&mut self, padding: T) {
        self.padding = padding;
        self.stale = true;
    }

    /// Whether the next [`draw`](Self::draw) will re-solve.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Instructions in declaration order.
    pub fn instructions(&self) -> &[Instruction<Id>] {
        &self.instructions
    }

    pub fn states(&self) -> &[LayoutState<Id, T>] {
        &self.states
    }

    /// Remembered minimum size of `id`, if it has been laid out before.
    pub fn min_size(&self, id: Id) -> Option<Size<T>> {
        self.states.iter().find(|s| s.id == id).map(|s| s.min)
    }

    /// Append the instructions of `rule` for box `id`.
    ///
    /// `id` must already be a child of `host`; otherwise nothing happens and
    /// an empty report is returned. Invalid characters are skipped and
    /// reported.
    pub fn rule<H>(&mut self, host: &H, id: Id, rule: &str) -> RuleReport
    where
        H: Host<Id = Id, Coord = T> + ?Sized,
    {
        if !host.is_child(id) {
            return RuleReport::default();
        }

        let decoded = rule::decode(rule);
        let appended = decoded.ops.len();
        self.instructions
            .extend(decoded.ops.into_iter().map(|op| Instruction::new(id, op)));
        self.stale = true;

        RuleReport {
            appended,
            warnings: decoded.warnings,
        }
    }

    /// Override the minimum size of `id`.
    ///
    /// Returns the number of entries updated, `0` if `id` has not been laid
    /// out yet.
    pub fn set_min_size(&mut self, id: Id, width: T, height: T) -> usize {
        let mut updated = 0;
        for state in self.states.iter_mut().filter(|s| s.id == id) {
            state.min = Size::new(width, height);
            updated += 1;
        }
        self.stale = true;
        updated
    }

    /// Mark the layout stale and ask the host to repaint.
    pub fn invalidate<H>(&mut self, host: &mut H)
    where
        H: Host<Id = Id, Coord = T> + ?Sized,
    {
        self.stale = true;
        host.request_redraw();
    }

    /// Install or clear the resize hook, replacing any previous one.
    pub fn set_resize_hook(&mut self, hook: Option<ResizeHook<Id, T>>) {
        self.resize_hook = hook;
        self.hook_generation = self.hook_generation.wrapping_add(1);
    }

    /// Install `hook` as the resize hook.
    pub fn on_resize<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Flow<Id, T>, &mut dyn Host<Id = Id, Coord = T>) + 'static,
    {
        self.set_resize_hook(Some(Box::new(hook)));
    }

    pub fn has_resize_hook(&self) -> bool {
        self.resize_hook.is_some()
    }

    /// Move the container to `bounds`, run the resize hook, and re-solve.
    pub fn resize<H>(&mut self, host: &mut H, bounds: Rect<T>)
    where
        H: Host<Id = Id, Coord = T>,
    {
        self.bounds = bounds;

        if let Some(mut hook) = self.resize_hook.take() {
            let generation = self.hook_generation;
            hook(self, &mut *host);
            if self.hook_generation == generation {
                self.resize_hook = Some(hook);
            }
        }

        self.relayout(host);
    }

    /// Pre-paint entry point: re-solves if anything changed since the last
    /// pass. Returns whether a pass ran.
    pub fn draw<H>(&mut self, host: &mut H) -> bool
    where
        H: Host<Id = Id, Coord = T> + ?Sized,
    {
        if !self.stale {
            return false;
        }
        self.relayout(host);
        true
    }

    /// Run [`prepare`](Self::prepare) and [`process`](Self::process)
    /// unconditionally.
    pub fn relayout<H>(&mut self, host: &mut H)
    where
        H: Host<Id = Id, Coord = T> + ?Sized,
    {
        tracing::debug!(
            bounds = ?self.bounds,
            instructions = self.instructions.len(),
            "solving layout"
        );
        self.stale = false;
        self.prepare(host);
        self.process(host);
    }

    /// Forget departed children, pick up new ones, and stack every child at
    /// its minimum size in the bottom-right corner.
    pub fn prepare<H>(&mut self, host: &mut H)
    where
        H: Host<Id = Id, Coord = T> + ?Sized,
    {
        self.solver().prepare(host);
    }

    /// Execute every instruction in declaration order.
    pub fn process<H>(&mut self, host: &mut H)
    where
        H: Host<Id = Id, Coord = T> + ?Sized,
    {
        self.solver().process(host);
    }

    fn solver(&mut self) -> Solver<'_, Id, T> {
        Solver {
            bounds: self.bounds,
            padding: self.padding,
            instructions: &mut self.instructions,
            states: &mut self.states,
        }
    }
}

impl<Id: Debug, T: Debug> Debug for Flow<Id, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Flow")
            .field("bounds", &self.bounds)
            .field("padding", &self.padding)
            .field("instructions", &self.instructions)
            .field("states", &self.states)
            .field("stale", &self.stale)
            .field("resize_hook", &self.resize_hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fixture::Boxes;
    use crate::instruction::{Direction, Op, Verb};
    use crate::rule::RuleWarning;
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn container() -> Rect {
        Rect::new(0, 0, 200, 100)
    }

    #[test]
    fn new_flow_uses_default_padding_and_is_stale() {
        let f: Flow<u32> = Flow::new(container());
        assert_eq!(f.padding(), DEFAULT_PADDING);
        assert!(f.is_stale());
        assert!(!f.has_resize_hook());
    }

    #[test]
    fn rule_appends_in_declaration_order() {
        let host = Boxes::with_sizes(&[(10, 10), (10, 10)]);
        let mut f = Flow::new(container());
        assert_eq!(f.rule(&host, 1, "=>").appended, 1);
        assert_eq!(f.rule(&host, 0, "/^v").appended, 2);
        assert_eq!(
            f.instructions(),
            [
                Instruction::new(1, Op::new(Verb::Expand, Direction::Right)),
                Instruction::new(0, Op::new(Verb::Center, Direction::Up)),
                Instruction::new(0, Op::new(Verb::Move, Direction::Down)),
            ]
        );
    }

    #[test]
    fn rule_for_unknown_box_is_silent_noop() {
        let mut host = Boxes::with_sizes(&[(10, 10)]);
        let mut f = Flow::new(container());
        f.draw(&mut host);
        assert!(!f.is_stale());

        let report = f.rule(&host, 9, "<<x");
        assert_eq!(report, RuleReport::default());
        assert!(f.instructions().is_empty());
        assert!(!f.is_stale());
    }

    #[test]
    fn rule_reports_invalid_characters() {
        let host = Boxes::with_sizes(&[(10, 10)]);
        let mut f = Flow::new(container());
        let report = f.rule(&host, 0, "<?>");
        assert_eq!(report.appended, 2);
        assert_eq!(
            report.warnings,
            [RuleWarning::InvalidInstruction {
                index: 1,
                character: '?',
                mode: Verb::Move,
            }]
        );
        assert_eq!(f.instructions().len(), 2);
    }

    #[test]
    fn set_min_size_counts_matches() {
        let mut host = Boxes::with_sizes(&[(10, 10)]);
        let mut f = Flow::new(container());
        // Not laid out yet: no entry to update.
        assert_eq!(f.set_min_size(0, 20, 20), 0);

        f.draw(&mut host);
        assert_eq!(f.set_min_size(0, 20, 20), 1);
        assert_eq!(f.set_min_size(5, 20, 20), 0);
        assert_eq!(f.min_size(0), Some(Size::new(20, 20)));
        assert!(f.is_stale());
    }

    #[test]
    fn set_padding_defers_relayout() {
        let mut host = Boxes::with_sizes(&[(50, 20)]);
        let mut f = Flow::new(container());
        f.draw(&mut host);
        assert_eq!(host.get(0), Rect::new(145, 75, 50, 20));

        f.set_padding(0);
        assert!(f.is_stale());
        assert_eq!(host.get(0), Rect::new(145, 75, 50, 20));

        assert!(f.draw(&mut host));
        assert_eq!(host.get(0), Rect::new(150, 80, 50, 20));
    }

    #[test]
    fn draw_solves_once_per_stale_period() {
        let mut host = Boxes::with_sizes(&[(50, 20)]);
        let mut f = Flow::new(container());
        assert!(f.draw(&mut host));
        assert!(!f.draw(&mut host));

        f.invalidate(&mut host);
        assert_eq!(host.redraws, 1);
        assert!(f.draw(&mut host));
        assert!(!f.draw(&mut host));
    }

    #[test]
    fn resize_runs_hook_before_solving() {
        let mut host = Boxes::with_sizes(&[(50, 20)]);
        let mut f = Flow::new(container());
        f.rule(&host, 0, "<^");

        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        f.on_resize(move |flow, host| {
            seen.set(seen.get() + 1);
            assert_eq!(host.child_count(), 1);
            // Padding follows the container width.
            flow.set_padding(flow.bounds().width / 100);
        });

        f.resize(&mut host, Rect::new(0, 0, 400, 100));
        assert_eq!(calls.get(), 1);
        assert_eq!(f.bounds(), Rect::new(0, 0, 400, 100));
        assert_eq!(f.padding(), 4);
        assert!(!f.is_stale());
        assert_eq!(host.get(0), Rect::new(4, 4, 50, 20));

        f.resize(&mut host, Rect::new(0, 0, 300, 100));
        assert_eq!(calls.get(), 2);
        assert_eq!(host.get(0), Rect::new(3, 3, 50, 20));
    }

    #[test]
    fn resize_hook_slot_is_replaced_and_cleared() {
        let mut host = Boxes::with_sizes(&[]);
        let mut f = Flow::new(container());
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let counter = Rc::clone(&first);
        f.on_resize(move |_, _| counter.set(counter.get() + 1));
        let counter = Rc::clone(&second);
        f.on_resize(move |_, _| counter.set(counter.get() + 1));
        f.resize(&mut host, container());
        assert_eq!((first.get(), second.get()), (0, 1));

        f.set_resize_hook(None);
        assert!(!f.has_resize_hook());
        f.resize(&mut host, container());
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn hook_can_clear_itself() {
        let mut host = Boxes::with_sizes(&[]);
        let mut f: Flow<u32> = Flow::new(container());
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        f.on_resize(move |flow, _| {
            counter.set(counter.get() + 1);
            flow.set_resize_hook(None);
        });

        f.resize(&mut host, container());
        f.resize(&mut host, container());
        assert_eq!(calls.get(), 1);
        assert!(!f.has_resize_hook());
    }

    #[test]
    fn hook_can_replace_itself() {
        let mut host = Boxes::with_sizes(&[]);
        let mut f: Flow<u32> = Flow::new(container());
        let replaced = Rc::new(Cell::new(false));
        let flag = Rc::clone(&replaced);
        f.on_resize(move |flow, _| {
            let flag = Rc::clone(&flag);
            flow.on_resize(move |_, _| flag.set(true));
        });

        f.resize(&mut host, container());
        assert!(!replaced.get());
        f.resize(&mut host, container());
        assert!(replaced.get());
    }

    #[test]
    fn debug_output_hides_hook() {
        let mut f: Flow<u32> = Flow::new(container());
        f.on_resize(|_, _| {});
        let text = alloc::format!("{f:?}");
        assert!(text.contains("resize_hook: true"));
    }
}
