//! Constraint-driven 2D box layout.
//!
//! A [`Flow`] places the children of a container by following per-box rules
//! such as `"<^"` (move left, then up) or `"=>"` (expand right). Each
//! instruction grows or slides its box one unit at a time until the next
//! step would leave the container or touch a box that was placed earlier,
//! then keeps the last step that fit. Rules run in declaration order, so
//! earlier rules win contested space.
//!
//! Pure integer geometry, `no_std` compatible (needs `alloc`).
//!
//! # Modules
//!
//! - [`geometry`] — `Rect`, `Size`, and the `Coord` scalar trait
//! - [`transform`] — staged/committed rectangle driving the growth loop
//! - [`instruction`] — verbs, directions, and instructions
//! - [`rule`] — rule string decoding and warnings
//! - [`host`] — the trait a widget tree implements to be laid out
//! - [`flow`] — the engine facade
//! - [`scene`] — an arena-backed host with nested flows
//! - `svg` — SVG snapshots of a solved flow (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod flow;
pub mod geometry;
pub mod host;
pub mod instruction;
pub mod rule;
pub mod scene;
mod solver;
pub mod state;
#[cfg(feature = "svg")]
pub mod svg;
pub mod transform;

pub use flow::{DEFAULT_PADDING, Flow, ResizeHook};
pub use geometry::{Coord, Rect, Size};
pub use host::Host;
pub use instruction::{Direction, Instruction, Op, Verb};
pub use rule::{RuleReport, RuleWarning};
pub use state::LayoutState;
pub use transform::Transform;
