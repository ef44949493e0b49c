//! Rule string decoding.
//!
//! A rule is a compact string of direction characters, each optionally
//! preceded by a mode switch:
//!
//! | char | meaning                         |
//! |------|---------------------------------|
//! | `<`  | left                            |
//! | `>`  | right                           |
//! | `^`  | up                              |
//! | `v`  | down                            |
//! | `=`  | next direction expands          |
//! | `/`  | next direction centers          |
//!
//! Without a mode switch a direction moves the box. The mode applies to the
//! next character only. Characters that are not directions are reported as
//! [`RuleWarning`]s and skipped; the rest of the rule still applies.
//!
//! ```
//! use boxflow::rule;
//! use boxflow::{Direction, Op, Verb};
//!
//! let decoded = rule::decode("=<^");
//! assert!(decoded.warnings.is_empty());
//! assert_eq!(
//!     decoded.ops,
//!     [
//!         Op::new(Verb::Expand, Direction::Left),
//!         Op::new(Verb::Move, Direction::Up),
//!     ]
//! );
//! ```

use alloc::vec::Vec;

use crate::instruction::{Direction, Op, Verb};

/// Non-fatal problem found while decoding a rule.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleWarning {
    /// A character that is neither a direction nor a mode switch.
    #[error("invalid instruction {character:?} at {index} in {mode:?} mode")]
    InvalidInstruction {
        /// Character offset within the rule string.
        index: usize,
        character: char,
        /// Mode that was pending when the character was read.
        mode: Verb,
    },
}

/// Output of [`decode`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Valid operations, in rule order.
    pub ops: Vec<Op>,
    pub warnings: Vec<RuleWarning>,
}

/// Result of attaching a rule to a box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleReport {
    /// Number of instructions appended to the flow.
    pub appended: usize,
    pub warnings: Vec<RuleWarning>,
}

/// Decode a rule string into operations.
///
/// A trailing mode switch with nothing after it is dropped silently.
pub fn decode(rule: &str) -> Decoded {
    let mut decoded = Decoded::default();
    let mut mode = Verb::Move;

    for (index, c) in rule.chars().enumerate() {
        if let Some(verb) = Verb::from_mode_char(c) {
            mode = verb;
            continue;
        }

        match Direction::from_char(c) {
            Some(direction) => decoded.ops.push(Op::new(mode, direction)),
            None => {
                tracing::warn!(rule, index, character = ?c, ?mode, "invalid instruction");
                decoded.warnings.push(RuleWarning::InvalidInstruction {
                    index,
                    character: c,
                    mode,
                });
            }
        }

        mode = Verb::Move;
    }

    decoded
}
