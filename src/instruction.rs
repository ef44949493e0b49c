//! Placement verbs, directions, and the instructions that bind them to a box.

use crate::geometry::Coord;

/// How an instruction changes its box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Slide without changing size.
    #[default]
    Move,
    /// Grow toward the direction.
    Expand,
    /// Grow toward the direction, then shrink back to the original size
    /// centered inside the grown span.
    Center,
}

impl Verb {
    /// Mode-switch character that selects this verb in a rule string.
    /// `Move` is the default mode and has none.
    pub const fn mode_char(self) -> Option<char> {
        match self {
            Self::Move => None,
            Self::Expand => Some('='),
            Self::Center => Some('/'),
        }
    }

    pub(crate) const fn from_mode_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Self::Expand),
            '/' => Some(Self::Center),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '^' => Some(Self::Up),
            'v' => Some(Self::Down),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            Self::Left => '<',
            Self::Right => '>',
            Self::Up => '^',
            Self::Down => 'v',
        }
    }

    /// Unit step `(dx, dy)` along this direction.
    pub fn step<T: Coord>(self) -> (T, T) {
        match self {
            Self::Left => (-T::one(), T::zero()),
            Self::Right => (T::one(), T::zero()),
            Self::Up => (T::zero(), -T::one()),
            Self::Down => (T::zero(), T::one()),
        }
    }
}

/// One of the twelve concrete operations: a verb applied in a direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Op {
    pub verb: Verb,
    pub direction: Direction,
}

impl Op {
    pub const fn new(verb: Verb, direction: Direction) -> Self {
        Self { verb, direction }
    }

    /// Whether each step resizes the box rather than moving it.
    pub const fn grows(self) -> bool {
        !matches!(self.verb, Verb::Move)
    }
}

impl core::fmt::Display for Op {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(mode) = self.verb.mode_char() {
            write!(f, "{mode}")?;
        }
        write!(f, "{}", self.direction.to_char())
    }
}

/// An [`Op`] bound to the box it moves. Immutable once created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instruction<Id> {
    pub target: Id,
    pub op: Op,
}

impl<Id> Instruction<Id> {
    pub const fn new(target: Id, op: Op) -> Self {
        Self { target, op }
    }
}
