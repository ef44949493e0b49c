//! Integer rectangles and sizes used throughout the solver.
//!
//! Coordinates are generic over any signed primitive integer so hosts that
//! store geometry as `i16` or `i64` don't need to convert. `i32` is the
//! default everywhere.
//!
//! ```
//! use boxflow::Rect;
//!
//! let r = Rect::new(10, 20, 50, 30);
//! assert_eq!(r.right(), 60);
//! assert_eq!(r.bottom(), 50);
//! assert_eq!(r.offset(-10, -20), Rect::new(0, 0, 50, 30));
//! ```

use core::fmt::Debug;

use num_traits::{PrimInt, Signed};

/// Scalar type for positions and sizes.
///
/// Blanket-implemented for every signed primitive integer.
pub trait Coord: PrimInt + Signed + Debug {}

impl<T: PrimInt + Signed + Debug> Coord for T {}

/// Width × height.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size<T = i32> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    /// Create a new size.
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect<T = i32> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T> {
    /// Create a new rect.
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Coord> Rect<T> {
    /// Rect at the origin with the given size.
    pub fn from_size(size: Size<T>) -> Self {
        Self::new(T::zero(), T::zero(), size.width, size.height)
    }

    pub fn size(&self) -> Size<T> {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> T {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> T {
        self.y + self.height
    }

    /// Same size, shifted by `(dx, dy)`.
    pub fn offset(self, dx: T, dy: T) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow by `amount` on every side. Negative amounts shrink.
    pub fn inflate(self, amount: T) -> Self {
        let two = T::one() + T::one();
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * two,
            self.height + amount * two,
        )
    }

    /// Whether `other` lies fully inside this rect. Shared edges count as inside.
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Closed-interval intersection test: rects that merely touch along an
    /// edge or corner are reported as overlapping.
    pub fn overlaps(&self, other: &Self) -> bool {
        let x_apart = if self.x < other.x {
            self.right() < other.x
        } else {
            other.right() < self.x
        };
        let y_apart = if self.y < other.y {
            self.bottom() < other.y
        } else {
            other.bottom() < self.y
        };
        !x_apart && !y_apart
    }
}
