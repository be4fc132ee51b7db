//! Fold particle positions in a simulation trace back into the periodic box.
//!
//! The trace is a line-oriented text stream: lines starting with `#` are
//! passed through untouched, every other line starts with the coordinate
//! columns of one particle. The leading coordinates are mapped to their
//! minimum image inside the box, everything after them is preserved.

use glam::DVec3;

pub use crate::config::{parse_args, BoxConfig, Command, ConfigError, USAGE};
pub use crate::stream::PbcFilter;

pub mod config;
pub mod stream;

/// A rectangular periodic cell.
///
/// A negative z extent marks a 2D cell: only the x and y axes participate in
/// wrapping, and the filter reads two coordinate columns per line instead of
/// three. A zero extent on an axis disables wrapping on that axis entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimBox {
    size: DVec3,
    /// `-1 / size` per axis, with zero-size axes forced to zero so the wrap
    /// offset on those axes is always `floor(0.5) == 0`.
    neg_inv_size: DVec3,
}

impl SimBox {
    pub fn new(size: DVec3) -> Self {
        let mut neg_inv_size = DVec3::splat(-1.0) / size;
        for axis in 0..3 {
            if size[axis] == 0.0 {
                neg_inv_size[axis] = 0.0;
            }
        }
        Self { size, neg_inv_size }
    }

    pub const fn size(&self) -> DVec3 {
        self.size
    }

    /// The number of coordinate columns carried per particle: 2 for a 2D
    /// cell, 3 otherwise.
    pub fn ndim(&self) -> usize {
        if self.size.z < 0.0 {
            2
        } else {
            3
        }
    }

    /// Map a position to its minimum image, the representative inside the
    /// half-open interval `(-size/2, size/2]` on every wrapped axis.
    #[inline]
    pub fn apply_pbc(&self, r: DVec3) -> DVec3 {
        let offset = (r * self.neg_inv_size + 0.5).floor();
        r + offset * self.size
    }

    /// Whether every active-axis coordinate lies in `(-size/2, size/2]`.
    pub fn is_inside(&self, r: DVec3) -> bool {
        let half = 0.5 * self.size;
        (0..self.ndim()).all(|axis| r[axis] > -half[axis] && r[axis] <= half[axis])
    }
}
