//! Rainbow palette and the rolling trail buffers behind the cat.

use std::collections::VecDeque;
use std::f64::consts::PI;

/// Number of colors in the rainbow cycle.
pub const PALETTE_LEN: usize = 6 * 7;

/// Build the rainbow as xterm 256-color cube codes.
///
/// Each channel follows a sine wave offset from the others and is quantised
/// to the 0..=5 range of the color cube.
pub fn generate_palette() -> [u8; PALETTE_LEN] {
    let phase = (PI / 3.0).floor();
    let channel = |n: f64, offset: f64| (3.0 * (n + offset).sin() + 3.0).floor() as u8;

    let mut palette = [0u8; PALETTE_LEN];
    for (i, slot) in palette.iter_mut().enumerate() {
        let n = i as f64 / 6.0;
        let r = channel(n, 0.0);
        let g = channel(n, 2.0 * phase);
        let b = channel(n, 4.0 * phase);
        *slot = 36 * r + 6 * g + b + 16;
    }
    palette
}

/// A fixed-capacity trail of colored cells; the oldest cell drops off once
/// the trail is full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trajectory {
    cells: VecDeque<String>,
    capacity: usize,
}

impl Trajectory {
    /// Empty trail holding at most `capacity` cells.
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a cell, evicting the oldest when full.
    pub fn push(&mut self, cell: String) {
        if self.capacity == 0 {
            return;
        }
        if self.cells.len() >= self.capacity {
            self.cells.pop_front();
        }
        self.cells.push_back(cell);
    }

    /// Current number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cells have been pushed (or capacity is zero).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Maximum number of cells.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cells from oldest to newest.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(String::as_str)
    }
}
