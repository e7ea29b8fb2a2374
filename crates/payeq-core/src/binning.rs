//! Fixed-width interval binning.
//!
//! Intervals are closed on the right; the first interval also includes its
//! lower edge, so a range `[0, 1]` with width `0.1` yields `[0,0.1]`,
//! `(0.1,0.2]`, ..., `(0.9,1]`.

use crate::error::{CoreError, Result};
use crate::table::format_number;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binning {
    width: f64,
    lower: f64,
    upper: f64,
    count: usize,
}

impl Default for Binning {
    fn default() -> Self {
        Self {
            width: 0.1,
            lower: 0.0,
            upper: 1.0,
            count: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
}

impl Bin {
    /// Interval label, e.g. `[0,0.1]` for the first bin and `(0.1,0.2]`
    /// afterwards.
    pub fn label(&self) -> String {
        let open = if self.index == 0 { '[' } else { '(' };
        format!(
            "{open}{},{}]",
            format_number(label_edge(self.lower)),
            format_number(label_edge(self.upper))
        )
    }
}

// Edges like 0.1 * 3 carry float noise that should not reach labels.
fn label_edge(edge: f64) -> f64 {
    (edge * 1e6).round() / 1e6
}

impl Binning {
    pub fn new(width: f64, lower: f64, upper: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(CoreError::InvalidBinning("width must be positive"));
        }
        if !(lower.is_finite() && upper.is_finite() && upper > lower) {
            return Err(CoreError::InvalidBinning("range must be increasing"));
        }
        let count = ((upper - lower) / width).round().max(1.0) as usize;
        Ok(Self {
            width,
            lower,
            upper,
            count,
        })
    }

    /// Unit range `[0, 1]` split into intervals of `width`.
    pub fn unit(width: f64) -> Result<Self> {
        Self::new(width, 0.0, 1.0)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    fn edge(&self, idx: usize) -> f64 {
        if idx >= self.count {
            self.upper
        } else {
            self.lower + idx as f64 * self.width
        }
    }

    pub fn bin_at(&self, index: usize) -> Option<Bin> {
        (index < self.count).then(|| Bin {
            index,
            lower: self.edge(index),
            upper: self.edge(index + 1),
        })
    }

    /// Interval containing `value`, or None outside the range.
    pub fn assign(&self, value: f64) -> Option<Bin> {
        if value.is_nan() || value < self.lower || value > self.upper {
            return None;
        }
        (0..self.count)
            .find(|&idx| value <= self.edge(idx + 1))
            .and_then(|idx| self.bin_at(idx))
    }

    /// Labels of every interval, lowest first.
    pub fn labels(&self) -> Vec<String> {
        (0..self.count)
            .filter_map(|idx| self.bin_at(idx))
            .map(|bin| bin.label())
            .collect()
    }
}
