//! Parameter blocks
//!
//! A block names a contiguous half-open range `[start, stop)` of the flat
//! parameter vector. Passband and light-curve blocks are further split into
//! equal-width sub-ranges, one per passband or per light curve.

use crate::error::{Result, TransitError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Grouping structure of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockKind {
    /// One undivided range
    Global,
    /// `npb` sub-ranges of `isize` parameters each
    Passband { isize: usize, npb: usize },
    /// `nlc` sub-ranges of `isize` parameters each
    LightCurve { isize: usize, nlc: usize },
}

/// A named, contiguous range of parameter positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBlock {
    name: String,
    start: usize,
    stop: usize,
    #[serde(flatten)]
    kind: BlockKind,
}

impl ParameterBlock {
    /// Create an undivided block over `[start, stop)`
    pub fn global(name: &str, start: usize, stop: usize) -> Result<Self> {
        if stop < start {
            return Err(TransitError::Configuration(format!(
                "block '{}' has stop ({}) before start ({})",
                name, stop, start
            )));
        }
        Ok(Self {
            name: name.to_string(),
            start,
            stop,
            kind: BlockKind::Global,
        })
    }

    /// Create a block holding `isize` parameters for each of `npb` passbands
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_params::parameters::ParameterBlock;
    ///
    /// let block = ParameterBlock::passband("ldc", 4, 10, 2, 3).unwrap();
    /// assert_eq!(block.slices(), vec![4..6, 6..8, 8..10]);
    ///
    /// // 5 parameters cannot hold 3 passbands of 2
    /// assert!(ParameterBlock::passband("ldc", 0, 5, 2, 3).is_err());
    /// ```
    pub fn passband(name: &str, start: usize, stop: usize, isize: usize, npb: usize) -> Result<Self> {
        Self::grouped(name, start, stop, isize, npb, "passbands")?;
        Ok(Self {
            name: name.to_string(),
            start,
            stop,
            kind: BlockKind::Passband { isize, npb },
        })
    }

    /// Create a block holding `isize` parameters for each of `nlc` light curves
    pub fn light_curve(name: &str, start: usize, stop: usize, isize: usize, nlc: usize) -> Result<Self> {
        Self::grouped(name, start, stop, isize, nlc, "light curves")?;
        Ok(Self {
            name: name.to_string(),
            start,
            stop,
            kind: BlockKind::LightCurve { isize, nlc },
        })
    }

    fn grouped(
        name: &str,
        start: usize,
        stop: usize,
        isize: usize,
        ngroups: usize,
        what: &str,
    ) -> Result<()> {
        if isize == 0 {
            return Err(TransitError::Configuration(format!(
                "block '{}' needs a non-zero group size",
                name
            )));
        }
        let len = stop.checked_sub(start).ok_or_else(|| {
            TransitError::Configuration(format!(
                "block '{}' has stop ({}) before start ({})",
                name, stop, start
            ))
        })?;
        let expected = isize.checked_mul(ngroups).ok_or_else(|| {
            TransitError::Configuration(format!(
                "block '{}' size {} × {} {} overflows",
                name, isize, ngroups, what
            ))
        })?;
        if len % isize != 0 || len != expected {
            return Err(TransitError::Configuration(format!(
                "block '{}' expected {} parameters ({} per {} × {} {}), got {}",
                name,
                expected,
                isize,
                what.trim_end_matches('s'),
                ngroups,
                what,
                len
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn stop(&self) -> usize {
        self.stop
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// The whole range `[start, stop)`
    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// Size of each sub-range, the whole block for a global block
    pub fn isize(&self) -> usize {
        match self.kind {
            BlockKind::Global => self.len(),
            BlockKind::Passband { isize, .. } | BlockKind::LightCurve { isize, .. } => isize,
        }
    }

    /// Number of sub-ranges
    pub fn nelem(&self) -> usize {
        match self.kind {
            BlockKind::Global => 1,
            BlockKind::Passband { npb, .. } => npb,
            BlockKind::LightCurve { nlc, .. } => nlc,
        }
    }

    /// The per-passband or per-light-curve sub-ranges
    pub fn slices(&self) -> Vec<Range<usize>> {
        match self.kind {
            BlockKind::Global => vec![self.range()],
            BlockKind::Passband { isize, npb: n } | BlockKind::LightCurve { isize, nlc: n } => (0..n)
                .map(|i| self.start + isize * i..self.start + isize * (i + 1))
                .collect(),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Global => write!(f, "global"),
            BlockKind::Passband { isize, npb } => write!(f, "passband({} × {})", isize, npb),
            BlockKind::LightCurve { isize, nlc } => write!(f, "lightcurve({} × {})", isize, nlc),
        }
    }
}

impl fmt::Display for ParameterBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {}) {}", self.name, self.start, self.stop, self.kind)
    }
}
