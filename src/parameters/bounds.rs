//! Parameter bounds implementation
//!
//! This module provides the `(low, high)` interval attached to every parameter.
//! Two membership checks exist: an open-interval check used when a single
//! parameter truncates its prior, and a closed-interval check used by the
//! cached bounds mask of a frozen parameter set.

use serde::{Deserialize, Serialize};
use std::f64::{INFINITY, NEG_INFINITY};
use thiserror::Error;

/// Errors that can occur when working with parameter bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    #[error("Invalid bounds: low ({low}) must not exceed high ({high})")]
    InvalidBounds { low: f64, high: f64 },

    #[error("Bounds must not be NaN")]
    NanBound,
}

/// Represents the bounds of a parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower bound
    pub low: f64,

    /// Upper bound
    pub high: f64,
}

impl Serialize for Bounds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Bounds", 2)?;

        // JSON has no infinity, open ends are written as null
        if self.low == NEG_INFINITY {
            state.serialize_field("low", &serde_json::Value::Null)?;
        } else {
            state.serialize_field("low", &self.low)?;
        }

        if self.high == INFINITY {
            state.serialize_field("high", &serde_json::Value::Null)?;
        } else {
            state.serialize_field("high", &self.high)?;
        }

        state.end()
    }
}

impl<'de> Deserialize<'de> for Bounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BoundsHelper {
            #[serde(default)]
            low: Option<f64>,

            #[serde(default)]
            high: Option<f64>,
        }

        let helper = BoundsHelper::deserialize(deserializer)?;

        Bounds::new(
            helper.low.unwrap_or(NEG_INFINITY),
            helper.high.unwrap_or(INFINITY),
        )
        .map_err(serde::de::Error::custom)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            low: NEG_INFINITY,
            high: INFINITY,
        }
    }
}

impl From<Bounds> for (f64, f64) {
    fn from(bounds: Bounds) -> Self {
        (bounds.low, bounds.high)
    }
}

impl Bounds {
    /// Create new bounds
    ///
    /// # Arguments
    ///
    /// * `low` - Lower bound
    /// * `high` - Upper bound
    ///
    /// # Returns
    ///
    /// A new `Bounds` object if low <= high, or an error otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_params::parameters::bounds::Bounds;
    ///
    /// let bounds = Bounds::new(0.0, 1.0).unwrap();
    /// assert_eq!(bounds.low, 0.0);
    /// assert_eq!(bounds.high, 1.0);
    /// assert!(Bounds::new(1.0, 0.0).is_err());
    /// ```
    pub fn new(low: f64, high: f64) -> Result<Self, BoundsError> {
        if low.is_nan() || high.is_nan() {
            return Err(BoundsError::NanBound);
        }
        if low > high {
            return Err(BoundsError::InvalidBounds { low, high });
        }

        Ok(Self { low, high })
    }

    /// Create unbounded bounds (negative infinity to positive infinity)
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Create bounds with only a lower limit
    pub fn low_only(low: f64) -> Self {
        Self {
            low,
            high: INFINITY,
        }
    }

    /// Create bounds with only an upper limit
    pub fn high_only(high: f64) -> Self {
        Self {
            low: NEG_INFINITY,
            high,
        }
    }

    /// Strict check, `low < value < high`
    pub fn contains_open(&self, value: f64) -> bool {
        self.low < value && value < self.high
    }

    /// Inclusive check, `low <= value <= high`
    pub fn contains_closed(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Check if both ends are finite
    pub fn is_finite(&self) -> bool {
        self.low.is_finite() && self.high.is_finite()
    }

    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}
