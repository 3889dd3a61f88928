use thiserror::Error;

/// Errors that can occur when validating search bounds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoundsError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,
    /// Endpoints are equal.
    #[error("zero width")]
    ZeroWidth,
}

/// Ordered finite limits the search point is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    /// Validates and orders the endpoints.
    ///
    /// # Errors
    ///
    /// Returns `BoundsError` if an endpoint is non-finite or both are equal.
    pub fn new(bounds: [f64; 2]) -> Result<Self, BoundsError> {
        let [a, b] = bounds;

        if !a.is_finite() || !b.is_finite() {
            return Err(BoundsError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BoundsError::ZeroWidth);
        }

        Ok(Self {
            lower: a.min(b),
            upper: a.max(b),
        })
    }

    /// Returns the bounds as `[lower, upper]`.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }

    /// Clamps `x` into the bounds.
    #[must_use]
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.lower, self.upper)
    }
}

/// The sign of a residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Residual is positive (or zero).
    Positive,
    /// Residual is negative.
    Negative,
}

impl Sign {
    /// Returns the sign of a residual value.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }

    fn direction(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// Step size that halves on every residual sign change.
#[derive(Debug, Clone, Copy)]
pub(super) struct Step {
    size: f64,
    min: f64,
    last: Option<Sign>,
}

impl Step {
    pub(super) fn new(initial: f64, min: f64) -> Self {
        Self {
            size: initial,
            min,
            last: None,
        }
    }

    pub(super) fn size(&self) -> f64 {
        self.size
    }

    /// Records the residual sign and returns the signed move to make.
    ///
    /// A positive residual moves `x` up, a negative one moves it down.
    pub(super) fn advance(&mut self, sign: Sign) -> f64 {
        if self.last.is_some_and(|last| last != sign) {
            self.size = (0.5 * self.size).max(self.min);
        }
        self.last = Some(sign);
        sign.direction() * self.size
    }
}
