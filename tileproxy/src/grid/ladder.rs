//! Discrete resolution ladder of the upstream gridset.

use super::GridError;

/// Native resolutions (feet per source pixel) served by the upstream gridset.
///
/// Entries are strictly descending: index 0 is the coarsest level.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionLadder {
    resolutions: Vec<f64>,
}

impl ResolutionLadder {
    /// Creates a ladder, rejecting empty, non-positive or unsorted input.
    pub fn new(resolutions: Vec<f64>) -> Result<Self, GridError> {
        if resolutions.is_empty() {
            return Err(GridError::EmptyLadder);
        }
        if let Some(&bad) = resolutions.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(GridError::InvalidResolution(bad));
        }
        if let Some(pair) = resolutions.windows(2).find(|w| w[0] <= w[1]) {
            return Err(GridError::NotDescending {
                previous: pair[0],
                next: pair[1],
            });
        }
        Ok(Self { resolutions })
    }

    /// The coarsest (largest) resolution.
    pub fn coarsest(&self) -> f64 {
        self.resolutions[0]
    }

    /// The finest (smallest) resolution.
    pub fn finest(&self) -> f64 {
        self.resolutions[self.resolutions.len() - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.resolutions
    }

    /// Picks the native level used to serve a request.
    ///
    /// Returns the smallest ladder entry strictly greater than
    /// `requested_feet_per_pixel`, so the source is never upsampled past its
    /// native detail. Requests at or above the coarsest level get the coarsest
    /// level.
    pub fn select(&self, requested_feet_per_pixel: f64) -> f64 {
        self.resolutions
            .iter()
            .rev()
            .copied()
            .find(|&r| r > requested_feet_per_pixel)
            .unwrap_or_else(|| self.coarsest())
    }
}

impl Default for ResolutionLadder {
    /// The built-in DoITT ladder.
    fn default() -> Self {
        Self {
            resolutions: super::defaults::DEFAULT_RESOLUTIONS.to_vec(),
        }
    }
}
