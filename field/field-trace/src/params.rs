//! Extraction parameters and presets.

use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};

/// Stroke attributes passed through to whoever renders the paths.
///
/// The pipeline never interprets these; they travel with the result so a
/// renderer can style the overlay without extra plumbing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color (CSS color string).
    pub color: String,

    /// Stroke width in lattice cells.
    pub width: f64,

    /// Stroke opacity (0.0-1.0).
    pub opacity: f64,

    /// Glow radius; 0 disables the glow.
    pub glow: f64,

    /// Whether paths should use midpoint-smoothed curves instead of
    /// straight segments.
    pub smooth: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "#4a90d9".to_string(),
            width: 1.5,
            opacity: 0.9,
            glow: 0.0,
            smooth: false,
        }
    }
}

/// Parameters for one boundary extraction pass.
///
/// Supplied per invocation together with the lattice; the pipeline owns no
/// configuration state between frames.
///
/// # Example
///
/// ```
/// use field_trace::TraceParams;
///
/// let params = TraceParams::default()
///     .with_sigma(1.5)
///     .with_seed_count(32);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceParams {
    /// Gaussian blur standard deviation in cells. Must be > 0.
    pub sigma: f64,

    /// Number of streamline seeds per pass. Must be >= 1.
    pub seed_count: usize,

    /// Integration budget per streamline. Must be >= 1.
    pub max_steps: usize,

    /// Fixed RK4 step size in cells. Must be > 0.
    pub step_size: f64,

    /// Maximum distance to the seed still counted as a closed loop.
    /// Must be >= 0.
    pub closure_threshold: f64,

    /// Minimum point count for a closed loop to survive validation.
    /// Must be >= 1.
    pub min_loop_length: usize,

    /// Gradient magnitude below which a region counts as flat and the
    /// tangent is undefined.
    pub magnitude_floor: f64,

    /// Optional seed for the jittered-grid RNG. Identical seeds reproduce
    /// identical extraction results.
    pub rng_seed: Option<u64>,

    /// Styling passed through to the renderer unmodified.
    pub stroke: StrokeStyle,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            seed_count: 64,
            max_steps: 1500,
            step_size: 0.35,
            closure_threshold: 1.25,
            min_loop_length: 24,
            magnitude_floor: 1e-6,
            rng_seed: None,
            stroke: StrokeStyle::default(),
        }
    }
}

impl TraceParams {
    /// Parameters for fine tracing: heavier seeding, smaller steps.
    #[must_use]
    pub fn fine() -> Self {
        Self {
            seed_count: 144,
            max_steps: 4000,
            step_size: 0.2,
            closure_threshold: 0.8,
            ..Default::default()
        }
    }

    /// Parameters for coarse, cheap tracing.
    #[must_use]
    pub fn coarse() -> Self {
        Self {
            sigma: 2.0,
            seed_count: 25,
            max_steps: 600,
            step_size: 0.6,
            min_loop_length: 12,
            ..Default::default()
        }
    }

    /// Set the blur sigma.
    #[must_use]
    pub const fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the seed count.
    #[must_use]
    pub const fn with_seed_count(mut self, count: usize) -> Self {
        self.seed_count = count;
        self
    }

    /// Set the per-streamline step budget.
    #[must_use]
    pub const fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self
    }

    /// Set the RK4 step size.
    #[must_use]
    pub const fn with_step_size(mut self, step: f64) -> Self {
        self.step_size = step;
        self
    }

    /// Set the closure distance threshold.
    #[must_use]
    pub const fn with_closure_threshold(mut self, threshold: f64) -> Self {
        self.closure_threshold = threshold;
        self
    }

    /// Set the minimum accepted loop length.
    #[must_use]
    pub const fn with_min_loop_length(mut self, length: usize) -> Self {
        self.min_loop_length = length;
        self
    }

    /// Set the RNG seed for reproducible extraction.
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Validate all fields, failing fast on the first offender.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> TraceResult<()> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(TraceError::invalid_config(
                "sigma",
                format!("must be > 0 and finite, got {}", self.sigma),
            ));
        }
        if self.seed_count == 0 {
            return Err(TraceError::invalid_config("seed_count", "must be >= 1"));
        }
        if self.max_steps == 0 {
            return Err(TraceError::invalid_config("max_steps", "must be >= 1"));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(TraceError::invalid_config(
                "step_size",
                format!("must be > 0 and finite, got {}", self.step_size),
            ));
        }
        if !(self.closure_threshold.is_finite() && self.closure_threshold >= 0.0) {
            return Err(TraceError::invalid_config(
                "closure_threshold",
                format!("must be >= 0 and finite, got {}", self.closure_threshold),
            ));
        }
        if self.min_loop_length == 0 {
            return Err(TraceError::invalid_config("min_loop_length", "must be >= 1"));
        }
        if !(self.magnitude_floor.is_finite() && self.magnitude_floor >= 0.0) {
            return Err(TraceError::invalid_config(
                "magnitude_floor",
                format!("must be >= 0 and finite, got {}", self.magnitude_floor),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_validate() {
        assert!(TraceParams::default().validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(TraceParams::fine().validate().is_ok());
        assert!(TraceParams::coarse().validate().is_ok());
    }

    #[test]
    fn test_fine_is_denser_than_coarse() {
        let fine = TraceParams::fine();
        let coarse = TraceParams::coarse();
        assert!(fine.seed_count > coarse.seed_count);
        assert!(fine.step_size < coarse.step_size);
    }

    #[test]
    fn test_builder() {
        let params = TraceParams::default()
            .with_sigma(2.5)
            .with_seed_count(10)
            .with_max_steps(99)
            .with_rng_seed(7);

        assert!((params.sigma - 2.5).abs() < 1e-12);
        assert_eq!(params.seed_count, 10);
        assert_eq!(params.max_steps, 99);
        assert_eq!(params.rng_seed, Some(7));
    }

    #[test]
    fn test_rejects_bad_sigma() {
        let err = TraceParams::default().with_sigma(0.0).validate().unwrap_err();
        assert!(matches!(err, TraceError::InvalidConfig { field: "sigma", .. }));

        let err = TraceParams::default().with_sigma(f64::NAN).validate().unwrap_err();
        assert!(matches!(err, TraceError::InvalidConfig { field: "sigma", .. }));
    }

    #[test]
    fn test_rejects_bad_step_size() {
        let err = TraceParams::default()
            .with_step_size(-0.1)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            TraceError::InvalidConfig { field: "step_size", .. }
        ));
    }

    #[test]
    fn test_rejects_zero_counts() {
        assert!(TraceParams::default().with_seed_count(0).validate().is_err());
        assert!(TraceParams::default().with_max_steps(0).validate().is_err());
        assert!(TraceParams::default()
            .with_min_loop_length(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_negative_closure_threshold_rejected() {
        let err = TraceParams::default()
            .with_closure_threshold(-1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            TraceError::InvalidConfig {
                field: "closure_threshold",
                ..
            }
        ));
    }
}
