//! Configuration for building and solving the delivery MDP.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ModelError;

/// Parameters of the reward/transition model and of value iteration.
///
/// Rewards are multiplied by `reward_scale` before solving so that the
/// convergence `threshold` is meaningful relative to the value scale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct MdpConfig {
    /// Discount factor γ applied to the successor value, in `(0, 1)`.
    pub discount_factor: f64,
    /// Sweep is converged once `max_i |V_new(i) - V_old(i)| <= threshold`.
    pub threshold: f64,
    /// Upper bound on the number of value-iteration sweeps.
    pub max_sweeps: usize,
    /// Factor applied to every reward table entry.
    pub reward_scale: f64,
    /// Factor applied to task transition probabilities.
    pub transition_scale: f64,
    /// Seed for the random initialization of V.
    pub seed: u64,
}

impl MdpConfig {
    /// Checks that every parameter lies in its admissible range.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.discount_factor > 0.0 && self.discount_factor < 1.0) {
            return Err(ModelError::InvalidConfig(format!(
                "discount-factor must lie in (0, 1), got {}",
                self.discount_factor
            )));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(ModelError::InvalidConfig(format!(
                "threshold must be positive, got {}",
                self.threshold
            )));
        }
        if self.max_sweeps == 0 {
            return Err(ModelError::InvalidConfig(
                "max-sweeps must be at least 1".to_string(),
            ));
        }
        if !(self.reward_scale.is_finite() && self.reward_scale > 0.0) {
            return Err(ModelError::InvalidConfig(format!(
                "reward-scale must be positive, got {}",
                self.reward_scale
            )));
        }
        if !(self.transition_scale.is_finite() && self.transition_scale >= 0.0) {
            return Err(ModelError::InvalidConfig(format!(
                "transition-scale must be non-negative, got {}",
                self.transition_scale
            )));
        }
        Ok(())
    }
}

impl Default for MdpConfig {
    fn default() -> Self {
        Self {
            discount_factor: 0.95,
            threshold: 1e-3,
            max_sweeps: 10_000,
            reward_scale: 1e-4,
            transition_scale: 3.0,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = MdpConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.discount_factor, 0.95);
    }

    #[test]
    fn discount_bounds_are_exclusive() {
        for gamma in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let cfg = MdpConfig {
                discount_factor: gamma,
                ..MdpConfig::default()
            };
            assert!(matches!(cfg.validate(), Err(ModelError::InvalidConfig(_))));
        }
    }

    #[test]
    fn zero_sweeps_rejected() {
        let cfg = MdpConfig {
            max_sweeps: 0,
            ..MdpConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_positive_threshold_rejected() {
        let cfg = MdpConfig {
            threshold: 0.0,
            ..MdpConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reads_kebab_case_keys() {
        let cfg: MdpConfig =
            serde_json::from_str(r#"{ "discount-factor": 0.85, "max-sweeps": 50 }"#).unwrap();
        assert_eq!(cfg.discount_factor, 0.85);
        assert_eq!(cfg.max_sweeps, 50);
        assert_eq!(cfg.threshold, MdpConfig::default().threshold);
    }
}
