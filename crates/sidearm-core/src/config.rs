//! Attack configuration read at the host boundary.
//!
//! Values outside their valid range are corrected when read, never rejected:
//! a bad file degrades to default-tuned combatants instead of failing.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::*;
use crate::error::ConfigError;

/// Tuning shared by every controlled entity for the duration of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    /// Base cooldown of the generic strategy (ticks, 20..=1000).
    pub base_attack_interval_ticks: i32,
    /// Symmetric jitter applied to the base cooldown (ticks, 0..=200).
    pub attack_interval_variance: i32,
    /// Probability of a tight (3-5 degree) shot (0.0..=1.0).
    pub tier1_probability: f32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            base_attack_interval_ticks: DEFAULT_BASE_ATTACK_INTERVAL_TICKS,
            attack_interval_variance: DEFAULT_ATTACK_INTERVAL_VARIANCE,
            tier1_probability: DEFAULT_TIER1_PROBABILITY,
        }
    }
}

impl AttackConfig {
    /// Parse a JSON document and correct any out-of-range value.
    /// Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: AttackConfig = serde_json::from_str(text)?;
        Ok(raw.sanitized())
    }

    /// Copy of this config with every field inside its valid range.
    pub fn sanitized(self) -> Self {
        let mut out = self;

        if out.base_attack_interval_ticks < MIN_BASE_ATTACK_INTERVAL_TICKS {
            warn!(
                value = out.base_attack_interval_ticks,
                "base_attack_interval_ticks below {MIN_BASE_ATTACK_INTERVAL_TICKS}, using default {DEFAULT_BASE_ATTACK_INTERVAL_TICKS}"
            );
        } else if out.base_attack_interval_ticks > MAX_BASE_ATTACK_INTERVAL_TICKS {
            warn!(
                value = out.base_attack_interval_ticks,
                "base_attack_interval_ticks too high, using maximum {MAX_BASE_ATTACK_INTERVAL_TICKS}"
            );
        }
        out.base_attack_interval_ticks = sanitize_base_attack_interval(out.base_attack_interval_ticks);

        if out.attack_interval_variance < 0 {
            warn!(
                value = out.attack_interval_variance,
                "attack_interval_variance is negative, using default {DEFAULT_ATTACK_INTERVAL_VARIANCE}"
            );
        } else if out.attack_interval_variance > MAX_ATTACK_INTERVAL_VARIANCE {
            warn!(
                value = out.attack_interval_variance,
                "attack_interval_variance too high, using maximum {MAX_ATTACK_INTERVAL_VARIANCE}"
            );
        }
        out.attack_interval_variance = sanitize_attack_interval_variance(out.attack_interval_variance);

        if !(0.0..=1.0).contains(&out.tier1_probability) {
            warn!(
                value = out.tier1_probability,
                "tier1_probability outside [0, 1], using default {DEFAULT_TIER1_PROBABILITY}"
            );
        }
        out.tier1_probability = sanitize_tier1_probability(out.tier1_probability);

        out
    }

    /// Tier-1 probability as used by the inaccuracy model.
    pub fn tier1_probability(&self) -> f32 {
        sanitize_tier1_probability(self.tier1_probability)
    }

    /// Base cooldown as used by the generic cadence.
    pub fn base_attack_interval(&self) -> i32 {
        sanitize_base_attack_interval(self.base_attack_interval_ticks)
    }

    /// Cooldown jitter as used by the generic cadence.
    pub fn attack_interval_variance(&self) -> i32 {
        sanitize_attack_interval_variance(self.attack_interval_variance)
    }
}

/// Below the minimum falls back to the default, above the maximum is capped.
pub fn sanitize_base_attack_interval(ticks: i32) -> i32 {
    if ticks < MIN_BASE_ATTACK_INTERVAL_TICKS {
        DEFAULT_BASE_ATTACK_INTERVAL_TICKS
    } else {
        ticks.min(MAX_BASE_ATTACK_INTERVAL_TICKS)
    }
}

/// Negative falls back to the default, above the maximum is capped.
pub fn sanitize_attack_interval_variance(ticks: i32) -> i32 {
    if ticks < 0 {
        DEFAULT_ATTACK_INTERVAL_VARIANCE
    } else {
        ticks.min(MAX_ATTACK_INTERVAL_VARIANCE)
    }
}

/// Clamp an arbitrary tier-1 probability to a usable value.
/// NaN and values outside [0, 1] fall back to the default.
pub fn sanitize_tier1_probability(p: f32) -> f32 {
    if (0.0..=1.0).contains(&p) {
        p
    } else {
        DEFAULT_TIER1_PROBABILITY
    }
}
