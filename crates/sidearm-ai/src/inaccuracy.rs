//! Two-tier aim inaccuracy.
//!
//! Each axis draws from one of two magnitude bands: a tight band
//! (3-5 degrees) with the configured tier-1 probability, and a wide band
//! (12-15 degrees) otherwise. The sign is an independent coin flip.

use rand::Rng;

use sidearm_core::config::sanitize_tier1_probability;
use sidearm_core::constants::*;
use sidearm_core::types::AimOffset;

/// Sample a signed offset in degrees.
pub fn sample_offset<R: Rng + ?Sized>(rng: &mut R, tier1_probability: f32) -> f32 {
    let tier2_probability = 1.0 - sanitize_tier1_probability(tier1_probability);
    let use_tier2 = rng.gen::<f32>() < tier2_probability;

    let (min, max) = if use_tier2 {
        (TIER2_MIN_INACCURACY, TIER2_MAX_INACCURACY)
    } else {
        (TIER1_MIN_INACCURACY, TIER1_MAX_INACCURACY)
    };

    let magnitude = min + rng.gen::<f32>() * (max - min);
    if rng.gen::<bool>() {
        magnitude
    } else {
        -magnitude
    }
}

/// Sample pitch then yaw, independently.
pub fn sample_aim_offset<R: Rng + ?Sized>(rng: &mut R, tier1_probability: f32) -> AimOffset {
    let pitch = sample_offset(rng, tier1_probability);
    let yaw = sample_offset(rng, tier1_probability);
    AimOffset { yaw, pitch }
}
