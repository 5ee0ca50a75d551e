//! Per-weapon engagement strategy.
//!
//! One strategy type covers every weapon family: the family's profile holds
//! the numbers and policies, the strategy holds the per-equip strafe state.

use rand::Rng;
use tracing::{debug, trace};

use sidearm_core::config::AttackConfig;
use sidearm_core::constants::*;
use sidearm_core::enums::{Hand, WeaponIdentity};
use sidearm_core::types::{EntityId, FireRequest, ItemHandle, ViewAngles};

use crate::capabilities::{FireDispatch, Navigation, WeaponSystem};
use crate::inaccuracy::sample_aim_offset;
use crate::profiles::{get_profile, Cadence, WeaponProfile};

/// Inputs to one movement decision.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext {
    pub entity: EntityId,
    pub target: EntityId,
    pub distance: f32,
    pub distance_sqr: f32,
    pub has_ammo: bool,
    pub can_reload: bool,
    pub has_line_of_sight: bool,
    pub see_time: i32,
}

/// Mutable strafe bookkeeping, owned by one strategy instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrafeState {
    pub strafe_left: bool,
    /// Ticks until the strafe direction is re-rolled. Zero means no re-roll pending.
    pub strafe_cooldown: i32,
    /// Ticks until navigation is re-issued.
    pub update_path_delay: i32,
}

/// Engagement strategy for one weapon family.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponStrategy {
    identity: WeaponIdentity,
    profile: WeaponProfile,
    strafe: StrafeState,
}

impl Default for WeaponStrategy {
    fn default() -> Self {
        Self::new(WeaponIdentity::Generic)
    }
}

impl WeaponStrategy {
    /// Fresh strategy with zeroed strafe state.
    pub fn new(identity: WeaponIdentity) -> Self {
        Self {
            identity,
            profile: get_profile(identity),
            strafe: StrafeState::default(),
        }
    }

    pub fn identity(&self) -> WeaponIdentity {
        self.identity
    }

    pub fn profile(&self) -> &WeaponProfile {
        &self.profile
    }

    pub fn strafe(&self) -> &StrafeState {
        &self.strafe
    }

    pub fn set_strafe_left(&mut self, strafe_left: bool) {
        self.strafe.strafe_left = strafe_left;
    }

    pub fn can_dual_wield(&self) -> bool {
        self.profile.can_dual_wield
    }

    pub fn should_maintain_distance(&self) -> bool {
        self.profile.maintains_distance
    }

    pub fn max_distance(&self) -> f32 {
        self.profile.max_distance
    }

    /// Strafe in range with sustained sight, otherwise path towards the target.
    pub fn move_toward<N, R>(&mut self, nav: &mut N, ctx: &MoveContext, rng: &mut R)
    where
        N: Navigation + ?Sized,
        R: Rng + ?Sized,
    {
        if self.strafe.strafe_cooldown > 0 {
            self.strafe.strafe_cooldown -= 1;
            if self.strafe.strafe_cooldown == 0 {
                self.strafe.strafe_left = rng.gen_bool(0.5);
            }
        }

        if !(ctx.has_ammo && ctx.can_reload) {
            return;
        }

        if self.profile.in_range(ctx.distance_sqr) && ctx.see_time >= MIN_SEE_TIME {
            nav.stop_navigation(ctx.entity);
            let forward = self.profile.forward_input(ctx.distance);
            let side = if self.strafe.strafe_left {
                -self.profile.strafe_speed
            } else {
                self.profile.strafe_speed
            };
            nav.set_movement_input(ctx.entity, forward, side);
        } else {
            self.strafe.update_path_delay -= 1;
            if self.strafe.update_path_delay <= 0 {
                nav.navigate_to(ctx.entity, ctx.target, self.profile.approach_speed);
                self.strafe.update_path_delay =
                    rng.gen_range(PATH_DELAY_MIN_TICKS..=PATH_DELAY_MAX_TICKS);
            }
        }
    }

    /// Fire from `hand` along the current view plus a sampled aim offset.
    /// A rejected request is dropped; the swing cue is issued either way.
    pub fn shoot<F, R>(
        &self,
        dispatch: &mut F,
        shooter: EntityId,
        view: ViewAngles,
        hand: Hand,
        rng: &mut R,
        config: &AttackConfig,
    ) where
        F: FireDispatch + ?Sized,
        R: Rng + ?Sized,
    {
        let offset = sample_aim_offset(rng, config.tier1_probability());
        let request = FireRequest::aimed(shooter, view, offset, hand);
        trace!(
            entity = shooter.0,
            ?hand,
            yaw = request.yaw,
            pitch = request.pitch,
            "fire request"
        );
        if let Err(err) = dispatch.request_fire(&request) {
            debug!(entity = shooter.0, ?hand, %err, "fire request dropped");
        }
        dispatch.swing(shooter, hand);
    }

    /// Cooldown until the next shot, in ticks.
    pub fn compute_attack_delay<W, R>(
        &self,
        weapons: &W,
        weapon: &ItemHandle,
        rng: &mut R,
        config: &AttackConfig,
    ) -> i32
    where
        W: WeaponSystem + ?Sized,
        R: Rng + ?Sized,
    {
        match self.profile.cadence {
            Cadence::Configured { floor } => {
                let variance = config.attack_interval_variance();
                let jitter = rng.gen_range(-variance..=variance);
                config.base_attack_interval().saturating_add(jitter).max(floor)
            }
            Cadence::Rated {
                default_rate,
                jitter,
                floor,
            } => {
                let rate = weapons
                    .fire_rate(weapon)
                    .filter(|&rate| rate > 0)
                    .and_then(|rate| i32::try_from(rate).ok())
                    .unwrap_or(default_rate);
                rate.saturating_add(rng.gen_range(-jitter..=jitter)).max(floor)
            }
            Cadence::Fixed {
                base,
                jitter,
                floor,
            } => base.saturating_add(rng.gen_range(-jitter..=jitter)).max(floor),
        }
    }

    /// Re-roll the strafe window. Called once per shot.
    pub fn update_strafe_cooldown<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (base, spread) = self.profile.strafe_window;
        self.strafe.strafe_cooldown = base + rng.gen_range(0..spread);
    }
}
