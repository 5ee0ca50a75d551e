//! Per-entity attack controller.
//!
//! Pure tick logic over the host capabilities: target validity, sight
//! hysteresis, hand selection, weapon-change detection, reload gating and
//! fire cadence. The host owns one [`AttackControllerState`] per controlled
//! entity and lends it mutably for each tick.

use glam::Vec3;
use rand::Rng;
use tracing::debug;

use sidearm_core::config::AttackConfig;
use sidearm_core::constants::*;
use sidearm_core::enums::{AttackPhase, Hand, WeaponIdentity};
use sidearm_core::types::{EntityId, ItemHandle, ViewAngles, WeaponToken};

use crate::capabilities::{CombatHost, IdentityResolver, Navigation, WeaponSystem};
use crate::selector::select;
use crate::strategy::{MoveContext, WeaponStrategy};

/// Controller state for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackControllerState {
    /// Whether the behavior is currently running.
    pub active: bool,
    /// Positive: consecutive ticks with sight. Negative: consecutive ticks without.
    pub see_time: i32,
    /// Ticks until the next shot is permitted.
    pub attack_delay: i32,
    pub strategy: WeaponStrategy,
    pub last_weapon_token: Option<WeaponToken>,
    /// Dual-wield alternator; the main hand fires when true.
    pub use_main_hand: bool,
    pub is_dual_wielding: bool,
}

impl Default for AttackControllerState {
    fn default() -> Self {
        Self {
            active: false,
            see_time: 0,
            attack_delay: 0,
            strategy: WeaponStrategy::default(),
            last_weapon_token: None,
            use_main_hand: true,
            is_dual_wielding: false,
        }
    }
}

impl AttackControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> WeaponIdentity {
        self.strategy.identity()
    }
}

/// The target as seen by the controlled entity this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub id: EntityId,
    pub alive: bool,
    pub position: Vec3,
}

/// World inputs for one entity's tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickContext {
    pub entity: EntityId,
    pub alive: bool,
    pub position: Vec3,
    pub view: ViewAngles,
    pub main_hand: Option<ItemHandle>,
    pub off_hand: Option<ItemHandle>,
    pub target: Option<TargetInfo>,
    pub line_of_sight: bool,
}

impl TickContext {
    fn live_target(&self) -> Option<&TargetInfo> {
        self.target.as_ref().filter(|target| target.alive)
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub phase: AttackPhase,
    /// Hand that fired this tick, if any.
    pub fired: Option<Hand>,
    pub strategy_changed: bool,
    /// Rounds left in the active hand.
    pub ammo_count: u32,
}

/// Start the behavior: stagger the first shot and pick a strafe direction.
pub fn activate<N, R>(state: &mut AttackControllerState, entity: EntityId, nav: &mut N, rng: &mut R)
where
    N: Navigation + ?Sized,
    R: Rng + ?Sized,
{
    state.active = true;
    state.attack_delay = INITIAL_DELAY_BASE_TICKS + rng.gen_range(0..INITIAL_DELAY_SPREAD_TICKS);
    state.strategy.set_strafe_left(rng.gen_bool(0.5));
    nav.set_aggressive(entity, true);
}

/// Stop the behavior and return to initial values.
pub fn on_deactivate<N: Navigation + ?Sized>(state: &mut AttackControllerState, entity: EntityId, nav: &mut N) {
    state.active = false;
    state.see_time = 0;
    state.attack_delay = 0;
    state.strategy = WeaponStrategy::default();
    state.last_weapon_token = None;
    state.use_main_hand = true;
    state.is_dual_wielding = false;
    nav.set_aggressive(entity, false);
}

fn holds_weapon<W: WeaponSystem + ?Sized>(ctx: &TickContext, weapons: &W) -> bool {
    [ctx.main_hand.as_ref(), ctx.off_hand.as_ref()]
        .into_iter()
        .flatten()
        .any(|item| weapons.is_weapon(item))
}

/// A live target and a weapon in either hand.
pub fn can_use<W: WeaponSystem + ?Sized>(ctx: &TickContext, weapons: &W) -> bool {
    ctx.alive && ctx.live_target().is_some() && holds_weapon(ctx, weapons)
}

/// Keep running while the target is valid, a weapon is held, and either the
/// behavior could start anew or a navigation order is still in flight.
pub fn can_continue<H: CombatHost + ?Sized>(ctx: &TickContext, host: &H) -> bool {
    ctx.alive
        && ctx.live_target().is_some()
        && (can_use(ctx, host) || !host.is_navigation_idle(ctx.entity))
        && holds_weapon(ctx, host)
}

/// Lifecycle driver: start, tick or stop the behavior as a goal selector would.
pub fn update<H, I, R>(
    state: &mut AttackControllerState,
    ctx: &TickContext,
    host: &mut H,
    resolver: &I,
    rng: &mut R,
    config: &AttackConfig,
) -> TickReport
where
    H: CombatHost + ?Sized,
    I: IdentityResolver + ?Sized,
    R: Rng + ?Sized,
{
    if !state.active {
        if !can_use(ctx, &*host) {
            return TickReport::default();
        }
        activate(state, ctx.entity, host, rng);
    } else if !can_continue(ctx, &*host) {
        on_deactivate(state, ctx.entity, host);
        return TickReport::default();
    }
    on_tick(state, ctx, host, resolver, rng, config)
}

/// Swap strategies if `weapon` is a different kind of item than last seen.
/// The strafe direction carries over to the new strategy.
fn detect_weapon_change<I: IdentityResolver + ?Sized>(
    state: &mut AttackControllerState,
    entity: EntityId,
    weapon: &ItemHandle,
    resolver: &I,
) -> bool {
    let token = weapon.token();
    if state.last_weapon_token.as_ref() == Some(&token) {
        return false;
    }
    let strafe_left = state.strategy.strafe().strafe_left;
    state.strategy = select(Some(weapon), resolver);
    state.strategy.set_strafe_left(strafe_left);
    debug!(
        entity = entity.0,
        weapon = token.as_str(),
        identity = ?state.strategy.identity(),
        "strategy changed"
    );
    state.last_weapon_token = Some(token);
    true
}

/// Run one tick of the attack behavior.
pub fn on_tick<H, I, R>(
    state: &mut AttackControllerState,
    ctx: &TickContext,
    host: &mut H,
    resolver: &I,
    rng: &mut R,
    config: &AttackConfig,
) -> TickReport
where
    H: CombatHost + ?Sized,
    I: IdentityResolver + ?Sized,
    R: Rng + ?Sized,
{
    let mut report = TickReport::default();

    if !ctx.alive {
        return report;
    }
    let Some(target) = ctx.live_target() else {
        return report;
    };

    // Sight hysteresis: a flip restarts the count from zero.
    if ctx.line_of_sight != (state.see_time > 0) {
        state.see_time = 0;
    }
    state.see_time = if ctx.line_of_sight {
        state.see_time.saturating_add(1)
    } else {
        state.see_time.saturating_sub(1)
    };

    let main = ctx.main_hand.as_ref().filter(|item| host.is_weapon(item));
    let off = ctx.off_hand.as_ref().filter(|item| host.is_weapon(item));

    // A held main-hand weapon owns the strategy, also while dual wielding.
    let Some(strategy_weapon) = main.or(off) else {
        state.is_dual_wielding = false;
        return report;
    };
    report.strategy_changed = detect_weapon_change(state, ctx.entity, strategy_weapon, resolver);

    let (mut hand, mut weapon, dual_candidate) = match (main, off) {
        (Some(main), Some(off)) if host.is_one_handed(main) && host.is_one_handed(off) => {
            if state.use_main_hand {
                (Hand::Main, main, true)
            } else {
                (Hand::Off, off, true)
            }
        }
        (Some(main), _) => (Hand::Main, main, false),
        _ => (Hand::Off, strategy_weapon, false),
    };

    state.is_dual_wielding = dual_candidate;
    if dual_candidate && !state.strategy.can_dual_wield() {
        state.is_dual_wielding = false;
        state.use_main_hand = true;
        hand = Hand::Main;
        weapon = strategy_weapon;
    }

    let has_ammo = host.has_ammo(weapon);
    report.ammo_count = host.ammo_count(weapon);
    let can_reload = !host.is_reloading(ctx.entity);

    let distance_sqr = ctx.position.distance_squared(target.position);
    let distance = distance_sqr.sqrt();
    let in_range = state.strategy.profile().in_range(distance_sqr);

    let move_ctx = MoveContext {
        entity: ctx.entity,
        target: target.id,
        distance,
        distance_sqr,
        has_ammo,
        can_reload,
        has_line_of_sight: ctx.line_of_sight,
        see_time: state.see_time,
    };
    state.strategy.move_toward(host, &move_ctx, rng);
    host.look_at(ctx.entity, target.position, LOOK_MAX_YAW, LOOK_MAX_PITCH);
    host.set_sprinting(ctx.entity, false);

    if !has_ammo {
        if can_reload {
            debug!(entity = ctx.entity.0, ?hand, "starting reload");
            host.start_reload(ctx.entity, hand);
        }
        report.phase = AttackPhase::Reloading;
        return report;
    }
    if !can_reload {
        report.phase = AttackPhase::Reloading;
        return report;
    }

    let engaged = in_range && state.see_time >= MIN_SEE_TIME;
    report.phase = if engaged {
        AttackPhase::Engaging
    } else {
        AttackPhase::Repositioning
    };

    if engaged && state.attack_delay <= 0 {
        state
            .strategy
            .shoot(host, ctx.entity, ctx.view, hand, rng, config);

        let mut delay = state
            .strategy
            .compute_attack_delay(&*host, weapon, rng, config);
        if state.is_dual_wielding {
            delay /= 2;
        }
        state.attack_delay = delay.max(MIN_ATTACK_DELAY_TICKS);
        state.strategy.update_strafe_cooldown(rng);

        if state.is_dual_wielding {
            state.use_main_hand = !state.use_main_hand;
        }
        report.fired = Some(hand);
    }

    if state.attack_delay > 0 {
        state.attack_delay -= 1;
    }

    report
}
