//! Controller constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 20;

// --- Engagement ---

/// Consecutive ticks of line of sight before strafing and firing are allowed.
pub const MIN_SEE_TIME: i32 = 5;

/// Maximum yaw change per tick when turning to face the target (degrees).
pub const LOOK_MAX_YAW: f32 = 60.0;

/// Maximum pitch change per tick when turning to face the target (degrees).
pub const LOOK_MAX_PITCH: f32 = 60.0;

/// Shortest interval between navigation re-issues (ticks, 1 second).
pub const PATH_DELAY_MIN_TICKS: i32 = TICK_RATE as i32;

/// Longest interval between navigation re-issues (ticks, 2 seconds).
pub const PATH_DELAY_MAX_TICKS: i32 = 2 * TICK_RATE as i32;

/// Fixed part of the delay primed on activation.
pub const INITIAL_DELAY_BASE_TICKS: i32 = 10;

/// Random spread added to the activation delay, exclusive upper bound.
pub const INITIAL_DELAY_SPREAD_TICKS: i32 = 20;

/// Cooldown floor after dual-wield halving.
pub const MIN_ATTACK_DELAY_TICKS: i32 = 1;

// --- Inaccuracy ---

/// Tight band lower bound (degrees).
pub const TIER1_MIN_INACCURACY: f32 = 3.0;

/// Tight band upper bound (degrees).
pub const TIER1_MAX_INACCURACY: f32 = 5.0;

/// Wide band lower bound (degrees).
pub const TIER2_MIN_INACCURACY: f32 = 12.0;

/// Wide band upper bound (degrees).
pub const TIER2_MAX_INACCURACY: f32 = 15.0;

// --- Configuration bounds ---

/// Default base attack interval for unrecognized weapons (ticks, 10 seconds).
pub const DEFAULT_BASE_ATTACK_INTERVAL_TICKS: i32 = 200;

/// Smallest accepted base attack interval.
pub const MIN_BASE_ATTACK_INTERVAL_TICKS: i32 = 20;

/// Largest accepted base attack interval.
pub const MAX_BASE_ATTACK_INTERVAL_TICKS: i32 = 1000;

/// Default symmetric variance on the base interval (ticks, ±4 seconds).
pub const DEFAULT_ATTACK_INTERVAL_VARIANCE: i32 = 80;

/// Largest accepted variance.
pub const MAX_ATTACK_INTERVAL_VARIANCE: i32 = 200;

/// Default probability of a tight (tier 1) shot.
pub const DEFAULT_TIER1_PROBABILITY: f32 = 0.125;

/// Registry namespace whose items the identity resolver recognizes.
pub const WEAPON_NAMESPACE: &str = "cgs";

// --- Host simulation ---

/// Horizontal distance covered per tick at navigation speed 1.0 (blocks).
pub const NAV_BLOCKS_PER_TICK: f32 = 0.25;

/// Distance at which navigation considers its goal reached (blocks).
pub const NAV_ARRIVAL_RADIUS: f32 = 1.5;

/// Horizontal distance per tick for a movement input of 1.0 (blocks).
pub const INPUT_BLOCKS_PER_TICK: f32 = 0.5;

/// Default reload duration for weapons without one (ticks).
pub const DEFAULT_RELOAD_TICKS: u32 = 40;
