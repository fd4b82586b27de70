//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// Arena width in world units.
pub const WORLD_WIDTH: f64 = 1600.0;

/// Arena height in world units.
pub const WORLD_HEIGHT: f64 = 1200.0;

/// Enemies outside the world grown by this buffer may not start attacks.
pub const ATTACK_BOUNDS_BUFFER: f64 = 400.0;

/// Extra inset (beyond the enemy radius) when knockback pushes an enemy into a wall.
pub const KNOCKBACK_WALL_INSET: f64 = 10.0;

/// Kiting ranged enemies stay this far inside the walls.
pub const RANGED_WALL_INSET: f64 = 50.0;

// --- Enemy lifecycle ---

/// Fade-in duration after spawning (seconds).
pub const SPAWN_FADE_SECS: f64 = 0.8;

/// Fade-out duration after lethal damage (seconds).
pub const DEATH_FADE_SECS: f64 = 0.6;

/// Damage flash duration for enemies (seconds).
pub const ENEMY_DAMAGE_FLASH_SECS: f64 = 0.2;

// --- Knockback ---

/// Frame rate the per-frame decay factors were tuned at.
pub const KNOCKBACK_REFERENCE_HZ: f64 = 60.0;

/// Base impulse applied to an enemy hit by the player.
pub const ENEMY_KNOCKBACK_BASE: f64 = 150.0;

/// Enemy knockback speed cap.
pub const ENEMY_KNOCKBACK_CAP: f64 = 400.0;

/// Enemy knockback decay per reference frame.
pub const ENEMY_KNOCKBACK_DECAY: f64 = 0.85;

/// Enemy knockback is zeroed once every component is at or below this.
pub const ENEMY_KNOCKBACK_THRESHOLD: f64 = 5.0;

/// Base impulse applied to the player hit by an enemy.
pub const PLAYER_KNOCKBACK_BASE: f64 = 120.0;

/// Player knockback speed cap.
pub const PLAYER_KNOCKBACK_CAP: f64 = 300.0;

/// Player knockback decay per reference frame.
pub const PLAYER_KNOCKBACK_DECAY: f64 = 0.88;

/// Player knockback is zeroed once every component is at or below this.
pub const PLAYER_KNOCKBACK_THRESHOLD: f64 = 8.0;

/// Starting knockback resistance multiplier (lower = pushed less).
pub const PLAYER_KNOCKBACK_RESISTANCE: f64 = 0.7;

/// Resistance ceiling reached through level-ups.
pub const PLAYER_KNOCKBACK_RESISTANCE_MAX: f64 = 0.9;

// --- Formation coordination ---

/// Fewest unformed enemies that may form up.
pub const FORMATION_MIN_SIZE: usize = 4;

/// A formation with fewer living members disbands.
pub const FORMATION_MIN_MEMBERS: usize = 3;

/// Candidates sampled by the clustering check.
pub const FORMATION_SAMPLE_SIZE: usize = 15;

/// Two enemies closer than this count as a close pair.
pub const FORMATION_PROXIMITY: f64 = 120.0;

/// Consecutive failed checks before the clustering bar is lowered.
pub const FORMATION_RELIEF_AFTER: u32 = 3;

/// Formation lifetime bounds (seconds).
pub const FORMATION_LIFETIME_SECS: (f64, f64) = (8.0, 12.0);

/// Cooldown bounds after a formation disbands (seconds).
pub const FORMATION_COOLDOWN_SECS: (f64, f64) = (4.0, 8.0);

/// Delay bounds before an aggressive formation strikes together (seconds).
pub const COORDINATED_DELAY_SECS: (f64, f64) = (2.0, 4.0);

/// Duration of the coordinated strike window (seconds).
pub const COORDINATED_WINDOW_SECS: f64 = 2.0;

/// Damage multiplier during a coordinated strike.
pub const COORDINATED_ATTACK_BOOST: f64 = 1.3;

/// Attack cooldown removed from every member when the strike starts.
pub const COORDINATED_COOLDOWN_CUT: f64 = 0.5;

/// Members closer than this to their slot stop moving.
pub const FORMATION_ARRIVAL_RADIUS: f64 = 15.0;

// --- Tactical AI ---

/// Allies within this radius count toward standalone clustering.
pub const ALLY_CLUSTER_RADIUS: f64 = 100.0;

/// A ranged ally with the player this close needs a protector.
pub const PROTECT_THREAT_RADIUS: f64 = 80.0;

/// Preferred distance for members holding the ranged role.
pub const RANGED_ROLE_DISTANCE: f64 = 150.0;

/// Default melee strike cooldown (seconds).
pub const MELEE_ATTACK_COOLDOWN: f64 = 1.0;

/// Assault strike cooldown outside / inside a coordinated strike (seconds).
pub const ASSAULT_ATTACK_COOLDOWN: f64 = 0.8;
pub const ASSAULT_COORDINATED_COOLDOWN: f64 = 0.6;

// --- Ranged attacks ---

/// Projectiles never travel farther than this toward their target.
pub const PROJECTILE_MAX_RANGE: f64 = 1500.0;

/// Indicators whose locked target is this far away fire nothing.
pub const PROJECTILE_REJECT_RANGE: f64 = 2000.0;

/// Projectiles expire once this far outside the world.
pub const PROJECTILE_OFFWORLD_BUFFER: f64 = 500.0;

/// Indicator targets are clamped to the world grown by this buffer.
pub const INDICATOR_TARGET_BUFFER: f64 = 200.0;

/// Spread radius around the player for multi-shot volleys.
pub const VOLLEY_SPREAD_OFFSET: f64 = 25.0;

// --- Waves ---

/// Baseline delay between spawns (seconds).
pub const WAVE_BASE_SPAWN_DELAY: f64 = 1.2;

/// HP growth per wave after the first.
pub const WAVE_HP_SCALE: f64 = 0.15;

/// Attack growth per wave after the first.
pub const WAVE_ATTACK_SCALE: f64 = 0.10;

/// Every Nth wave is a boss wave.
pub const BOSS_WAVE_INTERVAL: u32 = 5;

/// How far outside the edge melee enemies appear.
pub const SPAWN_EDGE_MARGIN: f64 = 20.0;

// --- Player ---

/// Player collision radius.
pub const PLAYER_RADIUS: f64 = 15.0;

/// Random spread applied to each player hit (+/-).
pub const PLAYER_DAMAGE_JITTER: i32 = 3;

/// Player damage flash duration (seconds).
pub const PLAYER_DAMAGE_FLASH_SECS: f64 = 0.3;

/// Experience needed per level (multiplied by the current level).
pub const EXP_PER_LEVEL: u32 = 100;

/// Max HP gained per level.
pub const LEVEL_HP_GAIN: i32 = 15;

/// Attack gained per level.
pub const LEVEL_ATTACK_GAIN: i32 = 3;

/// Stat points granted per level.
pub const LEVEL_STAT_POINTS: u32 = 3;

/// Knockback resistance gained per level.
pub const LEVEL_RESISTANCE_GAIN: f64 = 0.02;

/// Dash speed (units per second).
pub const DASH_SPEED: f64 = 800.0;

/// Dash duration (seconds).
pub const DASH_DURATION_SECS: f64 = 0.2;

/// Dash cooldown at level 1 and its floor (seconds).
pub const DASH_COOLDOWN_SECS: f64 = 2.0;
pub const DASH_COOLDOWN_MIN_SECS: f64 = 1.0;

/// Dash cooldown shaved per level (seconds).
pub const LEVEL_DASH_COOLDOWN_GAIN: f64 = 0.05;
