use crate::{GRID_HEIGHT, GRID_WIDTH};

/// Ticks the defender cooldown must run before a new shot can be fired.
pub const SHOT_COOLDOWN_TICKS: u32 = 8;
/// Ticks the UFO cooldown must run before `ufo_ready` recovers.
pub const UFO_COOLDOWN_TICKS: u32 = 120;
/// Shots advance one cell every this many update ticks.
pub const SHOT_MOVE_PERIOD: u32 = 2;

/// Width of the defender hitbox in cells.
pub const DEFENDER_SPAN: i32 = 5;
/// Width of the UFO sprite in cells.
pub const UFO_SPAN: i32 = 4;

/// The player's cannon. One per game; never destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Defender {
    pub x: i32,
    pub y: i32,
}

impl Defender {
    /// Spawn placement is a pure function of the grid dimensions.
    pub fn spawn(width: i32, height: i32) -> Defender {
        Defender {
            x: width / 2 - 2,
            y: height - 3,
        }
    }

    /// Relative horizontal move. Callers validate the destination first;
    /// the entity itself never checks bounds.
    pub fn shift(&mut self, dx: i32) {
        self.x += dx;
    }
}

/// A projectile in flight. Owned exclusively by the shot collection;
/// removal order within the collection is not meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shot {
    pub x: i32,
    pub y: i32,
}

impl Shot {
    /// Shots leave the muzzle centered above the defender sprite.
    pub fn fired_from(defender: &Defender) -> Shot {
        Shot {
            x: defender.x + 2,
            y: defender.y - 4,
        }
    }

    pub fn advance(&mut self) {
        self.y -= 1;
    }
}

/// An invader. Same ownership discipline as [`Shot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ufo {
    pub x: i32,
    pub y: i32,
}

impl Ufo {
    pub fn spawn(width: i32) -> Ufo {
        Ufo {
            x: width / 2 - 2,
            y: 4,
        }
    }

    /// Relative move; bounds are the caller's responsibility.
    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

/// Full simulation state. Every phase and the input mapper operate on this
/// struct; there is no other mutable game state anywhere.
#[derive(Clone, Debug, PartialEq)]
pub struct InvadersState {
    pub defender: Defender,
    pub shots: Vec<Shot>,
    pub ufos: Vec<Ufo>,

    /// Terminal flag: once set, update and collision are no-ops until an
    /// explicit reset.
    pub win: bool,
    pub shot_ready: bool,
    pub ufo_ready: bool,

    pub shot_cooldown: u32,
    pub ufo_cooldown: u32,
    /// Free-running sub-counter gating shot movement to every
    /// [`SHOT_MOVE_PERIOD`] ticks.
    pub shot_move_tick: u32,
    /// Total update ticks since init/reset.
    pub step: u64,

    /// Cell where the collision scan last found a foreign color.
    /// One location globally, refreshed each collision pass.
    pub last_hit: Option<(i32, i32)>,
}

impl InvadersState {
    /// Fresh game: defender at its spawn point, a single UFO, both
    /// cooldowns ready.
    pub fn new() -> InvadersState {
        let width = GRID_WIDTH as i32;
        let height = GRID_HEIGHT as i32;
        InvadersState {
            defender: Defender::spawn(width, height),
            shots: Vec::new(),
            ufos: vec![Ufo::spawn(width)],
            win: false,
            shot_ready: true,
            ufo_ready: true,
            shot_cooldown: 0,
            ufo_cooldown: 0,
            shot_move_tick: 0,
            step: 0,
            last_hit: None,
        }
    }

    /// Clear every collection and counter and respawn the initial entities.
    pub fn reset(&mut self) {
        *self = InvadersState::new();
    }
}

impl Default for InvadersState {
    fn default() -> Self {
        InvadersState::new()
    }
}
