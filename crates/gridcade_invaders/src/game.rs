use gridcade_common::grid::GridSurface;
use gridcade_common::image::ImageLoader;
use gridcade_common::sound::AudioSink;
use gridcade_common::timer::{TimerHandle, TimerService};
use gridcade_common::Key;

use crate::input::{action_for_key, InputAction};
use crate::sprites::SpriteSet;
use crate::state::InvadersState;
use crate::{collision, draw, input, sprites, update};
use crate::{GRID_HEIGHT, GRID_WIDTH};

/// Everything the phase callbacks share: the simulation state and the host
/// services they draw through. Passed to each phase by the timer service;
/// nothing lives in ambient globals.
pub struct Context<G, A> {
    pub state: InvadersState,
    pub grid: G,
    pub audio: A,
    pub sprites: SpriteSet,
}

struct PhaseTimers {
    update: TimerHandle,
    draw: TimerHandle,
    collision: TimerHandle,
}

/// The Space Invaders simulation wired to its host collaborators.
///
/// Generic over the grid and audio services so it runs identically against
/// the SDL2 frontend and the in-memory test host. The three phases are
/// cooperative timer callbacks registered update → draw → collision; the
/// timer service fires them in registration order, which is exactly the
/// sequencing the collision detector depends on.
pub struct Game<G: GridSurface, A: AudioSink> {
    ctx: Context<G, A>,
    timers: TimerService<Context<G, A>>,
    loader: Box<dyn ImageLoader>,
    phases: Option<PhaseTimers>,
}

impl<G: GridSurface + 'static, A: AudioSink + 'static> Game<G, A> {
    pub fn new(mut grid: G, audio: A, mut loader: Box<dyn ImageLoader>) -> Game<G, A> {
        grid.set_grid_size(GRID_WIDTH, GRID_HEIGHT);
        grid.set_border_width(0);
        grid.set_status_text("Space Invaders");

        for name in sprites::all_names() {
            loader.load_image(name);
        }

        let mut game = Game {
            ctx: Context {
                state: InvadersState::new(),
                grid,
                audio,
                sprites: SpriteSet::default(),
            },
            timers: TimerService::new(),
            loader,
            phases: None,
        };
        game.start_phases();
        game
    }

    fn start_phases(&mut self) {
        let update = self
            .timers
            .start_timer(1, |ctx: &mut Context<G, A>| update::run(&mut ctx.state));
        let draw = self.timers.start_timer(1, |ctx: &mut Context<G, A>| {
            draw::run(&ctx.state, &mut ctx.grid, &ctx.sprites)
        });
        let collision = self.timers.start_timer(1, |ctx: &mut Context<G, A>| {
            collision::run(&mut ctx.state, &ctx.grid, &mut ctx.audio)
        });
        self.phases = Some(PhaseTimers {
            update,
            draw,
            collision,
        });
    }

    fn stop_phases(&mut self) {
        if let Some(phases) = self.phases.take() {
            self.timers.stop_timer(phases.update);
            self.timers.stop_timer(phases.draw);
            self.timers.stop_timer(phases.collision);
        }
    }

    /// One host tick: deliver finished sprite loads, then run the phases.
    pub fn tick(&mut self) {
        while let Some((name, image)) = self.loader.poll_loaded() {
            log::debug!("sprite '{name}' loaded");
            self.ctx.sprites.install(&name, image);
        }
        self.timers.advance(&mut self.ctx);
    }

    /// Key-down entry point, called by the frontend between ticks.
    ///
    /// Once the game is won only the reset key does anything; everything
    /// else is dropped until the player restarts.
    pub fn handle_key(&mut self, key: Key) {
        let Some(action) = action_for_key(key) else {
            return;
        };
        if self.ctx.state.win {
            if action == InputAction::Reset {
                self.reset();
            }
            return;
        }
        if action == InputAction::Reset {
            return;
        }
        input::apply(&mut self.ctx.state, action, &mut self.ctx.audio);
    }

    /// Stop every scheduled phase and bring the state back to a fresh game.
    pub fn reset(&mut self) {
        log::info!("game reset");
        self.stop_phases();
        self.ctx.state.reset();
        self.start_phases();
    }

    /// Shutdown path: stop the phase timers and drop the live entities.
    pub fn close(&mut self) {
        self.stop_phases();
        self.ctx.state.shots.clear();
        self.ctx.state.ufos.clear();
    }

    pub fn state(&self) -> &InvadersState {
        &self.ctx.state
    }

    pub fn grid(&self) -> &G {
        &self.ctx.grid
    }

    pub fn active_timers(&self) -> usize {
        self.timers.active_timers()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut InvadersState {
        &mut self.ctx.state
    }
}
