use gridcade_common::app::App;
use gridcade_common::grid::CellGrid;
use gridcade_common::key::Key;

use crate::game::Game;
use crate::sound::SoundManager;
use crate::sprites::BuiltinSpriteLoader;
use crate::{GRID_HEIGHT, GRID_WIDTH, SCREEN_SCALE};

/// Frontend-facing wrapper around the simulation.
///
/// Implements the shared `App` trait so the SDL2 frontend drives the game
/// the same way it would drive any other Gridcade title: one display frame
/// equals one simulation tick.
pub struct InvadersApp {
    should_exit: bool,
    paused: bool,
    game: Game<CellGrid, SoundManager>,
}

impl Default for InvadersApp {
    fn default() -> Self {
        InvadersApp {
            should_exit: false,
            paused: false,
            game: Game::new(
                CellGrid::new(GRID_WIDTH, GRID_HEIGHT),
                SoundManager::new(),
                Box::new(BuiltinSpriteLoader::default()),
            ),
        }
    }
}

impl App for InvadersApp {
    fn init(&mut self) {
        log::info!("Space Invaders init");
    }

    fn update(&mut self, screen_state: &mut [u8]) {
        if !self.paused {
            self.game.tick();
        }
        self.game.grid().render_rgb24(screen_state);
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        if !is_down {
            return;
        }
        match key {
            Key::Escape => self.should_exit = true,
            // Toggle pause on 'P'; any other key unpauses and is handled
            // normally.
            Key::P => {
                self.paused = !self.paused;
                log::info!("paused: {}", self.paused);
            }
            _ => {
                self.paused = false;
                self.game.handle_key(key);
            }
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Space Invaders exit");
        self.game.close();
    }

    fn width(&self) -> u32 {
        GRID_WIDTH
    }

    fn height(&self) -> u32 {
        GRID_HEIGHT
    }

    fn scale(&self) -> u32 {
        SCREEN_SCALE
    }

    fn title(&self) -> String {
        "Gridcade Space Invaders".to_string()
    }
}
