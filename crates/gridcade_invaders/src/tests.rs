use std::cell::RefCell;
use std::rc::Rc;

use gridcade_common::grid::{CellGrid, GridSurface};
use gridcade_common::image::ImageLoader;
use gridcade_common::sound::{AudioSink, NullAudio};
use gridcade_common::{Color, Key};

use crate::collision::{self, ufo_footprint};
use crate::draw;
use crate::game::Game;
use crate::input::{action_for_key, InputAction};
use crate::sound::{SND_FIRE, SND_SHOT_DESTROYED, SND_UFO_DESTROYED};
use crate::sprites::{
    BuiltinSpriteLoader, SpriteSet, DEFENDER_COLOR, SHOT_COLOR, UFO_DOME_COLOR, UFO_HULL_COLOR,
};
use crate::state::{InvadersState, Shot, Ufo, SHOT_COOLDOWN_TICKS, UFO_COOLDOWN_TICKS};
use crate::update;
use crate::{GRID_HEIGHT, GRID_WIDTH};

/// Sink that records cue names so tests can assert on playback.
#[derive(Clone, Default)]
struct RecordingAudio {
    cues: Rc<RefCell<Vec<String>>>,
}

impl RecordingAudio {
    fn new() -> (RecordingAudio, Rc<RefCell<Vec<String>>>) {
        let audio = RecordingAudio::default();
        let cues = audio.cues.clone();
        (audio, cues)
    }
}

impl AudioSink for RecordingAudio {
    fn play_sound(&mut self, name: &str) {
        self.cues.borrow_mut().push(name.to_string());
    }
}

fn test_game() -> (Game<CellGrid, RecordingAudio>, Rc<RefCell<Vec<String>>>) {
    let (audio, cues) = RecordingAudio::new();
    let game = Game::new(
        CellGrid::new(GRID_WIDTH, GRID_HEIGHT),
        audio,
        Box::new(BuiltinSpriteLoader::default()),
    );
    (game, cues)
}

/// Sprite set with every part already installed, for phase-level tests that
/// bypass the game wiring.
fn loaded_sprites() -> SpriteSet {
    let mut loader = BuiltinSpriteLoader::default();
    for name in crate::sprites::all_names() {
        loader.load_image(name);
    }
    let mut sprites = SpriteSet::default();
    while let Some((name, image)) = loader.poll_loaded() {
        sprites.install(&name, image);
    }
    sprites
}

#[test]
fn init_spawns_defender_and_one_ufo_with_cooldowns_ready() {
    let state = InvadersState::new();
    assert_eq!(state.defender.x, GRID_WIDTH as i32 / 2 - 2);
    assert_eq!(state.defender.y, GRID_HEIGHT as i32 - 3);
    assert_eq!(state.ufos, vec![Ufo { x: 14, y: 4 }]);
    assert!(state.shots.is_empty());
    assert!(state.shot_ready);
    assert!(state.ufo_ready);
    assert!(!state.win);
    assert_eq!(state.step, 0);
}

#[test]
fn sprites_install_on_first_tick_and_draw_paints_all_layers() {
    let (mut game, _) = test_game();
    game.tick();

    // Defender base row and turret tip.
    for x in 14..19 {
        assert_eq!(game.grid().cell_color(x, 29), DEFENDER_COLOR);
    }
    assert_eq!(game.grid().cell_color(16, 26), DEFENDER_COLOR);

    // UFO dome and hull around its spawn anchor (14, 4).
    assert_eq!(game.grid().cell_color(15, 2), UFO_DOME_COLOR);
    assert_eq!(game.grid().cell_color(16, 2), UFO_DOME_COLOR);
    assert_eq!(game.grid().cell_color(14, 3), UFO_HULL_COLOR);

    assert_eq!(game.grid().status_text(), "Shot: ready   UFO: ready");
}

#[test]
fn defender_stays_within_reach_bounds() {
    let (mut game, _) = test_game();
    for _ in 0..60 {
        game.handle_key(Key::A);
        assert!(game.state().defender.x >= 0);
    }
    assert_eq!(game.state().defender.x, 0);

    for _ in 0..80 {
        game.handle_key(Key::D);
        assert!(game.state().defender.x <= GRID_WIDTH as i32 - 5);
    }
    assert_eq!(game.state().defender.x, GRID_WIDTH as i32 - 5);
}

#[test]
fn firing_spawns_a_shot_above_the_turret_and_clears_readiness() {
    let (mut game, cues) = test_game();
    game.handle_key(Key::Space);

    let state = game.state();
    assert_eq!(state.shots, vec![Shot { x: 16, y: 25 }]);
    assert!(!state.shot_ready);
    assert_eq!(*cues.borrow(), [SND_FIRE]);
}

#[test]
fn firing_is_rejected_while_cooldown_runs() {
    let (mut game, cues) = test_game();
    game.handle_key(Key::Space);
    game.handle_key(Key::Space);
    game.handle_key(Key::Space);

    assert_eq!(game.state().shots.len(), 1);
    assert_eq!(cues.borrow().len(), 1);
}

#[test]
fn shot_readiness_recovers_after_exactly_eight_ticks() {
    let (mut game, _) = test_game();
    // Park the UFO away from the shot column so nothing collides.
    game.state_mut().ufos[0] = Ufo { x: 0, y: 10 };
    game.handle_key(Key::Space);

    for tick in 1..=SHOT_COOLDOWN_TICKS {
        assert!(!game.state().shot_ready, "ready too early before tick {tick}");
        game.tick();
    }
    assert!(game.state().shot_ready);
}

#[test]
fn ufo_readiness_recovers_after_exactly_120_ticks() {
    let (mut game, _) = test_game();
    game.handle_key(Key::S);
    assert!(!game.state().ufo_ready);
    assert_eq!(game.state().ufos.len(), 2);

    for tick in 1..=UFO_COOLDOWN_TICKS {
        assert!(!game.state().ufo_ready, "ready too early before tick {tick}");
        game.tick();
    }
    assert!(game.state().ufo_ready);
}

#[test]
fn manual_spawn_is_not_gated_by_the_cooldown() {
    let (mut game, _) = test_game();
    game.handle_key(Key::S);
    assert!(!game.state().ufo_ready);
    // The flag is down, but the spawn path never checks it.
    game.handle_key(Key::S);
    assert_eq!(game.state().ufos.len(), 3);
}

#[test]
fn shot_moves_one_cell_every_two_ticks_then_expires_at_the_top() {
    let (mut game, _) = test_game();
    game.state_mut().ufos[0] = Ufo { x: 0, y: 10 };
    game.handle_key(Key::Space);
    let spawn_y = game.state().shots[0].y;

    game.tick();
    assert_eq!(game.state().shots[0].y, spawn_y);
    game.tick();
    assert_eq!(game.state().shots[0].y, spawn_y - 1);

    let mut ticks = 0;
    while !game.state().shots.is_empty() {
        // The shot is dropped before it ever occupies row 0.
        assert!(game.state().shots[0].y > 0);
        game.tick();
        ticks += 1;
        assert!(ticks < 200, "shot never expired");
    }
    assert!(game.state().shots.is_empty());
}

#[test]
fn ufos_move_individually_and_edge_ufos_are_skipped() {
    let (mut game, _) = test_game();
    game.state_mut().ufos = vec![Ufo { x: 0, y: 10 }, Ufo { x: 14, y: 4 }];

    game.handle_key(Key::Left);
    assert_eq!(game.state().ufos, vec![Ufo { x: 0, y: 10 }, Ufo { x: 13, y: 4 }]);

    game.state_mut().ufos = vec![Ufo { x: 5, y: 2 }, Ufo { x: 5, y: 10 }];
    game.handle_key(Key::Up);
    assert_eq!(game.state().ufos, vec![Ufo { x: 5, y: 2 }, Ufo { x: 5, y: 9 }]);

    game.handle_key(Key::Right);
    game.handle_key(Key::Down);
    assert_eq!(game.state().ufos, vec![Ufo { x: 6, y: 3 }, Ufo { x: 6, y: 10 }]);
}

#[test]
fn footprint_covers_the_tapered_band_and_the_row_below() {
    let cells = ufo_footprint(10, 10);
    let expected = vec![
        // Row directly above the anchor, full width.
        (10, 9),
        (11, 9),
        (12, 9),
        (13, 9),
        // Narrowed band two rows above.
        (11, 8),
        (12, 8),
        // Full row below the anchor.
        (10, 11),
        (11, 11),
        (12, 11),
        (13, 11),
    ];
    assert_eq!(cells, expected);
}

#[test]
fn foreign_color_in_footprint_downs_the_ufo_and_records_the_cell() {
    let mut state = InvadersState::new();
    let mut grid = CellGrid::new(GRID_WIDTH, GRID_HEIGHT);
    let sprites = loaded_sprites();
    draw::run(&state, &mut grid, &sprites);
    grid.set_cell_color(15, 5, Color::RED);

    let mut audio = NullAudio;
    collision::run(&mut state, &grid, &mut audio);
    assert!(state.ufos.is_empty());
    assert_eq!(state.last_hit, Some((15, 5)));
    assert!(!state.win);
}

#[test]
fn win_is_observed_on_the_pass_after_the_last_ufo_fell() {
    let mut state = InvadersState::new();
    let mut grid = CellGrid::new(GRID_WIDTH, GRID_HEIGHT);
    let sprites = loaded_sprites();
    draw::run(&state, &mut grid, &sprites);
    grid.set_cell_color(14, 5, Color::RED);

    let mut audio = NullAudio;
    collision::run(&mut state, &grid, &mut audio);
    assert!(state.ufos.is_empty());
    assert!(!state.win);

    collision::run(&mut state, &grid, &mut audio);
    assert!(state.win);
}

#[test]
fn same_color_overlap_is_invisible_to_the_detector() {
    let mut state = InvadersState::new();
    let mut grid = CellGrid::new(GRID_WIDTH, GRID_HEIGHT);
    let sprites = loaded_sprites();
    draw::run(&state, &mut grid, &sprites);
    // A hull-colored cell inside the footprint reads as the UFO itself.
    grid.set_cell_color(15, 5, UFO_HULL_COLOR);

    let mut audio = NullAudio;
    collision::run(&mut state, &grid, &mut audio);
    assert_eq!(state.ufos.len(), 1);
    assert_eq!(state.last_hit, None);
}

#[test]
fn several_ufos_hit_in_the_same_pass_are_all_removed() {
    let mut state = InvadersState::new();
    state.ufos = vec![Ufo { x: 2, y: 4 }, Ufo { x: 20, y: 10 }, Ufo { x: 10, y: 20 }];
    let mut grid = CellGrid::new(GRID_WIDTH, GRID_HEIGHT);
    let sprites = loaded_sprites();
    draw::run(&state, &mut grid, &sprites);
    grid.set_cell_color(3, 5, Color::RED);
    grid.set_cell_color(21, 11, Color::RED);

    let mut audio = NullAudio;
    collision::run(&mut state, &grid, &mut audio);
    assert_eq!(state.ufos, vec![Ufo { x: 10, y: 20 }]);
    // Last foreign sample of the pass wins the global hit cell.
    assert_eq!(state.last_hit, Some((21, 11)));
}

#[test]
fn shot_on_unrecognized_color_is_removed_without_a_cue() {
    let mut state = InvadersState::new();
    state.shots.push(Shot { x: 5, y: 20 });
    let mut grid = CellGrid::new(GRID_WIDTH, GRID_HEIGHT);
    let sprites = loaded_sprites();
    draw::run(&state, &mut grid, &sprites);

    let (mut audio, cues) = RecordingAudio::new();
    collision::run(&mut state, &grid, &mut audio);
    // Sitting on its own trail color: still flying.
    assert_eq!(state.shots.len(), 1);

    grid.set_cell_color(5, 20, DEFENDER_COLOR);
    collision::run(&mut state, &grid, &mut audio);
    assert!(state.shots.is_empty());
    assert!(cues.borrow().is_empty());
}

#[test]
fn shot_destroys_ufo_end_to_end_and_win_follows_one_tick_later() {
    let (mut game, cues) = test_game();
    game.handle_key(Key::Space);

    let mut ticks = 0;
    while !game.state().ufos.is_empty() {
        game.tick();
        ticks += 1;
        assert!(ticks < 100, "shot never reached the ufo");
    }

    // Removal tick: both entity and shot are gone, win not yet observed.
    assert!(game.state().shots.is_empty());
    assert!(!game.state().win);
    assert_eq!(game.state().last_hit, Some((16, 5)));
    {
        let cues = cues.borrow();
        assert!(cues.contains(&SND_UFO_DESTROYED.to_string()));
        assert!(cues.contains(&SND_SHOT_DESTROYED.to_string()));
    }

    game.tick();
    assert!(game.state().win);

    // The draw phase runs before collision, so the banner shows up on the
    // following tick.
    game.tick();
    assert_eq!(game.grid().status_text(), "You win! Press R to restart");
}

#[test]
fn won_game_is_frozen_until_reset() {
    let (mut game, _) = test_game();
    game.state_mut().ufos.clear();
    game.tick();
    assert!(game.state().win);

    let frozen = game.state().clone();
    for _ in 0..5 {
        game.tick();
    }
    game.handle_key(Key::A);
    game.handle_key(Key::Space);
    game.handle_key(Key::S);
    assert_eq!(*game.state(), frozen);
}

#[test]
fn reset_only_works_once_won_and_restores_a_fresh_game() {
    let (mut game, _) = test_game();
    game.handle_key(Key::D);
    game.handle_key(Key::Space);

    // Mid-game reset requests are ignored.
    let before = game.state().clone();
    game.handle_key(Key::R);
    assert_eq!(*game.state(), before);

    game.state_mut().ufos.clear();
    game.tick();
    assert!(game.state().win);

    game.handle_key(Key::R);
    assert_eq!(*game.state(), InvadersState::new());
    assert_eq!(game.active_timers(), 3);

    // The restarted phases actually run.
    game.tick();
    assert_eq!(game.state().step, 1);
}

#[test]
fn update_effects_are_visible_to_the_same_ticks_draw() {
    let (mut game, _) = test_game();
    game.state_mut().ufos[0] = Ufo { x: 0, y: 10 };
    game.handle_key(Key::Space);
    game.tick();
    // The cooldown advanced to 1 before the status line was rendered.
    assert_eq!(
        game.grid().status_text(),
        format!("Shot: {}   UFO: ready", SHOT_COOLDOWN_TICKS - 1)
    );
}

#[test]
fn shots_layer_above_ufo_sprites() {
    let mut state = InvadersState::new();
    state.shots.push(Shot { x: 14, y: 3 });
    let mut grid = CellGrid::new(GRID_WIDTH, GRID_HEIGHT);
    let sprites = loaded_sprites();
    draw::run(&state, &mut grid, &sprites);
    // The hull cell under the shot reads as the shot, not the hull.
    assert_eq!(grid.cell_color(14, 3), SHOT_COLOR);
}

#[test]
fn update_is_a_no_op_while_won() {
    let mut state = InvadersState::new();
    state.win = true;
    state.shots.push(Shot { x: 10, y: 10 });
    state.shot_ready = false;

    update::run(&mut state);
    update::run(&mut state);
    assert_eq!(state.step, 0);
    assert_eq!(state.shots, vec![Shot { x: 10, y: 10 }]);
    assert!(!state.shot_ready);
}

#[test]
fn key_mapping_covers_every_action() {
    assert_eq!(action_for_key(Key::A), Some(InputAction::MoveLeft));
    assert_eq!(action_for_key(Key::D), Some(InputAction::MoveRight));
    assert_eq!(action_for_key(Key::Space), Some(InputAction::Fire));
    assert_eq!(action_for_key(Key::Left), Some(InputAction::UfoLeft));
    assert_eq!(action_for_key(Key::Right), Some(InputAction::UfoRight));
    assert_eq!(action_for_key(Key::Up), Some(InputAction::UfoUp));
    assert_eq!(action_for_key(Key::Down), Some(InputAction::UfoDown));
    assert_eq!(action_for_key(Key::S), Some(InputAction::SpawnUfo));
    assert_eq!(action_for_key(Key::R), Some(InputAction::Reset));
    assert_eq!(action_for_key(Key::Q), None);
    assert_eq!(action_for_key(Key::None), None);
}
