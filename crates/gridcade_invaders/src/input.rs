use gridcade_common::sound::AudioSink;
use gridcade_common::Key;

use crate::sound::SND_FIRE;
use crate::state::{InvadersState, Shot, Ufo, DEFENDER_SPAN, UFO_SPAN};
use crate::{GRID_HEIGHT, GRID_WIDTH};

/// Named game commands. Platform key codes are mapped to these at the
/// boundary; the simulation never sees a raw key.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    UfoLeft,
    UfoRight,
    UfoUp,
    UfoDown,
    SpawnUfo,
    Reset,
}

pub fn action_for_key(key: Key) -> Option<InputAction> {
    match key {
        Key::A => Some(InputAction::MoveLeft),
        Key::D => Some(InputAction::MoveRight),
        Key::Space => Some(InputAction::Fire),
        Key::Left => Some(InputAction::UfoLeft),
        Key::Right => Some(InputAction::UfoRight),
        Key::Up => Some(InputAction::UfoUp),
        Key::Down => Some(InputAction::UfoDown),
        Key::S => Some(InputAction::SpawnUfo),
        Key::R => Some(InputAction::Reset),
        _ => None,
    }
}

/// Apply a non-reset action to the running game. Callers gate on `win`
/// before calling; reset is handled a level up because it also touches the
/// phase timers.
pub fn apply(state: &mut InvadersState, action: InputAction, audio: &mut impl AudioSink) {
    let width = GRID_WIDTH as i32;
    match action {
        InputAction::MoveLeft => {
            if state.defender.x - 1 >= 0 {
                state.defender.shift(-1);
            }
        }
        InputAction::MoveRight => {
            // The destination must leave the whole 5-cell hitbox on-grid.
            if state.defender.x + 1 <= width - DEFENDER_SPAN {
                state.defender.shift(1);
            }
        }
        InputAction::Fire => {
            if state.shot_ready {
                state.shots.push(Shot::fired_from(&state.defender));
                state.shot_ready = false;
                audio.play_sound(SND_FIRE);
            }
        }
        InputAction::UfoLeft => move_ufos(state, -1, 0),
        InputAction::UfoRight => move_ufos(state, 1, 0),
        InputAction::UfoUp => move_ufos(state, 0, -1),
        InputAction::UfoDown => move_ufos(state, 0, 1),
        InputAction::SpawnUfo => {
            // Not gated on ufo_ready: the manual trigger clears the flag but
            // was never guarded by it. Observed behavior, kept as is.
            state.ufos.push(Ufo::spawn(width));
            state.ufo_ready = false;
        }
        InputAction::Reset => {}
    }
}

/// Move every live UFO by one cell, skipping only those whose destination
/// would push the sprite or its sampled band off the grid.
fn move_ufos(state: &mut InvadersState, dx: i32, dy: i32) {
    let max_x = GRID_WIDTH as i32 - UFO_SPAN;
    let min_y = 2;
    let max_y = GRID_HEIGHT as i32 - 2;
    for ufo in &mut state.ufos {
        let nx = ufo.x + dx;
        let ny = ufo.y + dy;
        if nx < 0 || nx > max_x || ny < min_y || ny > max_y {
            continue;
        }
        ufo.shift(dx, dy);
    }
}
