use crate::state::{InvadersState, SHOT_COOLDOWN_TICKS, SHOT_MOVE_PERIOD, UFO_COOLDOWN_TICKS};

/// Primary simulation phase: cooldown bookkeeping and shot movement.
///
/// Runs once per tick, before the draw and collision phases. While `win` is
/// set the whole phase is a no-op; the game stays frozen until reset.
pub fn run(state: &mut InvadersState) {
    if state.win {
        return;
    }

    state.step += 1;

    if !state.shot_ready {
        state.shot_cooldown += 1;
        if state.shot_cooldown == SHOT_COOLDOWN_TICKS {
            state.shot_ready = true;
            state.shot_cooldown = 0;
        }
    }

    if !state.ufo_ready {
        state.ufo_cooldown += 1;
        if state.ufo_cooldown == UFO_COOLDOWN_TICKS {
            state.ufo_ready = true;
            state.ufo_cooldown = 0;
        }
    }

    state.shot_move_tick += 1;
    if state.shot_move_tick == SHOT_MOVE_PERIOD {
        state.shot_move_tick = 0;
        // A shot whose next cell would leave the grid is dropped before it
        // ever occupies row 0.
        state.shots.retain_mut(|shot| {
            if shot.y - 1 <= 0 {
                false
            } else {
                shot.advance();
                true
            }
        });
    }
}
