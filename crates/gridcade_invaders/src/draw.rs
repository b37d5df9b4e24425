use gridcade_common::grid::GridSurface;

use crate::sprites::{SpriteSet, BACKGROUND, DEFENDER_PARTS, SHOT_SPRITE, UFO_PARTS};
use crate::state::{InvadersState, SHOT_COOLDOWN_TICKS, UFO_COOLDOWN_TICKS};

/// Draw phase: repaint the whole frame from scratch every tick.
///
/// Layer order matters for the collision phase that samples the result:
/// background first, then defender, then UFOs, then shots, so later layers
/// are never occluded by earlier ones.
pub fn run(state: &InvadersState, grid: &mut impl GridSurface, sprites: &SpriteSet) {
    grid.fill(BACKGROUND);

    for (name, (dx, dy)) in DEFENDER_PARTS {
        if let Some(image) = sprites.get(name) {
            grid.blit(image, state.defender.x + dx, state.defender.y + dy);
        }
    }

    for ufo in &state.ufos {
        for (name, (dx, dy)) in UFO_PARTS {
            if let Some(image) = sprites.get(name) {
                grid.blit(image, ufo.x + dx, ufo.y + dy);
            }
        }
    }

    if let Some(image) = sprites.get(SHOT_SPRITE) {
        for shot in &state.shots {
            grid.blit(image, shot.x, shot.y);
        }
    }

    grid.set_status_text(&status_line(state));
}

fn status_line(state: &InvadersState) -> String {
    if state.win {
        return "You win! Press R to restart".to_string();
    }
    format!(
        "Shot: {}   UFO: {}",
        cooldown_readout(state.shot_ready, state.shot_cooldown, SHOT_COOLDOWN_TICKS),
        cooldown_readout(state.ufo_ready, state.ufo_cooldown, UFO_COOLDOWN_TICKS),
    )
}

fn cooldown_readout(ready: bool, counter: u32, threshold: u32) -> String {
    if ready {
        "ready".to_string()
    } else {
        format!("{}", threshold - counter)
    }
}
