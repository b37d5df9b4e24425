use gridcade_common::grid::GridSurface;
use gridcade_common::sound::AudioSink;
use gridcade_common::Color;

use crate::sound::{SND_SHOT_DESTROYED, SND_UFO_DESTROYED};
use crate::sprites::{BACKGROUND, SHOT_COLOR, UFO_BASE_COLOR, UFO_DOME_COLOR, UFO_HULL_COLOR};
use crate::state::{InvadersState, UFO_SPAN};

/// Cells sampled to decide whether a UFO was hit.
///
/// The sprite has no positional collision data once blitted, so the
/// detector reads the rendered frame instead: a narrowing band over the
/// tapered silhouette (rows 1 and 2 above the anchor), plus the full row
/// directly below the anchor where shots arrive from.
pub fn ufo_footprint(x: i32, y: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::with_capacity(10);
    for row in 0..2 {
        for col in row..(UFO_SPAN - row) {
            cells.push((x + col, y - 1 - row));
        }
    }
    for col in 0..UFO_SPAN {
        cells.push((x + col, y + 1));
    }
    cells
}

/// Colors a UFO scan treats as "nothing there": the background and the
/// UFO's own sprite rows. Anything else inside the footprint is a hit.
fn ufo_allows(color: Color) -> bool {
    color == BACKGROUND
        || color == UFO_DOME_COLOR
        || color == UFO_HULL_COLOR
        || color == UFO_BASE_COLOR
}

/// Collision phase: runs after the draw phase has committed cell colors.
///
/// This is a visual heuristic, not a geometric collision system. Sprites of
/// an allow-listed color overlapping a footprint are invisible to it; that
/// false-negative mode is part of the observed behavior and is kept as is.
pub fn run(state: &mut InvadersState, grid: &impl GridSurface, audio: &mut impl AudioSink) {
    if state.win {
        return;
    }

    // The win condition is observed one tick after the last UFO went down:
    // the check runs before this tick's scan touches anything.
    if state.ufos.is_empty() {
        state.win = true;
        return;
    }

    state.last_hit = None;

    // Scan every footprint before removing anything, so several UFOs hit in
    // the same tick cannot invalidate the query mid-pass. The recorded hit
    // cell is global: the last foreign sample of the pass wins.
    let mut hits = vec![false; state.ufos.len()];
    for (i, ufo) in state.ufos.iter().enumerate() {
        for (cx, cy) in ufo_footprint(ufo.x, ufo.y) {
            let color = grid.cell_color(cx, cy);
            if !ufo_allows(color) {
                hits[i] = true;
                state.last_hit = Some((cx, cy));
            }
        }
    }

    let mut index = 0;
    let mut downed = 0usize;
    state.ufos.retain(|_| {
        let hit = hits[index];
        index += 1;
        if hit {
            downed += 1;
        }
        !hit
    });
    if downed > 0 {
        log::debug!("collision: {downed} ufo(s) down at step {}", state.step);
        audio.play_sound(SND_UFO_DESTROYED);
    }

    let hit_cell = state.last_hit;
    state.shots.retain(|shot| {
        if hit_cell == Some((shot.x, shot.y)) {
            audio.play_sound(SND_SHOT_DESTROYED);
            return false;
        }
        // A shot that no longer sits on its own trail color ran into
        // something it does not recognize.
        let color = grid.cell_color(shot.x, shot.y);
        color == BACKGROUND || color == SHOT_COLOR
    });
}
