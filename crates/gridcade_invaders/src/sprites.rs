use std::collections::{HashMap, VecDeque};

use gridcade_common::image::{Image, ImageLoader};
use gridcade_common::Color;

/// Palette shared by the draw phase and the collision detector. The
/// detector recognizes cells by these exact colors, so sprites and
/// allow-lists must agree.
pub const BACKGROUND: Color = Color::BLACK;
pub const DEFENDER_COLOR: Color = Color::GREEN;
pub const UFO_DOME_COLOR: Color = Color::MAGENTA;
pub const UFO_HULL_COLOR: Color = Color::GRAY;
pub const UFO_BASE_COLOR: Color = Color::CYAN;
pub const SHOT_COLOR: Color = Color::WHITE;

/// Defender sprite: four stacked parts, offsets relative to the anchor.
/// The bottom rows are the full 5-cell hitbox; the turret narrows upward.
pub const DEFENDER_PARTS: [(&str, (i32, i32)); 4] = [
    ("defender_tip", (2, -3)),
    ("defender_head", (1, -2)),
    ("defender_body", (0, -1)),
    ("defender_base", (0, 0)),
];

/// UFO sprite: dome, hull, and base stacked above/on the anchor row.
pub const UFO_PARTS: [(&str, (i32, i32)); 3] = [
    ("ufo_dome", (1, -2)),
    ("ufo_hull", (0, -1)),
    ("ufo_base", (0, 0)),
];

pub const SHOT_SPRITE: &str = "shot";

/// Every sprite name the game requests from the loader at init.
pub fn all_names() -> impl Iterator<Item = &'static str> {
    DEFENDER_PARTS
        .into_iter()
        .map(|(name, _)| name)
        .chain(UFO_PARTS.into_iter().map(|(name, _)| name))
        .chain(std::iter::once(SHOT_SPRITE))
}

/// Sprites installed so far. Loads complete asynchronously, so any part may
/// still be missing; the draw phase simply skips absent parts.
#[derive(Default)]
pub struct SpriteSet {
    slots: HashMap<String, Image>,
}

impl SpriteSet {
    pub fn install(&mut self, name: &str, image: Image) {
        if self.slots.insert(name.to_string(), image).is_some() {
            log::warn!("sprite '{name}' loaded twice, keeping the newer image");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Image> {
        self.slots.get(name)
    }

    pub fn loaded(&self) -> usize {
        self.slots.len()
    }
}

fn builtin(name: &str) -> Option<Image> {
    match name {
        "defender_tip" => Some(Image::solid(1, 1, DEFENDER_COLOR)),
        "defender_head" => Some(Image::solid(3, 1, DEFENDER_COLOR)),
        "defender_body" | "defender_base" => Some(Image::solid(5, 1, DEFENDER_COLOR)),
        "ufo_dome" => Some(Image::solid(2, 1, UFO_DOME_COLOR)),
        "ufo_hull" => Some(Image::solid(4, 1, UFO_HULL_COLOR)),
        "ufo_base" => Some(Image::solid(4, 1, UFO_BASE_COLOR)),
        SHOT_SPRITE => Some(Image::solid(1, 1, SHOT_COLOR)),
        _ => None,
    }
}

/// Loader that synthesizes the bead-art sprites in code. Completions are
/// queued and surfaced on the next poll, like any other host loader.
#[derive(Default)]
pub struct BuiltinSpriteLoader {
    ready: VecDeque<(String, Image)>,
}

impl ImageLoader for BuiltinSpriteLoader {
    fn load_image(&mut self, name: &str) {
        match builtin(name) {
            Some(image) => self.ready.push_back((name.to_string(), image)),
            None => log::warn!("no builtin sprite named '{name}'"),
        }
    }

    fn poll_loaded(&mut self) -> Option<(String, Image)> {
        self.ready.pop_front()
    }
}
