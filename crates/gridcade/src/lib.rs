use anyhow::Result;
use gridcade_common::app::App;
use gridcade_sdl2::{SdlContext, SdlInitInfo};

pub enum GameType {
    Invaders,
}

pub fn run(game: GameType) -> Result<()> {
    match game {
        GameType::Invaders => run_invaders(),
    }
}

pub fn run_invaders() -> Result<()> {
    let app = gridcade_invaders::InvadersApp::default();
    let init_info = SdlInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .scale(app.scale())
        .title(app.title())
        .build();
    SdlContext::run(init_info, app)
}
