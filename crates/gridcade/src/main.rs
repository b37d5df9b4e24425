use gridcade::GameType;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let game = args.next().unwrap_or_else(|| "invaders".to_string());

    let game = match game.as_str() {
        "invaders" | "space_invaders" | "space-invaders" => GameType::Invaders,
        other => {
            eprintln!("Unknown game '{}'. Supported: invaders", other);
            std::process::exit(1);
        }
    };

    log::info!("starting gridcade");
    gridcade::run(game).unwrap();
}
