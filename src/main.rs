use std::path::Path;

use anyhow::Context;
use log::LevelFilter;

use spacedodge::GAME_TITLE;
use spacedodge::config::{CONFIG_FILE, GameConfig};
use spacedodge::engine::Engine;
use spacedodge::game::SpaceDodge;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    let config = GameConfig::load_or_default(Path::new(CONFIG_FILE));

    Engine::builder()
        .with_resolution(config.screen_width, config.screen_height, config.window_scale)
        .run(move |engine| SpaceDodge::load(engine, config))
        .with_context(|| format!("{GAME_TITLE} stopped with an error"))?;

    Ok(())
}
