use anyhow::Context;
use relm4::RelmApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::{App, AppInit};
use crate::config::{Args, Config, APP_ID, DEFAULT_LOG_FILTER};
use crate::video::player::{self, Player};

mod app;
mod config;
mod range;
mod session;
mod ui;
mod video;

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    gst::init().context("unable to initialise GStreamer")?;
    player::check_plugins()?;

    let working_dir = std::env::current_dir().context("unable to read the working directory")?;
    let config = Config::resolve(args, &working_dir);
    info!(?config, "starting");

    // arguments were already consumed by argh
    let app = RelmApp::new(APP_ID).with_args(Vec::new());

    let video_sink = player::video_sink()?;
    let player = Player::new(&video_sink)?;

    app.run::<App>(AppInit {
        config,
        player,
        video_sink,
    });

    Ok(())
}
