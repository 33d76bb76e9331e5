//! Starhold: native client for a turn-based space-empire game. Hex galaxy
//! map, sector panels, fleet orders, and a build menu over a remote
//! game-state API.

mod app;
mod blueprints;
mod build;
mod config;
mod frontend;
mod movables;
mod sector;
mod world;

#[cfg(test)]
mod testutil;

use std::rc::Rc;

use anyhow::{Context, Result};

use crate::app::App;
use crate::config::ClientConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ClientConfig::load();
    let api = Rc::new(api::HttpApi::new(&config.api_url)?);
    let app = App::new(api, &config).context("could not start the client")?;
    frontend::run(app, &config)
}
