use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = lit_cube_core::Config::parse();
    log::info!("Starting with {config:?}");

    lit_cube_core::run(config).context("lit-cube stopped with an error")
}
