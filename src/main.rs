use anyhow::Context;
use clap::Parser;
use slipway::{app, cli::Args, config::Config, logging::init_tracing};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config =
        Config::load_or_default(args.config.as_deref()).context("failed to load config")?;
    args.apply_overrides(&mut config);

    let _logging_guard = init_tracing(&config.logging)?;

    app::run(&args, &config)
}
