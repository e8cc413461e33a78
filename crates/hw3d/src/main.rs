use clap::Parser;
use hw3d::config::Cli;
use hw3d::config::Config;
use hw3d::error::MyResult;
use tracing::info;

pub fn main() -> MyResult<()> {
    color_eyre::install()?;
    hw3d::logging::init_tracing()?;

    let config = Config::try_from(Cli::parse())?;
    info!(?config, "starting");

    hw3d::run(&config)
}
