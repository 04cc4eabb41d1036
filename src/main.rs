//! Logogen - placeholder store logo generator.

mod builtin;
mod canvas;
mod cli;
mod config;
mod error;
mod font;
mod layout;
mod logo;

use std::process;

use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use crate::font::FontSource;
use crate::logo::STORE_LOGO;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new().filter_level(cli.log_level()).parse_default_env().init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    println!("Logo created successfully!");
}

fn run(cli: &Cli) -> Result<(), error::LogoError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;
    log::debug!("Config: {}", config_path.display());

    let fonts = FontSource::from_config(&config.fonts);
    log::debug!("Font dirs: {:?}", fonts.dirs());
    logo::generate(&STORE_LOGO, &fonts, &STORE_LOGO.output_path())
}
