use clap::Parser;
use colored::Colorize;
use std::error::Error;
use subnet_planner::cli::{run, Cli};
use subnet_planner::config::{init_logging, Config};

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let config = Config::from_env();
    init_logging(&config)?;
    log::info!("#Start main()");

    let cli = Cli::parse();
    match run(cli, &config) {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(e) => {
            log::debug!("Command failed: {e:?}");
            eprintln!("{} {}", "ERROR".on_red(), e.to_string().red());
            std::process::exit(1);
        }
    }
}
