pub mod catalog;
pub mod cli;
pub mod clients;
pub mod config;
pub mod models;
pub mod parser;
pub mod services;

use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Lookup { title, refresh } => {
            cli::cmd_lookup(&config, &title.join(" "), refresh).await
        }

        Commands::Show { title } => cli::cmd_show(&config, &title.join(" ")),

        Commands::List { incomplete } => cli::cmd_list(&config, incomplete),

        Commands::Refresh => cli::cmd_refresh(&config).await,

        Commands::Extract {
            file,
            title,
            link,
            save,
        } => cli::cmd_extract(&config, &file, &title, &link, save),

        Commands::Season { date } => {
            cli::cmd_season(&date.join(" "));
            Ok(())
        }

        Commands::Synopsis { title } => cli::cmd_synopsis(&config, &title.join(" ")),

        Commands::Remove { title } => cli::cmd_remove(&config, &title.join(" ")),

        Commands::Init => {
            if Config::create_default_if_missing()? {
                info!("Created config.toml with default settings");
                println!("Created config.toml with default settings.");
            } else {
                println!("config.toml already exists.");
            }
            Ok(())
        }
    }
}
