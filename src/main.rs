//! ScanOps CLI - companion for the ScanOps security analysis platform

use clap::{CommandFactory, Parser};

mod cli;
mod client;
mod config;
mod error;
mod filter;
mod output;
mod packager;
mod request;
mod source;

use cli::{Cli, CommandContext, Commands, ProjectCommands, ScanCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Commands::Init => cli::init::run(cli.config.as_deref()),
        Commands::Status => cli::status::run(cli.config.as_deref()),
        Commands::Version => {
            println!("scanops version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "scanops",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        Commands::Scan(scan_cmd) => {
            let ctx =
                CommandContext::new(cli.format, cli.base_url.as_deref(), cli.config.as_deref())?;
            match scan_cmd {
                ScanCommands::Create(args) => cli::scan::create(&ctx, args).await,
                ScanCommands::List { filters } => cli::scan::list(&ctx, &filters).await,
                ScanCommands::Show { scan_id } => cli::scan::show(&ctx, &scan_id).await,
                ScanCommands::Workflow { scan_id } => cli::scan::workflow(&ctx, &scan_id).await,
                ScanCommands::Delete { scan_ids } => cli::scan::delete(&ctx, &scan_ids).await,
                ScanCommands::Cancel { scan_ids } => cli::scan::cancel(&ctx, &scan_ids).await,
                ScanCommands::Tags => cli::scan::tags(&ctx).await,
            }
        }
        Commands::Project(project_cmd) => {
            let ctx =
                CommandContext::new(cli.format, cli.base_url.as_deref(), cli.config.as_deref())?;
            match project_cmd {
                ProjectCommands::Create { input_file, input } => {
                    cli::project::create(&ctx, input_file.as_deref(), input.as_deref()).await
                }
                ProjectCommands::List { filters } => cli::project::list(&ctx, &filters).await,
                ProjectCommands::Show { project_id } => {
                    cli::project::show(&ctx, &project_id).await
                }
                ProjectCommands::Delete { project_ids } => {
                    cli::project::delete(&ctx, &project_ids).await
                }
                ProjectCommands::Tags => cli::project::tags(&ctx).await,
            }
        }
    }
}
