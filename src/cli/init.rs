//! Init command implementation

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::config::Config;
use crate::error::Result;

/// Run the init command.
///
/// Collects the API key and an optional self-hosted platform URL and writes
/// them to the config file. Keys are not verified against the platform here;
/// the first real command will surface a bad key.
pub fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}", "Welcome to ScanOps!".bold().green());
    println!("Let's set up your configuration.\n");

    let api_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your ScanOps API key")
        .allow_empty_password(true)
        .interact()?;

    let base_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Platform URL (leave empty for the hosted service)")
        .allow_empty(true)
        .interact_text()?;

    let config = Config {
        api_key: (!api_key.is_empty()).then_some(api_key),
        base_url: (!base_url.is_empty()).then_some(base_url),
    };
    config.save_at(config_path)?;

    let resolved = Config::resolve_path(config_path)?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        resolved.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "scanops status".cyan());
    println!("  {} - List recent scans", "scanops scan list".cyan());

    Ok(())
}
