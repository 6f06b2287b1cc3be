//! Status command implementation

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}\n", "ScanOps Configuration Status".bold());

    let resolved = Config::resolve_path(config_path)?;
    if !resolved.exists() {
        println!("{} Configuration not found", "✗".red());
        println!();
        println!(
            "Run {} to create a configuration file.",
            "scanops init".cyan()
        );
        return Ok(());
    }

    let config = Config::load_at(config_path)?;
    println!("Config file: {}", resolved.display().to_string().cyan());
    println!();

    if config.api_key.is_some() {
        println!("{} API key configured", "✓".green());
    } else {
        println!("{} API key not configured", "✗".red());
        println!("  → Run 'scanops init' to configure");
    }

    match config.base_url {
        Some(ref url) => println!("{} Platform URL: {}", "✓".green(), url.cyan()),
        None => println!("{} Using the hosted platform", "○".dimmed()),
    }

    Ok(())
}
