use anyhow::Context;
use clap::Parser;
use colored::*;
use github_auto_star::cli::Cli;
use github_auto_star::github::GitHubClient;
use github_auto_star::runner;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Initialize tracing with INFO level by default
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "GitHub Auto Star".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    println!(
        "Searching for repositories matching {} (language: {}, up to {} results)\n",
        cli.query.cyan(),
        cli.language.cyan(),
        cli.per_page
    );

    let client = GitHubClient::with_base_url(cli.token, &cli.api_url)
        .context("Failed to build GitHub client")?;

    let stats = runner::run(&client, &cli.query, &cli.language, cli.per_page)
        .await
        .context("Starring run aborted")?;

    println!("\n{}", "Run complete".bold());
    println!("Starred: {}", stats.starred.len().to_string().green());
    if !stats.is_clean() {
        println!("Failed: {}", stats.failed.len().to_string().red());
        for (full_name, error) in &stats.failed {
            println!("  {} {}", full_name.yellow(), error.dimmed());
        }
    }

    Ok(())
}
