use crate::error::Result;
use crate::github::GitHubClient;
use colored::*;
use tracing::{info, warn};

/// Outcome of one starring run.
#[derive(Debug, Default)]
pub struct RunStats {
    /// Full names starred, in the order they were processed.
    pub starred: Vec<String>,
    /// Full names that could not be starred, with the error rendered for
    /// the operator.
    pub failed: Vec<(String, String)>,
}

impl RunStats {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Search for repositories and star every result, one at a time, in the
/// order the search returned them.
///
/// A star failure is reported and the run moves on to the next repository;
/// only a search failure aborts the run.
pub async fn run(
    client: &GitHubClient,
    query: &str,
    language: &str,
    per_page: u32,
) -> Result<RunStats> {
    let repositories = client.search_repositories(query, language, per_page).await?;

    info!(
        count = repositories.len(),
        query, language, "Search complete"
    );

    let mut stats = RunStats::default();

    for repo in &repositories {
        match client.star_repository(&repo.full_name).await {
            Ok(()) => {
                println!("{} {}", "Starred repository:".green(), repo.full_name);
                stats.starred.push(repo.full_name.clone());
            }
            Err(e) => {
                warn!(repo = %repo.full_name, error = %e, "Failed to star repository");
                println!(
                    "{} {} ({})",
                    "Failed to star repository:".red(),
                    repo.full_name,
                    e
                );
                stats.failed.push((repo.full_name.clone(), e.to_string()));
            }
        }
    }

    Ok(stats)
}
