use clap::Parser;

#[derive(Parser)]
#[command(name = "github-auto-star")]
#[command(about = "GitHub Auto Star - Searches for popular repositories and stars each result")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub personal access token used to authenticate star requests
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Search query for the popularity filter
    #[arg(long, env = "STAR_QUERY", default_value = "stars:>100")]
    pub query: String,

    /// Language filter applied to the search
    #[arg(long, env = "STAR_LANGUAGE", default_value = "python")]
    pub language: String,

    /// Number of repositories to request per search page (GitHub caps this at 100)
    #[arg(long, env = "STAR_PER_PAGE", default_value_t = 100)]
    pub per_page: u32,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,
}
