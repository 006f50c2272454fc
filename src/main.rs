use anyhow::Result;
use clap::Parser;
use release_links::commands::{OutputFormat, ResolveOptions, resolve};
use std::path::PathBuf;

/// release-links - download links for the latest desktop release
///
/// Fetches a GitHub release and reports, per platform, whether an installer
/// is published and where to download it.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for avoiding rate limits.
///
/// Examples:
///   release-links resolve                     # Latest release of the default repository
///   release-links --repo owner/repo resolve   # Latest release of owner/repo
///   release-links resolve --tag v1.2.0 --format json
#[derive(Parser, Debug)]
#[command(author, version = env!("RELEASE_LINKS_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Repository in the format "owner/repo" (defaults to jitenkr2030/Talk-to-Your-Accounts)
    #[arg(
        long = "repo",
        env = "RELEASE_LINKS_REPO",
        value_name = "OWNER/REPO",
        global = true
    )]
    pub repo: Option<String>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(
        long = "api-url",
        env = "RELEASE_LINKS_API_URL",
        value_name = "URL",
        global = true
    )]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve the per-platform download links of a release
    Resolve(ResolveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Release tag to resolve instead of the latest release
    #[arg(long, value_name = "TAG", conflicts_with = "input")]
    pub tag: Option<String>,

    /// Resolve a GitHub release JSON file instead of fetching
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = release_links::runtime::RealRuntime;

    match cli.command {
        Commands::Resolve(args) => {
            let options = ResolveOptions {
                tag: args.tag,
                input: args.input,
                format: args.format,
            };
            resolve(runtime, cli.repo, cli.api_url, options).await?
        }
    }
    Ok(())
}
