use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use paperlaunch::commands::launch::{self, LaunchOptions};

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Set up a new LaTeX project directory", long_about = None)]
struct Cli {
    /// Project name. Used as folder name and repo address
    name: String,

    /// Don't make the repository private
    #[arg(long)]
    public: bool,

    /// Make a repository on GitHub
    #[arg(long, visible_alias = "gh")]
    github: bool,

    /// Log each step to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    // RUST_LOG takes precedence over --verbose
    let default = if verbose { "paperlaunch=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    launch::execute(LaunchOptions {
        name: cli.name,
        github: cli.github,
        public: cli.public,
    })?;

    Ok(())
}
