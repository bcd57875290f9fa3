use anyhow::Result;
use clap::Parser;
use mrb::commands::{self, BootstrapOptions};
use std::path::PathBuf;

/// mrb - Monorepo Bootstrapper
///
/// Link and install dependencies across the interdependent packages of a
/// monorepo. Packages are discovered under `<root>/packages`, intra-repo
/// dependencies are resolved by name and declared version range, and each
/// package's install runs only after the packages it depends on.
///
/// Examples:
///   mrb bootstrap                  # Bootstrap every package in the repo
///   mrb bootstrap --ignore "app-*" # Skip packages matching a name pattern
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Repo root directory (defaults to the current directory; also via MRB_ROOT)
    #[arg(
        long = "root",
        short = 'r',
        env = "MRB_ROOT",
        value_name = "PATH",
        global = true
    )]
    pub root: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Install and link dependencies across all packages
    Bootstrap(BootstrapArgs),

    /// List the packages in the repo
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct BootstrapArgs {
    /// Maximum number of package installs in flight at once
    #[arg(
        long,
        short = 'c',
        env = "MRB_CONCURRENCY",
        value_name = "N",
        default_value_t = 4,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub concurrency: u32,

    /// Glob patterns of package names to skip (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Package-manager executable used for installs
    #[arg(long = "npm-client", env = "MRB_NPM_CLIENT", default_value = "npm")]
    pub npm_client: String,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Also show each package's location
    #[arg(long)]
    pub long: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let root = match cli.root {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Bootstrap(args) => {
            commands::bootstrap(BootstrapOptions {
                root,
                concurrency: args.concurrency as usize,
                ignore: args.ignore,
                npm_client: args.npm_client,
            })
            .await?
        }
        Commands::List(args) => commands::list(&root, args.long)?,
    }
    Ok(())
}
