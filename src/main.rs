use clap::{Parser, Subcommand};
use folio::commits::{self, FeedClient};
use folio::content::ContentStore;
use folio::generate::{self, SiteInputs};
use folio::posts::PostRepository;
use folio::preferences::{ColorScheme, FileStorage, Theme, ThemeStore};
use folio::{config, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// A terminal has no `prefers-color-scheme`. The value only reaches store
/// listeners, and the CLI registers none.
const CLI_PLATFORM_SCHEME: ColorScheme = ColorScheme::Light;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static generator for a localized blog and portfolio")]
#[command(long_about = "\
Static generator for a localized blog and portfolio

Posts are markdown files with YAML front-matter. Every page is generated
once per locale; the commits page summarizes the public GitHub activity of
the configured user.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Static assets (favicon, images) → copied to output root
  └── posts/
      ├── two-sum.md               # Slug = file name without .md
      └── react-hooks.md

Front-matter (all keys optional):

  ---
  title: Two Sum
  date: 2024-03-01
  excerpt: One pass with a hash map
  category: leetcode               # leetcode, typescript, react, nodejs, general
  tags: [array, hash-table]
  ---

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for local state (stored preferences)
    #[arg(long, default_value = ".folio", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the full site
    Build {
        /// Skip the commit feed and render an empty commits page
        #[arg(long)]
        offline: bool,
    },
    /// Validate config and posts without building
    Check,
    /// List posts, newest first
    Posts {
        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Fetch and summarize recent commits
    Commits,
    /// Show or set the stored theme (light, dark, system)
    Theme { value: Option<Theme> },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build { offline } => {
            let site_config = config::load_config(&cli.source)?;
            init_thread_pool(&site_config.processing);

            let records = if offline {
                Vec::new()
            } else {
                println!("==> Fetching commits for {}", site_config.github.username);
                FeedClient::new(site_config.github.clone()).fetch_recent_commits()
            };

            let theme = theme_store(&cli.temp_dir).theme();
            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(
                &SiteInputs {
                    config: &site_config,
                    source: &cli.source,
                    commits: &records,
                    theme,
                    today: chrono::Utc::now().date_naive(),
                },
                &cli.output,
            )?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let repo = repository(&cli.source, &site_config);
            output::print_posts_output(&repo.list_posts()?);
            println!("==> Content is valid");
        }
        Command::Posts { category } => {
            let site_config = config::load_config(&cli.source)?;
            let repo = repository(&cli.source, &site_config);
            let posts = match category {
                Some(name) => repo.list_posts_by_category(&name)?,
                None => repo.list_posts()?,
            };
            output::print_posts_output(&posts);
        }
        Command::Commits => {
            let site_config = config::load_config(&cli.source)?;
            let records = FeedClient::new(site_config.github).fetch_recent_commits();
            let stats = commits::compute_stats(&records);
            output::print_commits_output(&records, &stats);
        }
        Command::Theme { value } => {
            let mut store = theme_store(&cli.temp_dir);
            if let Some(theme) = value {
                store.set_theme(theme, CLI_PLATFORM_SCHEME)?;
            }
            println!("Theme: {}", store.theme());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn repository(source: &Path, site_config: &config::SiteConfig) -> PostRepository {
    PostRepository::new(
        ContentStore::new(source.join(&site_config.content.posts_dir)),
        site_config.content.words_per_minute,
    )
}

fn theme_store(temp_dir: &Path) -> ThemeStore<FileStorage> {
    ThemeStore::load(FileStorage::open(temp_dir.join("preferences.json")))
}
