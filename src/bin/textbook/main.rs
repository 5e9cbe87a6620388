//! textbook CLI tool
//!
//! Command-line interface for inspecting textbook datasets with textbook-core.
//!
//! ## Commands
//!
//! - `check`: Load and validate a dataset
//! - `show <route>`: Resolve a route and print its breadcrumbs and neighbors
//! - `walk --book <id>`: Print every problem of a textbook in reading order
//! - `toc --book <id>`: Print the table of contents of a textbook
//!
//! Every command reads the dataset named by `--data`, else the `content` entry of the config
//! file, else the content bundled into the binary.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use textbook_core::{
    breadcrumb::section_label,
    codec::load_textbooks,
    config::{SiteConfig, SiteConfigProvider, TomlConfigProvider},
    contentbase::ContentBase,
    nodekey::RouteParams,
    session::NavigationSession,
    ContentError,
};

#[derive(Parser)]
#[command(name = "textbook")]
#[command(author, version, about = "A tool for inspecting and navigating textbook datasets", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a dataset and report every validation problem
    Check {
        /// Dataset to check (json or toml)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Resolve a route such as "/?id=1&chapter=13&set=25&p=1"
    Show {
        /// Query string, path-and-query, or absolute URL
        route: String,

        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Print the reading order of a textbook
    Walk {
        #[arg(short, long)]
        book: u32,

        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Print the table of contents of a textbook
    Toc {
        #[arg(short, long)]
        book: u32,

        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

fn site_config(config: Option<&Path>) -> Result<(SiteConfig, PathBuf), ContentError> {
    let Some(path) = config else {
        return Ok((SiteConfig::default(), std::env::current_dir()?));
    };
    let provider = TomlConfigProvider::new(path.to_path_buf());
    Ok((provider.get_config()?, provider.base_dir()))
}

fn load(config: Option<&Path>, data: Option<PathBuf>) -> Result<ContentBase, ContentError> {
    let (mut site, base) = site_config(config)?;
    if data.is_some() {
        site.content = data;
    }
    site.load_content(&base)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Check { data } => {
            let (site, base) = site_config(config)?;
            let textbooks = match data.or_else(|| site.content_path(&base)) {
                Some(path) => {
                    println!("Checking {}", path.display());
                    load_textbooks(&path)?
                }
                None => {
                    println!("Checking bundled content");
                    ContentBase::bundled()?.textbooks().to_vec()
                }
            };
            let content = ContentBase::new_unchecked(textbooks);
            let errors = content.built_in_test();
            for textbook in content.textbooks() {
                println!(
                    "  [{}] {}: {} chapter(s), {} problem set(s), {} problem(s)",
                    textbook.id,
                    textbook.title,
                    textbook.chapters.len(),
                    textbook.problem_set_count(),
                    textbook.problem_count()
                );
            }
            if errors.is_empty() {
                println!("OK");
                return Ok(());
            }
            for error in errors.iter() {
                eprintln!("{error}");
            }
            Err(Box::new(ContentError::InvalidDataset(format!(
                "{} problem(s) found",
                errors.len()
            ))))
        }

        Commands::Show { route, data } => {
            let content = load(config, data)?;
            let params = if route.contains("://") {
                RouteParams::from_url(&route)?
            } else {
                RouteParams::from_query(&route)
            };
            let mut session = NavigationSession::new(&content);
            let active = session.navigate(params);

            let trail = active
                .breadcrumbs()
                .iter()
                .map(|entry| entry.short_label.clone())
                .collect::<Vec<String>>();
            println!("{}", trail.join(" > "));
            match active.key() {
                Some(key) => println!("at:       {}", key.href()),
                None => println!("at:       / (nothing resolved)"),
            }
            if let Some(problem) = active.problem {
                println!("problem:  {}", problem.problem.label());
                if let Some(prev) = active.previous_problem {
                    println!("previous: {} {}", prev.problem.label(), prev.key().href());
                }
                if let Some(next) = active.next_problem {
                    println!("next:     {} {}", next.problem.label(), next.key().href());
                }
                let spill = active.cross_section;
                if let (Some(last), Some(title)) = (
                    spill.previous_section_last_problem,
                    spill.previous_section_title,
                ) {
                    println!("back to:  {} ({})", last.label(), section_label(title));
                }
                if let (Some(first), Some(title)) =
                    (spill.next_section_first_problem, spill.next_section_title)
                {
                    println!("continue: {} ({})", first.label(), section_label(title));
                }
            }
            if let Some(prev) = active.previous_problem_set {
                println!("previous set: {} {}", prev.problem_set.title, prev.key().href());
            }
            if let Some(next) = active.next_problem_set {
                println!("next set:     {} {}", next.problem_set.title, next.key().href());
            }
            Ok(())
        }

        Commands::Walk { book, data } => {
            let content = load(config, data)?;
            if content.textbook(book).is_none() {
                return Err(Box::new(ContentError::NotFound(format!("textbook {book}"))));
            }
            for at in content.traversal(book) {
                println!("{:>4}  {:<12} {}", at.offset, at.problem.number, at.key().href());
            }
            Ok(())
        }

        Commands::Toc { book, data } => {
            let content = load(config, data)?;
            let textbook = content
                .textbook(book)
                .ok_or_else(|| ContentError::NotFound(format!("textbook {book}")))?;
            println!("{}", textbook.title);
            println!("{}, {} ({})", textbook.author, textbook.edition, textbook.year);
            for chapter in textbook.chapters.iter() {
                println!("  {}", chapter.title);
                for problem_set in chapter.problem_sets.iter() {
                    println!(
                        "    {} ({} problem(s))",
                        problem_set.title,
                        problem_set.problems.len()
                    );
                }
            }
            Ok(())
        }
    }
}
