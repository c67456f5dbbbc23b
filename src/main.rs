//! Binary entrypoint for the starchseed CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml` and an initial snapshot
//! - `status` - print counts and export readiness
//! - `shell` - interactive seeding shell on stdin/stdout
//! - `pool list|add|edit|delete` - manage the starch pool
//! - `seed assign|remove|auto|shuffle|clear|show` - manage the bracket
//! - `export [--matchups] [--out <path>] [--stdout]` - write an export file
//! - `import <file>` - replace pool and bracket from a full export
//! - `rename <name>` / `reset [--yes]`
//!
//! See the library crate docs for module-level details: `starchseed::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::Path;

use starchseed::bracket::SlotRef;
use starchseed::config::Config;
use starchseed::errors::SeedingError;
use starchseed::export::{self, ExportFormat};
use starchseed::shell::{self, render, DirtyFlag, ImageArg, Session, ShellCommand, StarchArgs};
use starchseed::state::SeedingState;
use starchseed::storage::Storage;

#[derive(Parser)]
#[command(name = "starchseed")]
#[command(about = "Seed a 64-starch Starch Madness bracket")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration file and data directory
    Init,
    #[command(flatten)]
    Session(SessionCommand),
}

/// Subcommands that open the saved state and run against it.
#[derive(Subcommand)]
enum SessionCommand {
    /// Show pool and bracket counts
    Status,
    /// Run the interactive seeding shell
    Shell,
    /// Manage the starch pool
    Pool {
        #[command(subcommand)]
        action: PoolAction,
    },
    /// Manage bracket seeding
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
    /// Export the bracket as JSON
    Export {
        /// Write the readable matchup listing instead of the full config
        #[arg(short, long)]
        matchups: bool,
        /// Output path (defaults to <export_dir>/<slug>-bracket.json)
        #[arg(short, long)]
        out: Option<String>,
        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Replace pool and bracket from a full-config export
    Import {
        file: String,
    },
    /// Rename the tournament
    Rename {
        name: String,
    },
    /// Restore the default pool, an empty bracket and the default name
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PoolAction {
    /// List starches, optionally filtered by name
    List {
        search: Option<String>,
    },
    /// Add a starch
    Add {
        name: String,
        #[arg(short, long)]
        emoji: Option<String>,
        /// Image file to embed (png, jpg, gif, webp, svg, bmp)
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Edit a starch; omitted fields keep their current values
    Edit {
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        emoji: Option<String>,
        #[arg(short, long, conflicts_with = "no_image")]
        image: Option<String>,
        /// Remove the current image
        #[arg(long)]
        no_image: bool,
    },
    /// Delete a starch and clear its seed
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Put a starch in a slot (seed 1-16), moving it if already seeded
    Assign {
        id: String,
        region: String,
        seed: usize,
    },
    /// Empty a slot
    Remove {
        region: String,
        seed: usize,
    },
    /// Fill empty slots with unassigned starches in pool order
    Auto,
    /// Randomly re-deal all starches across the bracket
    Shuffle,
    /// Clear every slot
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Print the bracket
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init writes the config, so it runs without one.
    let command = match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            return run_init(&cli.config).await;
        }
        Commands::Session(command) => command,
    };

    let config_missing = !Path::new(&cli.config).exists();
    let pre_config = if config_missing {
        None
    } else {
        Some(Config::load(&cli.config).await?)
    };
    init_logging(&pre_config, cli.verbose);

    if config_missing {
        warn!("Config file {} not found; using defaults", cli.config);
    }
    let config = pre_config.unwrap_or_default();
    let default_name = config.tournament.default_name.clone();
    let storage = Storage::new(&config.storage.data_dir, &config.storage.state_file).await?;
    let snapshot = storage.load_snapshot(&default_name).await?;
    let state = SeedingState::from_snapshot(snapshot, &default_name);
    let mut session = Session::new(state, config);

    let dirty = DirtyFlag::watch(&mut session);
    let command = match command {
        SessionCommand::Shell => {
            info!("Starting shell on {:?}", storage.state_path());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            return shell::run(&mut session, &storage, stdin, tokio::io::stdout()).await;
        }
        SessionCommand::Status => ShellCommand::Status,
        SessionCommand::Pool { action } => match action {
            PoolAction::List { search } => ShellCommand::Pool { query: search },
            PoolAction::Add { name, emoji, image } => ShellCommand::Add(StarchArgs {
                name,
                emoji,
                image: image.map(ImageArg::Load).unwrap_or_default(),
            }),
            PoolAction::Edit {
                id,
                name,
                emoji,
                image,
                no_image,
            } => {
                let current = session
                    .state()
                    .pool()
                    .get(&id)
                    .ok_or_else(|| SeedingError::UnknownStarch(id.clone()))?;
                let image = match (image, no_image) {
                    (Some(path), _) => ImageArg::Load(path),
                    (None, true) => ImageArg::Clear,
                    (None, false) => ImageArg::Keep,
                };
                ShellCommand::Edit {
                    fields: StarchArgs {
                        name: name.unwrap_or_else(|| current.name.clone()),
                        emoji,
                        image,
                    },
                    id,
                }
            }
            PoolAction::Delete { id, yes } => ShellCommand::Delete { id, confirmed: yes },
        },
        SessionCommand::Seed { action } => match action {
            SeedAction::Assign { id, region, seed } => ShellCommand::Assign {
                id,
                slot: SlotRef::parse(&region, seed)?,
            },
            SeedAction::Remove { region, seed } => ShellCommand::Remove(SlotRef::parse(&region, seed)?),
            SeedAction::Auto => ShellCommand::Auto,
            SeedAction::Shuffle => ShellCommand::Shuffle,
            SeedAction::Clear { yes } => ShellCommand::Clear { confirmed: yes },
            SeedAction::Show => {
                print!(
                    "{}",
                    render::seeding_view(session.state(), session.selection().state(), None)
                );
                return Ok(());
            }
        },
        SessionCommand::Export {
            matchups,
            out,
            stdout,
        } => {
            let format = if matchups {
                ExportFormat::Matchups
            } else {
                ExportFormat::Full
            };
            if stdout {
                println!(
                    "{}",
                    export::render_export(session.state(), format, chrono::Utc::now())?
                );
                return Ok(());
            }
            ShellCommand::Export { format, path: out }
        }
        SessionCommand::Import { file } => ShellCommand::Import(file),
        SessionCommand::Rename { name } => ShellCommand::Name(name),
        SessionCommand::Reset { yes } => ShellCommand::Reset { confirmed: yes },
    };

    let reply = session.try_execute(command).await?;
    print!("{}", reply);
    if dirty.take() {
        storage.save_snapshot(&session.state().snapshot()).await?;
    }
    Ok(())
}

/// Write a default config (unless one exists) and an initial snapshot (unless one exists).
async fn run_init(config_path: &str) -> Result<()> {
    info!("Initializing new starchseed configuration");
    if Path::new(config_path).exists() {
        warn!("{} already exists; leaving it unchanged", config_path);
    } else {
        Config::create_default(config_path).await?;
        info!("Configuration file created at {}", config_path);
    }
    let config = Config::load(config_path).await?;
    let storage = Storage::new(&config.storage.data_dir, &config.storage.state_file).await?;
    if !storage.state_path().exists() {
        let name = &config.tournament.default_name;
        storage
            .save_snapshot(&SeedingState::fresh(name).snapshot())
            .await?;
        info!("Initial snapshot written to {:?}", storage.state_path());
    }
    println!("Initialized {} and {}", config_path, storage.state_path().display());
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|cfg| cfg.logging.level.parse::<log::LevelFilter>().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    let log_file = config.as_ref().and_then(|cfg| cfg.logging.file.clone());
    if let Some(file) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));

            // Echo to the console only when attached to a terminal
            let is_tty = atty::is(atty::Stream::Stdout);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }

                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
            let _ = builder.try_init();
            return;
        }
    }
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });
    let _ = builder.try_init();
}
