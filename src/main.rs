use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taro::app::App;
use taro::catalog::Catalog;
use taro::config::{get_config_path, Config};
use taro::models::SpreadId;
use taro::screen::Screen;
use taro::{api, cli, db, render};

#[derive(Parser)]
#[command(name = "taro")]
#[command(about = "Tarot card readings in the terminal")]
struct Cli {
    /// Card data source: `embedded`, a JSON file or an http(s) URL
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Path to the SQLite database
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List spreads and recent readings
    Spreads,
    /// Pick cards and get a reading
    Draw {
        /// Spread to use (single, celtic, love, career); defaults to the last one chosen
        #[arg(value_parser = parse_spread)]
        spread: Option<SpreadId>,

        /// Deck slots to pick before prompting, e.g. `--pick 3,7,12`
        #[arg(long, value_delimiter = ',')]
        pick: Vec<usize>,

        /// Show the reading immediately
        #[arg(long)]
        no_delay: bool,
    },
    /// Show the current reading
    Reading,
    /// Show or manage past readings
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Show a card's meaning
    Card { name: String },
    /// Print the current reading as shareable text
    Share,
    /// Render a screen by path (`#/history`) or name
    Open { path: String },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List past readings
    List,
    /// Delete all past readings
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Make a past reading current, by position (1 = newest) or id
    View { target: String },
}

fn parse_spread(s: &str) -> Result<SpreadId, String> {
    SpreadId::from_str(s).ok_or_else(|| {
        let known: Vec<&str> = SpreadId::ALL.iter().map(|id| id.as_str()).collect();
        format!("unknown spread '{}' (expected one of: {})", s, known.join(", "))
    })
}

/// Initialize tracing with output to stderr (for the CLI) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "taro=info,tower_http=info".into()),
    );

    if use_stderr {
        // CLI mode: log to stderr so stdout only carries screens
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn build_app(config: &Config) -> anyhow::Result<App> {
    let (catalog, notice) = Catalog::load(&config.catalog_source()).await;
    if let Some(notice) = &notice {
        eprint!("{}", render::render_notice(notice));
    }

    let db = db::open_and_migrate(config.database_path.as_deref())?;
    Ok(App::new(db, catalog)
        .with_notice_durations(config.notice_duration(), config.success_notice_duration()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let serving = matches!(cli.command, Some(Commands::Serve { .. }));
    init_tracing(!serving);

    let mut config = Config::load();
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }
    if let Some(path) = cli.db {
        config.database_path = Some(path);
    }

    let command = match cli.command.unwrap_or(Commands::Spreads) {
        Commands::Config { init } => {
            if init {
                config.save()?;
                println!("Wrote {}", get_config_path()?.display());
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            tracing::info!("Starting Taro server on port {}", port);

            let router = api::create_router(build_app(&config).await?);

            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
            tracing::info!("Taro server listening on http://127.0.0.1:{}", port);

            axum::serve(listener, router).await?;
            return Ok(());
        }
        command => command,
    };

    let app = build_app(&config).await?;
    let mut rng = rand::thread_rng();
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();

    match command {
        Commands::Draw {
            spread,
            pick,
            no_delay,
        } => {
            let delay = if no_delay {
                Duration::ZERO
            } else {
                config.reading_delay()
            };
            cli::draw(&app, spread, &pick, delay, &mut input, &mut out, &mut rng).await?;
        }
        Commands::Reading => {
            cli::show_screen(&app, Screen::Reading, &mut out, &mut rng)?;
        }
        Commands::History { action } => match action.unwrap_or(HistoryAction::List) {
            HistoryAction::List => cli::show_screen(&app, Screen::History, &mut out, &mut rng)?,
            HistoryAction::Clear { yes } => {
                cli::clear_history(&app, yes, &mut input, &mut out)?;
            }
            HistoryAction::View { target } => {
                cli::view_history_entry(&app, &target, &mut out, &mut rng)?;
            }
        },
        Commands::Card { name } => {
            cli::show_card(&app, &name, &mut out)?;
        }
        Commands::Share => {
            cli::share(&app, &mut out)?;
        }
        Commands::Open { path } => {
            cli::show_screen(&app, Screen::resolve(&path), &mut out, &mut rng)?;
        }
        // Spreads
        _ => {
            cli::show_screen(&app, Screen::Home, &mut out, &mut rng)?;
        }
    }

    out.flush()?;
    Ok(())
}
