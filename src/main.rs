//! Binary entrypoint for the dexsearch CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `search <query...> [--broadcast]` - run one species search and print the reply
//! - `chat` - read chat lines from stdin and print replies to recognized commands
//! - `status` - print a summary of the loaded catalog
//!
//! See the library crate docs for module-level details: `dexsearch::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use dexsearch::chat::DexCommandHandler;
use dexsearch::config::Config;

#[derive(Parser)]
#[command(name = "dexsearch")]
#[command(about = "Multi-criteria species search for chat game servers")]
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
    /// Write a default configuration file
    Init,
    /// Run a single search, e.g. `dexsearch search dragon type, uber`
    Search {
        /// Comma-separated query; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Evaluate as a room broadcast (disallows "all" unless configured)
        #[arg(short, long)]
        broadcast: bool,
    },
    /// Read chat lines from stdin and answer recognized commands
    Chat,
    /// Show catalog statistics
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        info!("Initializing new dexsearch configuration");
        Config::create_default(&cli.config).await?;
        info!("Configuration file created at {}", cli.config);
        return Ok(());
    }

    let config = Config::load(&cli.config).await?;
    init_logging(&Some(config.clone()), cli.verbose);
    let handler = DexCommandHandler::from_config(&config).await?;

    match cli.command {
        Commands::Init => {}
        Commands::Search { query, broadcast } => {
            let reply = handler.dexsearch(&query.join(" "), broadcast);
            println!("{}", reply.text);
        }
        Commands::Chat => {
            info!("Reading chat lines from stdin");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if let Some(reply) = handler.handle_message(&line) {
                    let target = if reply.broadcast { "room" } else { "you" };
                    for text_line in reply.text.lines() {
                        println!("[{}] {}", target, text_line);
                    }
                }
            }
        }
        Commands::Status => {
            let catalog = handler.catalog();
            println!("Catalog: {}", config.catalog.path);
            println!("  species:   {}", catalog.species_count());
            println!("  moves:     {}", catalog.move_count());
            println!("  abilities: {}", catalog.ability_count());
            let tiers: Vec<String> = catalog.tier_labels().into_iter().collect();
            println!("  tiers:     {}", tiers.join(", "));
            if catalog.species_count() == 0 {
                warn!("Catalog {} contains no species", config.catalog.path);
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity wins over the configured level
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.log_level(),
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Mirror to the console only when someone is watching it
        let is_tty = atty::is(atty::Stream::Stderr);
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
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
