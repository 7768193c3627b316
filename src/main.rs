use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;

use lifetracker::config::Config;
use lifetracker::store::CsvStore;
use lifetracker::{add, delete, edit, interactive, logging, query, utils, Session};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

#[derive(Parser)]
#[command(name = "lifetracker")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Log hours per category per day and review them", long_about = None)]
struct Cli {
    /// CSV file to use instead of the configured store
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log an activity (prompts when no fields are given)
    Add {
        /// Date (YYYY-MM-DD, YYYY.MM.DD, or YYYY/MM/DD format, default: today)
        #[arg(short = 'D', long)]
        date: Option<String>,

        /// Category (work, study, sleep, gym, leisure, transport or 1-6, default: work)
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Number of hours (0-24)
        #[arg(short = 'H', long)]
        hours: Option<f64>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show the record table with row numbers
    List {
        /// Number of rows to display, most recent last (0 for all)
        #[arg(short, long, default_value_t = 0)]
        limit: usize,

        /// Only show records for this date
        #[arg(short = 'D', long)]
        date: Option<String>,
    },
    /// Show total hours, main focus, daily average and charts
    Summary,
    /// Change fields of a row
    Edit {
        /// Row number as shown by `list`
        row: usize,

        /// New date
        #[arg(short = 'D', long)]
        date: Option<String>,

        /// New category
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// New number of hours
        #[arg(short = 'H', long)]
        hours: Option<f64>,
    },
    /// Delete a row
    Delete {
        /// Row number as shown by `list`
        row: usize,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Open the interactive dashboard (default)
    Ui,
    /// Show or change the configured store file
    Config {
        /// Store records in this file from now on
        #[arg(long, conflicts_with = "reset")]
        set_file: Option<PathBuf>,

        /// Go back to the default store location
        #[arg(long)]
        reset: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Ui);

    if matches!(command, Commands::Ui) {
        // Terminal output would corrupt the dashboard, so only log to file
        if let Err(e) = logging::init_with_file("lifetracker.log", cli.verbose) {
            eprintln!("Warning: file logging disabled: {}", e);
        }
    } else {
        logging::init(cli.verbose);
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default configuration");
        Config::default()
    });

    let command = match command {
        Commands::Config { set_file, reset } => {
            return handle_config_command(config, set_file, reset)
        }
        other => other,
    };

    let data_file = config.resolve_data_file(cli.file.as_deref());
    tracing::debug!(path = %data_file.display(), "using store");

    let (mut session, load_error) = Session::open(CsvStore::new(data_file));

    if let Commands::Ui = command {
        return interactive::run_interactive(session, load_error);
    }

    if let Some(e) = &load_error {
        eprintln!("⚠️  {}", e);
        eprintln!("Continuing with an empty table. The file on disk was not modified.");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    match command {
        Commands::Add {
            date,
            category,
            hours,
            yes,
        } => {
            if load_error.is_some() && !yes {
                println!("Saving will overwrite the unreadable file with the new record only.");
            }
            add::handle_add_command(&mut session, date, category, hours, yes, &mut input)?;
        }
        Commands::List { limit, date } => {
            let date = date.map(|d| utils::parse_date(&d)).transpose()?;
            query::handle_list_command(session.records(), limit, date);
        }
        Commands::Summary => {
            query::handle_summary_command(&session.summary());
        }
        Commands::Edit {
            row,
            date,
            category,
            hours,
        } => {
            if load_error.is_some() {
                return Err(anyhow!("Refusing to edit rows of a store that could not be read"));
            }
            edit::handle_edit_command(&mut session, row, date, category, hours)?;
        }
        Commands::Delete { row, yes } => {
            if load_error.is_some() {
                return Err(anyhow!("Refusing to delete rows of a store that could not be read"));
            }
            delete::handle_delete_command(&mut session, row, yes, &mut input)?;
        }
        // Both are dispatched before the table is printed or changed
        Commands::Ui | Commands::Config { .. } => {}
    }

    Ok(())
}

fn handle_config_command(mut config: Config, set_file: Option<PathBuf>, reset: bool) -> Result<()> {
    if let Some(path) = set_file {
        config.data_file = Some(path);
        config.save()?;
        println!("Store file set.");
    } else if reset {
        config.data_file = None;
        config.save()?;
        println!("Store file reset to the default location.");
    }

    if let Some(path) = Config::get_config_path() {
        println!("Config file: {}", path.display());
    }
    println!("Store file:  {}", config.resolve_data_file(None).display());
    Ok(())
}
