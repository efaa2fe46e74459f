use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ffcs_planner::config::Config;
use ffcs_planner::display::{export_assignments_to_csv, print_timetable, write_timetable_to_file};
use ffcs_planner::web;

#[derive(Parser, Debug)]
#[command(name = "ffcs-planner")]
#[command(version)]
#[command(about = "Plan a weekly FFCS timetable of slots and faculty")]
struct Args {
    /// Directory holding saved assignments
    #[arg(long, env = "FFCS_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the planner page and API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// Directory served under /static
        #[arg(long, default_value = "static")]
        static_dir: PathBuf,
    },

    /// Print the saved timetable
    Show {
        /// Also write the timetable to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Export saved assignments as CSV
    Export {
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = Config { data_dir: args.data_dir, ..Config::default() };

    match args.command {
        Commands::Serve { host, port, static_dir } => {
            config.bind_host = host;
            config.port = port;
            config.static_dir = static_dir;

            println!("Access the planner at http://localhost:{}", config.port);
            web::start_server(config).await?;
        }
        Commands::Show { output } => {
            let store = config.open_store();
            print_timetable(store.assignments());
            if let Some(path) = output {
                write_timetable_to_file(store.assignments(), &path)?;
                println!("Timetable saved to {}", path.display());
            }
        }
        Commands::Export { output } => {
            let store = config.open_store();
            match output {
                Some(path) => {
                    export_assignments_to_csv(store.assignments(), File::create(&path)?)?;
                    println!("Exported {} assignments to {}", store.assignments().len(), path.display());
                }
                None => export_assignments_to_csv(store.assignments(), io::stdout().lock())?,
            }
        }
    }

    Ok(())
}
