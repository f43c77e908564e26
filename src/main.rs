mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use atelier::config::data_dir;
use atelier::error::Result;

use crate::commands::{
    clients::ClientCommand, contracts::ContractCommand, documents::DocumentCommand,
    export::ExportCommand, parties::LaborCommand, parties::VendorCommand,
    payments::PaymentCommand, tasks::TaskCommand, Context,
};

#[derive(Parser)]
#[command(name = "atelier")]
#[command(
    version,
    about = "Client, contract and payment ledger for interior-design studios",
    long_about = None
)]
struct Cli {
    /// Path to data directory (default: $ATELIER_DIR, XDG config dir, or ~/.atelier)
    #[arg(short = 'C', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with a config template
    Init,

    /// Show data directory and row counts
    Status,

    /// Portfolio totals, pending amounts, payment trends and open tasks
    Dashboard {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage clients
    #[command(subcommand)]
    Client(ClientCommand),

    /// Manage vendors
    #[command(subcommand)]
    Vendor(VendorCommand),

    /// Manage labor contractors
    #[command(subcommand)]
    Labor(LaborCommand),

    /// Manage contracts
    #[command(subcommand)]
    Contract(ContractCommand),

    /// Record and list payments
    #[command(subcommand)]
    Payment(PaymentCommand),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Manage document metadata
    #[command(subcommand)]
    Document(DocumentCommand),

    /// Write payments to CSV
    #[command(subcommand)]
    Export(ExportCommand),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Determine data directory
    let dir = match cli.data_dir {
        Some(p) => p,
        None => data_dir()?,
    };
    let ctx = Context::new(dir);

    match cli.command {
        Commands::Init => commands::setup::cmd_init(&ctx),
        Commands::Status => commands::setup::cmd_status(&ctx),
        Commands::Dashboard { json } => commands::dashboard::cmd_dashboard(&ctx, json),
        Commands::Client(cmd) => commands::clients::run(&ctx, cmd),
        Commands::Vendor(cmd) => commands::parties::run_vendor(&ctx, cmd),
        Commands::Labor(cmd) => commands::parties::run_labor(&ctx, cmd),
        Commands::Contract(cmd) => commands::contracts::run(&ctx, cmd),
        Commands::Payment(cmd) => commands::payments::run(&ctx, cmd),
        Commands::Task(cmd) => commands::tasks::run(&ctx, cmd),
        Commands::Document(cmd) => commands::documents::run(&ctx, cmd),
        Commands::Export(cmd) => commands::export::run(&ctx, cmd),
    }
}
