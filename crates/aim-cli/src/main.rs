//! AIM Command-Line Interface
//!
//! The main entry point for the `aim` tool: build MaxCut and QUBO problems,
//! submit them to a workspace and follow the resulting jobs.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use aim_service::{ErrorClass, ServiceError};
use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{maxcut, random_qubo, result, status, wait, workspaces};

/// AIM - submit optimization problems and collect their solutions
#[derive(Parser)]
#[command(name = "aim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options that shape the solver session.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Session configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Workspace to use (local, http)
    #[arg(short, long, global = true, env = "AIM_WORKSPACE")]
    pub workspace: Option<String>,

    /// Service endpoint URL
    #[arg(long, global = true, env = "AIM_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Bearer token for the service
    #[arg(long, global = true, env = "AIM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Precision to use for the solver (Float16, BFloat16, Float32, Float64)
    #[arg(short, long, global = true, env = "AIM_PRECISION")]
    pub precision: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MaxCut solver on graphs given as edge-list files
    Maxcut {
        /// Input files or glob patterns
        #[arg(required = true)]
        files: Vec<String>,

        /// Timeout for the solver (in seconds)
        #[arg(short, long, default_value = "100")]
        timeout: u64,

        /// File to store the list of submitted problems
        #[arg(short, long, default_value = "submissions.txt")]
        list: PathBuf,

        /// Halt execution on first error
        #[arg(long)]
        halt_on_error: bool,

        /// Wait for all jobs and print their solutions
        #[arg(long)]
        wait: bool,
    },

    /// Submit a random QUBO problem of the given size
    RandomQubo {
        /// Number of variables
        size: usize,

        /// Add a random field vector
        #[arg(short, long)]
        fields: bool,

        /// Seed for the random generator
        #[arg(long)]
        seed: Option<u64>,

        /// Timeout for the solver (in seconds)
        #[arg(short, long, default_value = "100")]
        timeout: u64,

        /// Wait for the job and print its solution
        #[arg(long)]
        wait: bool,
    },

    /// Query job status
    Status {
        /// Job ID
        job_id: String,
    },

    /// Retrieve the solution of a completed job
    Result {
        /// Job ID
        job_id: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Wait for a job to complete
    Wait {
        /// Job ID
        job_id: String,

        /// Timeout in seconds
        #[arg(short, long, default_value = "86400")]
        timeout: u64,
    },

    /// List available workspaces
    Workspaces,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let session = cli.session;
    let result = match cli.command {
        Commands::Maxcut {
            files,
            timeout,
            list,
            halt_on_error,
            wait: do_wait,
        } => maxcut::execute(&session, &files, timeout, &list, halt_on_error, do_wait).await,

        Commands::RandomQubo {
            size,
            fields,
            seed,
            timeout,
            wait: do_wait,
        } => random_qubo::execute(&session, size, fields, seed, timeout, do_wait).await,

        Commands::Status { job_id } => status::execute(&session, &job_id).await,

        Commands::Result { job_id, format } => result::execute(&session, &job_id, &format).await,

        Commands::Wait { job_id, timeout } => wait::execute(&session, &job_id, timeout).await,

        Commands::Workspaces => {
            workspaces::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        if let Some(service_error) = e.downcast_ref::<ServiceError>() {
            let hint = match service_error.class() {
                ErrorClass::Input => "check the input and try again",
                ErrorClass::Transient => "the service may recover; retrying can help",
                ErrorClass::Job => "the job itself ended without a solution",
            };
            eprintln!("{} {}", style("Hint:").yellow(), hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
