//! Workspaces command implementation.

use console::style;

use aim_adapter_local::{DEFAULT_MAX_VARIABLES, DEFAULT_QUEUE_DELAY, DEFAULT_RUN_TIME};
use aim_service::{ENV_ENDPOINT, ENV_TOKEN};

use super::common::registry;

/// Execute the workspaces command.
pub fn execute() {
    println!("{} Available workspaces:\n", style("AIM").cyan().bold());

    for name in registry().available_workspaces() {
        println!("  {} {}", style("●").green(), style(&name).bold());
        match name.as_str() {
            "local" => {
                println!("    In-process solver, jobs live as long as the command");
                println!("    Max variables: {DEFAULT_MAX_VARIABLES}");
                println!(
                    "    Timings: {:?} queued, up to {:?} running",
                    DEFAULT_QUEUE_DELAY, DEFAULT_RUN_TIME
                );
            }
            "http" => {
                println!("    Remote optimization service over REST");
                let endpoint = std::env::var(ENV_ENDPOINT).ok();
                match endpoint {
                    Some(endpoint) => println!("    Endpoint: {endpoint}"),
                    None => println!("    Set {ENV_ENDPOINT} (and {ENV_TOKEN}) to enable"),
                }
            }
            _ => {}
        }
        println!();
    }
}
