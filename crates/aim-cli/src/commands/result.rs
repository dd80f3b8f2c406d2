//! Result command implementation.

use anyhow::{Result, bail};

use aim_service::{JobId, Solution};

use super::common::{create_client, print_solution};
use crate::SessionArgs;

/// Output format of the result command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Table,
    Json,
}

fn parse_format(format: &str) -> Result<Format> {
    match format.to_lowercase().as_str() {
        "table" => Ok(Format::Table),
        "json" => Ok(Format::Json),
        other => bail!("Unknown output format '{other}'. Use 'table' or 'json'"),
    }
}

/// Render a solution in the requested format.
fn render(solution: &Solution, format: Format) -> Result<()> {
    match format {
        Format::Table => print_solution(solution, None),
        Format::Json => println!("{}", serde_json::to_string_pretty(solution)?),
    }
    Ok(())
}

/// Execute the result command.
pub async fn execute(session: &SessionArgs, job_id: &str, format: &str) -> Result<()> {
    let format = parse_format(format)?;
    let client = create_client(session)?;

    let solution = client.get_result(&JobId::new(job_id)).await?;
    render(&solution, format)
}
