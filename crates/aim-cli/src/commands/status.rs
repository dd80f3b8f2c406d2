//! Status command implementation.

use anyhow::Result;
use console::style;

use aim_service::JobId;

use super::common::{create_client, style_status};
use crate::SessionArgs;

/// Execute the status command.
pub async fn execute(session: &SessionArgs, job_id: &str) -> Result<()> {
    let client = create_client(session)?;
    let job_id = JobId::new(job_id);

    let status = client.get_status(&job_id).await?;

    println!(
        "{} Job {} on {}",
        style("→").cyan().bold(),
        style(&job_id).dim(),
        client.workspace().name()
    );
    println!("  Status: {}", style_status(&status));

    if status.is_pending() {
        println!(
            "\n  Use {} to wait for completion",
            style(format!("aim wait {job_id}")).cyan()
        );
    } else if status.is_success() {
        println!(
            "\n  Use {} to retrieve the solution",
            style(format!("aim result {job_id}")).cyan()
        );
    }

    Ok(())
}
