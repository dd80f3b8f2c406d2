//! Wait command implementation.

use std::time::Duration;

use anyhow::Result;
use console::style;

use aim_service::{JobId, ServiceError};

use super::common::{create_client, print_solution, wait_with_spinner};
use crate::SessionArgs;

/// Execute the wait command.
pub async fn execute(session: &SessionArgs, job_id: &str, timeout: u64) -> Result<()> {
    let client = create_client(session)?;
    let job_id = JobId::new(job_id);

    match wait_with_spinner(&client, &job_id, Duration::from_secs(timeout)).await {
        Ok(solution) => {
            print_solution(&solution, None);
            Ok(())
        }
        Err(e) => {
            if let Some(ServiceError::Timeout { last_status, .. }) =
                e.downcast_ref::<ServiceError>()
            {
                println!(
                    "{} Timed out after {}s; job {} is still {}",
                    style("!").yellow().bold(),
                    timeout,
                    style(&job_id).dim(),
                    last_status
                );
            }
            Err(e)
        }
    }
}
