//! MaxCut command implementation.
//!
//! Reads weighted edge lists, submits one MaxCut job per file and records
//! the submissions in a list file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use console::style;
use futures::future::join_all;
use tracing::{info, warn};

use aim_problem::{EdgeList, Problem};
use aim_service::{JobClient, JobId};

use super::common::{
    Submission, append_submissions, create_client, expand_inputs, print_solution, spinner,
};
use crate::SessionArgs;

/// Read an edge-list file and build its MaxCut problem.
pub fn load_problem(path: &Path) -> Result<Problem> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let edges =
        EdgeList::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))?;
    let problem = edges
        .to_problem()
        .with_context(|| format!("Failed to build MaxCut problem from {}", path.display()))?;
    info!(
        "Loaded {} ({} nodes, {} edges)",
        path.display(),
        edges.node_count(),
        edges.edges().len()
    );
    Ok(problem)
}

/// Execute the maxcut command.
pub async fn execute(
    session: &SessionArgs,
    patterns: &[String],
    timeout: u64,
    list: &Path,
    halt_on_error: bool,
    do_wait: bool,
) -> Result<()> {
    let client = create_client(session)?;
    let files = expand_inputs(patterns)?;
    let budget = Duration::from_secs(timeout);

    println!(
        "{} Submitting {} graph(s) to {} ({})",
        style("→").cyan().bold(),
        files.len(),
        style(client.workspace().name()).bold(),
        client.precision()
    );

    let mut submitted: Vec<(Submission, JobId, Problem)> = Vec::new();
    let mut failures = 0usize;

    for path in files {
        let outcome = match load_problem(&path) {
            Ok(problem) => client
                .submit(&problem, budget)
                .await
                .map(|id| (id, problem))
                .with_context(|| format!("Failed to submit {}", path.display())),
            Err(e) => Err(e),
        };

        match outcome {
            Ok((job_id, problem)) => {
                println!("  {} {} → {}", style("✓").green(), path.display(), job_id);
                let submission = Submission {
                    input: path,
                    job_id: job_id.to_string(),
                };
                submitted.push((submission, job_id, problem));
            }
            Err(e) if halt_on_error => return Err(e),
            Err(e) => {
                failures += 1;
                warn!("{:#}", e);
                eprintln!("  {} {:#}", style("✗").red(), e);
            }
        }
    }

    let submissions: Vec<Submission> = submitted.iter().map(|(s, _, _)| s.clone()).collect();
    if !submissions.is_empty() {
        append_submissions(list, &submissions)?;
        println!(
            "\n{} Recorded {} submission(s) in {}",
            style("✓").green().bold(),
            submissions.len(),
            style(list.display()).cyan()
        );
    }

    if submitted.is_empty() {
        bail!("No problems were submitted ({failures} failed)");
    }

    if do_wait {
        wait_all(&client, &submitted, budget).await?;
    } else if client.workspace().name() == "local" {
        println!(
            "\n{} Jobs on the local workspace end with this command; pass --wait to see solutions",
            style("!").yellow().bold()
        );
    }

    if failures > 0 {
        println!(
            "\n{} {} file(s) could not be submitted",
            style("!").yellow().bold(),
            failures
        );
    }

    Ok(())
}

/// Wait for every submitted job concurrently and print the solutions.
async fn wait_all(
    client: &JobClient,
    submitted: &[(Submission, JobId, Problem)],
    budget: Duration,
) -> Result<()> {
    let progress = spinner(format!("Waiting for {} job(s)...", submitted.len()));
    let outcomes = join_all(
        submitted
            .iter()
            .map(|(_, job_id, _)| client.wait(job_id, budget)),
    )
    .await;
    progress.finish_and_clear();

    let mut failed = 0usize;
    for ((submission, _, problem), outcome) in submitted.iter().zip(outcomes) {
        println!("\n{}", style(submission.input.display()).bold());
        match outcome {
            Ok(solution) => print_solution(&solution, Some(problem)),
            Err(e) => {
                eprintln!("  {} {}", style("✗").red(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} job(s) did not produce a solution");
    }
    Ok(())
}
