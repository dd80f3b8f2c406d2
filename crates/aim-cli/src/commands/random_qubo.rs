//! Random QUBO command implementation.
//!
//! Builds a dense QUBO with standard-normal couplings (zero diagonal,
//! symmetrized) and an optional standard-normal field, then submits it.

use std::f64::consts::TAU;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use console::style;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use aim_problem::{MAX_VARIABLES, Problem};

use super::common::{create_client, print_solution, wait_with_spinner};
use crate::SessionArgs;

/// Draw one standard-normal sample (Box-Muller).
fn normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = 1.0 - rng.r#gen::<f64>();
    let u2: f64 = rng.r#gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Random symmetric coupling matrix with a zero diagonal.
fn random_quadratic(size: usize, rng: &mut impl Rng) -> Array2<f64> {
    let mut quadratic = Array2::from_shape_simple_fn((size, size), || normal(rng));
    for i in 0..size {
        quadratic[[i, i]] = 0.0;
        for j in (i + 1)..size {
            let v = 0.5 * (quadratic[[i, j]] + quadratic[[j, i]]);
            quadratic[[i, j]] = v;
            quadratic[[j, i]] = v;
        }
    }
    debug!("Quadratic matrix:\n{}", quadratic);
    quadratic
}

/// Random field vector.
fn random_field(size: usize, rng: &mut impl Rng) -> Array1<f64> {
    let field = Array1::from_shape_simple_fn(size, || normal(rng));
    debug!("Field vector: {}", field);
    field
}

/// Build a random QUBO problem of the given size.
pub fn random_problem(size: usize, with_field: bool, seed: Option<u64>) -> Result<Problem> {
    if size == 0 || size > MAX_VARIABLES {
        bail!("Problem size must be between 1 and {MAX_VARIABLES}, got {size}");
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let quadratic = random_quadratic(size, &mut rng);
    let field = with_field.then(|| random_field(size, &mut rng));
    info!(
        "Creating problem {} external field",
        if with_field { "with" } else { "without" }
    );

    Problem::new(quadratic, field, std::iter::empty()).context("Failed to build random QUBO")
}

/// Execute the random-qubo command.
pub async fn execute(
    session: &SessionArgs,
    size: usize,
    fields: bool,
    seed: Option<u64>,
    timeout: u64,
    do_wait: bool,
) -> Result<()> {
    let client = create_client(session)?;
    let problem = random_problem(size, fields, seed)?;
    let budget = Duration::from_secs(timeout);

    let job_id = client.submit(&problem, budget).await?;
    println!(
        "{} Submitted {}-variable QUBO to {} ({})",
        style("✓").green().bold(),
        size,
        style(client.workspace().name()).bold(),
        client.precision()
    );
    println!("  Job ID: {}", style(&job_id).cyan());

    if do_wait {
        let solution = wait_with_spinner(&client, &job_id, budget).await?;
        print_solution(&solution, Some(&problem));
    } else if client.workspace().name() == "local" {
        println!(
            "\n{} Jobs on the local workspace end with this command; pass --wait to see the solution",
            style("!").yellow().bold()
        );
    }

    Ok(())
}
