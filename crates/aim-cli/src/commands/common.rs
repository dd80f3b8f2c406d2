//! Shared helpers for CLI commands.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use console::{StyledObject, style};
use indicatif::{ProgressBar, ProgressStyle};

use aim_adapter_http::HttpWorkspace;
use aim_adapter_local::LocalWorkspace;
use aim_problem::{Precision, Problem, ProblemKind, cut_value};
use aim_service::{
    JobClient, JobId, JobStatus, SessionConfig, Solution, Workspace, WorkspaceRegistry,
};

use crate::SessionArgs;

/// Workspace used when neither flags nor config name one.
pub const DEFAULT_WORKSPACE: &str = "local";

/// Precision used by the CLI when nothing else is configured.
pub const DEFAULT_PRECISION: Precision = Precision::Float32;

/// Header line of the submissions list.
pub const SUBMISSIONS_HEADER: &str = "Filename, JobId, Input";

/// Number of output values shown in table format.
const PREVIEW_LEN: usize = 16;

/// Registry with every workspace the CLI knows about.
pub fn registry() -> WorkspaceRegistry {
    let mut registry = WorkspaceRegistry::new();
    registry.register_factory("local", |config| {
        let workspace: Arc<dyn Workspace> = Arc::new(LocalWorkspace::from_config(config)?);
        Ok(workspace)
    });
    registry.register_factory("http", |config| {
        let workspace: Arc<dyn Workspace> = Arc::new(HttpWorkspace::from_config(config)?);
        Ok(workspace)
    });
    registry
}

/// Load a session configuration from a YAML file.
pub fn load_config_file(path: &Path) -> Result<SessionConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_yaml_ng::from_str(&source)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Resolve the session configuration: config file first, then flags and
/// environment on top.
pub fn session_config(args: &SessionArgs) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => SessionConfig::new(DEFAULT_WORKSPACE).with_precision(DEFAULT_PRECISION),
    };

    if let Some(workspace) = &args.workspace {
        config.workspace.clone_from(workspace);
    }
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(token) = &args.token {
        config = config.with_token(token);
    }
    if let Some(precision) = &args.precision {
        config = config
            .with_precision_name(precision)
            .with_context(|| format!("Invalid --precision '{precision}'"))?;
    }

    tracing::debug!("Session configuration: {:?}", config);
    Ok(config)
}

/// Build a job client for the resolved session.
pub fn create_client(args: &SessionArgs) -> Result<JobClient> {
    let config = session_config(args)?;
    let workspace = registry().create(&config)?;
    Ok(JobClient::new(workspace, config))
}

/// Expand file names and glob patterns, dropping directories.
///
/// A pattern that matches nothing is kept as a literal path so that the
/// caller can report it.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        for entry in
            glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?
        {
            let path = entry.with_context(|| format!("Failed to read match of {pattern}"))?;
            matched = true;
            if !path.is_dir() {
                files.push(path);
            }
        }
        if !matched {
            files.push(PathBuf::from(pattern));
        }
    }
    Ok(files)
}

/// One submitted problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Input file.
    pub input: PathBuf,
    /// Job id returned by the workspace.
    pub job_id: String,
}

impl Submission {
    /// Row in the submissions list.
    pub fn row(&self) -> String {
        let name = self
            .input
            .file_name()
            .map_or_else(|| self.input.display().to_string(), |n| n.to_string_lossy().into_owned());
        format!("{}, {}, {}", name, self.job_id, self.input.display())
    }
}

/// Append submissions to the list file, writing the header if the file is
/// new.
pub fn append_submissions(list: &Path, submissions: &[Submission]) -> Result<()> {
    let is_new = !list.is_file();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(list)
        .with_context(|| format!("Failed to open submissions list: {}", list.display()))?;

    if is_new {
        writeln!(file, "{SUBMISSIONS_HEADER}")?;
    }
    for submission in submissions {
        writeln!(file, "{}", submission.row())?;
    }
    Ok(())
}

/// Spinner shown while polling.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Color a status for terminal output.
pub fn style_status(status: &JobStatus) -> StyledObject<String> {
    let text = status.to_string();
    match status {
        JobStatus::Completed => style(text).green().bold(),
        JobStatus::Failed(_) | JobStatus::Cancelled => style(text).red().bold(),
        JobStatus::Submitted => style(text).yellow().bold(),
        JobStatus::Running => style(text).cyan().bold(),
    }
}

/// Wait for a job behind a spinner that follows its status.
pub async fn wait_with_spinner(
    client: &JobClient,
    job_id: &JobId,
    timeout: Duration,
) -> Result<Solution> {
    let spinner = spinner(format!("Waiting for job {job_id}..."));
    let outcome = client
        .wait_with(job_id, timeout, |status| {
            spinner.set_message(format!("Job {job_id}: {status}"));
        })
        .await;
    spinner.finish_and_clear();
    Ok(outcome?)
}

/// Print a solution as a table. With the problem at hand, also print the
/// objective check and, for MaxCut, the cut.
pub fn print_solution(solution: &Solution, problem: Option<&Problem>) {
    println!(
        "\n{} Solution for job {} ({} variables):",
        style("✓").green().bold(),
        style(&solution.job_id).dim(),
        solution.len()
    );

    if let Some(objective) = solution.objective {
        println!("  Objective: {}", style(format!("{objective:.6}")).yellow());
    }

    if let Some(problem) = problem {
        if problem.kind() == ProblemKind::MaxCut {
            if let Ok(cut) = cut_value(problem, &solution.output) {
                let side = solution.partition().iter().filter(|&&s| s).count();
                println!(
                    "  Cut value: {} (partition {} / {})",
                    style(format!("{cut:.3}")).yellow(),
                    side,
                    solution.len() - side
                );
            }
        } else if let Ok(objective) = problem.objective(&solution.output) {
            println!("  Local objective: {objective:.6}");
        }
    }

    for (i, value) in solution.output.iter().take(PREVIEW_LEN).enumerate() {
        println!("  x[{:>3}] = {}", i, style(format!("{value:>10.4}")).cyan());
    }
    if solution.len() > PREVIEW_LEN {
        println!("  ... and {} more values", solution.len() - PREVIEW_LEN);
    }

    for (key, value) in &solution.metadata {
        println!("  {}: {}", style(key).dim(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_workspaces() {
        assert_eq!(registry().available_workspaces(), vec!["http", "local"]);
    }

    #[test]
    fn test_default_session() {
        let config = session_config(&SessionArgs::default()).unwrap();
        assert_eq!(config.workspace, DEFAULT_WORKSPACE);
        assert_eq!(config.precision, Precision::Float32);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aim.yaml");
        fs::write(
            &path,
            "workspace: http\nendpoint: https://aim.example.com\ntoken: abc\nprecision: BFloat16\npoll:\n  initial_interval_ms: 250\n",
        )
        .unwrap();

        let args = SessionArgs {
            config: Some(path),
            precision: Some("float64".into()),
            ..SessionArgs::default()
        };
        let config = session_config(&args).unwrap();
        assert_eq!(config.workspace, "http");
        assert_eq!(config.endpoint.as_deref(), Some("https://aim.example.com"));
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.precision, Precision::Float64);
        assert_eq!(config.poll.initial_interval_ms, 250);
    }

    #[test]
    fn test_invalid_precision() {
        let args = SessionArgs {
            precision: Some("Float8".into()),
            ..SessionArgs::default()
        };
        assert!(session_config(&args).is_err());
    }

    #[test]
    fn test_unknown_workspace() {
        let args = SessionArgs {
            workspace: Some("quantum-annealer".into()),
            ..SessionArgs::default()
        };
        assert!(create_client(&args).is_err());
    }

    #[test]
    fn test_expand_inputs_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::create_dir(dir.path().join("c.txt")).unwrap();

        let pattern = format!("{}/*.txt", dir.path().display());
        let mut files = expand_inputs(&[pattern]).unwrap();
        files.sort();
        assert_eq!(
            files,
            vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
        );
    }

    #[test]
    fn test_expand_inputs_keeps_missing_literal() {
        let files = expand_inputs(&["does-not-exist.txt".to_string()]).unwrap();
        assert_eq!(files, vec![PathBuf::from("does-not-exist.txt")]);
    }

    #[test]
    fn test_append_submissions_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("submissions.txt");
        let first = Submission {
            input: PathBuf::from("graphs/g1.txt"),
            job_id: "job-1".into(),
        };
        let second = Submission {
            input: PathBuf::from("graphs/g2.txt"),
            job_id: "job-2".into(),
        };

        append_submissions(&list, &[first]).unwrap();
        append_submissions(&list, &[second]).unwrap();

        let text = fs::read_to_string(&list).unwrap();
        assert_eq!(
            text,
            "Filename, JobId, Input\ng1.txt, job-1, graphs/g1.txt\ng2.txt, job-2, graphs/g2.txt\n"
        );
    }
}
