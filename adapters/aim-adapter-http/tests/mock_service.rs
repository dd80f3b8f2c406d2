//! `HttpWorkspace` against an in-process mock of the REST service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aim_adapter_http::HttpWorkspace;
use aim_problem::{Precision, Problem, QumoBuilder};
use aim_service::{
    JobClient, JobId, JobRequest, JobStatus, PollPolicy, ServiceError, SessionConfig, Solution,
};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

const TOKEN: &str = "secret-token";

struct MockJob {
    request: JobRequest,
    polls: usize,
}

struct MockService {
    /// Status reported on the n-th poll; the last entry repeats.
    script: Vec<&'static str>,
    jobs: Mutex<HashMap<String, MockJob>>,
    next_id: AtomicU64,
    status_requests: AtomicUsize,
}

impl MockService {
    fn new(script: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            script,
            jobs: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            status_requests: AtomicUsize::new(0),
        })
    }

    fn status_at(&self, polls: usize) -> &'static str {
        self.script[polls.saturating_sub(1).min(self.script.len() - 1)]
    }
}

type Reply = Result<Json<Value>, (StatusCode, String)>;

fn check_auth(headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let expected = format!("Bearer {TOKEN}");
    match headers.get(header::AUTHORIZATION) {
        Some(value) if value.as_bytes() == expected.as_bytes() => Ok(()),
        _ => Err((StatusCode::UNAUTHORIZED, "invalid token".into())),
    }
}

async fn create_job(
    State(service): State<Arc<MockService>>,
    headers: HeaderMap,
    Json(request): Json<JobRequest>,
) -> Reply {
    check_auth(&headers)?;
    let id = format!("job-{}", service.next_id.fetch_add(1, Ordering::Relaxed));
    service
        .jobs
        .lock()
        .unwrap()
        .insert(id.clone(), MockJob { request, polls: 0 });
    Ok(Json(json!({ "id": id })))
}

async fn get_job(
    State(service): State<Arc<MockService>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    check_auth(&headers)?;
    service.status_requests.fetch_add(1, Ordering::Relaxed);
    let mut jobs = service.jobs.lock().unwrap();
    let job = jobs
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, format!("job {id} not found")))?;
    job.polls += 1;

    let status = service.status_at(job.polls);
    let mut body = json!({
        "id": id,
        "status": status,
        "created_at": "2026-01-05T10:00:00Z",
    });
    if status == "failed" {
        body["message"] = json!("solver diverged");
    }
    Ok(Json(body))
}

async fn get_result(
    State(service): State<Arc<MockService>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    check_auth(&headers)?;
    let jobs = service.jobs.lock().unwrap();
    let job = jobs
        .get(&id)
        .ok_or((StatusCode::NOT_FOUND, format!("job {id} not found")))?;
    if service.status_at(job.polls) != "completed" {
        return Err((StatusCode::CONFLICT, "job not finished".into()));
    }

    let solution = Solution::new(JobId::new(id), vec![1.0; job.request.problem.dimension])
        .with_objective(-1.5);
    Ok(Json(serde_json::to_value(solution).unwrap()))
}

async fn serve(service: Arc<MockService>) -> String {
    let app = Router::new()
        .route("/jobs", post(create_job))
        .route("/jobs/{id}", get(get_job))
        .route("/jobs/{id}/result", get(get_result))
        .with_state(service);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn problem() -> Problem {
    let mut builder = QumoBuilder::new();
    builder.add(-22.0 / 9.0, 0, Some(1)).unwrap();
    builder.add(-2.5, 2, Some(2)).unwrap();
    builder.add(26.0 / 9.0, 0, None).unwrap();
    builder.set_continuous(2);
    builder.build().unwrap()
}

fn client(endpoint: &str, token: &str) -> JobClient {
    let config = SessionConfig::new("http")
        .with_endpoint(endpoint)
        .with_token(token)
        .with_precision(Precision::BFloat16)
        .with_poll(PollPolicy::fixed(Duration::from_millis(10)));
    let workspace = HttpWorkspace::from_config(&config).unwrap();
    JobClient::new(Arc::new(workspace), config)
}

#[tokio::test]
async fn test_full_lifecycle() {
    let service = MockService::new(vec!["queued", "running", "completed"]);
    let endpoint = serve(service.clone()).await;
    let client = client(&endpoint, TOKEN);

    let id = client.submit(&problem(), Duration::from_secs(5)).await.unwrap();
    let solution = client.wait(&id, Duration::from_secs(5)).await.unwrap();

    assert_eq!(solution.job_id, id);
    assert_eq!(solution.output.len(), 3);
    assert_eq!(solution.objective, Some(-1.5));

    let jobs = service.jobs.lock().unwrap();
    let request = &jobs[id.as_str()].request;
    assert_eq!(request.precision, Precision::BFloat16);
    assert_eq!(request.timeout_secs, 5);
    assert_eq!(request.decode_problem().unwrap(), problem());
}

#[tokio::test]
async fn test_terminal_status_is_cached() {
    let service = MockService::new(vec!["completed"]);
    let endpoint = serve(service.clone()).await;
    let client = client(&endpoint, TOKEN);

    let id = client.submit(&problem(), Duration::from_secs(5)).await.unwrap();
    for _ in 0..3 {
        assert_eq!(client.get_status(&id).await.unwrap(), JobStatus::Completed);
    }
    assert_eq!(service.status_requests.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_bad_token_fails_submission() {
    let endpoint = serve(MockService::new(vec!["completed"])).await;
    let client = client(&endpoint, "wrong-token");

    let err = client
        .submit(&problem(), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Submission(ref msg) if msg.contains("Authentication")));
}

#[tokio::test]
async fn test_unknown_job() {
    let endpoint = serve(MockService::new(vec!["completed"])).await;
    let client = client(&endpoint, TOKEN);

    let ghost = JobId::new("job-999");
    let err = client.get_status(&ghost).await.unwrap_err();
    assert!(matches!(err, ServiceError::UnknownJob(ref id) if *id == ghost));
}

#[tokio::test]
async fn test_failed_job() {
    let endpoint = serve(MockService::new(vec!["running", "failed"])).await;
    let client = client(&endpoint, TOKEN);

    let err = client
        .solve(&problem(), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::SolveFailed { ref reason, .. } if reason == "solver diverged"));
}

#[tokio::test]
async fn test_timeout_leaves_job_running() {
    let endpoint = serve(MockService::new(vec!["queued", "running"])).await;
    let client = client(&endpoint, TOKEN);

    let id = client.submit(&problem(), Duration::from_secs(5)).await.unwrap();
    let err = client
        .wait(&id, Duration::from_millis(100))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Timeout { last_status: JobStatus::Running, .. }
    ));

    assert_eq!(client.get_status(&id).await.unwrap(), JobStatus::Running);
    assert!(matches!(
        client.get_result(&id).await,
        Err(ServiceError::NotReady { .. })
    ));
}
