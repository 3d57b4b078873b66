use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::admin::dashboard::DashboardService;
use crate::admin::session::{AdminRegistration, AuthError, Session, SessionService};
use crate::error::AppError;
use crate::jobs::query::{self, JobFilters, JobQueryRequest, SortBy, SortOrder};
use crate::store::domain::{JobStatus, ValidationError};
use crate::store::ids::{JobId, UserId};
use crate::store::repository::EntityStore;

/// Shared handler state. Everything inside is reference counted, so the
/// state clones per request without touching the store.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub sessions: Arc<SessionService<S>>,
    pub dashboard: Arc<DashboardService<S>>,
    pub default_page_size: u32,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            sessions: self.sessions.clone(),
            dashboard: self.dashboard.clone(),
            default_page_size: self.default_page_size,
        }
    }
}

/// Builds the public and admin API routes.
pub fn api_router<S>(state: AppState<S>) -> Router
where
    S: EntityStore + 'static,
{
    Router::new()
        .route("/api/jobs", get(list_jobs::<S>))
        .route("/api/admin/", post(register_admin::<S>))
        .route("/api/admin/login", post(admin_login::<S>))
        .route("/api/admin/logout", post(admin_logout::<S>))
        .route("/api/admin/dashboard/stats", get(dashboard_stats::<S>))
        .route("/api/admin/dashboard/trends", get(dashboard_trends::<S>))
        .route(
            "/api/admin/dashboard/pending-jobs",
            get(pending_jobs::<S>),
        )
        .route(
            "/api/admin/dashboard/pending-users",
            get(pending_users::<S>),
        )
        .route(
            "/api/admin/dashboard/jobs/:job_id/status",
            patch(update_job_status::<S>),
        )
        .route(
            "/api/admin/dashboard/users/:user_id/verify",
            patch(verify_user::<S>),
        )
        .with_state(state)
}

/// Raw query-string parameters of the public job listing endpoint. Unknown
/// sort fields fall back rather than erroring, per the listing contract.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobListParams {
    page: Option<u32>,
    limit: Option<u32>,
    sort_by: Option<String>,
    order: Option<String>,
    job_title: Option<String>,
    location: Option<String>,
    industry: Option<String>,
    employment_type: Option<String>,
    salary_min: Option<u32>,
    salary_max: Option<u32>,
    status: Option<String>,
}

impl JobListParams {
    fn into_request(self, default_limit: u32) -> Result<JobQueryRequest, ValidationError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => JobStatus::Open,
            Some(raw) => match JobStatus::parse(raw) {
                Some(JobStatus::Pending) | None => return Err(ValidationError::InvalidStatus),
                Some(status) => status,
            },
        };

        Ok(JobQueryRequest {
            page: self.page.unwrap_or(1).max(1),
            limit: self.limit.unwrap_or(default_limit).max(1),
            sort_by: SortBy::from_param(self.sort_by.as_deref()),
            order: SortOrder::from_param(self.order.as_deref()),
            filters: JobFilters {
                job_title: self.job_title.as_deref().and_then(query::normalize_text),
                location: self.location.as_deref().and_then(query::normalize_text),
                industry: self.industry.as_deref().and_then(query::normalize_text),
                employment_type: self
                    .employment_type
                    .as_deref()
                    .and_then(query::normalize_text),
                salary_min: self.salary_min,
                salary_max: self.salary_max,
                status,
            },
        })
    }
}

pub(crate) async fn list_jobs<S>(
    State(state): State<AppState<S>>,
    Query(params): Query<JobListParams>,
) -> Result<impl IntoResponse, AppError>
where
    S: EntityStore + 'static,
{
    let request = params.into_request(state.default_page_size)?;
    let jobs = state.store.jobs()?;
    let page = query::execute(&jobs, &request);
    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    email: String,
    password: String,
}

pub(crate) async fn admin_login<S>(
    State(state): State<AppState<S>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError>
where
    S: EntityStore + 'static,
{
    let (session, user) = state.sessions.login(&payload.email, &payload.password)?;
    Ok(Json(json!({
        "userId": user.id,
        "role": user.role,
        "message": "login successful",
        "token": session.token,
        "expiresAt": session.expires_at,
    })))
}

pub(crate) async fn admin_logout<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    S: EntityStore + 'static,
{
    let session = authorize(&state, &headers)?;
    state.sessions.logout(&session.token);
    Ok(Json(json!({ "success": true })))
}

pub(crate) async fn register_admin<S>(
    State(state): State<AppState<S>>,
    Json(payload): Json<AdminRegistration>,
) -> Result<impl IntoResponse, AppError>
where
    S: EntityStore + 'static,
{
    let admin = state.sessions.register(payload)?;
    let body = Json(json!({
        "success": true,
        "data": { "adminId": admin.id, "userId": admin.user_id },
    }));
    Ok((StatusCode::CREATED, body))
}

pub(crate) async fn dashboard_stats<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    S: EntityStore + 'static,
{
    authorize(&state, &headers)?;
    let stats = state.dashboard.stats()?;
    Ok(Json(json!({ "success": true, "data": stats })))
}

pub(crate) async fn dashboard_trends<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    S: EntityStore + 'static,
{
    authorize(&state, &headers)?;
    let trends = state.dashboard.trends(Utc::now())?;
    Ok(Json(json!({ "success": true, "data": trends })))
}

pub(crate) async fn pending_jobs<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    S: EntityStore + 'static,
{
    authorize(&state, &headers)?;
    let jobs = state.dashboard.pending_jobs()?;
    Ok(Json(json!({ "success": true, "data": jobs })))
}

pub(crate) async fn pending_users<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    S: EntityStore + 'static,
{
    authorize(&state, &headers)?;
    let users = state.dashboard.pending_users()?;
    Ok(Json(json!({ "success": true, "data": users })))
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    status: String,
}

pub(crate) async fn update_job_status<S>(
    State(state): State<AppState<S>>,
    Path(job_id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<StatusUpdate>,
) -> Result<impl IntoResponse, AppError>
where
    S: EntityStore + 'static,
{
    authorize(&state, &headers)?;
    let status = JobStatus::parse(&payload.status).ok_or(ValidationError::InvalidStatus)?;
    let job = state.dashboard.set_job_status(&JobId(job_id), status)?;
    Ok(Json(json!({ "success": true, "data": job })))
}

pub(crate) async fn verify_user<S>(
    State(state): State<AppState<S>>,
    Path(user_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    S: EntityStore + 'static,
{
    authorize(&state, &headers)?;
    let user = state.dashboard.verify_user(&UserId(user_id))?;
    Ok(Json(json!({ "success": true, "data": user })))
}

/// Resolves the `Authorization: Bearer <token>` header to a live session.
fn authorize<S>(state: &AppState<S>, headers: &HeaderMap) -> Result<Session, AppError>
where
    S: EntityStore,
{
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Auth(AuthError::InvalidSession))?;
    Ok(state.sessions.resolve(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::domain::{
        BasicInfo, EmployerDraft, Gender, NewJob, NewUser, Role,
    };
    use crate::store::memory::MemoryStore;
    use chrono::NaiveDate;

    fn state() -> AppState<MemoryStore> {
        let store = Arc::new(MemoryStore::default());
        AppState {
            sessions: Arc::new(SessionService::new(store.clone(), 60)),
            dashboard: Arc::new(DashboardService::new(store.clone())),
            store,
            default_page_size: 10,
        }
    }

    fn seed_open_job(state: &AppState<MemoryStore>, title: &str) {
        let user = state
            .store
            .create_user(NewUser {
                email: format!("{}@example.com", title.to_lowercase().replace(' ', ".")),
                password_hash: "hash".to_string(),
                role: Role::Employer,
            })
            .expect("user created");
        let employer = state
            .store
            .create_employer(EmployerDraft {
                user_id: user.id,
                basic_info: BasicInfo {
                    first_name: "Sam".to_string(),
                    last_name: "Ortega".to_string(),
                    date_of_birth: NaiveDate::from_ymd_opt(1985, 1, 20).expect("valid date"),
                    gender: Gender::Other,
                    age: 41,
                },
                location: None,
                company: None,
                contact: None,
                posting_template: None,
                pwd_support: None,
            })
            .expect("employer created");
        let job = state
            .store
            .create_job(NewJob {
                job_title: title.to_string(),
                job_description: String::new(),
                company: "Acme".to_string(),
                job_location: "Des Moines, IA".to_string(),
                employment_type: "Full-time".to_string(),
                industry: "Logistics".to_string(),
                salary_min: Some(40_000),
                salary_max: Some(55_000),
                key_skills: Vec::new(),
                employer_id: employer.id,
            })
            .expect("job created");
        state
            .store
            .set_job_status(&job.id, JobStatus::Open)
            .expect("approved");
    }

    #[tokio::test]
    async fn list_jobs_defaults_to_open_listings() {
        let state = state();
        seed_open_job(&state, "Delivery Driver");

        let response = list_jobs(State(state), Query(JobListParams::default()))
            .await
            .expect("query succeeds")
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn dashboard_requires_a_bearer_token() {
        let state = state();
        let result = dashboard_stats(State(state), HeaderMap::new()).await;
        match result {
            Err(AppError::Auth(AuthError::InvalidSession)) => {}
            other => panic!("expected auth error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn login_rejects_unknown_accounts() {
        let state = state();
        let result = admin_login(
            State(state),
            Json(LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "whatever-12".to_string(),
            }),
        )
        .await;
        match result {
            Err(AppError::Auth(AuthError::InvalidCredentials)) => {}
            other => panic!("expected credential error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn router_wires_public_and_protected_routes() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let state = state();
        seed_open_job(&state, "Delivery Driver");
        let router = api_router(state);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/jobs?jobTitle=driver&sortBy=createdAt&order=desc")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/admin/dashboard/stats")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn pending_status_is_not_a_public_filter() {
        let params = JobListParams {
            status: Some("Pending".to_string()),
            ..JobListParams::default()
        };
        assert_eq!(params.into_request(10), Err(ValidationError::InvalidStatus));
    }
}
