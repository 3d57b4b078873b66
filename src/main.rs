use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use jobbridge::admin::dashboard::DashboardService;
use jobbridge::admin::session::{AdminRegistration, SessionService};
use jobbridge::config::AppConfig;
use jobbridge::error::AppError;
use jobbridge::http::{api_router, AppState};
use jobbridge::jobs::{JobCard, JobListingController, ListingPhase, StoreJobQueryService};
use jobbridge::store::domain::{
    BasicInfo, CompanyInfo, EmployerDraft, Gender, JobStatus, NewJob, NewUser, PwdSupport, Role,
};
use jobbridge::store::memory::MemoryStore;
use jobbridge::store::repository::EntityStore;
use jobbridge::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct OpsState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "JobBridge",
    about = "Run the JobBridge job board service or browse a seeded demo board",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Render a page of the job board from seeded demo data
    Browse(BrowseArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Seed demo employers, jobs, and an admin account on startup
    #[arg(long)]
    seed: bool,
}

#[derive(Args, Debug, Default)]
struct BrowseArgs {
    /// Filter by job title substring
    #[arg(long)]
    job_title: Option<String>,
    /// Filter by location substring
    #[arg(long)]
    location: Option<String>,
    /// Page to display
    #[arg(long, default_value_t = 1)]
    page: u32,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Browse(args) => run_browse(args).await,
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let store = Arc::new(MemoryStore::default());
    if args.seed {
        seed_demo_data(store.as_ref())?;
        seed_demo_admin(&store, config.session.session_ttl_minutes)?;
        info!("demo data seeded");
    }

    let sessions = Arc::new(SessionService::new(
        store.clone(),
        config.session.session_ttl_minutes,
    ));
    let dashboard = Arc::new(DashboardService::new(store.clone()));
    let api_state = AppState {
        store,
        sessions,
        dashboard,
        default_page_size: config.listing.page_size,
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let ops = OpsState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(ops)
        .merge(api_router(api_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job board service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_browse(args: BrowseArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let store = Arc::new(MemoryStore::default());
    seed_demo_data(store.as_ref())?;

    let client = Arc::new(StoreJobQueryService::new(store));
    let mut controller = JobListingController::new(
        client,
        config.listing.page_size,
        config.listing.query_timeout,
    );

    if let Some(title) = &args.job_title {
        let pending = controller.set_filter("jobTitle", title)?;
        controller.run(pending).await;
    }
    if let Some(location) = &args.location {
        let pending = controller.set_filter("location", location)?;
        controller.run(pending).await;
    }
    if let Some(pending) = controller.go_to_page(args.page) {
        controller.run(pending).await;
    }
    if matches!(controller.phase(), ListingPhase::Idle | ListingPhase::Loading) {
        let pending = controller.refresh();
        controller.run(pending).await;
    }

    render_board(&controller);
    Ok(())
}

fn render_board<C>(controller: &JobListingController<C>) {
    if let ListingPhase::Error(message) = controller.phase() {
        println!("Job board unavailable: {message}");
        return;
    }

    let pagination = controller.pagination();
    println!(
        "Job board — page {} of {} ({} listings)",
        pagination.current_page, pagination.total_pages, pagination.total_records
    );

    let now = Utc::now();
    for job in controller.jobs() {
        let card = JobCard::compose(job, now);
        println!("\n{} — {}", card.title, card.company);
        println!("  {} | {}", card.location, card.employment_type);
        if let Some(salary) = &card.salary_label {
            println!("  {salary}");
        }
        if !card.skills.is_empty() {
            println!("  Skills: {}", card.skills.join(", "));
        }
        println!("  {} | {}", card.posted_label, card.detail_path);
    }

    let options = controller.filter_options();
    println!("\nIndustries: {}", options.industries.join(", "));
    println!("Employment types: {}", options.employment_types.join(", "));
}

fn basic_info(first: &str, last: &str) -> BasicInfo {
    BasicInfo {
        first_name: first.to_string(),
        last_name: last.to_string(),
        date_of_birth: chrono::NaiveDate::from_ymd_opt(1988, 6, 15).expect("valid date"),
        gender: Gender::Other,
        age: 38,
    }
}

/// Seeds a handful of employers and listings so the demo board and a freshly
/// started dev server have something to show.
fn seed_demo_data<S: EntityStore>(store: &S) -> Result<(), AppError> {
    let listings: [(&str, &str, &str, &str, &str, Option<(u32, u32)>, &[&str]); 5] = [
        (
            "Delivery Driver",
            "Acme Freight",
            "Des Moines, IA",
            "Full-time",
            "Logistics",
            Some((40_000, 52_000)),
            &["CDL", "Routing", "Customer service"],
        ),
        (
            "Night Shift Driver",
            "Acme Freight",
            "Cedar Rapids, IA",
            "Part-time",
            "Logistics",
            Some((35_000, 41_000)),
            &["CDL"],
        ),
        (
            "Registered Nurse",
            "Prairie Health",
            "Iowa City, IA",
            "Full-time",
            "Healthcare",
            Some((62_000, 78_000)),
            &["Patient care", "Triage", "Charting"],
        ),
        (
            "Front Desk Associate",
            "Prairie Health",
            "Iowa City, IA",
            "Part-time",
            "Healthcare",
            None,
            &[],
        ),
        (
            "Accessibility Tester",
            "Inclusive Labs",
            "Remote",
            "Contract",
            "Technology",
            Some((55_000, 70_000)),
            &["Screen readers", "WCAG", "QA"],
        ),
    ];

    for (index, (title, company, location, employment_type, industry, salary, skills)) in
        listings.iter().enumerate()
    {
        let user = store.create_user(NewUser {
            email: format!("employer{index}@jobbridge.dev"),
            password_hash: "seeded".to_string(),
            role: Role::Employer,
        })?;
        let employer = store.create_employer(EmployerDraft {
            user_id: user.id,
            basic_info: basic_info("Demo", "Employer"),
            location: None,
            company: Some(CompanyInfo {
                company_name: company.to_string(),
                industry: Some(industry.to_string()),
                company_size: None,
                website: None,
            }),
            contact: None,
            posting_template: None,
            pwd_support: Some(PwdSupport {
                accessibility_features: Some("Step-free access".to_string()),
                remote_work_options: location == &"Remote",
                support_programs: None,
                additional_info: None,
            }),
        })?;

        let job = store.create_job(NewJob {
            job_title: title.to_string(),
            job_description: format!("{title} at {company}"),
            company: company.to_string(),
            job_location: location.to_string(),
            employment_type: employment_type.to_string(),
            industry: industry.to_string(),
            salary_min: salary.map(|(low, _)| low),
            salary_max: salary.map(|(_, high)| high),
            key_skills: skills.iter().map(|skill| skill.to_string()).collect(),
            employer_id: employer.id,
        })?;

        // The last listing stays in the moderation queue for the dashboard.
        if index < listings.len() - 1 {
            store.set_job_status(&job.id, JobStatus::Open)?;
        }
    }

    Ok(())
}

fn seed_demo_admin(store: &Arc<MemoryStore>, ttl_minutes: i64) -> Result<(), AppError> {
    let sessions = SessionService::new(store.clone(), ttl_minutes);
    sessions.register(AdminRegistration {
        email: "admin@jobbridge.dev".to_string(),
        password: "demo-admin-pass".to_string(),
        confirm_password: "demo-admin-pass".to_string(),
        access_level: None,
    })?;
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
