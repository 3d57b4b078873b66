use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use jobbridge::jobs::query::{JobFilters, JobPage, JobQueryRequest};
use jobbridge::jobs::{
    JobListingController, JobQueryClient, ListingPhase, QueryError, StoreJobQueryService,
};
use jobbridge::store::domain::{
    BasicInfo, EmployerDraft, Gender, JobStatus, NewJob, NewUser, Role,
};
use jobbridge::store::memory::MemoryStore;
use jobbridge::store::repository::EntityStore;

const PAGE_SIZE: u32 = 10;
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

fn seeded_store(open_jobs: usize) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::default());
    let user = store
        .create_user(NewUser {
            email: "acme@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Employer,
        })
        .expect("user created");
    let employer = store
        .create_employer(EmployerDraft {
            user_id: user.id,
            basic_info: BasicInfo {
                first_name: "Dana".to_string(),
                last_name: "Whitfield".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1992, 11, 3).expect("valid date"),
                gender: Gender::Female,
                age: 33,
            },
            location: None,
            company: None,
            contact: None,
            posting_template: None,
            pwd_support: None,
        })
        .expect("employer created");

    for index in 0..open_jobs {
        let title = if index % 2 == 0 {
            format!("Delivery Driver {index}")
        } else {
            format!("Warehouse Associate {index}")
        };
        let job = store
            .create_job(NewJob {
                job_title: title,
                job_description: String::new(),
                company: "Acme".to_string(),
                job_location: "Des Moines, IA".to_string(),
                employment_type: "Full-time".to_string(),
                industry: "Logistics".to_string(),
                salary_min: Some(36_000),
                salary_max: Some(48_000),
                key_skills: Vec::new(),
                employer_id: employer.id,
            })
            .expect("job created");
        store
            .set_job_status(&job.id, JobStatus::Open)
            .expect("approved");
    }
    store
}

fn controller(
    store: Arc<MemoryStore>,
) -> JobListingController<Arc<StoreJobQueryService<MemoryStore>>> {
    let client = Arc::new(StoreJobQueryService::new(store));
    JobListingController::new(client, PAGE_SIZE, QUERY_TIMEOUT)
}

#[tokio::test]
async fn filter_then_clear_round_trip() {
    let store = seeded_store(8);
    let mut controller = controller(store);

    let pending = controller
        .set_filter("jobTitle", "driver")
        .expect("recognized field");
    assert!(controller.run(pending).await);
    assert_eq!(*controller.phase(), ListingPhase::Loaded);
    assert_eq!(controller.jobs().len(), 4);

    let pending = controller.clear_filters();
    assert_eq!(*controller.filters(), JobFilters::default());
    assert!(controller.run(pending).await);
    assert_eq!(controller.jobs().len(), 8);
    assert_eq!(controller.pagination().total_records, 8);
}

#[tokio::test]
async fn paging_walks_the_result_window() {
    let store = seeded_store(23);
    let mut controller = controller(store);

    let pending = controller.refresh();
    controller.run(pending).await;
    assert_eq!(controller.jobs().len(), 10);
    assert_eq!(controller.pagination().total_pages, 3);

    let pending = controller.go_to_page(3).expect("in range");
    controller.run(pending).await;
    assert_eq!(controller.jobs().len(), 3);
    assert_eq!(controller.pagination().current_page, 3);

    assert!(controller.go_to_page(99).is_none());
    assert!(controller.go_to_page(3).is_none(), "same page is a no-op");
}

#[tokio::test]
async fn stale_response_never_overwrites_newer_state() {
    let store = seeded_store(8);
    let service = Arc::new(StoreJobQueryService::new(store));
    let mut controller =
        JobListingController::new(service.clone(), PAGE_SIZE, QUERY_TIMEOUT);

    // The UI fires query A, edits a filter to fire query B, and only then do
    // the responses arrive, B first, A late.
    let pending_a = controller
        .set_filter("jobTitle", "driver")
        .expect("recognized field");
    let pending_b = controller
        .set_filter("jobTitle", "warehouse")
        .expect("recognized field");

    let response_a = service
        .fetch(pending_a.request.clone())
        .await
        .expect("a resolves");
    let response_b = service
        .fetch(pending_b.request.clone())
        .await
        .expect("b resolves");

    assert!(controller.apply(pending_b.seq, Ok(response_b)));
    assert!(
        !controller.apply(pending_a.seq, Ok(response_a)),
        "superseded response must be discarded"
    );

    assert_eq!(*controller.phase(), ListingPhase::Loaded);
    for job in controller.jobs() {
        assert!(
            job.job_title.to_lowercase().contains("warehouse"),
            "state must reflect query B, found {}",
            job.job_title
        );
    }
}

struct StalledClient;

impl JobQueryClient for StalledClient {
    fn fetch(
        &self,
        _request: JobQueryRequest,
    ) -> impl Future<Output = Result<JobPage, QueryError>> + Send {
        std::future::pending()
    }
}

#[tokio::test(start_paused = true)]
async fn unresolved_query_times_out_into_the_error_phase() {
    let mut controller = JobListingController::new(StalledClient, PAGE_SIZE, QUERY_TIMEOUT);

    let pending = controller.refresh();
    assert_eq!(*controller.phase(), ListingPhase::Loading);

    assert!(controller.run(pending).await, "timeout applies to this seq");
    match controller.phase() {
        ListingPhase::Error(message) => assert!(message.contains("timed out")),
        other => panic!("expected error phase, got {other:?}"),
    }
}

struct FailingClient;

impl JobQueryClient for FailingClient {
    fn fetch(
        &self,
        _request: JobQueryRequest,
    ) -> impl Future<Output = Result<JobPage, QueryError>> + Send {
        async { Err(QueryError::Backend("connection refused".to_string())) }
    }
}

#[tokio::test]
async fn previous_results_survive_a_failed_refresh() {
    let store = seeded_store(5);
    let service = Arc::new(StoreJobQueryService::new(store));
    let mut controller =
        JobListingController::new(service.clone(), PAGE_SIZE, QUERY_TIMEOUT);

    let pending = controller.refresh();
    controller.run(pending).await;
    assert_eq!(controller.jobs().len(), 5);

    // Swap in a failing transport by driving apply() directly.
    let pending = controller.refresh();
    let failed = FailingClient.fetch(pending.request.clone()).await;
    controller.apply(pending.seq, failed);

    assert!(matches!(controller.phase(), ListingPhase::Error(_)));
    assert_eq!(controller.jobs().len(), 5, "stale-but-present results stay");
}
