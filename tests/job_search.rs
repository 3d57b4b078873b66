use std::sync::Arc;

use chrono::NaiveDate;
use jobbridge::jobs::query::{JobFilters, JobQueryRequest, SortBy, SortOrder};
use jobbridge::jobs::{JobQueryClient, StoreJobQueryService};
use jobbridge::store::domain::{
    BasicInfo, EmployerDraft, Gender, JobStatus, NewJob, NewUser, Role,
};
use jobbridge::store::ids::EmployerId;
use jobbridge::store::memory::MemoryStore;
use jobbridge::store::repository::EntityStore;

fn basic_info() -> BasicInfo {
    BasicInfo {
        first_name: "Dana".to_string(),
        last_name: "Whitfield".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1992, 11, 3).expect("valid date"),
        gender: Gender::Female,
        age: 33,
    }
}

fn employer(store: &MemoryStore, email: &str) -> EmployerId {
    let user = store
        .create_user(NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::Employer,
        })
        .expect("user created");
    store
        .create_employer(EmployerDraft {
            user_id: user.id,
            basic_info: basic_info(),
            location: None,
            company: None,
            contact: None,
            posting_template: None,
            pwd_support: None,
        })
        .expect("employer created")
        .id
}

struct Listing<'a> {
    title: &'a str,
    location: &'a str,
    employment_type: &'a str,
    industry: &'a str,
    salary: Option<(u32, u32)>,
    status: JobStatus,
}

fn publish(store: &MemoryStore, employer_id: EmployerId, listing: Listing<'_>) {
    let job = store
        .create_job(NewJob {
            job_title: listing.title.to_string(),
            job_description: String::new(),
            company: "Acme".to_string(),
            job_location: listing.location.to_string(),
            employment_type: listing.employment_type.to_string(),
            industry: listing.industry.to_string(),
            salary_min: listing.salary.map(|(low, _)| low),
            salary_max: listing.salary.map(|(_, high)| high),
            key_skills: Vec::new(),
            employer_id,
        })
        .expect("job created");
    if listing.status != JobStatus::Pending {
        store
            .set_job_status(&job.id, listing.status)
            .expect("status set");
    }
}

fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::default());
    let acme = employer(&store, "acme@example.com");

    let listings = [
        Listing {
            title: "Delivery Driver",
            location: "Des Moines, IA",
            employment_type: "Full-time",
            industry: "Logistics",
            salary: Some((40_000, 52_000)),
            status: JobStatus::Open,
        },
        Listing {
            title: "Forklift Driver",
            location: "Cedar Rapids, IA",
            employment_type: "Part-time",
            industry: "Logistics",
            salary: Some((33_000, 39_000)),
            status: JobStatus::Open,
        },
        Listing {
            title: "Truck Driver (Night)",
            location: "Omaha, NE",
            employment_type: "Full-time",
            industry: "Logistics",
            salary: None,
            status: JobStatus::Closed,
        },
        Listing {
            title: "Registered Nurse",
            location: "Iowa City, IA",
            employment_type: "Full-time",
            industry: "Healthcare",
            salary: Some((62_000, 78_000)),
            status: JobStatus::Open,
        },
        Listing {
            title: "Data Entry Clerk",
            location: "Remote",
            employment_type: "Contract",
            industry: "Technology",
            salary: Some((30_000, 36_000)),
            status: JobStatus::Pending,
        },
    ];
    for listing in listings {
        publish(&store, acme, listing);
    }
    store
}

#[tokio::test]
async fn every_returned_job_satisfies_all_active_filters() {
    let store = seeded_store();
    let service = StoreJobQueryService::new(store);

    let combos = [
        JobFilters {
            job_title: Some("driver".to_string()),
            ..JobFilters::default()
        },
        JobFilters {
            location: Some("ia".to_string()),
            employment_type: Some("Full-time".to_string()),
            ..JobFilters::default()
        },
        JobFilters {
            industry: Some("Logistics".to_string()),
            salary_min: Some(35_000),
            ..JobFilters::default()
        },
        JobFilters {
            job_title: Some("driver".to_string()),
            salary_min: Some(30_000),
            salary_max: Some(45_000),
            ..JobFilters::default()
        },
    ];

    for filters in combos {
        let request = JobQueryRequest {
            filters: filters.clone(),
            ..JobQueryRequest::default()
        };
        let page = service.fetch(request).await.expect("query resolves");
        assert!(
            !page.data.is_empty(),
            "combo {filters:?} should match something"
        );
        for job in &page.data {
            assert!(filters.matches(job), "{} fails {filters:?}", job.job_title);
        }
    }
}

#[tokio::test]
async fn driver_scenario_matches_contract() {
    let store = seeded_store();
    let service = StoreJobQueryService::new(store);

    let request = JobQueryRequest {
        page: 1,
        limit: 10,
        sort_by: SortBy::CreatedAt,
        order: SortOrder::Desc,
        filters: JobFilters {
            job_title: Some("driver".to_string()),
            ..JobFilters::default()
        },
    };
    let page = service.fetch(request).await.expect("query resolves");

    // Two open driver roles; the closed one is excluded by the default
    // status filter, the pending one never reaches public listings.
    assert_eq!(page.pagination.total_records, 2);
    assert!(page.data.len() <= 10);
    for job in &page.data {
        assert!(job.job_title.to_lowercase().contains("driver"));
        assert_eq!(job.status, JobStatus::Open);
    }
    for pair in page.data.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[tokio::test]
async fn pagination_window_matches_totals() {
    let store = Arc::new(MemoryStore::default());
    let acme = employer(&store, "acme@example.com");
    for index in 0..23 {
        publish(
            &store,
            acme,
            Listing {
                title: &format!("Warehouse Associate {index}"),
                location: "Des Moines, IA",
                employment_type: "Full-time",
                industry: "Logistics",
                salary: None,
                status: JobStatus::Open,
            },
        );
    }
    let service = StoreJobQueryService::new(store);

    let mut seen = 0;
    for page_number in 1..=3 {
        let request = JobQueryRequest {
            page: page_number,
            ..JobQueryRequest::default()
        };
        let page = service.fetch(request).await.expect("query resolves");
        assert_eq!(page.pagination.total_records, 23);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.current_page, page_number);
        seen += page.data.len();
    }
    assert_eq!(seen, 23);

    let beyond = JobQueryRequest {
        page: 4,
        ..JobQueryRequest::default()
    };
    let page = service.fetch(beyond).await.expect("no error past the end");
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn closed_listings_are_reachable_with_an_explicit_status_filter() {
    let store = seeded_store();
    let service = StoreJobQueryService::new(store);

    let request = JobQueryRequest {
        filters: JobFilters {
            status: JobStatus::Closed,
            ..JobFilters::default()
        },
        ..JobQueryRequest::default()
    };
    let page = service.fetch(request).await.expect("query resolves");
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].job_title, "Truck Driver (Night)");
}

#[tokio::test]
async fn title_sort_is_alphabetical_and_case_insensitive() {
    let store = seeded_store();
    let service = StoreJobQueryService::new(store);

    let request = JobQueryRequest {
        sort_by: SortBy::JobTitle,
        order: SortOrder::Asc,
        ..JobQueryRequest::default()
    };
    let page = service.fetch(request).await.expect("query resolves");
    let titles: Vec<String> = page
        .data
        .iter()
        .map(|job| job.job_title.to_lowercase())
        .collect();
    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted);
}
