use std::time::Duration;

use crate::store::domain::{Job, JobStatus};

use super::query::{
    normalize_text, FilterOptions, JobFilters, JobPage, JobQueryRequest, PageInfo, SortBy,
    SortOrder,
};
use super::service::{JobQueryClient, QueryError};

/// Where the listing currently is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingPhase {
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Programming errors in how the controller is driven. An unrecognized
/// filter name is a bug in the caller, not a user input problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    #[error("unrecognized filter field: {0}")]
    InvalidField(String),
    #[error("invalid value '{value}' for filter {field}")]
    InvalidValue { field: &'static str, value: String },
}

/// Filter fields the controller recognizes by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    JobTitle,
    Location,
    Industry,
    EmploymentType,
    SalaryMin,
    SalaryMax,
    Status,
}

impl FilterField {
    pub fn from_name(name: &str) -> Result<Self, ListingError> {
        match name {
            "jobTitle" => Ok(FilterField::JobTitle),
            "location" => Ok(FilterField::Location),
            "industry" => Ok(FilterField::Industry),
            "employmentType" => Ok(FilterField::EmploymentType),
            "salaryMin" => Ok(FilterField::SalaryMin),
            "salaryMax" => Ok(FilterField::SalaryMax),
            "status" => Ok(FilterField::Status),
            other => Err(ListingError::InvalidField(other.to_string())),
        }
    }

    const fn wire_name(self) -> &'static str {
        match self {
            FilterField::JobTitle => "jobTitle",
            FilterField::Location => "location",
            FilterField::Industry => "industry",
            FilterField::EmploymentType => "employmentType",
            FilterField::SalaryMin => "salaryMin",
            FilterField::SalaryMax => "salaryMax",
            FilterField::Status => "status",
        }
    }
}

/// A query the controller has issued but not yet applied. Carries the
/// sequence number used to discard superseded responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub seq: u64,
    pub request: JobQueryRequest,
}

/// Owns filter, sort, and pagination state for a job listing session and
/// turns user edits into queries. Single-owner: one UI session drives one
/// controller, so interior locking is unnecessary.
pub struct JobListingController<C> {
    client: C,
    filters: JobFilters,
    sort_by: SortBy,
    order: SortOrder,
    current_page: u32,
    records_per_page: u32,
    jobs: Vec<Job>,
    filter_options: FilterOptions,
    pagination: PageInfo,
    phase: ListingPhase,
    seq: u64,
    query_timeout: Duration,
}

impl<C> JobListingController<C> {
    pub fn new(client: C, records_per_page: u32, query_timeout: Duration) -> Self {
        Self {
            client,
            filters: JobFilters::default(),
            sort_by: SortBy::CreatedAt,
            order: SortOrder::Desc,
            current_page: 1,
            records_per_page: records_per_page.max(1),
            jobs: Vec::new(),
            filter_options: FilterOptions::default(),
            pagination: PageInfo::default(),
            phase: ListingPhase::Idle,
            seq: 0,
            query_timeout,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn filters(&self) -> &JobFilters {
        &self.filters
    }

    pub fn filter_options(&self) -> &FilterOptions {
        &self.filter_options
    }

    pub fn pagination(&self) -> PageInfo {
        self.pagination
    }

    pub fn phase(&self) -> &ListingPhase {
        &self.phase
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            ListingPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Updates one filter field by wire name, resets to the first page, and
    /// issues a fresh query.
    pub fn set_filter(&mut self, name: &str, value: &str) -> Result<PendingQuery, ListingError> {
        let field = FilterField::from_name(name)?;
        match field {
            FilterField::JobTitle => self.filters.job_title = normalize_text(value),
            FilterField::Location => self.filters.location = normalize_text(value),
            FilterField::Industry => self.filters.industry = normalize_text(value),
            FilterField::EmploymentType => self.filters.employment_type = normalize_text(value),
            FilterField::SalaryMin => {
                self.filters.salary_min = parse_salary(field.wire_name(), value)?
            }
            FilterField::SalaryMax => {
                self.filters.salary_max = parse_salary(field.wire_name(), value)?
            }
            FilterField::Status => {
                // Seekers only ever browse Open or Closed listings; the
                // Pending moderation queue is not reachable from here.
                let status = JobStatus::parse(value).filter(|status| *status != JobStatus::Pending);
                self.filters.status = status.ok_or_else(|| ListingError::InvalidValue {
                    field: field.wire_name(),
                    value: value.to_string(),
                })?;
            }
        }
        self.current_page = 1;
        Ok(self.issue())
    }

    /// Replaces the sort state and re-queries. The current page is kept.
    pub fn set_sort(&mut self, sort_by: SortBy, order: SortOrder) -> PendingQuery {
        self.sort_by = sort_by;
        self.order = order;
        self.issue()
    }

    /// Resets every filter to its default (status stays Open). Sort order is
    /// untouched.
    pub fn clear_filters(&mut self) -> PendingQuery {
        self.filters = JobFilters::default();
        self.current_page = 1;
        self.issue()
    }

    /// Moves to another page. Out-of-range targets and the current page are
    /// no-ops that issue nothing.
    pub fn go_to_page(&mut self, page: u32) -> Option<PendingQuery> {
        if page < 1 || page > self.pagination.total_pages || page == self.current_page {
            return None;
        }
        self.current_page = page;
        Some(self.issue())
    }

    /// Re-issues the query with state unchanged.
    pub fn refresh(&mut self) -> PendingQuery {
        self.issue()
    }

    fn issue(&mut self) -> PendingQuery {
        self.seq += 1;
        self.phase = ListingPhase::Loading;
        PendingQuery {
            seq: self.seq,
            request: JobQueryRequest {
                page: self.current_page,
                limit: self.records_per_page,
                sort_by: self.sort_by,
                order: self.order,
                filters: self.filters.clone(),
            },
        }
    }

    /// Applies a resolved query. Responses for anything but the most recent
    /// sequence are stale and dropped so they can never clobber newer state.
    /// Returns whether the response was applied.
    pub fn apply(&mut self, seq: u64, outcome: Result<JobPage, QueryError>) -> bool {
        if seq != self.seq {
            return false;
        }
        match outcome {
            Ok(page) => {
                self.jobs = page.data;
                self.filter_options = page.filter_options;
                self.pagination = page.pagination;
                self.current_page = page.pagination.current_page;
                self.phase = ListingPhase::Loaded;
            }
            Err(err) => {
                // Previous results stay visible; only the phase flips.
                self.phase = ListingPhase::Error(err.to_string());
            }
        }
        true
    }
}

impl<C> JobListingController<C>
where
    C: JobQueryClient,
{
    /// Drives one pending query to completion: fetch with a bounded timeout,
    /// then apply (or discard) the response.
    pub async fn run(&mut self, pending: PendingQuery) -> bool {
        let outcome = match tokio::time::timeout(
            self.query_timeout,
            self.client.fetch(pending.request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(QueryError::TimedOut),
        };
        self.apply(pending.seq, outcome)
    }
}

fn parse_salary(field: &'static str, value: &str) -> Result<Option<u32>, ListingError> {
    match normalize_text(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ListingError::InvalidValue {
                field,
                value: raw,
            }),
    }
}
