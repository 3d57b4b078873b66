use serde::{Deserialize, Serialize};

use crate::store::domain::{Job, JobStatus};

/// Sortable job fields. Anything else a client sends falls back to
/// `CreatedAt`, matching the lenient contract of the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    CreatedAt,
    JobTitle,
    SalaryMin,
    SalaryMax,
}

impl SortBy {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("jobTitle") => SortBy::JobTitle,
            Some("salaryMin") => SortBy::SalaryMin,
            Some("salaryMax") => SortBy::SalaryMax,
            _ => SortBy::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Active filter set. Text filters hold trimmed, non-empty values only;
/// an absent field imposes no constraint. Filters are AND-combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFilters {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub employment_type: Option<String>,
    pub salary_min: Option<u32>,
    pub salary_max: Option<u32>,
    pub status: JobStatus,
}

impl Default for JobFilters {
    fn default() -> Self {
        Self {
            job_title: None,
            location: None,
            industry: None,
            employment_type: None,
            salary_min: None,
            salary_max: None,
            status: JobStatus::Open,
        }
    }
}

/// Normalizes raw text input: empty or whitespace-only clears the filter.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl JobFilters {
    pub fn matches(&self, job: &Job) -> bool {
        if job.status != self.status {
            return false;
        }
        if let Some(needle) = &self.job_title {
            if !contains_ci(&job.job_title, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.location {
            if !contains_ci(&job.job_location, needle) {
                return false;
            }
        }
        if let Some(industry) = &self.industry {
            if !job.industry.eq_ignore_ascii_case(industry) {
                return false;
            }
        }
        if let Some(employment_type) = &self.employment_type {
            if !job.employment_type.eq_ignore_ascii_case(employment_type) {
                return false;
            }
        }
        if self.salary_min.is_some() || self.salary_max.is_some() {
            // A salary bound can only match jobs that advertise a salary.
            let (Some(job_low), Some(job_high)) = (advertised_range(job)) else {
                return false;
            };
            if let Some(low) = self.salary_min {
                if job_high < low {
                    return false;
                }
            }
            if let Some(high) = self.salary_max {
                if job_low > high {
                    return false;
                }
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn advertised_range(job: &Job) -> (Option<u32>, Option<u32>) {
    match (job.salary_min, job.salary_max) {
        (Some(low), Some(high)) => (Some(low), Some(high)),
        (Some(low), None) => (Some(low), Some(low)),
        (None, Some(high)) => (Some(high), Some(high)),
        (None, None) => (None, None),
    }
}

/// One page worth of query parameters, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQueryRequest {
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub filters: JobFilters,
}

impl Default for JobQueryRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort_by: SortBy::CreatedAt,
            order: SortOrder::Desc,
            filters: JobFilters::default(),
        }
    }
}

/// Distinct values available for the filter controls, computed over the
/// status-matching population so controls stay populated while filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub industries: Vec<String>,
    pub employment_types: Vec<String>,
    pub salary_range: SalaryRange,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_records: u32,
    pub records_per_page: u32,
}

/// A page of results plus the metadata the listing UI renders around it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub data: Vec<Job>,
    pub filter_options: FilterOptions,
    pub pagination: PageInfo,
}

/// Executes a query against a snapshot of jobs: AND-filter, sort, paginate,
/// and report the facets available for the current status population.
pub fn execute(jobs: &[Job], request: &JobQueryRequest) -> JobPage {
    let status_population: Vec<&Job> = jobs
        .iter()
        .filter(|job| job.status == request.filters.status)
        .collect();

    let mut matches: Vec<&Job> = status_population
        .iter()
        .copied()
        .filter(|job| request.filters.matches(job))
        .collect();

    sort_jobs(&mut matches, request.sort_by, request.order);

    let limit = request.limit.max(1);
    let total_records = matches.len() as u32;
    let total_pages = total_records.div_ceil(limit);
    let current_page = request.page.max(1);

    let start = (current_page as usize - 1).saturating_mul(limit as usize);
    let data: Vec<Job> = matches
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect();

    JobPage {
        data,
        filter_options: facets(&status_population),
        pagination: PageInfo {
            current_page,
            total_pages,
            total_records,
            records_per_page: limit,
        },
    }
}

fn sort_jobs(jobs: &mut [&Job], sort_by: SortBy, order: SortOrder) {
    jobs.sort_by(|a, b| {
        let ordering = match sort_by {
            SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            SortBy::JobTitle => a
                .job_title
                .to_lowercase()
                .cmp(&b.job_title.to_lowercase()),
            SortBy::SalaryMin => a.salary_min.unwrap_or(0).cmp(&b.salary_min.unwrap_or(0)),
            SortBy::SalaryMax => a.salary_max.unwrap_or(0).cmp(&b.salary_max.unwrap_or(0)),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn facets(population: &[&Job]) -> FilterOptions {
    let mut industries: Vec<String> = Vec::new();
    let mut employment_types: Vec<String> = Vec::new();
    let mut salary_range: Option<SalaryRange> = None;

    for job in population {
        if !job.industry.is_empty() && !industries.contains(&job.industry) {
            industries.push(job.industry.clone());
        }
        if !job.employment_type.is_empty() && !employment_types.contains(&job.employment_type) {
            employment_types.push(job.employment_type.clone());
        }
        let (low, high) = advertised_range(job);
        if let (Some(low), Some(high)) = (low, high) {
            let range = salary_range.get_or_insert(SalaryRange {
                min: low,
                max: high,
            });
            range.min = range.min.min(low);
            range.max = range.max.max(high);
        }
    }

    industries.sort();
    employment_types.sort();

    FilterOptions {
        industries,
        employment_types,
        salary_range: salary_range.unwrap_or_default(),
    }
}
