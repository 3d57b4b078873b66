use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::store::domain::{Job, JobStatus, User};
use crate::store::ids::{JobId, UserId};
use crate::store::repository::{EntityStore, StoreError};

/// Platform-wide totals rendered at the top of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_seekers: u64,
    pub total_employers: u64,
    pub total_jobs: u64,
    pub total_unverified_users: u64,
    pub total_verified_users: u64,
}

/// One month of registration and posting activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Month label, e.g. "Mar 2026".
    pub name: String,
    pub seekers: u64,
    pub employers: u64,
    pub jobs: u64,
}

/// How many trailing months the trends feed covers, current month included.
const TREND_MONTHS: u32 = 6;

/// Read-mostly reporting and moderation service behind the admin dashboard.
pub struct DashboardService<S> {
    store: Arc<S>,
}

impl<S> DashboardService<S>
where
    S: EntityStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn stats(&self) -> Result<DashboardStats, StoreError> {
        let users = self.store.users()?;
        let verified = users.iter().filter(|user| user.is_verified).count() as u64;

        Ok(DashboardStats {
            total_seekers: self.store.job_seekers()?.len() as u64,
            total_employers: self.store.employers()?.len() as u64,
            total_jobs: self.store.jobs()?.len() as u64,
            total_unverified_users: users.len() as u64 - verified,
            total_verified_users: verified,
        })
    }

    /// Monthly counts for the trailing six months, oldest first.
    pub fn trends(&self, now: DateTime<Utc>) -> Result<Vec<TrendPoint>, StoreError> {
        let seekers = self.store.job_seekers()?;
        let employers = self.store.employers()?;
        let jobs = self.store.jobs()?;

        let months = trailing_months(now, TREND_MONTHS);
        Ok(months
            .into_iter()
            .map(|(year, month)| TrendPoint {
                name: month_label(year, month),
                seekers: count_in_month(seekers.iter().map(|s| s.created_at), year, month),
                employers: count_in_month(employers.iter().map(|e| e.created_at), year, month),
                jobs: count_in_month(jobs.iter().map(|j| j.created_at), year, month),
            })
            .collect())
    }

    /// Jobs waiting in the moderation queue.
    pub fn pending_jobs(&self) -> Result<Vec<Job>, StoreError> {
        self.store.jobs_with_status(JobStatus::Pending)
    }

    /// Accounts that have not completed verification yet.
    pub fn pending_users(&self) -> Result<Vec<User>, StoreError> {
        self.store.unverified_users()
    }

    /// Moderation action: move a job to a new status (approval opens it).
    pub fn set_job_status(&self, id: &JobId, status: JobStatus) -> Result<Job, StoreError> {
        let job = self.store.set_job_status(id, status)?;
        tracing::info!(job_id = %job.id, status = status.label(), "job status changed");
        Ok(job)
    }

    /// Moderation action: mark a user account as verified.
    pub fn verify_user(&self, id: &UserId) -> Result<User, StoreError> {
        let user = self.store.verify_user(id)?;
        tracing::info!(user_id = %user.id, "user verified");
        Ok(user)
    }
}

/// Year/month pairs for the trailing `count` months ending at `now`,
/// oldest first.
fn trailing_months(now: DateTime<Utc>, count: u32) -> Vec<(i32, u32)> {
    let mut year = now.year();
    let mut month = now.month();
    let mut months = Vec::with_capacity(count as usize);

    for _ in 0..count {
        months.push((year, month));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }

    months.reverse();
    months
}

fn month_label(year: i32, month: u32) -> String {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    format!("{} {year}", NAMES[(month - 1) as usize])
}

fn count_in_month(
    timestamps: impl Iterator<Item = DateTime<Utc>>,
    year: i32,
    month: u32,
) -> u64 {
    timestamps
        .filter(|at| at.year() == year && at.month() == month)
        .count() as u64
}
