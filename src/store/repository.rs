use super::domain::{
    Admin, AdminDraft, Employer, EmployerDraft, Job, JobSeeker, JobSeekerDraft, JobStatus, NewJob,
    NewUser, Role, User,
};
use super::ids::{EmployerId, JobId, UserId};

/// Storage abstraction so services and the query engine can be exercised
/// against an in-memory implementation in tests.
///
/// Reference integrity is the store's job: every create checks that the
/// entities a draft points at exist and carry the expected role, and a user
/// holds at most one role profile.
pub trait EntityStore: Send + Sync {
    fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
    fn user(&self, id: &UserId) -> Result<Option<User>, StoreError>;
    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Flips `is_verified` false -> true. Idempotent for already-verified users.
    fn verify_user(&self, id: &UserId) -> Result<User, StoreError>;
    fn unverified_users(&self) -> Result<Vec<User>, StoreError>;
    fn users(&self) -> Result<Vec<User>, StoreError>;

    fn create_job_seeker(&self, draft: JobSeekerDraft) -> Result<JobSeeker, StoreError>;
    fn job_seekers(&self) -> Result<Vec<JobSeeker>, StoreError>;

    fn create_employer(&self, draft: EmployerDraft) -> Result<Employer, StoreError>;
    fn employer(&self, id: &EmployerId) -> Result<Option<Employer>, StoreError>;
    fn employers(&self) -> Result<Vec<Employer>, StoreError>;

    fn create_admin(&self, draft: AdminDraft) -> Result<Admin, StoreError>;
    fn admin_for_user(&self, user_id: &UserId) -> Result<Option<Admin>, StoreError>;
    fn record_admin_login(
        &self,
        user_id: &UserId,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), StoreError>;

    /// Publishes a job under an existing employer. New jobs enter the
    /// `Pending` moderation queue.
    fn create_job(&self, job: NewJob) -> Result<Job, StoreError>;
    fn job(&self, id: &JobId) -> Result<Option<Job>, StoreError>;
    fn set_job_status(&self, id: &JobId, status: JobStatus) -> Result<Job, StoreError>;
    fn jobs(&self) -> Result<Vec<Job>, StoreError>;
    fn jobs_with_status(&self, status: JobStatus) -> Result<Vec<Job>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("user {0} already has a role profile")]
    ProfileExists(UserId),
    #[error("referenced user must have role {}, found {}", .expected.label(), .found.label())]
    InvalidReference { expected: Role, found: Role },
    #[error("user not found: {0}")]
    UnknownUser(UserId),
    #[error("employer not found: {0}")]
    UnknownEmployer(EmployerId),
    #[error("job not found: {0}")]
    UnknownJob(JobId),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
