//! Persisted entities and the reference-checked store they live in.

pub mod domain;
pub mod ids;
pub mod memory;
pub mod repository;

pub use domain::{
    AccessLevel, Admin, AdminDraft, BasicInfo, CompanyInfo, ContactPerson, DisabilityInfo,
    Employer, EmployerDraft, Gender, Job, JobPostingTemplate, JobSeeker,
    JobSeekerAdditionalInfo, JobSeekerDraft, JobStatus, LocationInfo, NewJob, NewUser,
    PwdSupport, Role, User, ValidationError, WorkPreferences,
};
pub use ids::{AdminId, EmployerId, JobId, JobSeekerId, UserId};
pub use memory::MemoryStore;
pub use repository::{EntityStore, StoreError};
