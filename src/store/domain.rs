use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AdminId, EmployerId, JobId, JobSeekerId, UserId};

/// Role a platform account was registered with. Exactly one role-specific
/// profile may exist per account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    JobSeeker,
    Employer,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::JobSeeker => "jobseeker",
            Role::Employer => "employer",
            Role::Admin => "admin",
        }
    }
}

/// Platform account. The password is only ever stored hashed, and the hash
/// never leaves the service over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_verified: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration input for a platform account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Personal details owned by exactly one seeker or employer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub age: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub country: String,
    pub city: String,
    pub postal: String,
    pub address: String,
}

/// Optional disability disclosure on a seeker profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisabilityInfo {
    pub disability_type: String,
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPreferences {
    /// Ordered by preference. Must be non-empty when preferences are given.
    pub preferred_job_titles: Vec<String>,
    pub industry: Option<String>,
    pub employment_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSeekerAdditionalInfo {
    pub profile_picture_url: Option<String>,
    pub resume_url: Option<String>,
}

/// Aggregate profile for a job seeker account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSeeker {
    pub id: JobSeekerId,
    pub user_id: UserId,
    pub basic_info: BasicInfo,
    pub location: Option<LocationInfo>,
    pub disability: Option<DisabilityInfo>,
    pub work_preferences: Option<WorkPreferences>,
    pub additional_info: Option<JobSeekerAdditionalInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a seeker profile against an existing account.
#[derive(Debug, Clone)]
pub struct JobSeekerDraft {
    pub user_id: UserId,
    pub basic_info: BasicInfo,
    pub location: Option<LocationInfo>,
    pub disability: Option<DisabilityInfo>,
    pub work_preferences: Option<WorkPreferences>,
    pub additional_info: Option<JobSeekerAdditionalInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub company_name: String,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPerson {
    pub full_name: String,
    pub phone_number: Option<String>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub linked_in: Option<String>,
}

/// Employer-side template describing the roles a company usually hires for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingTemplate {
    pub job_titles: Vec<String>,
    pub employment_type: Option<String>,
    pub locations: Vec<String>,
}

/// Disability-inclusion commitments advertised by an employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PwdSupport {
    pub accessibility_features: Option<String>,
    pub remote_work_options: bool,
    pub support_programs: Option<String>,
    pub additional_info: Option<String>,
}

/// Aggregate profile for an employer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employer {
    pub id: EmployerId,
    pub user_id: UserId,
    pub basic_info: BasicInfo,
    pub location: Option<LocationInfo>,
    pub company: Option<CompanyInfo>,
    pub contact: Option<ContactPerson>,
    pub posting_template: Option<JobPostingTemplate>,
    pub pwd_support: Option<PwdSupport>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an employer profile against an existing account.
#[derive(Debug, Clone)]
pub struct EmployerDraft {
    pub user_id: UserId,
    pub basic_info: BasicInfo,
    pub location: Option<LocationInfo>,
    pub company: Option<CompanyInfo>,
    pub contact: Option<ContactPerson>,
    pub posting_template: Option<JobPostingTemplate>,
    pub pwd_support: Option<PwdSupport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Superadmin,
    Moderator,
}

/// Admin profile with moderation permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: AdminId,
    pub user_id: UserId,
    pub permissions: Vec<String>,
    pub access_level: AccessLevel,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn default_permissions() -> Vec<String> {
        ["manage_users", "manage_jobs", "manage_employers"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct AdminDraft {
    pub user_id: UserId,
    pub permissions: Vec<String>,
    pub access_level: AccessLevel,
}

/// Lifecycle of a published job listing. Employer-created jobs start
/// `Pending` and only reach seeker-facing listings once an admin opens them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Open,
    Closed,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Open => "Open",
            JobStatus::Closed => "Closed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(JobStatus::Pending),
            "open" => Some(JobStatus::Open),
            "closed" => Some(JobStatus::Closed),
            _ => None,
        }
    }
}

/// A published job listing as consumed by search and the job card view.
/// The company name is denormalized onto the record so listing pages never
/// join back to the employer aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub job_title: String,
    pub job_description: String,
    pub company: String,
    pub job_location: String,
    pub employment_type: String,
    pub industry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<u32>,
    pub key_skills: Vec<String>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub employer_id: EmployerId,
}

/// Input for publishing a job under an existing employer.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub job_title: String,
    pub job_description: String,
    pub company: String,
    pub job_location: String,
    pub employment_type: String,
    pub industry: String,
    pub salary_min: Option<u32>,
    pub salary_max: Option<u32>,
    pub key_skills: Vec<String>,
    pub employer_id: EmployerId,
}

/// Field-level validation failures surfaced inline to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} must not be empty")]
    EmptyList { field: &'static str },
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password must be at least 8 characters")]
    WeakPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("salaryMin must not exceed salaryMax")]
    InvertedSalaryRange,
    #[error("status is not a recognized job status")]
    InvalidStatus,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "email" });
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

impl BasicInfo {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "firstName" });
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "lastName" });
        }
        Ok(())
    }
}

impl WorkPreferences {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.preferred_job_titles.is_empty() {
            return Err(ValidationError::EmptyList {
                field: "preferredJobTitles",
            });
        }
        Ok(())
    }
}

impl JobSeekerDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.basic_info.validate()?;
        if let Some(preferences) = &self.work_preferences {
            preferences.validate()?;
        }
        Ok(())
    }
}

impl EmployerDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.basic_info.validate()?;
        if let Some(company) = &self.company {
            if company.company_name.trim().is_empty() {
                return Err(ValidationError::MissingField {
                    field: "companyName",
                });
            }
        }
        if let Some(contact) = &self.contact {
            if contact.full_name.trim().is_empty() {
                return Err(ValidationError::MissingField { field: "fullName" });
            }
        }
        if let Some(template) = &self.posting_template {
            if template.job_titles.is_empty() {
                return Err(ValidationError::EmptyList { field: "jobTitles" });
            }
            if template.locations.is_empty() {
                return Err(ValidationError::EmptyList { field: "locations" });
            }
        }
        Ok(())
    }
}

impl NewJob {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.job_title.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "jobTitle" });
        }
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                return Err(ValidationError::InvertedSalaryRange);
            }
        }
        Ok(())
    }
}
