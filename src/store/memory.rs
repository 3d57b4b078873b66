use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::domain::{
    Admin, AdminDraft, Employer, EmployerDraft, Job, JobSeeker, JobSeekerDraft, JobStatus, NewJob,
    NewUser, Role, User,
};
use super::ids::{AdminId, EmployerId, JobId, JobSeekerId, UserId};
use super::repository::{EntityStore, StoreError};

/// In-memory entity store. All maps live behind one mutex so cross-entity
/// integrity checks (role references, the one-profile-per-user rule) observe
/// a consistent snapshot.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: BTreeMap<UserId, User>,
    seekers: BTreeMap<JobSeekerId, JobSeeker>,
    employers: BTreeMap<EmployerId, Employer>,
    admins: BTreeMap<AdminId, Admin>,
    jobs: BTreeMap<JobId, Job>,
    /// user -> owning profile, enforcing the profile XOR rule.
    profiles: BTreeMap<UserId, Role>,
}

impl Inner {
    fn user_with_role(&self, id: &UserId, expected: Role) -> Result<&User, StoreError> {
        let user = self.users.get(id).ok_or(StoreError::UnknownUser(*id))?;
        if user.role != expected {
            return Err(StoreError::InvalidReference {
                expected,
                found: user.role,
            });
        }
        Ok(user)
    }

    fn claim_profile(&mut self, user_id: UserId, role: Role) -> Result<(), StoreError> {
        if self.profiles.contains_key(&user_id) {
            return Err(StoreError::ProfileExists(user_id));
        }
        self.profiles.insert(user_id, role);
        Ok(())
    }
}

fn lock_poisoned() -> StoreError {
    StoreError::Unavailable("store mutex poisoned".to_string())
}

/// Timestamps are assigned by the store and kept monotonic per entity.
fn touched(created_at: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(created_at)
}

impl EntityStore for MemoryStore {
    fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        let email = user.email.trim().to_ascii_lowercase();
        if inner
            .users
            .values()
            .any(|existing| existing.email == email)
        {
            return Err(StoreError::DuplicateEmail(email));
        }

        let now = Utc::now();
        let stored = User {
            id: UserId::generate(),
            email,
            password_hash: user.password_hash,
            is_verified: false,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner.users.get(id).cloned())
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        let needle = email.trim().to_ascii_lowercase();
        Ok(inner
            .users
            .values()
            .find(|user| user.email == needle)
            .cloned())
    }

    fn verify_user(&self, id: &UserId) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        let user = inner
            .users
            .get_mut(id)
            .ok_or(StoreError::UnknownUser(*id))?;
        if !user.is_verified {
            user.is_verified = true;
            user.updated_at = touched(user.created_at);
        }
        Ok(user.clone())
    }

    fn unverified_users(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner
            .users
            .values()
            .filter(|user| !user.is_verified)
            .cloned()
            .collect())
    }

    fn users(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner.users.values().cloned().collect())
    }

    fn create_job_seeker(&self, draft: JobSeekerDraft) -> Result<JobSeeker, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        inner.user_with_role(&draft.user_id, Role::JobSeeker)?;
        inner.claim_profile(draft.user_id, Role::JobSeeker)?;

        let now = Utc::now();
        let seeker = JobSeeker {
            id: JobSeekerId::generate(),
            user_id: draft.user_id,
            basic_info: draft.basic_info,
            location: draft.location,
            disability: draft.disability,
            work_preferences: draft.work_preferences,
            additional_info: draft.additional_info,
            created_at: now,
            updated_at: now,
        };
        inner.seekers.insert(seeker.id, seeker.clone());
        Ok(seeker)
    }

    fn job_seekers(&self) -> Result<Vec<JobSeeker>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner.seekers.values().cloned().collect())
    }

    fn create_employer(&self, draft: EmployerDraft) -> Result<Employer, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        inner.user_with_role(&draft.user_id, Role::Employer)?;
        inner.claim_profile(draft.user_id, Role::Employer)?;

        let now = Utc::now();
        let employer = Employer {
            id: EmployerId::generate(),
            user_id: draft.user_id,
            basic_info: draft.basic_info,
            location: draft.location,
            company: draft.company,
            contact: draft.contact,
            posting_template: draft.posting_template,
            pwd_support: draft.pwd_support,
            created_at: now,
            updated_at: now,
        };
        inner.employers.insert(employer.id, employer.clone());
        Ok(employer)
    }

    fn employer(&self, id: &EmployerId) -> Result<Option<Employer>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner.employers.get(id).cloned())
    }

    fn employers(&self) -> Result<Vec<Employer>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner.employers.values().cloned().collect())
    }

    fn create_admin(&self, draft: AdminDraft) -> Result<Admin, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        inner.user_with_role(&draft.user_id, Role::Admin)?;
        inner.claim_profile(draft.user_id, Role::Admin)?;

        let now = Utc::now();
        let admin = Admin {
            id: AdminId::generate(),
            user_id: draft.user_id,
            permissions: draft.permissions,
            access_level: draft.access_level,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        inner.admins.insert(admin.id, admin.clone());
        Ok(admin)
    }

    fn admin_for_user(&self, user_id: &UserId) -> Result<Option<Admin>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner
            .admins
            .values()
            .find(|admin| admin.user_id == *user_id)
            .cloned())
    }

    fn record_admin_login(
        &self,
        user_id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        let admin = inner
            .admins
            .values_mut()
            .find(|admin| admin.user_id == *user_id)
            .ok_or(StoreError::UnknownUser(*user_id))?;
        admin.last_login = Some(at);
        admin.updated_at = touched(admin.created_at);
        Ok(())
    }

    fn create_job(&self, job: NewJob) -> Result<Job, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        if !inner.employers.contains_key(&job.employer_id) {
            return Err(StoreError::UnknownEmployer(job.employer_id));
        }

        let now = Utc::now();
        let stored = Job {
            id: JobId::generate(),
            job_title: job.job_title,
            job_description: job.job_description,
            company: job.company,
            job_location: job.job_location,
            employment_type: job.employment_type,
            industry: job.industry,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            key_skills: job.key_skills,
            status: JobStatus::Pending,
            created_at: now,
            updated_at: now,
            employer_id: job.employer_id,
        };
        inner.jobs.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn job(&self, id: &JobId) -> Result<Option<Job>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner.jobs.get(id).cloned())
    }

    fn set_job_status(&self, id: &JobId, status: JobStatus) -> Result<Job, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        let job = inner.jobs.get_mut(id).ok_or(StoreError::UnknownJob(*id))?;
        job.status = status;
        job.updated_at = touched(job.created_at);
        Ok(job.clone())
    }

    fn jobs(&self) -> Result<Vec<Job>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner.jobs.values().cloned().collect())
    }

    fn jobs_with_status(&self, status: JobStatus) -> Result<Vec<Job>, StoreError> {
        let inner = self.inner.lock().map_err(|_| lock_poisoned())?;
        Ok(inner
            .jobs
            .values()
            .filter(|job| job.status == status)
            .cloned()
            .collect())
    }
}
