use std::future::Future;
use std::sync::Arc;

use crate::store::repository::{EntityStore, StoreError};

use super::query::{self, JobPage, JobQueryRequest};

/// Error raised while resolving a job query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("job query backend unavailable: {0}")]
    Backend(String),
    #[error("job search timed out, try again")]
    TimedOut,
}

/// Anything the listing controller can fetch job pages from. The HTTP client
/// in a browser deployment and the in-process service both satisfy this.
pub trait JobQueryClient {
    fn fetch(
        &self,
        request: JobQueryRequest,
    ) -> impl Future<Output = Result<JobPage, QueryError>> + Send;
}

impl<T> JobQueryClient for Arc<T>
where
    T: JobQueryClient + Send + Sync,
{
    fn fetch(
        &self,
        request: JobQueryRequest,
    ) -> impl Future<Output = Result<JobPage, QueryError>> + Send {
        (**self).fetch(request)
    }
}

/// Resolves queries directly against the entity store.
pub struct StoreJobQueryService<S> {
    store: Arc<S>,
}

impl<S> StoreJobQueryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> StoreJobQueryService<S>
where
    S: EntityStore,
{
    pub fn run(&self, request: &JobQueryRequest) -> Result<JobPage, QueryError> {
        let jobs = self.store.jobs()?;
        Ok(query::execute(&jobs, request))
    }
}

impl<S> JobQueryClient for StoreJobQueryService<S>
where
    S: EntityStore + 'static,
{
    fn fetch(
        &self,
        request: JobQueryRequest,
    ) -> impl Future<Output = Result<JobPage, QueryError>> + Send {
        let outcome = self.run(&request);
        async move { outcome }
    }
}
