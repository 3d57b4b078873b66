//! Job search: the query engine, the listing controller owning filter and
//! pagination state, and the card view consumers render from.

pub mod card;
pub mod controller;
pub mod query;
pub mod service;

pub use card::JobCard;
pub use controller::{
    FilterField, JobListingController, ListingError, ListingPhase, PendingQuery,
};
pub use query::{
    FilterOptions, JobFilters, JobPage, JobQueryRequest, PageInfo, SalaryRange, SortBy, SortOrder,
};
pub use service::{JobQueryClient, QueryError, StoreJobQueryService};
