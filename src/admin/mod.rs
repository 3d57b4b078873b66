//! Admin surface: credential/session lifecycle and the moderation dashboard.

pub mod dashboard;
pub mod session;

pub use dashboard::{DashboardService, DashboardStats, TrendPoint};
pub use session::{
    AdminRegistration, AuthError, RegistrationError, Session, SessionService, SessionToken,
};
