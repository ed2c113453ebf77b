//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod admin_log;
pub mod article;
pub mod notification;
pub mod pagination;
pub mod report;
pub mod stats;
pub mod user;

pub use admin_log::*;
pub use article::*;
pub use notification::*;
pub use pagination::*;
pub use report::*;
pub use stats::*;
pub use user::*;
