pub mod auth;
pub mod candidates;
pub mod dashboard;
pub mod files;
pub mod interviews;
pub mod notes;
pub mod technologies;
