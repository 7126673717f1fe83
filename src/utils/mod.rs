pub mod database;
pub mod errors;
pub mod jwt;
pub mod logger;
pub mod response;
