pub mod candidate;
pub mod interview;
pub mod note;
pub mod technology;
pub mod user;
