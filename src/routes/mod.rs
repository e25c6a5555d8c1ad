pub mod auth;
pub mod dashboard;
pub mod education;
pub mod experience;
pub mod message;
pub mod project;
pub mod review;

mod crud;
