pub mod auth;
pub mod booking;
pub mod package;
pub mod portfolio;
pub mod user;
