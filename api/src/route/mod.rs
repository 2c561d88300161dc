pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod health;
pub mod history;
pub mod room;
pub mod user;
pub mod v1;
