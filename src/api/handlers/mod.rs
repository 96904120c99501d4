pub mod auth;
pub mod client;
pub mod dashboard;
pub mod health;
pub mod integration;
pub mod report;
pub mod team;
pub mod template;
pub mod user;
