pub mod auth;
pub mod client;
pub mod content;
pub mod integration;
pub mod job;
pub mod report;
pub mod team;
pub mod template;
pub mod user;
