pub mod auth_service;
pub mod content;
pub mod markdown;
pub mod password;
pub mod report_document;
