pub mod export;
pub mod pages;
pub mod router;
pub mod state;
