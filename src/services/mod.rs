pub mod appointment;
pub mod auth;
pub mod chat;
pub mod classifier;
pub mod export;
pub mod faq;
pub mod notify;
