pub mod auth;
pub mod badge;
pub mod init;
pub mod report;
pub mod tips;
