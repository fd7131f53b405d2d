pub mod auth;
pub mod logs;
