pub mod api;
pub mod error;
pub mod state;
pub mod ui;
