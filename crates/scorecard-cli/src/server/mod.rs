//! Local web UI: upload form, results page, JSON API, and browser heartbeat.

pub mod app;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod page;
pub mod state;
