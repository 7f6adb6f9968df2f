mod app;
mod config;
mod effects;
mod ui;

pub use app::run_app;
