//! Library exports for the habit tracker client, shared between the binary and tests.

pub mod api;
pub mod config;
pub mod models;
pub mod push;
pub mod session;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;

pub use state::HabitClient;
