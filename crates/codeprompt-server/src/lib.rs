pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod routes;
pub mod security;
pub mod services;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod utils;
pub mod views;
