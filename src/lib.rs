pub mod airtable;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod mapping;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
pub mod testing;
