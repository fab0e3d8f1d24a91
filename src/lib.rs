pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod server;
pub mod validation;

#[cfg(test)]
pub mod testing;
