pub mod cloud_provider;
pub mod commands;
pub mod config;
pub mod error;
pub mod field;
pub mod filter;
pub mod render;
pub mod resource;
pub mod waiter;

#[cfg(test)]
mod testing;
