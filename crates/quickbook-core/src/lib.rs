//! Configuration loading and shared HTTP plumbing.

pub mod config;
pub mod http;
