//! Core CHAIN_CORE library (terminal session, providers, blog store, config).

pub mod blog;
pub mod commands;
pub mod config;
pub mod contact;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod transcript;
