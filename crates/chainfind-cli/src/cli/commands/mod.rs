pub mod chat;
pub mod config;
pub mod posts;
pub mod serve;
