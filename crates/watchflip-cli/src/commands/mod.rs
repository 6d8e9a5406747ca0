pub mod config;
pub mod list;
pub mod movies;
pub mod prompts;
