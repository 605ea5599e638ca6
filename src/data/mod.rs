pub mod chores;
pub mod config;
