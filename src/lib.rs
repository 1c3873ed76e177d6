pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod logging;
pub mod priority;
pub mod sql_constants;
pub mod tasks;
pub mod todos;
pub mod web;

#[cfg(test)]
pub mod test_utils;
