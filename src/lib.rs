#![forbid(unsafe_code)]

pub mod cache;
pub mod catalog;
pub mod chapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod formats;
pub mod loader;
pub mod logging;
pub mod nav;
pub mod paths;
pub mod validate;
