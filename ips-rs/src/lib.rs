//! ips-rs library
//!
//! This library provides the command implementations behind the ips-rs CLI.

pub mod cli;
pub mod commands;
pub mod utils;
