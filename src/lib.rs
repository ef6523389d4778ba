//! mig library - multi-backend database administration
//!
//! Provides the driver registry, connection descriptors, sessions and result
//! materialization behind the `mig` CLI, plus its command execution and
//! output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod output;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
