//! Command-line interface
//!
//! `clap` argument definitions and the command handlers behind them.

pub mod args;
pub mod commands;
