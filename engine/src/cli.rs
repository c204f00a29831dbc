//! CLI interface for Sisuu
//!
//! This module provides the command-line interface using clap's derive API.
//! It defines all commands and global flags for running the interview service.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sisuu role-profile interview service
///
/// Walks each user through a fixed set of questions over HTTP, then turns the
/// answers into a structured role profile.
#[derive(Parser, Debug)]
#[command(name = "sisuu")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service
    Serve {
        /// Address to bind, overriding the configuration
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding configuration and PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the interview questions in order
    Questions,

    /// Check configuration and secrets
    Doctor,
}
