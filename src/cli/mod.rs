//! CLI module - Command-line interface for anninfo
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// anninfo - Anime encyclopedia metadata extractor
/// Looks up titles, extracts their encyclopedia entries and keeps a catalog
#[derive(Parser)]
#[command(name = "anninfo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a title, fetching it if the catalog has no complete record
    #[command(alias = "l")]
    Lookup {
        /// Title to look up
        #[arg(required = true)]
        title: Vec<String>,
        /// Fetch again even if the cached record is complete
        #[arg(long)]
        refresh: bool,
    },

    /// Show a cataloged record
    #[command(alias = "i", alias = "info")]
    Show {
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// List cataloged records by season
    #[command(alias = "ls")]
    List {
        /// Only show records with missing fields
        #[arg(long)]
        incomplete: bool,
    },

    /// Re-fetch every incomplete record
    Refresh,

    /// Extract a record from a saved page without touching the network
    Extract {
        /// Path to the saved page
        file: String,
        /// Title to store the record under
        #[arg(long)]
        title: String,
        /// Source link to record
        #[arg(long, default_value = "")]
        link: String,
        /// Add the record to the catalog
        #[arg(long)]
        save: bool,
    },

    /// Normalize a date or "<term> <year>" into a season
    Season {
        #[arg(required = true)]
        date: Vec<String>,
    },

    /// Render the synopsis table for a cataloged record
    Synopsis {
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Remove a record from the catalog
    #[command(alias = "rm")]
    Remove {
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
