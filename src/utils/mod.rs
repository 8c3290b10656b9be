//! This module aggregates various utility submodules used throughout the application.

/// Loading of the bot token and the embed/player configuration file.
pub mod config;
