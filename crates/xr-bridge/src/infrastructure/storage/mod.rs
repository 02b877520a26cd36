//! Persistent storage for the bridge.  Currently only the TOML config file.

pub mod config;
