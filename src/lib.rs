//! fintrack - Terminal client for a personal finance tracker
//!
//! This library provides the client side of an expense and budget tracker:
//! users sign in, record expenses against a fixed set of categories, set
//! monthly budgets (per category or overall) and review month summaries and
//! reports. All data lives behind a remote HTTP backend; this crate talks to
//! it and to the identity service that issues bearer tokens.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, path management and logging setup
//! - `error`: Custom error types
//! - `models`: Data models (money, months, categories, expenses, budgets, summaries)
//! - `api`: HTTP client for the backend and its response envelope
//! - `session`: Identity service client, token refresh and session persistence
//! - `services`: Business logic over the API client
//! - `reports`: Derived figures for the dashboard and reports screens
//! - `display`: Terminal formatting for CLI output
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{paths::TrackerPaths, settings::Settings};
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod tui;

pub use error::{TrackerError, TrackerResult};
