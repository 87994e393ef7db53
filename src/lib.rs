//! # numdash - Random Number Dashboard
//!
//! A terminal dashboard that lists, charts and generates random integers served by a
//! remote HTTP API, built with Rust and Ratatui.
//! This library implements an Elm-like architecture for predictable state management.
//!
//! ## Architecture Overview
//!
//! - **Model** (`state`): The view-model for the list, chart, generation and modal
//! - **Message** (`msg`): Events that can change the state
//! - **Update** (`update`): Pure functions that transform state
//! - **Command** (`cmd`): Side effects (HTTP requests, logging, terminal control)
//! - **View** (`presentation`): UI rendering based on current state
//!
//! ## Example Usage
//!
//! ```rust
//! use numdash::core::{msg::{list::ListMsg, Msg}, state::AppState, update::update};
//!
//! let state = AppState::default();
//!
//! // Loading the first page issues a list request tagged with a sequence number
//! let (state, commands) = update(Msg::List(ListMsg::Load), state);
//!
//! assert!(state.list.is_loading());
//! assert_eq!(commands.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - State, messages, commands and the update function
//! - [`domain`] - Records, pagination math, chart series and request sequencing
//! - [`infrastructure`] - HTTP client, background API service, config, CLI, terminal
//! - [`presentation`] - Widgets and the dashboard screen
//! - [`integration`] - Runtime and the main event loop

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod presentation;
pub mod utils;

pub use crate::core::{cmd::Cmd, msg::Msg, raw_msg::RawMsg, state::AppState, update::update};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
