//! Infrastructure layer
//!
//! This module handles external integrations and services:
//! - TUI foundation
//! - CLI argument processing and layered configuration
//! - The remote number API client
//! - Asynchronous command processing

pub mod api;
pub mod api_service;
pub mod cli;
pub mod config;
pub mod tui;
