//! Runtime wiring
//!
//! - [`runtime::Runtime`] owns the state and the message/command queues
//! - [`renderer::Renderer`] draws the state through a [`crate::infrastructure::tui::TuiLike`]
//! - [`app_runner::AppRunner`] is the event loop tying terminal, runtime and ApiService together

pub mod app_runner;
pub mod renderer;
pub mod runtime;
