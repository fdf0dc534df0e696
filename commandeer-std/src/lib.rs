//! # commandeer-std
//!
//! Standard implementations for the Commandeer command-dispatch engine.
//!
//! This crate provides:
//! - **Method adapters**: [`Adapter`](adapter::Adapter) binds a typed method on
//!   a shared target to the [`Command`](commandeer_core::Command) contract
//! - **Registry**: [`Registry`](registry::Registry) owns commands and
//!   dispatches them by name
//! - **Tracing**: [`TracedCommand`](traced::TracedCommand) wraps a command in a
//!   span when the `tracing` feature is enabled
//! - **Testing utilities**: recording and canned commands in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use commandeer_core;

// Modules
pub mod adapter;
pub mod registry;
pub mod testing;
pub mod traced;
