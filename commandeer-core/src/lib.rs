//! # commandeer-core
//!
//! Core traits and values for the Commandeer command-dispatch engine.
//!
//! This crate has minimal dependencies and is designed to be imported by code
//! that implements or consumes commands without needing the adapter and
//! registry from `commandeer-std`.
//!
//! # Building Blocks
//!
//! ## [`Value`] and [`TypeTag`]
//!
//! Every argument, default and result is carried as a type-erased [`Value`].
//! Recovering the concrete type is always an explicit, fallible downcast;
//! [`TypeTag`] identifies types for the check and for diagnostics.
//!
//! ## [`Arguments`]
//!
//! An ordered list of `(name, value)` pairs. Call arguments are bound by name,
//! so their order is irrelevant; default tables use the order to fix the
//! parameter order. The [`args!`] macro builds one inline.
//!
//! ## [`Command`]
//!
//! The uniform invocation contract: `execute` plus signature introspection.
//! [`CommandInfo`] is a detached copy of that signature.
//!
//! # Error Types
//!
//! - [`EngineError`] - Top-level error type
//! - [`AdapterError`] - Construction-time failures
//! - [`InvocationError`] - Call-time failures
//! - [`RegistryError`] - Registration and lookup failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod arguments;
mod command;
mod error;
mod value;

// Re-exports
pub use arguments::{Argument, Arguments};
pub use command::{BoxCommand, Command, CommandInfo};
pub use error::{AdapterError, BoxError, EngineError, InvocationError, RegistryError};
pub use value::{TypeTag, Value};
