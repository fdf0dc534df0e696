//! # commandeer - Name-Addressed Command Dispatch
//!
//! `commandeer` turns ordinary methods into commands that can be looked up by
//! name and called with named, dynamically typed arguments.
//!
//! An [`Adapter`] binds one method on one shared target object. Parameter
//! names and optional default values come from a default table; call
//! arguments are matched by name and type-checked before the method runs.
//! A [`Registry`] owns adapters (or any other [`Command`]) under unique names
//! and dispatches to them.
//!
//! ## Quick Start
//!
//! ```rust
//! use commandeer::prelude::*;
//! use std::sync::Arc;
//!
//! struct Subject;
//!
//! impl Subject {
//!     fn f3(&mut self, arg1: i32, arg2: i32) -> i32 {
//!         arg1 * arg2
//!     }
//! }
//!
//! let subject = shared(Subject);
//! let mut registry = Registry::new();
//! registry
//!     .register_method(
//!         "command1",
//!         Arc::downgrade(&subject),
//!         Subject::f3,
//!         args! { "arg1" => 0, "arg2" => 0 },
//!     )
//!     .unwrap();
//!
//! let product: i32 = registry
//!     .execute_as("command1", args! { "arg1" => 4, "arg2" => 5 })
//!     .unwrap();
//! assert_eq!(product, 20);
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): registry and [`TracedCommand`] emit `tracing` events.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use commandeer_core::{
    // Arguments
    Argument,
    Arguments,
    // Command
    BoxCommand,
    Command,
    CommandInfo,
    // Error types
    AdapterError,
    BoxError,
    EngineError,
    InvocationError,
    RegistryError,
    // Values
    TypeTag,
    Value,
    args,
};

// Adapters
pub use commandeer_std::adapter::{Adapter, Fallible, Method, Target, shared};

// Registry
pub use commandeer_std::registry::{Registry, RegistryBuilder};

// Tracing
pub use commandeer_std::traced::TracedCommand;

/// Method binding support module.
pub mod adapter {
    pub use commandeer_std::adapter::{Adapter, Fallible, Method, Mut, Ref, Slots, Target, shared};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use commandeer_std::testing::*;
}

/// Prelude module - common imports for Commandeer.
///
/// # Usage
///
/// ```rust
/// use commandeer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Binding
        Adapter,
        // Values and arguments
        Arguments,
        // Core trait
        Command,
        // Errors
        EngineError,
        Fallible,
        InvocationError,
        // Dispatch
        Registry,
        RegistryError,
        Value,
        args,
        shared,
    };
}
