//! Testing utilities for Commandeer.
//!
//! This module provides commands with predictable behaviour for testing
//! registries, wrappers and dispatch code without binding real objects.
//!
//! # Features
//!
//! - [`RecordingCommand`]: Wraps a command and records the argument names of every call
//! - [`FixedCommand`]: A zero-parameter command that always returns the same value
//! - [`FailingCommand`]: A zero-parameter command that always fails

use commandeer_core::{Arguments, Command, InvocationError, TypeTag, Value};
use parking_lot::Mutex;
use std::{any::Any, sync::Arc};

// ============================================================================
// Recording Command
// ============================================================================

/// A command that records the argument names of every call before
/// delegating to an inner command.
///
/// Clones share the same recording.
///
/// # Example
///
/// ```rust
/// use commandeer_core::{args, Command};
/// use commandeer_std::testing::{FixedCommand, RecordingCommand};
///
/// let recorder = RecordingCommand::new(FixedCommand::new(1));
/// let probe = recorder.clone();
///
/// recorder.execute(args! { "a" => 1 }).unwrap();
/// assert_eq!(probe.calls(), vec![vec!["a".to_string()]]);
/// ```
pub struct RecordingCommand<C> {
    inner: Arc<C>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl<C: Command> RecordingCommand<C> {
    /// Wrap `inner`.
    pub fn new(inner: C) -> Self {
        Self {
            inner: Arc::new(inner),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Argument names of every recorded call, oldest first.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forget all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl<C> Clone for RecordingCommand<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<C: Command> Command for RecordingCommand<C> {
    fn execute(&self, args: Arguments) -> Result<Value, InvocationError> {
        self.calls
            .lock()
            .push(args.names().map(str::to_owned).collect());
        self.inner.execute(args)
    }

    fn param_names(&self) -> &[String] {
        self.inner.param_names()
    }

    fn param_types(&self) -> &[TypeTag] {
        self.inner.param_types()
    }

    fn return_type(&self) -> TypeTag {
        self.inner.return_type()
    }
}

// ============================================================================
// Fixed Command
// ============================================================================

/// A zero-parameter command that returns a clone of the same value on every
/// call. Arguments are ignored.
#[derive(Debug, Clone)]
pub struct FixedCommand<T> {
    value: T,
}

impl<T: Any + Clone + Send + Sync> FixedCommand<T> {
    /// Create a command returning `value`.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Any + Clone + Send + Sync> Command for FixedCommand<T> {
    fn execute(&self, _args: Arguments) -> Result<Value, InvocationError> {
        Ok(Value::new(self.value.clone()))
    }

    fn param_names(&self) -> &[String] {
        &[]
    }

    fn param_types(&self) -> &[TypeTag] {
        &[]
    }

    fn return_type(&self) -> TypeTag {
        TypeTag::of::<T>()
    }
}

// ============================================================================
// Failing Command
// ============================================================================

/// A zero-parameter command whose every call fails with
/// [`InvocationError::Method`] carrying the given message.
#[derive(Debug, Clone)]
pub struct FailingCommand {
    message: String,
}

impl FailingCommand {
    /// Create a command failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Command for FailingCommand {
    fn execute(&self, _args: Arguments) -> Result<Value, InvocationError> {
        Err(InvocationError::Method(self.message.clone().into()))
    }

    fn param_names(&self) -> &[String] {
        &[]
    }

    fn param_types(&self) -> &[TypeTag] {
        &[]
    }

    fn return_type(&self) -> TypeTag {
        TypeTag::of::<()>()
    }
}
