//! Error types for Commandeer.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`EngineError`] - Top-level error type for all Commandeer operations
//! - [`AdapterError`] - Errors while binding a method to the command contract
//! - [`InvocationError`] - Errors while resolving arguments or running a method
//! - [`RegistryError`] - Errors from registration, lookup and result conversion

use crate::value::TypeTag;
use thiserror::Error;

/// A boxed error type for failures raised by bound methods.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Commandeer operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A method could not be bound.
    #[error("adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// A registry operation failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A command invocation failed.
    #[error("invocation error: {0}")]
    Invocation(#[from] InvocationError),
}

/// Errors raised while constructing an adapter.
///
/// All of these are detected eagerly, before the adapter can ever be invoked.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The target object reference is absent or no longer alive.
    #[error("target object reference is null")]
    NullTarget,

    /// A non-empty default table does not cover every parameter.
    #[error(
        "parameter count mismatch: defaults must contain all {expected} parameters or be empty, got {actual}"
    )]
    ParameterCountMismatch {
        /// The method's arity.
        expected: usize,
        /// The number of defaults supplied.
        actual: usize,
    },

    /// A default value has the wrong type for its parameter.
    #[error("default value type mismatch for parameter {index} ({name}): expected {expected}, got {actual}")]
    DefaultTypeMismatch {
        /// Zero-based parameter position.
        index: usize,
        /// Parameter name.
        name: String,
        /// The declared parameter type.
        expected: TypeTag,
        /// The type of the supplied default.
        actual: TypeTag,
    },
}

/// Errors raised while executing a command.
#[derive(Error, Debug)]
pub enum InvocationError {
    /// The same argument name was supplied twice in one call.
    #[error("duplicate argument name: {0}")]
    DuplicateArgument(String),

    /// A parameter without a default was not supplied.
    #[error("argument not provided and no default value: {0}")]
    MissingRequiredArgument(String),

    /// A supplied argument has the wrong type.
    #[error("type mismatch for argument '{name}': expected {expected}, got {actual}")]
    ArgumentTypeMismatch {
        /// Parameter name.
        name: String,
        /// The declared parameter type.
        expected: TypeTag,
        /// The type of the supplied value.
        actual: TypeTag,
    },

    /// The target object was dropped after the adapter was built.
    #[error("target object has been released")]
    TargetReleased,

    /// The bound method itself failed. The original error is kept as is.
    #[error(transparent)]
    Method(BoxError),
}

impl InvocationError {
    /// Wrap a method failure.
    pub fn method(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        InvocationError::Method(Box::new(err))
    }
}

/// Errors raised by registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// An empty command name was used.
    #[error("command name cannot be empty")]
    EmptyName,

    /// No command was supplied for registration.
    #[error("cannot register null command: {0}")]
    NullCommand(String),

    /// A command is already registered under this name.
    #[error("command already registered: {0}")]
    DuplicateName(String),

    /// No command is registered under this name.
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// The command result is not of the requested type.
    #[error("type mismatch in command result: expected {expected}, actual return type {actual}")]
    ReturnTypeMismatch {
        /// The requested type.
        expected: TypeTag,
        /// The command's declared return type.
        actual: TypeTag,
    },

    /// The command failed while executing.
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

impl From<BoxError> for InvocationError {
    fn from(err: BoxError) -> Self {
        InvocationError::Method(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("division by zero")]
    struct DivisionByZero;

    #[test]
    fn test_messages_name_the_offender() {
        let err = AdapterError::DefaultTypeMismatch {
            index: 0,
            name: "param1".into(),
            expected: TypeTag::of::<i32>(),
            actual: TypeTag::of::<&str>(),
        };
        assert_eq!(
            err.to_string(),
            "default value type mismatch for parameter 0 (param1): expected i32, got &str"
        );
        assert_eq!(
            RegistryError::CommandNotFound("missing".into()).to_string(),
            "command not found: missing"
        );
        assert_eq!(
            InvocationError::DuplicateArgument("arg1".into()).to_string(),
            "duplicate argument name: arg1"
        );
    }

    #[test]
    fn test_method_error_is_transparent() {
        let err: RegistryError = InvocationError::method(DivisionByZero).into();
        assert_eq!(err.to_string(), "division by zero");

        let RegistryError::Invocation(InvocationError::Method(inner)) = err else {
            panic!("expected a method error");
        };
        assert!(inner.downcast_ref::<DivisionByZero>().is_some());
    }

    #[test]
    fn test_engine_error_wraps_layers() {
        let err: EngineError = AdapterError::NullTarget.into();
        assert!(matches!(err, EngineError::Adapter(AdapterError::NullTarget)));
        assert_eq!(err.to_string(), "adapter error: target object reference is null");
    }
}
