//! Tracing wrapper for command observation.

use commandeer_core::{Arguments, Command, InvocationError, TypeTag, Value};

/// A command that runs its inner command inside a `command` span.
///
/// Without the `tracing` feature this is a plain pass-through.
pub struct TracedCommand<C> {
    inner: C,
    name: String,
}

impl<C: Command> TracedCommand<C> {
    /// Wrap `inner`, recording `name` on every span.
    pub fn new(name: impl Into<String>, inner: C) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }

    /// The name recorded on spans.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unwrap the inner command.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Command> Command for TracedCommand<C> {
    #[cfg(feature = "tracing")]
    fn execute(&self, args: Arguments) -> Result<Value, InvocationError> {
        let span = tracing::info_span!("command", name = %self.name);
        let _enter = span.enter();

        tracing::trace!(args = args.len(), "executing");
        let result = self.inner.execute(args);
        match &result {
            Ok(value) => tracing::trace!(returned = %value.type_tag(), "completed"),
            Err(err) => tracing::warn!(error = %err, "failed"),
        }
        result
    }

    #[cfg(not(feature = "tracing"))]
    fn execute(&self, args: Arguments) -> Result<Value, InvocationError> {
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

impl<C> std::fmt::Debug for TracedCommand<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracedCommand")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingCommand, RecordingCommand};
    use commandeer_core::args;

    #[test]
    fn test_delegates_signature_and_calls() {
        let recorder = RecordingCommand::new(crate::testing::FixedCommand::new(3_u8));
        let traced = TracedCommand::new("three", recorder.clone());

        assert_eq!(traced.name(), "three");
        assert!(traced.param_names().is_empty());
        assert_eq!(traced.return_type(), TypeTag::of::<u8>());

        let value = traced.execute(args! { "x" => 1 }).unwrap();
        assert_eq!(value.downcast_ref::<u8>(), Some(&3));
        assert_eq!(recorder.calls(), vec![vec!["x".to_string()]]);
    }

    #[test]
    fn test_errors_pass_through() {
        let traced = TracedCommand::new("broken", FailingCommand::new("nope"));
        let err = traced.execute(args! {}).unwrap_err();
        assert_eq!(err.to_string(), "nope");
        let inner: FailingCommand = traced.into_inner();
        assert_eq!(inner.message(), "nope");
    }
}
