//! Name-keyed command registry.
//!
//! [`Registry`] owns every registered [`Command`] and dispatches calls to them
//! by name. Names are unique and registration never overwrites: once a name is
//! taken it stays bound to the same command until [`Registry::clear`].
//!
//! The registry does no locking of its own. Mutation goes through `&mut self`;
//! wrap it in a mutex to share it between threads.

use crate::adapter::{Adapter, Method};
use crate::traced::TracedCommand;
use commandeer_core::{
    Arguments, BoxCommand, Command, CommandInfo, EngineError, RegistryError, TypeTag, Value,
};
use parking_lot::RwLock;
use std::{any::Any, collections::HashMap, fmt, sync::Weak};

/// Owner and dispatcher of named commands.
#[derive(Default)]
pub struct Registry {
    commands: HashMap<String, BoxCommand>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Register `command` under `name`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::EmptyName`] or [`RegistryError::DuplicateName`]. On
    /// failure the registry is left unchanged and `command` is dropped.
    pub fn register<C: Command>(&mut self, command: C, name: &str) -> Result<(), RegistryError> {
        self.insert(Box::new(command), name)
    }

    /// Register an optional boxed command under `name`.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NullCommand`] if `command` is `None`, then the same
    /// conditions as [`register`](Registry::register).
    pub fn register_boxed(
        &mut self,
        command: Option<BoxCommand>,
        name: &str,
    ) -> Result<(), RegistryError> {
        let Some(command) = command else {
            return Err(RegistryError::NullCommand(name.to_owned()));
        };
        self.insert(command, name)
    }

    /// Bind `method` on `target` and register the resulting adapter.
    ///
    /// The name is checked before the adapter is built.
    pub fn register_method<T, M, Marker>(
        &mut self,
        name: &str,
        target: Weak<RwLock<T>>,
        method: M,
        defaults: Arguments,
    ) -> Result<(), EngineError>
    where
        T: Send + Sync + 'static,
        M: Method<T, Marker>,
        M::Output: Any + Clone + Send + Sync,
        Marker: 'static,
    {
        self.check_vacant(name)?;
        let adapter = Adapter::new(target, method, defaults)?;
        self.insert(Box::new(adapter), name)?;
        Ok(())
    }

    /// Run the command registered under `name`.
    ///
    /// Errors raised by the command are returned unchanged inside
    /// [`RegistryError::Invocation`].
    pub fn execute(&self, name: &str, args: Arguments) -> Result<Value, RegistryError> {
        let command = self.lookup(name)?;
        Self::dispatch(command, name, args)
    }

    /// Run the command registered under `name` and downcast its result.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Registry::execute) returns, plus
    /// [`RegistryError::ReturnTypeMismatch`] when the result is not an `R`.
    /// The reported actual type is the command's declared
    /// [`return_type`](Command::return_type).
    pub fn execute_as<R: Any + Clone>(&self, name: &str, args: Arguments) -> Result<R, RegistryError> {
        let command = self.lookup(name)?;
        let result = Self::dispatch(command, name, args)?;
        result
            .downcast::<R>()
            .map_err(|_| RegistryError::ReturnTypeMismatch {
                expected: TypeTag::of::<R>(),
                actual: command.return_type(),
            })
    }

    fn dispatch(command: &dyn Command, name: &str, args: Arguments) -> Result<Value, RegistryError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(command = %name, args = args.len(), "dispatching command");

        let result = command.execute(args);

        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
            tracing::debug!(command = %name, error = %err, "command failed");
        }
        #[cfg(not(feature = "tracing"))]
        let _ = name;

        Ok(result?)
    }

    /// A detached copy of the signature of the command registered under `name`.
    pub fn command_info(&self, name: &str) -> Result<CommandInfo, RegistryError> {
        self.lookup(name).map(CommandInfo::of)
    }

    /// Parameter names of the command registered under `name`.
    pub fn command_params(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        Ok(self.command_info(name)?.param_names)
    }

    /// Returns `true` if a command is registered under `name`.
    pub fn has_command(&self, name: &str) -> bool {
        !name.is_empty() && self.commands.contains_key(name)
    }

    /// Drop every registered command.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(count = self.commands.len(), "clearing registry");

        self.commands.clear();
    }

    /// Names of all registered commands, in no particular order.
    pub fn command_list(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Number of registered commands.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn check_vacant(&self, name: &str) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.commands.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_owned()));
        }
        Ok(())
    }

    fn insert(&mut self, command: BoxCommand, name: &str) -> Result<(), RegistryError> {
        self.check_vacant(name)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            command = %name,
            params = ?command.param_names(),
            returns = %command.return_type(),
            "registered command"
        );

        self.commands.insert(name.to_owned(), command);
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&dyn Command, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        self.commands
            .get(name)
            .map(|command| &**command)
            .ok_or_else(|| RegistryError::CommandNotFound(name.to_owned()))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for constructing a [`Registry`].
///
/// Registration errors are deferred to [`build`](RegistryBuilder::build),
/// which reports the first one.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<(String, Option<BoxCommand>)>,
    traced: bool,
}

impl RegistryBuilder {
    /// Create a new empty registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `command` for registration under `name`.
    pub fn command<C: Command>(mut self, name: impl Into<String>, command: C) -> Self {
        self.entries.push((name.into(), Some(Box::new(command))));
        self
    }

    /// Queue an optional boxed command for registration under `name`.
    pub fn boxed(mut self, name: impl Into<String>, command: Option<BoxCommand>) -> Self {
        self.entries.push((name.into(), command));
        self
    }

    /// Wrap every command in a [`TracedCommand`] named after its key.
    pub fn traced(mut self, enabled: bool) -> Self {
        self.traced = enabled;
        self
    }

    /// Build the registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut registry = Registry::new();
        for (name, command) in self.entries {
            let command = match command {
                Some(command) if self.traced => {
                    Some(Box::new(TracedCommand::new(name.clone(), command)) as BoxCommand)
                }
                other => other,
            };
            registry.register_boxed(command, &name)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingCommand, FixedCommand};
    use commandeer_core::{InvocationError, args};

    #[test]
    fn test_register_and_execute() {
        let mut registry = Registry::new();
        registry.register(FixedCommand::new(7_u32), "seven").unwrap();

        let value = registry.execute("seven", args! {}).unwrap();
        assert_eq!(value.downcast_ref::<u32>(), Some(&7));
        assert_eq!(registry.execute_as::<u32>("seven", args! {}).unwrap(), 7);
    }

    #[test]
    fn test_name_checks() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.register(FixedCommand::new(1), ""),
            Err(RegistryError::EmptyName)
        ));
        assert!(matches!(
            registry.register_boxed(None, "ghost"),
            Err(RegistryError::NullCommand(ref n)) if n == "ghost"
        ));
        assert!(matches!(registry.execute("", args! {}), Err(RegistryError::EmptyName)));
        assert!(matches!(registry.command_info(""), Err(RegistryError::EmptyName)));
        assert!(!registry.has_command(""));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_keeps_original() {
        let mut registry = Registry::new();
        registry.register(FixedCommand::new(1_i32), "dup").unwrap();
        let err = registry.register(FixedCommand::new("two"), "dup").unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(ref n) if n == "dup"));
        assert_eq!(registry.execute_as::<i32>("dup", args! {}).unwrap(), 1);
        assert_eq!(registry.command_count(), 1);
    }

    #[test]
    fn test_return_type_mismatch_reports_both_types() {
        let mut registry = Registry::new();
        registry.register(FixedCommand::new(1_i32), "int").unwrap();
        let err = registry.execute_as::<String>("int", args! {}).unwrap_err();
        match err {
            RegistryError::ReturnTypeMismatch { expected, actual } => {
                assert_eq!(expected, TypeTag::of::<String>());
                assert_eq!(actual, TypeTag::of::<i32>());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    struct MislabeledCommand;

    impl Command for MislabeledCommand {
        fn execute(&self, _args: Arguments) -> Result<Value, InvocationError> {
            Ok(Value::new(1_i32))
        }

        fn param_names(&self) -> &[String] {
            &[]
        }

        fn param_types(&self) -> &[TypeTag] {
            &[]
        }

        fn return_type(&self) -> TypeTag {
            TypeTag::of::<u64>()
        }
    }

    #[test]
    fn test_return_type_mismatch_uses_declared_type() {
        let mut registry = Registry::new();
        registry.register(MislabeledCommand, "mislabeled").unwrap();
        let err = registry.execute_as::<String>("mislabeled", args! {}).unwrap_err();
        match err {
            RegistryError::ReturnTypeMismatch { expected, actual } => {
                assert_eq!(expected, TypeTag::of::<String>());
                assert_eq!(actual, TypeTag::of::<u64>());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invocation_error_propagates() {
        let mut registry = Registry::new();
        registry.register(FailingCommand::new("boom"), "fail").unwrap();
        let err = registry.execute("fail", args! {}).unwrap_err();
        assert!(matches!(err, RegistryError::Invocation(InvocationError::Method(_))));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut registry = Registry::new();
        registry.register(FixedCommand::new(()), "a").unwrap();
        registry.register(FixedCommand::new(()), "b").unwrap();

        let mut names = registry.command_list();
        names.sort();
        assert_eq!(names, ["a", "b"]);

        registry.clear();
        registry.clear();
        assert_eq!(registry.command_count(), 0);
        assert!(registry.command_list().is_empty());
        assert!(!registry.has_command("a"));
    }

    #[test]
    fn test_builder_reports_first_error() {
        let result = Registry::builder()
            .command("one", FixedCommand::new(1))
            .command("one", FixedCommand::new(2))
            .build();
        assert!(matches!(result, Err(RegistryError::DuplicateName(_))));

        let result = RegistryBuilder::new().boxed("nothing", None).build();
        assert!(matches!(result, Err(RegistryError::NullCommand(_))));
    }

    #[test]
    fn test_builder_traced_is_transparent() {
        let registry = Registry::builder()
            .traced(true)
            .command("answer", FixedCommand::new(42_i64))
            .build()
            .unwrap();
        assert_eq!(registry.execute_as::<i64>("answer", args! {}).unwrap(), 42);
        assert_eq!(
            registry.command_info("answer").unwrap().return_type,
            TypeTag::of::<i64>()
        );
    }
}
