//! # Command Contract
//!
//! A [`Command`] is a name-addressed, type-erased invocation target: it accepts
//! a list of named [`Value`]s, returns a [`Value`], and can describe its own
//! signature.
//!
//! Concrete commands are usually adapters around a typed method, but anything
//! that can honour the four operations below can be registered.

use crate::{
    arguments::Arguments,
    error::InvocationError,
    value::{TypeTag, Value},
};

/// The uniform invocation interface.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Command`",
    label = "missing `Command` implementation",
    note = "Commands must implement `execute`, `param_names`, `param_types` and `return_type`."
)]
pub trait Command: Send + Sync + 'static {
    /// Run the command with the given named arguments.
    fn execute(&self, args: Arguments) -> Result<Value, InvocationError>;

    /// Parameter names in declaration order.
    fn param_names(&self) -> &[String];

    /// Parameter types, index-aligned with [`param_names`](Command::param_names).
    fn param_types(&self) -> &[TypeTag];

    /// The type of the value returned by [`execute`](Command::execute).
    fn return_type(&self) -> TypeTag;
}

/// An owned, dynamically dispatched command.
pub type BoxCommand = Box<dyn Command>;

impl<C: Command + ?Sized> Command for Box<C> {
    fn execute(&self, args: Arguments) -> Result<Value, InvocationError> {
        (**self).execute(args)
    }

    fn param_names(&self) -> &[String] {
        (**self).param_names()
    }

    fn param_types(&self) -> &[TypeTag] {
        (**self).param_types()
    }

    fn return_type(&self) -> TypeTag {
        (**self).return_type()
    }
}

/// A detached snapshot of a command's signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Parameter names in declaration order.
    pub param_names: Vec<String>,
    /// Parameter types, index-aligned with `param_names`.
    pub param_types: Vec<TypeTag>,
    /// The declared return type.
    pub return_type: TypeTag,
}

impl CommandInfo {
    /// Copy the signature out of `command`.
    pub fn of<C: Command + ?Sized>(command: &C) -> Self {
        Self {
            param_names: command.param_names().to_vec(),
            param_types: command.param_types().to_vec(),
            return_type: command.return_type(),
        }
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.param_names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Answer {
        names: Vec<String>,
        types: Vec<TypeTag>,
    }

    impl Command for Answer {
        fn execute(&self, _args: Arguments) -> Result<Value, InvocationError> {
            Ok(Value::new(42_i32))
        }

        fn param_names(&self) -> &[String] {
            &self.names
        }

        fn param_types(&self) -> &[TypeTag] {
            &self.types
        }

        fn return_type(&self) -> TypeTag {
            TypeTag::of::<i32>()
        }
    }

    #[test]
    fn test_info_is_detached_copy() {
        let command = Answer {
            names: vec!["x".into()],
            types: vec![TypeTag::of::<u8>()],
        };
        let info = CommandInfo::of(&command);
        drop(command);

        assert_eq!(info.param_names, vec!["x".to_string()]);
        assert_eq!(info.param_types, vec![TypeTag::of::<u8>()]);
        assert_eq!(info.return_type, TypeTag::of::<i32>());
        assert_eq!(info.arity(), 1);
    }

    #[test]
    fn test_boxed_command_delegates() {
        let boxed: BoxCommand = Box::new(Answer {
            names: Vec::new(),
            types: Vec::new(),
        });
        let result = boxed.execute(Arguments::new()).unwrap();
        assert_eq!(result.downcast_ref::<i32>(), Some(&42));
        assert!(CommandInfo::of(&*boxed).param_names.is_empty());
    }
}
