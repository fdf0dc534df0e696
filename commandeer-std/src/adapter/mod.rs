//! # Method Adapter
//!
//! [`Adapter`] binds one target object and one [`Method`] to the [`Command`]
//! contract.
//!
//! # Binding Rules
//!
//! - Parameter names come from the default table when one is given, otherwise
//!   they are synthesized as `param1 .. paramN`.
//! - A default table is all-or-nothing: it is either empty or has exactly one
//!   entry per parameter, and every entry is type-checked when the adapter is
//!   built.
//! - Call arguments are matched **by name**; their order does not matter and
//!   names that match no parameter are ignored.
//! - Every argument is resolved before the target is locked, so a failed call
//!   never reaches the method.
//!
//! # Target Ownership
//!
//! The adapter holds only a [`Weak`] reference to the caller's [`Target`].
//! Keeping the target alive is the caller's job; a dead reference is rejected
//! when building the adapter and reported on every later call.

mod method;

pub use method::{Fallible, Method, Mut, Ref, Slots};

use commandeer_core::{
    AdapterError, Arguments, Command, InvocationError, TypeTag, Value,
};
use parking_lot::RwLock;
use std::{
    any::Any,
    fmt,
    marker::PhantomData,
    sync::{Arc, Weak},
};

/// A caller-owned object that adapters can call into.
pub type Target<T> = Arc<RwLock<T>>;

/// Wrap `value` so that it can be bound by adapters.
pub fn shared<T>(value: T) -> Target<T> {
    Arc::new(RwLock::new(value))
}

/// A [`Command`] backed by a typed method on a target object.
///
/// # Example
///
/// ```rust
/// use commandeer_core::{args, Command};
/// use commandeer_std::adapter::{shared, Adapter};
/// use std::sync::Arc;
///
/// struct Subject;
///
/// impl Subject {
///     fn f3(&mut self, arg1: i32, arg2: i32) -> i32 {
///         arg1 * arg2
///     }
/// }
///
/// let subject = shared(Subject);
/// let adapter = Adapter::new(
///     Arc::downgrade(&subject),
///     Subject::f3,
///     args! { "arg1" => 10, "arg2" => 20 },
/// )
/// .unwrap();
///
/// let product = adapter.execute(args! { "arg2" => 5 }).unwrap();
/// assert_eq!(product.downcast_ref::<i32>(), Some(&50));
/// ```
pub struct Adapter<T, M, Marker> {
    target: Weak<RwLock<T>>,
    method: M,
    defaults: Option<Vec<Value>>,
    param_names: Vec<String>,
    param_types: Vec<TypeTag>,
    return_type: TypeTag,
    _marker: PhantomData<fn() -> Marker>,
}

impl<T, M, Marker> Adapter<T, M, Marker>
where
    T: Send + Sync + 'static,
    M: Method<T, Marker>,
    M::Output: Any + Clone + Send + Sync,
{
    /// Bind `method` on `target`, with an optional full default table.
    ///
    /// Pass an empty [`Arguments`] for "no defaults".
    ///
    /// # Errors
    ///
    /// - [`AdapterError::NullTarget`] if `target` is not alive.
    /// - [`AdapterError::ParameterCountMismatch`] if `defaults` is non-empty
    ///   but does not have one entry per parameter.
    /// - [`AdapterError::DefaultTypeMismatch`] for the first default whose
    ///   type differs from its parameter's.
    pub fn new(
        target: Weak<RwLock<T>>,
        method: M,
        defaults: Arguments,
    ) -> Result<Self, AdapterError> {
        if target.strong_count() == 0 {
            return Err(AdapterError::NullTarget);
        }

        let param_types = M::param_types();
        let arity = param_types.len();

        let (param_names, defaults) = if defaults.is_empty() {
            let names = (1..=arity).map(|i| format!("param{i}")).collect();
            (names, None)
        } else {
            if defaults.len() != arity {
                return Err(AdapterError::ParameterCountMismatch {
                    expected: arity,
                    actual: defaults.len(),
                });
            }
            let (names, values) = validate_defaults(defaults, &param_types)?;
            (names, Some(values))
        };

        Ok(Self {
            target,
            method,
            defaults,
            param_names,
            param_types,
            return_type: TypeTag::of::<M::Output>(),
            _marker: PhantomData,
        })
    }

    /// Bind `method` on `target` with synthesized parameter names and no
    /// defaults.
    pub fn without_defaults(target: Weak<RwLock<T>>, method: M) -> Result<Self, AdapterError> {
        Self::new(target, method, Arguments::new())
    }

    /// Returns `true` if this adapter carries a default table.
    pub fn has_defaults(&self) -> bool {
        self.defaults.is_some()
    }

    /// Resolve `args` into one value per parameter, in declaration order.
    fn bind(&self, mut args: Arguments) -> Result<Vec<Value>, InvocationError> {
        let mut slots = Vec::with_capacity(self.param_names.len());

        for (index, name) in self.param_names.iter().enumerate() {
            let expected = self.param_types[index];
            let value = match (args.take(name), &self.defaults) {
                (Some(value), _) => {
                    if value.type_tag() != expected {
                        return Err(InvocationError::ArgumentTypeMismatch {
                            name: name.clone(),
                            expected,
                            actual: value.type_tag(),
                        });
                    }
                    value
                }
                (None, Some(defaults)) => defaults[index].clone(),
                (None, None) => {
                    return Err(InvocationError::MissingRequiredArgument(name.clone()));
                }
            };
            slots.push(value);
        }

        Ok(slots)
    }
}

fn validate_defaults(
    defaults: Arguments,
    param_types: &[TypeTag],
) -> Result<(Vec<String>, Vec<Value>), AdapterError> {
    let mut names = Vec::with_capacity(param_types.len());
    let mut values = Vec::with_capacity(param_types.len());

    for (index, (arg, expected)) in defaults.into_iter().zip(param_types).enumerate() {
        let actual = arg.value.type_tag();
        if actual != *expected {
            return Err(AdapterError::DefaultTypeMismatch {
                index,
                name: arg.name,
                expected: *expected,
                actual,
            });
        }
        names.push(arg.name);
        values.push(arg.value);
    }

    Ok((names, values))
}

impl<T, M, Marker> Command for Adapter<T, M, Marker>
where
    T: Send + Sync + 'static,
    M: Method<T, Marker>,
    M::Output: Any + Clone + Send + Sync,
    Marker: 'static,
{
    fn execute(&self, args: Arguments) -> Result<Value, InvocationError> {
        if let Some(name) = args.first_duplicate() {
            return Err(InvocationError::DuplicateArgument(name.to_owned()));
        }

        let target = self.target.upgrade().ok_or(InvocationError::TargetReleased)?;
        let slots = self.bind(args)?;
        let output = self
            .method
            .invoke(&target, Slots::new(&self.param_names, slots))?;

        Ok(Value::new(output))
    }

    fn param_names(&self) -> &[String] {
        &self.param_names
    }

    fn param_types(&self) -> &[TypeTag] {
        &self.param_types
    }

    fn return_type(&self) -> TypeTag {
        self.return_type
    }
}

impl<T, M, Marker> fmt::Debug for Adapter<T, M, Marker> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("target", &std::any::type_name::<T>())
            .field("param_names", &self.param_names)
            .field("param_types", &self.param_types)
            .field("return_type", &self.return_type)
            .field("has_defaults", &self.defaults.is_some())
            .finish()
    }
}
