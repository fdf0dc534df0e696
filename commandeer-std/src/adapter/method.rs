//! # Method Binding
//!
//! [`Method`] abstracts over "something callable on a `T` with a fixed list of
//! typed parameters". It is implemented for every closure or method path of
//! the shape
//!
//! - `Fn(&mut T, A1, ..., An) -> R` (marker `(Mut, A1, ..., An)`), invoked
//!   under the target's write lock, and
//! - `Fn(&T, A1, ..., An) -> R` (marker `(Ref, A1, ..., An)`), invoked under
//!   the target's read lock,
//!
//! for `n` from 0 to 12. The marker type parameter only exists to keep the
//! impls apart; it is always inferred.
//!
//! Methods returning `Result<R, E>` can be wrapped in [`Fallible`] so that an
//! `Err` surfaces as [`InvocationError::Method`] and the declared return type
//! becomes `R`.

use commandeer_core::{BoxError, InvocationError, TypeTag, Value};
use parking_lot::RwLock;
use std::any::Any;

/// Marker for methods taking `&mut T`.
#[derive(Debug, Clone, Copy)]
pub struct Mut;

/// Marker for methods taking `&T`.
#[derive(Debug, Clone, Copy)]
pub struct Ref;

/// A method of fixed arity bound to a target type `T`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be bound as a method of `{T}`",
    label = "not a supported method signature",
    note = "Methods must look like `Fn(&mut {T}, A1, ..) -> R` or `Fn(&{T}, A1, ..) -> R` with at most 12 parameters, each `Any + Clone + Send + Sync`."
)]
pub trait Method<T, Marker>: Send + Sync + 'static {
    /// The value produced by a successful call.
    type Output;

    /// Declared parameter types in positional order.
    fn param_types() -> Vec<TypeTag>;

    /// Invoke the method with fully resolved positional slots.
    fn invoke(&self, target: &RwLock<T>, slots: Slots<'_>) -> Result<Self::Output, InvocationError>;
}

/// Resolved argument values, consumed in parameter order.
pub struct Slots<'a> {
    names: &'a [String],
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl<'a> Slots<'a> {
    /// Wrap positional values; `names` is only used for diagnostics.
    pub fn new(names: &'a [String], values: Vec<Value>) -> Self {
        Self {
            names,
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Take the next slot as an `A`.
    pub fn take<A: Any + Clone>(&mut self) -> Result<A, InvocationError> {
        let name = self.current_name();
        self.position += 1;
        let value = self
            .values
            .next()
            .ok_or_else(|| InvocationError::MissingRequiredArgument(name.clone()))?;
        value
            .downcast::<A>()
            .map_err(|value| InvocationError::ArgumentTypeMismatch {
                name,
                expected: TypeTag::of::<A>(),
                actual: value.type_tag(),
            })
    }

    fn current_name(&self) -> String {
        self.names
            .get(self.position)
            .cloned()
            .unwrap_or_else(|| format!("param{}", self.position + 1))
    }
}

/// Adapts a method returning `Result<R, E>`.
///
/// # Example
///
/// ```rust
/// use commandeer_core::{args, Command, InvocationError, TypeTag};
/// use commandeer_std::adapter::{shared, Adapter, Fallible};
/// use std::sync::Arc;
///
/// struct Calculator;
///
/// let calc = shared(Calculator);
/// let divide = Fallible(|_: &Calculator, a: f64, b: f64| {
///     if b == 0.0 { Err("division by zero") } else { Ok(a / b) }
/// });
/// let adapter = Adapter::new(
///     Arc::downgrade(&calc),
///     divide,
///     args! { "a" => 1.0_f64, "b" => 1.0_f64 },
/// )
/// .unwrap();
/// assert_eq!(adapter.return_type(), TypeTag::of::<f64>());
///
/// let half = adapter.execute(args! { "a" => 1.0_f64, "b" => 2.0_f64 }).unwrap();
/// assert_eq!(half.downcast_ref::<f64>(), Some(&0.5));
///
/// let err = adapter.execute(args! { "b" => 0.0_f64 }).unwrap_err();
/// assert!(matches!(err, InvocationError::Method(_)));
/// assert_eq!(err.to_string(), "division by zero");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<T, Marker, F, R, E> Method<T, Fallible<Marker>> for Fallible<F>
where
    F: Method<T, Marker, Output = Result<R, E>>,
    E: Into<BoxError>,
{
    type Output = R;

    fn param_types() -> Vec<TypeTag> {
        F::param_types()
    }

    fn invoke(&self, target: &RwLock<T>, slots: Slots<'_>) -> Result<R, InvocationError> {
        self.0
            .invoke(target, slots)?
            .map_err(|err| InvocationError::Method(err.into()))
    }
}

/// Macro to implement Method for N-ary `&mut T` and `&T` callables.
macro_rules! impl_method {
    ($($A:ident),*) => {
        impl<F, T, R, $($A,)*> Method<T, (Mut, $($A,)*)> for F
        where
            T: Send + Sync + 'static,
            F: Fn(&mut T, $($A,)*) -> R + Send + Sync + 'static,
            $($A: Any + Clone + Send + Sync,)*
        {
            type Output = R;

            fn param_types() -> Vec<TypeTag> {
                vec![$(TypeTag::of::<$A>(),)*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn invoke(&self, target: &RwLock<T>, mut slots: Slots<'_>) -> Result<R, InvocationError> {
                $(
                    let $A = slots.take::<$A>()?;
                )*
                let mut guard = target.write();
                Ok((self)(&mut *guard, $($A,)*))
            }
        }

        impl<F, T, R, $($A,)*> Method<T, (Ref, $($A,)*)> for F
        where
            T: Send + Sync + 'static,
            F: Fn(&T, $($A,)*) -> R + Send + Sync + 'static,
            $($A: Any + Clone + Send + Sync,)*
        {
            type Output = R;

            fn param_types() -> Vec<TypeTag> {
                vec![$(TypeTag::of::<$A>(),)*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn invoke(&self, target: &RwLock<T>, mut slots: Slots<'_>) -> Result<R, InvocationError> {
                $(
                    let $A = slots.take::<$A>()?;
                )*
                let guard = target.read();
                Ok((self)(&*guard, $($A,)*))
            }
        }
    };
}

impl_method!();
impl_method!(A1);
impl_method!(A1, A2);
impl_method!(A1, A2, A3);
impl_method!(A1, A2, A3, A4);
impl_method!(A1, A2, A3, A4, A5);
impl_method!(A1, A2, A3, A4, A5, A6);
impl_method!(A1, A2, A3, A4, A5, A6, A7);
impl_method!(A1, A2, A3, A4, A5, A6, A7, A8);
impl_method!(A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_method!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_method!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
impl_method!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12);
