//! # Type-Erased Values
//!
//! Every argument, default and result that crosses the [`Command`] boundary is
//! a [`Value`]: a cloneable box whose static type is hidden and can only be
//! recovered through an explicit, fallible downcast.
//!
//! [`TypeTag`] is the runtime identity used for the check and for diagnostics.
//! Tags compare by [`TypeId`] and display as the Rust type name; they are only
//! meaningful within a single process run.
//!
//! [`Command`]: crate::Command

use std::any::{Any, TypeId};
use std::fmt;

/// Runtime identity of a type.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// The tag of `T`.
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type name as reported by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this is the tag of `T`.
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl std::hash::Hash for TypeTag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Object-safe view of a value that can be cloned behind a box.
trait ErasedValue: Any + Send + Sync {
    fn clone_box(&self) -> Box<dyn ErasedValue>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Clone + Send + Sync> ErasedValue for T {
    fn clone_box(&self) -> Box<dyn ErasedValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A type-erased value.
///
/// Any `T: Any + Clone + Send + Sync` can be stored. The original type is
/// recovered with [`downcast_ref`](Value::downcast_ref) or
/// [`downcast`](Value::downcast), both of which fail instead of panicking when
/// the requested type is wrong.
///
/// # Example
///
/// ```rust
/// use commandeer_core::Value;
///
/// let value = Value::new(42_i32);
/// assert!(value.is::<i32>());
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
/// assert!(value.clone().downcast::<String>().is_err());
/// ```
pub struct Value {
    inner: Box<dyn ErasedValue>,
    tag: TypeTag,
}

impl Value {
    /// Erase the type of `value`.
    pub fn new<T: Any + Clone + Send + Sync>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            tag: TypeTag::of::<T>(),
        }
    }

    /// The tag of the stored type.
    pub fn type_tag(&self) -> TypeTag {
        self.tag
    }

    /// Returns `true` if the stored value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.tag.is::<T>()
    }

    /// Borrow the stored value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).as_any().downcast_ref::<T>()
    }

    /// Recover the stored value as a `T`, moving it out of the box.
    ///
    /// Returns the untouched `Value` on a type mismatch so the caller can
    /// report on it.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        if !(*self.inner).as_any().is::<T>() {
            return Err(self);
        }
        match self.inner.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("stored type was checked against `T`"),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Self {
            inner: (*self.inner).clone_box(),
            tag: self.tag,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({})", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_identity() {
        assert_eq!(TypeTag::of::<i32>(), TypeTag::of::<i32>());
        assert_ne!(TypeTag::of::<i32>(), TypeTag::of::<i64>());
        assert!(TypeTag::of::<String>().is::<String>());
        assert_eq!(TypeTag::of::<i32>().to_string(), "i32");
    }

    #[test]
    fn test_value_downcast() {
        let value = Value::new(String::from("hello"));
        assert_eq!(value.type_tag(), TypeTag::of::<String>());
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("hello"));
        assert_eq!(value.downcast::<String>().unwrap(), "hello");
    }

    #[test]
    fn test_value_downcast_mismatch_returns_value() {
        let value = Value::new(1.5_f64);
        let back = value.downcast::<i32>().unwrap_err();
        assert!(back.is::<f64>());
        assert_eq!(back.downcast_ref::<f64>(), Some(&1.5));
    }

    #[derive(Debug)]
    struct CloneCounter(std::sync::Arc<std::sync::atomic::AtomicUsize>);

    impl Clone for CloneCounter {
        fn clone(&self) -> Self {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Self(self.0.clone())
        }
    }

    #[test]
    fn test_value_downcast_moves_without_cloning() {
        let clones = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let value = Value::new(CloneCounter(clones.clone()));

        let recovered = value.downcast::<CloneCounter>().unwrap();
        assert_eq!(clones.load(std::sync::atomic::Ordering::SeqCst), 0);

        let _copy = Value::new(recovered).clone();
        assert_eq!(clones.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_value_clone_is_deep() {
        let value = Value::new(vec![1, 2, 3]);
        let cloned = value.clone();
        drop(value);
        assert_eq!(cloned.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_value_debug_names_type() {
        assert_eq!(format!("{:?}", Value::new(7_u8)), "Value(u8)");
    }
}
