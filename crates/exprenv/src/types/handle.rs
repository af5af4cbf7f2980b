use std::any::Any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::ptr;
use std::sync::Arc;

/// An opaque, shareable value passed through to expressions untouched.
///
/// Web contexts expose their request and session objects as handles. This
/// crate never looks inside a handle; only the host application, which knows
/// the concrete type, can recover it with [`Handle::downcast_ref`].
///
/// Two handles are equal when they point at the same object.
#[derive(Clone)]
pub struct Handle(Arc<dyn Any + Send + Sync>);

impl Handle {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Recover the concrete object, if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns true if both handles point at the same object.
    pub fn ptr_eq(&self, other: &Handle) -> bool {
        ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Debug for Handle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Handle({:p})", Arc::as_ptr(&self.0))
    }
}
