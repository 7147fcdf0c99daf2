//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Policy
/// configuration and per-user password state are value objects: the host
/// loads them once per request and passes them by reference, so they are
/// safe to share across request-handling threads.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
