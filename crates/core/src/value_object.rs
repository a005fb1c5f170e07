//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances with the same attribute values
/// are interchangeable. The fee configuration is the main example here; swapping
/// one `FeeConfig` for an equal one never changes a computed profit.
///
/// The trait requires:
/// - **Clone**: value objects are copied freely
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: helpful for logging and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
