use crate::di::Container;
use crate::error::Result;

/// Trait for types constructed by resolving dependencies from the container.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use portico::{Container, Injectable};
///
/// struct Clock;
///
/// struct UserService {
///     clock: Arc<Clock>,
/// }
///
/// impl Injectable for UserService {
///     fn inject(container: &Container) -> portico::Result<Self> {
///         Ok(Self {
///             clock: container.resolve::<Clock>()?,
///         })
///     }
/// }
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Create an instance by resolving dependencies from the container.
    ///
    /// # Errors
    /// Fails if any required dependency is not registered.
    fn inject(container: &Container) -> Result<Self>;
}
