//! [`Lease`] read model definition.

#[cfg(doc)]
use crate::domain::{lease::Status, Lease};

/// Wrapper around [`Lease`] data indicating that its [`Status`] is not
/// [`Status::Expired`].
#[derive(Clone, Copy, Debug)]
pub struct Active<T>(pub T);
