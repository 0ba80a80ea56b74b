//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a term commencement.
#[derive(Clone, Copy, Debug)]
pub struct Commencement;

/// Marker type describing a term expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// Marker type describing a payment due date.
#[derive(Clone, Copy, Debug)]
pub struct Due;
