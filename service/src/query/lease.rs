//! [`Query`] collection related to [`Lease`]s.

use common::operations::By;

use crate::{
    domain::{lease, space, Lease},
    read,
};
#[cfg(doc)]
use crate::{domain::Space, Query};

use super::DatabaseQuery;

/// Queries a [`Lease`] by its [`lease::Id`].
pub type ById = DatabaseQuery<By<Option<Lease>, lease::Id>>;

/// Queries the non-expired [`Lease`] of a [`Space`], if any.
pub type ActiveBySpace =
    DatabaseQuery<By<Option<read::lease::Active<Lease>>, space::Id>>;
