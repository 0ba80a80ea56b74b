//! [`Query`] collection related to [`Space`]s.

use common::operations::By;

use crate::domain::{property, space, Space};
#[cfg(doc)]
use crate::{domain::Property, Query};

use super::DatabaseQuery;

/// Queries a [`Space`] by its [`space::Id`].
pub type ById = DatabaseQuery<By<Option<Space>, space::Id>>;

/// Queries all [`Space`]s of a [`Property`].
pub type ByProperty = DatabaseQuery<By<Vec<Space>, property::Id>>;
