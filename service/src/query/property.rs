//! [`Query`] collection related to a single [`Property`].

use common::operations::By;

use crate::{
    domain::{property, Property},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Property`] by its [`property::Id`].
pub type ById = DatabaseQuery<By<Option<Property>, property::Id>>;

/// Queries the derived [`read::Occupancy`] of a [`Property`].
pub type OccupancyOf = DatabaseQuery<By<read::Occupancy, property::Id>>;
