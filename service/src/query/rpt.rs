//! [`Query`] collection related to [`RptRecord`]s.

use common::operations::By;

use crate::domain::{rpt, RptRecord};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`RptRecord`] by its [`rpt::Id`].
pub type ById = DatabaseQuery<By<Option<RptRecord>, rpt::Id>>;

/// Queries all [`RptRecord`]s filed against an [`rpt::Owner`].
pub type ByOwner = DatabaseQuery<By<Vec<RptRecord>, rpt::Owner>>;
