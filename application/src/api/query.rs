//! GraphQL [`Query`]s definitions.

use std::time;

use common::Handler as _;
use itertools::Itertools as _;
use juniper::graphql_object;
use service::{domain, query, read};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Property` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "property",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::property::list::Edge, Error> {
        Self::properties(None, Some(id.into()), None, Some(id.into()), None, ctx)
            .await?
            .edges()
            .into_iter()
            .exactly_one()
            .map_err(|_| PropertyError::NotExists.into())
            .map_err(ctx.error())
    }

    /// Fetches the page of `Property`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "properties",
            last = ?last,
            name = ?name.as_ref().map(ToString::to_string),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn properties(
        first: Option<i32>,
        after: Option<api::property::list::Cursor>,
        last: Option<i32>,
        before: Option<api::property::list::Cursor>,
        name: Option<api::property::Name>,
        ctx: &Context,
    ) -> Result<api::property::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 10;

        ctx.service()
            .execute(query::properties::List::by(
                read::property::list::Selector {
                    arguments: read::property::list::Arguments::new(
                        first,
                        after.map(Into::into),
                        last,
                        before.map(Into::into),
                        DEFAULT_PAGE_SIZE,
                    )
                    .ok_or_else(|| api::PaginationError::Ambiguous.into())
                    .map_err(ctx.error())?,
                    filter: read::property::list::Filter {
                        name: name.map(Into::into),
                    },
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Space` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SPACE_NOT_EXISTS` - the `Space` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "space",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn space(
        id: api::space::Id,
        ctx: &Context,
    ) -> Result<api::Space, Error> {
        ctx.service()
            .execute(query::space::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| SpaceError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Tenant` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TENANT_NOT_EXISTS` - the `Tenant` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "tenant",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn tenant(
        id: api::tenant::Id,
        ctx: &Context,
    ) -> Result<api::Tenant, Error> {
        ctx.service()
            .execute(query::tenant::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| TenantError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Lease` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LEASE_NOT_EXISTS` - the `Lease` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "lease",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn lease(
        id: api::lease::Id,
        ctx: &Context,
    ) -> Result<api::Lease, Error> {
        ctx.service()
            .execute(query::lease::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| LeaseError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `RptRecord` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `RPT_RECORD_NOT_EXISTS` - the `RptRecord` with the specified ID does
    ///                             not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "rptRecord",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn rpt_record(
        id: api::rpt::Id,
        ctx: &Context,
    ) -> Result<api::RptRecord, Error> {
        ctx.service()
            .execute(query::rpt::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| RptRecordError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `RptRecord`s filed against a `Property` or a `Space`.
    ///
    /// Exactly one of `propertyId` and `spaceId` must be provided.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_RPT_OWNER` - none or both of `propertyId` and `spaceId`
    ///                           are provided.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "rptRecords",
            otel.name = Self::SPAN_NAME,
            property_id = ?property_id.as_ref().map(ToString::to_string),
            space_id = ?space_id.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn rpt_records(
        property_id: Option<api::property::Id>,
        space_id: Option<api::space::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::RptRecord>, Error> {
        let owner = match (property_id, space_id) {
            (Some(id), None) => domain::rpt::Owner::Property(id.into()),
            (None, Some(id)) => domain::rpt::Owner::Space(id.into()),
            (Some(_), Some(_)) | (None, None) => {
                return Err(ctx.error()(RptOwnerError::Ambiguous.into()));
            }
        };

        ctx.service()
            .execute(query::rpt::ByOwner::by(owner))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|records| records.into_iter().map(Into::into).collect())
    }

    /// Returns the `Company` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "company",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn company(
        id: api::company::Id,
        ctx: &Context,
    ) -> Result<api::Company, Error> {
        ctx.service()
            .execute(query::company::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| CompanyError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "user",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        ctx.service()
            .execute(query::user::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the client-facing application `Settings`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "settings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub fn settings(ctx: &Context) -> Settings {
        Settings {
            refresh_interval: ctx.service().config().refresh_interval,
        }
    }
}

/// Client-facing application settings.
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    /// Interval clients are expected to poll list views with.
    refresh_interval: time::Duration,
}

/// Client-facing application settings.
#[graphql_object(context = Context)]
impl Settings {
    /// Interval clients are expected to poll list views with, in seconds.
    pub fn refresh_interval_seconds(
        &self,
        ctx: &Context,
    ) -> Result<i32, Error> {
        i32::try_from(self.refresh_interval.as_secs())
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum SpaceError {
        #[code = "SPACE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Space` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum TenantError {
        #[code = "TENANT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Tenant` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum LeaseError {
        #[code = "LEASE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Lease` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum RptRecordError {
        #[code = "RPT_RECORD_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`RptRecord` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum RptOwnerError {
        #[code = "AMBIGUOUS_RPT_OWNER"]
        #[status = BAD_REQUEST]
        #[message = "Exactly one of `propertyId` and `spaceId` must be \
                     provided"]
        Ambiguous,
    }
}

define_error! {
    enum CompanyError {
        #[code = "COMPANY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Company` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the specified ID does not exist"]
        NotExists,
    }
}
