//! [`Space`]-related definitions.

use std::future;

use common::{DateTime, Handler as _, Money};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, read::lease::Active};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A leasable space within a `Property`.
#[derive(Clone, Debug, From)]
pub struct Space {
    /// ID of this [`Space`].
    id: Id,

    /// Underlying [`domain::Space`].
    space: OnceCell<domain::Space>,
}

impl From<domain::Space> for Space {
    fn from(space: domain::Space) -> Self {
        Self {
            id: space.id.into(),
            space: OnceCell::new_with(Some(space)),
        }
    }
}

impl Space {
    /// Creates a new [`Space`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Space`] with the provided ID exists,
    /// otherwise accessing this [`Space`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            space: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Space`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Space`] doesn't exist.
    async fn space(&self, ctx: &Context) -> Result<&domain::Space, Error> {
        let id = self.id.into();
        self.space
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::space::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|s| {
                        future::ready(s.ok_or_else(|| {
                            api::query::SpaceError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A leasable space within a `Property`.
#[graphql_object(context = Context)]
impl Space {
    /// Unique identifier of this `Space`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `Property` this `Space` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.property",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property(
        &self,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let property_id = self.space(ctx).await?.property_id;
        #[expect(unsafe_code, reason = "referential integrity")]
        Ok(unsafe { api::Property::new_unchecked(property_id) })
    }

    /// Number of this `Space`, unique within its `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.number",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn number(&self, ctx: &Context) -> Result<Number, Error> {
        Ok(self.space(ctx).await?.number.clone().into())
    }

    /// Floor area of this `Space`, in square meters.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.floorArea",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn floor_area(
        &self,
        ctx: &Context,
    ) -> Result<api::property::Area, Error> {
        Ok(self.space(ctx).await?.floor_area.into())
    }

    /// Monthly asking rate per square meter of this `Space`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.rate",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn rate(&self, ctx: &Context) -> Result<Option<Money>, Error> {
        Ok(self.space(ctx).await?.rate)
    }

    /// Total monthly rent of this `Space`, derived from its rate and floor
    /// area at creation.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.monthlyRent",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn monthly_rent(
        &self,
        ctx: &Context,
    ) -> Result<Option<Money>, Error> {
        Ok(self.space(ctx).await?.monthly_rent)
    }

    /// Status of this `Space`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.space(ctx).await?.status.into())
    }

    /// `Tenant` occupying this `Space`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.tenant",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn tenant(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Tenant>, Error> {
        Ok(self.space(ctx).await?.tenant_id.map(|id| {
            #[expect(unsafe_code, reason = "referential integrity")]
            unsafe {
                api::Tenant::new_unchecked(id)
            }
        }))
    }

    /// Non-expired `Lease` of this `Space`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.activeLease",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn active_lease(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Lease>, Error> {
        ctx.service()
            .execute(query::lease::ActiveBySpace::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|lease| lease.map(|Active(l)| l.into()))
    }

    /// Real property tax records filed against this `Space`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.rptRecords",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn rpt_records(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::RptRecord>, Error> {
        ctx.service()
            .execute(query::rpt::ByOwner::by(domain::rpt::Owner::Space(
                self.id.into(),
            )))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|records| records.into_iter().map(Into::into).collect())
    }

    /// `DateTime` when this `Space` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Space.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.space(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Space`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::space::Id)]
#[into(domain::space::Id)]
#[graphql(name = "SpaceId", transparent)]
pub struct Id(Uuid);

/// Number of a `Space`, unique within its `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "SpaceNumber", with = scalar::Via::<domain::space::Number>)]
pub struct Number(domain::space::Number);

/// Status of a `Space`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "SpaceStatus")]
pub enum Status {
    /// The space is offered for lease.
    Available,

    /// The space is held under an active lease.
    Occupied,

    /// The space is temporarily withdrawn for maintenance.
    UnderMaintenance,

    /// The space is vacant and not offered.
    Vacant,
}

impl From<domain::space::Status> for Status {
    fn from(status: domain::space::Status) -> Self {
        use domain::space::Status as S;
        match status {
            S::Available => Self::Available,
            S::Occupied => Self::Occupied,
            S::UnderMaintenance => Self::UnderMaintenance,
            S::Vacant => Self::Vacant,
        }
    }
}

impl From<Status> for domain::space::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Available => Self::Available,
            Status::Occupied => Self::Occupied,
            Status::UnderMaintenance => Self::UnderMaintenance,
            Status::Vacant => Self::Vacant,
        }
    }
}
