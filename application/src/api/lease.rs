//! [`Lease`]-related definitions.

use std::future;

use common::{DateTime, Handler as _, Money};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A lease binding a `Tenant` to a `Space`.
#[derive(Clone, Debug, From)]
pub struct Lease {
    /// ID of this [`Lease`].
    id: Id,

    /// Underlying [`domain::Lease`].
    lease: OnceCell<domain::Lease>,
}

impl From<domain::Lease> for Lease {
    fn from(lease: domain::Lease) -> Self {
        Self {
            id: lease.id.into(),
            lease: OnceCell::new_with(Some(lease)),
        }
    }
}

impl Lease {
    /// Creates a new [`Lease`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Lease`] with the provided ID exists,
    /// otherwise accessing this [`Lease`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            lease: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Lease`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Lease`] doesn't exist.
    async fn lease(&self, ctx: &Context) -> Result<&domain::Lease, Error> {
        let id = self.id.into();
        self.lease
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::lease::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|l| {
                        future::ready(l.ok_or_else(|| {
                            api::query::LeaseError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A lease binding a `Tenant` to a `Space`.
#[graphql_object(context = Context)]
impl Lease {
    /// Unique identifier of this `Lease`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `Property` this `Lease` is concluded under.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.property",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property(
        &self,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let property_id = self.lease(ctx).await?.property_id;
        #[expect(unsafe_code, reason = "referential integrity")]
        Ok(unsafe { api::Property::new_unchecked(property_id) })
    }

    /// `Space` held by this `Lease`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.space",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn space(&self, ctx: &Context) -> Result<api::Space, Error> {
        let space_id = self.lease(ctx).await?.space_id;
        #[expect(unsafe_code, reason = "referential integrity")]
        Ok(unsafe { api::Space::new_unchecked(space_id) })
    }

    /// `Tenant` holding this `Lease`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.tenant",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn tenant(&self, ctx: &Context) -> Result<api::Tenant, Error> {
        let tenant_id = self.lease(ctx).await?.tenant_id;
        #[expect(unsafe_code, reason = "referential integrity")]
        Ok(unsafe { api::Tenant::new_unchecked(tenant_id) })
    }

    /// `DateTime` when the term of this `Lease` commences.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.startsAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn starts_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.lease(ctx).await?.starts_at.coerce())
    }

    /// `DateTime` when the term of this `Lease` expires.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.expiresAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn expires_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.lease(ctx).await?.expires_at.coerce())
    }

    /// Monthly rent of this `Lease`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.monthlyRent",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn monthly_rent(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.lease(ctx).await?.monthly_rent)
    }

    /// Security deposit of this `Lease`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.securityDeposit",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn security_deposit(
        &self,
        ctx: &Context,
    ) -> Result<Option<Money>, Error> {
        Ok(self.lease(ctx).await?.security_deposit)
    }

    /// Utility deposit of this `Lease`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.utilityDeposit",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn utility_deposit(
        &self,
        ctx: &Context,
    ) -> Result<Option<Money>, Error> {
        Ok(self.lease(ctx).await?.utility_deposit)
    }

    /// Special conditions agreed under this `Lease`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.specialConditions",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn special_conditions(
        &self,
        ctx: &Context,
    ) -> Result<Option<SpecialConditions>, Error> {
        Ok(self
            .lease(ctx)
            .await?
            .special_conditions
            .clone()
            .map(Into::into))
    }

    /// Status of this `Lease` as of today.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.lease(ctx).await?.status(DateTime::now()).into())
    }

    /// `DateTime` when this `Lease` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lease.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.lease(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Lease`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::lease::Id)]
#[into(domain::lease::Id)]
#[graphql(name = "LeaseId", transparent)]
pub struct Id(Uuid);

/// Special conditions agreed under a `Lease`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "LeaseSpecialConditions",
    with = scalar::Via::<domain::lease::SpecialConditions>,
)]
pub struct SpecialConditions(domain::lease::SpecialConditions);

/// Status of a `Lease`, derived from its term.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "LeaseStatus")]
pub enum Status {
    /// The lease term is running.
    Active,

    /// The lease expires within the renewal window.
    ForRenewal,

    /// The lease term has ended.
    Expired,
}

impl From<domain::lease::Status> for Status {
    fn from(status: domain::lease::Status) -> Self {
        use domain::lease::Status as S;
        match status {
            S::Active => Self::Active,
            S::ForRenewal => Self::ForRenewal,
            S::Expired => Self::Expired,
        }
    }
}
