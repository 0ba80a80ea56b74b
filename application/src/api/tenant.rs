//! [`Tenant`]-related definitions.

use std::future;

use common::{DateTime, Handler as _};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A tenant leasing a `Space`.
#[derive(Clone, Debug, From)]
pub struct Tenant {
    /// ID of this [`Tenant`].
    id: Id,

    /// Underlying [`domain::Tenant`].
    tenant: OnceCell<domain::Tenant>,
}

impl From<domain::Tenant> for Tenant {
    fn from(tenant: domain::Tenant) -> Self {
        Self {
            id: tenant.id.into(),
            tenant: OnceCell::new_with(Some(tenant)),
        }
    }
}

impl Tenant {
    /// Creates a new [`Tenant`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Tenant`] with the provided ID exists,
    /// otherwise accessing this [`Tenant`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            tenant: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Tenant`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Tenant`] doesn't exist.
    async fn tenant(&self, ctx: &Context) -> Result<&domain::Tenant, Error> {
        let id = self.id.into();
        self.tenant
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::tenant::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|t| {
                        future::ready(t.ok_or_else(|| {
                            api::query::TenantError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A tenant leasing a `Space`.
#[graphql_object(context = Context)]
impl Tenant {
    /// Unique identifier of this `Tenant`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Tenant.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Business partner code of this `Tenant`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Tenant.bpCode",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn bp_code(
        &self,
        ctx: &Context,
    ) -> Result<Option<BpCode>, Error> {
        Ok(self.tenant(ctx).await?.bp_code.clone().map(Into::into))
    }

    /// First name of this `Tenant`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Tenant.firstName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn first_name(&self, ctx: &Context) -> Result<FirstName, Error> {
        Ok(self.tenant(ctx).await?.first_name.clone().into())
    }

    /// Last name of this `Tenant`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Tenant.lastName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn last_name(&self, ctx: &Context) -> Result<LastName, Error> {
        Ok(self.tenant(ctx).await?.last_name.clone().into())
    }

    /// Email of this `Tenant`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Tenant.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn email(&self, ctx: &Context) -> Result<Option<Email>, Error> {
        Ok(self.tenant(ctx).await?.email.clone().map(Into::into))
    }

    /// Contact number of this `Tenant`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Tenant.contactNo",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn contact_no(
        &self,
        ctx: &Context,
    ) -> Result<Option<ContactNo>, Error> {
        Ok(self.tenant(ctx).await?.contact_no.clone().map(Into::into))
    }

    /// Postal address of this `Tenant`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Tenant.address",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn address(&self, ctx: &Context) -> Result<Address, Error> {
        Ok(self.tenant(ctx).await?.address.clone().into())
    }

    /// Company name this `Tenant` operates under.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Tenant.companyName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn company_name(
        &self,
        ctx: &Context,
    ) -> Result<Option<CompanyName>, Error> {
        Ok(self.tenant(ctx).await?.company_name.clone().map(Into::into))
    }

    /// `DateTime` when this `Tenant` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Tenant.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.tenant(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Tenant`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::tenant::Id)]
#[into(domain::tenant::Id)]
#[graphql(name = "TenantId", transparent)]
pub struct Id(Uuid);

/// Business partner code of a `Tenant`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TenantBpCode",
    with = scalar::Via::<domain::tenant::BpCode>,
)]
pub struct BpCode(domain::tenant::BpCode);

/// First name of a `Tenant`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TenantFirstName",
    with = scalar::Via::<domain::tenant::FirstName>,
)]
pub struct FirstName(domain::tenant::FirstName);

/// Last name of a `Tenant`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TenantLastName",
    with = scalar::Via::<domain::tenant::LastName>,
)]
pub struct LastName(domain::tenant::LastName);

/// Postal address of a `Tenant`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TenantAddress",
    with = scalar::Via::<domain::tenant::Address>,
)]
pub struct Address(domain::tenant::Address);

/// Company name of a `Tenant`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TenantCompanyName",
    with = scalar::Via::<domain::tenant::CompanyName>,
)]
pub struct CompanyName(domain::tenant::CompanyName);

/// Email of a `Tenant`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "TenantEmail", with = scalar::Via::<domain::tenant::Email>)]
pub struct Email(domain::tenant::Email);

/// Contact number of a `Tenant`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TenantContactNo",
    with = scalar::Via::<domain::tenant::ContactNo>,
)]
pub struct ContactNo(domain::tenant::ContactNo);
