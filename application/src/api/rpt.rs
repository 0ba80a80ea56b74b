//! Real property tax related definitions.

use std::future;

use common::{DateTime, Handler as _};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A real property tax record.
#[derive(Clone, Debug, From)]
pub struct RptRecord {
    /// ID of this [`RptRecord`].
    id: Id,

    /// Underlying [`domain::RptRecord`].
    record: OnceCell<domain::RptRecord>,
}

impl From<domain::RptRecord> for RptRecord {
    fn from(record: domain::RptRecord) -> Self {
        Self {
            id: record.id.into(),
            record: OnceCell::new_with(Some(record)),
        }
    }
}

impl RptRecord {
    /// Creates a new [`RptRecord`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`RptRecord`] with the provided ID exists,
    /// otherwise accessing this [`RptRecord`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            record: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::RptRecord`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::RptRecord`] doesn't exist.
    async fn record(&self, ctx: &Context) -> Result<&domain::RptRecord, Error> {
        let id = self.id.into();
        self.record
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::rpt::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|r| {
                        future::ready(r.ok_or_else(|| {
                            api::query::RptRecordError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A real property tax record.
#[graphql_object(context = Context)]
impl RptRecord {
    /// Unique identifier of this `RptRecord`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RptRecord.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `Property` this `RptRecord` is filed against.
    ///
    /// `null` when the record is filed against a `Space`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RptRecord.property",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Property>, Error> {
        Ok(self.record(ctx).await?.owner.property_id().map(|id| {
            #[expect(unsafe_code, reason = "referential integrity")]
            unsafe {
                api::Property::new_unchecked(id)
            }
        }))
    }

    /// `Space` this `RptRecord` is filed against.
    ///
    /// `null` when the record is filed against a `Property` itself.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RptRecord.space",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn space(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Space>, Error> {
        Ok(self.record(ctx).await?.owner.space_id().map(|id| {
            #[expect(unsafe_code, reason = "referential integrity")]
            unsafe {
                api::Space::new_unchecked(id)
            }
        }))
    }

    /// Tax declaration number of this `RptRecord`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RptRecord.taxDecNo",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn tax_dec_no(&self, ctx: &Context) -> Result<TaxDecNo, Error> {
        Ok(self.record(ctx).await?.tax_dec_no.clone().into())
    }

    /// Payment mode of this `RptRecord`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RptRecord.paymentMode",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn payment_mode(
        &self,
        ctx: &Context,
    ) -> Result<PaymentMode, Error> {
        Ok(self.record(ctx).await?.payment_mode.into())
    }

    /// `DateTime` when the next payment of this `RptRecord` is due.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RptRecord.dueAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn due_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.record(ctx).await?.due_at.coerce())
    }

    /// Payment status of this `RptRecord`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RptRecord.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.record(ctx).await?.status.into())
    }

    /// Indicator whether this `RptRecord` is unpaid past its due date.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RptRecord.isOverdue",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn is_overdue(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.record(ctx).await?.is_overdue(DateTime::now()))
    }

    /// Custodian remarks on this `RptRecord`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RptRecord.remarks",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn remarks(
        &self,
        ctx: &Context,
    ) -> Result<Option<Remarks>, Error> {
        Ok(self.record(ctx).await?.remarks.clone().map(Into::into))
    }

    /// `DateTime` when this `RptRecord` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RptRecord.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.record(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of an `RptRecord`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::rpt::Id)]
#[into(domain::rpt::Id)]
#[graphql(name = "RptRecordId", transparent)]
pub struct Id(Uuid);

/// Tax declaration number of an `RptRecord`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "RptRecordTaxDecNo",
    with = scalar::Via::<domain::rpt::TaxDecNo>,
)]
pub struct TaxDecNo(domain::rpt::TaxDecNo);

/// Custodian remarks on an `RptRecord`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "RptRecordRemarks",
    with = scalar::Via::<domain::rpt::Remarks>,
)]
pub struct Remarks(domain::rpt::Remarks);

/// Payment mode of an `RptRecord`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "RptPaymentMode")]
pub enum PaymentMode {
    /// Tax paid monthly.
    Monthly,

    /// Tax paid quarterly.
    Quarterly,

    /// Tax paid annually.
    Annual,
}

impl From<domain::rpt::PaymentMode> for PaymentMode {
    fn from(mode: domain::rpt::PaymentMode) -> Self {
        use domain::rpt::PaymentMode as M;
        match mode {
            M::Monthly => Self::Monthly,
            M::Quarterly => Self::Quarterly,
            M::Annual => Self::Annual,
        }
    }
}

impl From<PaymentMode> for domain::rpt::PaymentMode {
    fn from(mode: PaymentMode) -> Self {
        match mode {
            PaymentMode::Monthly => Self::Monthly,
            PaymentMode::Quarterly => Self::Quarterly,
            PaymentMode::Annual => Self::Annual,
        }
    }
}

/// Payment status of an `RptRecord`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "RptStatus")]
pub enum Status {
    /// The tax has been paid.
    Paid,

    /// The tax is outstanding.
    Unpaid,
}

impl From<domain::rpt::Status> for Status {
    fn from(status: domain::rpt::Status) -> Self {
        use domain::rpt::Status as S;
        match status {
            S::Paid => Self::Paid,
            S::Unpaid => Self::Unpaid,
        }
    }
}

impl From<Status> for domain::rpt::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Paid => Self::Paid,
            Status::Unpaid => Self::Unpaid,
        }
    }
}
