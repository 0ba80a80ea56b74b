//! GraphQL [`Mutation`]s definitions.

use common::{DateTime, Handler as _, Money};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, Nullable};
use service::{
    command,
    domain::{self, onboarding},
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Property` with the provided details.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_CODE_TAKEN` - provided `PropertyCode` is occupied by
    ///                           another `Property`;
    /// - `COMPANY_NOT_EXISTS` - the `Company` with the provided ID does not
    ///                          exist;
    /// - `USER_NOT_EXISTS` - the `User` with the provided ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            code = %code,
            gql.name = "createProperty",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "flat GraphQL arguments")]
    pub async fn create_property(
        code: api::property::Code,
        name: api::property::Name,
        title_no: Option<api::property::TitleNo>,
        lot_no: Option<api::property::LotNo>,
        registered_owner: api::property::RegisteredOwner,
        address: api::property::Address,
        city: api::property::City,
        province: Option<api::property::Province>,
        kind: api::property::Kind,
        leasable_area: api::property::Area,
        company_id: Option<api::company::Id>,
        custodian_id: Option<api::user::Id>,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(command::CreateProperty {
                code: code.into(),
                name: name.into(),
                title_no: title_no.map(Into::into),
                lot_no: lot_no.map(Into::into),
                registered_owner: registered_owner.into(),
                address: address.into(),
                city: city.into(),
                province: province.map(Into::into),
                kind: kind.into(),
                leasable_area: leasable_area.into(),
                company_id: company_id.map(Into::into),
                custodian_id: custodian_id.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Property` with the specified ID.
    ///
    /// Only the provided fields are changed, everything else keeps its
    /// current value. Passing an explicit `null` clears a nullable field.
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
            gql.name = "updateProperty",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "flat GraphQL arguments")]
    pub async fn update_property(
        id: api::property::Id,
        name: Option<api::property::Name>,
        title_no: Nullable<api::property::TitleNo>,
        lot_no: Nullable<api::property::LotNo>,
        registered_owner: Option<api::property::RegisteredOwner>,
        address: Option<api::property::Address>,
        city: Option<api::property::City>,
        province: Nullable<api::property::Province>,
        kind: Option<api::property::Kind>,
        leasable_area: Option<api::property::Area>,
        company_id: Nullable<api::company::Id>,
        custodian_id: Nullable<api::user::Id>,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(command::UpdateProperty {
                id: id.into(),
                name: name.map(Into::into),
                title_no: title_no.explicit().map(|v| v.map(Into::into)),
                lot_no: lot_no.explicit().map(|v| v.map(Into::into)),
                registered_owner: registered_owner.map(Into::into),
                address: address.map(Into::into),
                city: city.map(Into::into),
                province: province.explicit().map(|v| v.map(Into::into)),
                kind: kind.map(Into::into),
                leasable_area: leasable_area.map(Into::into),
                company_id: company_id.explicit().map(|v| v.map(Into::into)),
                custodian_id: custodian_id
                    .explicit()
                    .map(|v| v.map(Into::into)),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Space` under a `Property`.
    ///
    /// The total monthly rent of the `Space` is derived from the provided
    /// rate and floor area once, at creation. Returns the created `Space`
    /// along with the occupancy of the `Property` as of right after the
    /// creation.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the provided ID does
    ///                           not exist;
    /// - `SPACE_NUMBER_TAKEN` - provided `SpaceNumber` is occupied by
    ///                          another `Space` of the `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createSpace",
            number = %number,
            otel.name = Self::SPAN_NAME,
            property_id = %property_id,
        ),
    )]
    pub async fn create_space(
        property_id: api::property::Id,
        number: api::space::Number,
        floor_area: api::property::Area,
        rate: Option<Money>,
        status: api::space::Status,
        ctx: &Context,
    ) -> Result<CreatedSpace, Error> {
        ctx.service()
            .execute(command::CreateSpace {
                property_id: property_id.into(),
                number: number.into(),
                floor_area: floor_area.into(),
                rate,
                status: status.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|(space, occupancy)| CreatedSpace {
                space: space.into(),
                occupancy: occupancy.into(),
            })
    }

    /// Updates the `Space` with the specified ID.
    ///
    /// Only the provided fields are changed. The monthly rent is never
    /// recomputed from the floor area, it changes only when sent explicitly.
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
            gql.name = "updateSpace",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_space(
        id: api::space::Id,
        number: Option<api::space::Number>,
        floor_area: Option<api::property::Area>,
        rate: Nullable<Money>,
        monthly_rent: Nullable<Money>,
        status: Option<api::space::Status>,
        ctx: &Context,
    ) -> Result<api::Space, Error> {
        ctx.service()
            .execute(command::UpdateSpace {
                id: id.into(),
                number: number.map(Into::into),
                floor_area: floor_area.map(Into::into),
                rate: rate.explicit(),
                monthly_rent: monthly_rent.explicit(),
                status: status.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Onboards a new `Tenant` into a `Space`.
    ///
    /// The `Tenant`, its `Lease` and the `Space` status change are applied
    /// atomically: either all of them commit or none do. Omitted deposits
    /// default to three months of rent as security and half a month as
    /// utility.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the provided ID does
    ///                           not exist;
    /// - `SPACE_NOT_EXISTS` - the `Space` with the provided ID does not
    ///                        exist;
    /// - `SPACE_NOT_IN_PROPERTY` - the `Space` doesn't belong to the chosen
    ///                             `Property`;
    /// - `SPACE_OCCUPIED` - the `Space` is already occupied by another
    ///                      `Tenant`;
    /// - `DEPOSIT_CURRENCY_MISMATCH` - a deposit is denominated in a
    ///                                 currency other than the monthly
    ///                                 rent's.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "onboardTenant",
            otel.name = Self::SPAN_NAME,
            space_id = %terms.space_id,
        ),
    )]
    pub async fn onboard_tenant(
        tenant: TenantInput,
        terms: LeaseTermsInput,
        ctx: &Context,
    ) -> Result<OnboardedTenant, Error> {
        ctx.service()
            .execute(command::OnboardTenant {
                tenant: tenant.into(),
                terms: terms.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|onboarded| OnboardedTenant {
                tenant: onboarded.tenant.into(),
                lease: onboarded.lease.into(),
                space: onboarded.space.into(),
            })
    }

    /// Saves a batch of edited `RptRecord` rows.
    ///
    /// Rows are applied independently: a failing row never blocks nor rolls
    /// back the others, and the returned report states the outcome of every
    /// row in input order. Rows with an `id` update the matching record,
    /// rows without one create a new record under the provided owner.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_RPT_OWNER` - a row without an `id` provides none or both
    ///                           of `propertyId` and `spaceId`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "saveRptRecords",
            otel.name = Self::SPAN_NAME,
            rows = rows.len(),
        ),
    )]
    pub async fn save_rpt_records(
        rows: Vec<RptRowInput>,
        ctx: &Context,
    ) -> Result<RptSaveReport, Error> {
        let rows = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::SaveRptRecords { rows })
            .await
            .map_or_else(|never| match never {}, |report| Ok(report.into()))
    }

    /// Creates a new `Company` with the provided name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCompany",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_company(
        name: api::company::Name,
        ctx: &Context,
    ) -> Result<api::Company, Error> {
        ctx.service()
            .execute(command::CreateCompany { name: name.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `User` with the provided details.
    #[tracing::instrument(
        skip_all,
        fields(
            email = ?email,
            gql.name = "createUser",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user(
        name: api::user::Name,
        email: Option<api::tenant::Email>,
        role: api::user::Role,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        ctx.service()
            .execute(command::CreateUser {
                name: name.into(),
                email: email.map(Into::into),
                role: role.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sends a billing invoice to the `Tenant` of a `Lease` and returns the
    /// VAT breakdown of the billed amount.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LEASE_NOT_EXISTS` - the `Lease` with the provided ID does not
    ///                        exist;
    /// - `TENANT_NOT_EXISTS` - the `Tenant` of the `Lease` does not exist;
    /// - `TENANT_HAS_NO_EMAIL` - the `Tenant` has no email to deliver the
    ///                           invoice to.
    #[tracing::instrument(
        skip_all,
        fields(
            amount_due = %amount_due,
            gql.name = "sendInvoice",
            lease_id = %lease_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn send_invoice(
        lease_id: api::lease::Id,
        amount_due: Money,
        ctx: &Context,
    ) -> Result<VatBreakdown, Error> {
        ctx.service()
            .execute(command::SendInvoice {
                lease_id: lease_id.into(),
                amount_due,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

/// `Space` created by the `createSpace` mutation.
#[derive(Debug)]
pub struct CreatedSpace {
    /// Created `Space`.
    space: api::Space,

    /// Occupancy of the `Property` as of right after the creation.
    occupancy: api::property::Occupancy,
}

/// `Space` created by the `createSpace` mutation.
#[graphql_object(context = Context)]
impl CreatedSpace {
    /// Created `Space`.
    #[must_use]
    pub fn space(&self) -> &api::Space {
        &self.space
    }

    /// Occupancy of the `Property` as of right after the creation.
    #[must_use]
    pub fn occupancy(&self) -> &api::property::Occupancy {
        &self.occupancy
    }
}

/// Identity of a `Tenant` being onboarded.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct TenantInput {
    /// Business partner code of the `Tenant`, if assigned.
    pub bp_code: Option<api::tenant::BpCode>,

    /// First name of the `Tenant`.
    pub first_name: api::tenant::FirstName,

    /// Last name of the `Tenant`.
    pub last_name: api::tenant::LastName,

    /// Email of the `Tenant`, if any.
    pub email: Option<api::tenant::Email>,

    /// Contact number of the `Tenant`, if any.
    pub contact_no: Option<api::tenant::ContactNo>,

    /// Postal address of the `Tenant`.
    pub address: api::tenant::Address,

    /// Company name the `Tenant` operates under, if any.
    pub company_name: Option<api::tenant::CompanyName>,
}

impl From<TenantInput> for onboarding::TenantInfo {
    fn from(input: TenantInput) -> Self {
        let TenantInput {
            bp_code,
            first_name,
            last_name,
            email,
            contact_no,
            address,
            company_name,
        } = input;
        Self {
            bp_code: bp_code.map(Into::into),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.map(Into::into),
            contact_no: contact_no.map(Into::into),
            address: address.into(),
            company_name: company_name.map(Into::into),
        }
    }
}

/// Terms of a `Lease` being concluded on onboarding.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct LeaseTermsInput {
    /// ID of the `Property` the leased `Space` belongs to.
    pub property_id: api::property::Id,

    /// ID of the `Space` being leased.
    pub space_id: api::space::Id,

    /// Monthly rent of the `Lease`.
    pub monthly_rent: Money,

    /// `DateTime` when the `Lease` term commences.
    pub starts_at: DateTime,

    /// `DateTime` when the `Lease` term expires.
    pub expires_at: DateTime,

    /// Security deposit, if agreed explicitly.
    pub security_deposit: Option<Money>,

    /// Utility deposit, if agreed explicitly.
    pub utility_deposit: Option<Money>,

    /// Special conditions of the `Lease`, if any.
    pub special_conditions: Option<api::lease::SpecialConditions>,
}

impl From<LeaseTermsInput> for onboarding::LeaseTerms {
    fn from(input: LeaseTermsInput) -> Self {
        let LeaseTermsInput {
            property_id,
            space_id,
            monthly_rent,
            starts_at,
            expires_at,
            security_deposit,
            utility_deposit,
            special_conditions,
        } = input;
        Self {
            property_id: property_id.into(),
            space_id: space_id.into(),
            monthly_rent,
            starts_at: starts_at.coerce(),
            expires_at: expires_at.coerce(),
            security_deposit,
            utility_deposit,
            special_conditions: special_conditions.map(Into::into),
        }
    }
}

/// Entities produced by the `onboardTenant` mutation.
#[derive(Debug)]
pub struct OnboardedTenant {
    /// Created `Tenant`.
    tenant: api::Tenant,

    /// Created `Lease`.
    lease: api::Lease,

    /// Updated `Space`, now occupied by the `Tenant`.
    space: api::Space,
}

/// Entities produced by the `onboardTenant` mutation.
#[graphql_object(context = Context)]
impl OnboardedTenant {
    /// Created `Tenant`.
    #[must_use]
    pub fn tenant(&self) -> &api::Tenant {
        &self.tenant
    }

    /// Created `Lease`.
    #[must_use]
    pub fn lease(&self) -> &api::Lease {
        &self.lease
    }

    /// Updated `Space`, now occupied by the `Tenant`.
    #[must_use]
    pub fn space(&self) -> &api::Space {
        &self.space
    }
}

/// Single row of a `saveRptRecords` batch.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct RptRowInput {
    /// ID of the `RptRecord` to update.
    ///
    /// When omitted, a new `RptRecord` is created.
    pub id: Option<api::rpt::Id>,

    /// ID of the `Property` a new `RptRecord` is filed against.
    pub property_id: Option<api::property::Id>,

    /// ID of the `Space` a new `RptRecord` is filed against.
    pub space_id: Option<api::space::Id>,

    /// Tax declaration number.
    pub tax_dec_no: api::rpt::TaxDecNo,

    /// Payment mode.
    pub payment_mode: api::rpt::PaymentMode,

    /// `DateTime` when the next payment is due.
    pub due_at: DateTime,

    /// Payment status.
    pub status: api::rpt::Status,

    /// Custodian remarks.
    pub remarks: Option<api::rpt::Remarks>,
}

impl TryFrom<RptRowInput> for command::save_rpt_records::Row {
    type Error = Error;

    fn try_from(input: RptRowInput) -> Result<Self, Self::Error> {
        let RptRowInput {
            id,
            property_id,
            space_id,
            tax_dec_no,
            payment_mode,
            due_at,
            status,
            remarks,
        } = input;

        let fields = command::save_rpt_records::Fields {
            tax_dec_no: tax_dec_no.into(),
            payment_mode: payment_mode.into(),
            due_at: due_at.coerce(),
            status: status.into(),
            remarks: remarks.map(Into::into),
        };

        if let Some(id) = id {
            return Ok(Self::Existing {
                id: id.into(),
                fields,
            });
        }
        let owner = match (property_id, space_id) {
            (Some(id), None) => domain::rpt::Owner::Property(id.into()),
            (None, Some(id)) => domain::rpt::Owner::Space(id.into()),
            (Some(_), Some(_)) | (None, None) => {
                return Err(super::query::RptOwnerError::Ambiguous.into());
            }
        };
        Ok(Self::New { owner, fields })
    }
}

/// Report of a `saveRptRecords` batch.
#[derive(Debug, derive_more::From)]
pub struct RptSaveReport(command::save_rpt_records::Report);

/// Report of a `saveRptRecords` batch.
#[graphql_object(context = Context)]
impl RptSaveReport {
    /// Indicator whether every row of the batch was applied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.is_complete()
    }

    /// Outcome of every row, in input order.
    #[must_use]
    pub fn outcomes(&self) -> Vec<RptRowOutcome> {
        use command::save_rpt_records::RowOutcome as O;

        self.0
            .outcomes
            .iter()
            .map(|outcome| match outcome {
                O::Created(record) => RptRowOutcome {
                    kind: RptRowOutcomeKind::Created,
                    record: Some(record.clone().into()),
                    error: None,
                },
                O::Updated(record) => RptRowOutcome {
                    kind: RptRowOutcomeKind::Updated,
                    record: Some(record.clone().into()),
                    error: None,
                },
                O::Failed(e) => RptRowOutcome {
                    kind: RptRowOutcomeKind::Failed,
                    record: None,
                    error: Some(e.to_string()),
                },
            })
            .collect()
    }
}

/// Outcome of a single `saveRptRecords` row.
#[derive(Clone, Debug)]
pub struct RptRowOutcome {
    /// Kind of this outcome.
    kind: RptRowOutcomeKind,

    /// Saved `RptRecord`, if the row was applied.
    record: Option<api::RptRecord>,

    /// Failure description, if the row was skipped.
    error: Option<String>,
}

/// Outcome of a single `saveRptRecords` row.
#[graphql_object(context = Context)]
impl RptRowOutcome {
    /// Kind of this outcome.
    #[must_use]
    pub fn kind(&self) -> RptRowOutcomeKind {
        self.kind
    }

    /// Saved `RptRecord`, if the row was applied.
    #[must_use]
    pub fn record(&self) -> &Option<api::RptRecord> {
        &self.record
    }

    /// Failure description, if the row was skipped.
    #[must_use]
    pub fn error(&self) -> &Option<String> {
        &self.error
    }
}

/// Kind of a `saveRptRecords` row outcome.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum RptRowOutcomeKind {
    /// The row was created as a new `RptRecord`.
    Created,

    /// The row updated an existing `RptRecord`.
    Updated,

    /// The row failed and was skipped.
    Failed,
}

/// VAT breakdown of a billed amount.
#[derive(Clone, Copy, Debug, derive_more::From)]
pub struct VatBreakdown(domain::billing::VatBreakdown);

/// VAT breakdown of a billed amount.
#[graphql_object(context = Context)]
impl VatBreakdown {
    /// VAT-exclusive portion of the billed amount.
    #[must_use]
    pub fn vatable(&self) -> Money {
        self.0.vatable
    }

    /// VAT portion of the billed amount.
    #[must_use]
    pub fn vat(&self) -> Money {
        self.0.vat
    }
}

impl AsError for command::create_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CodeTaken(_) => {
                Some(PropertyCreationError::CodeTaken.into())
            }
            Self::CompanyNotExists(_) => {
                Some(api::query::CompanyError::NotExists.into())
            }
            Self::UserNotExists(_) => {
                Some(api::query::UserError::NotExists.into())
            }
        }
    }
}

impl AsError for command::update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(api::query::PropertyError::NotExists.into())
            }
        }
    }
}

impl AsError for command::create_space::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(api::query::PropertyError::NotExists.into())
            }
            Self::NumberTaken(_) => {
                Some(SpaceCreationError::NumberTaken.into())
            }
        }
    }
}

impl AsError for command::update_space::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::SpaceNotExists(_) => {
                Some(api::query::SpaceError::NotExists.into())
            }
        }
    }
}

impl AsError for command::onboard_tenant::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(api::query::PropertyError::NotExists.into())
            }
            Self::SpaceNotExists(_) => {
                Some(api::query::SpaceError::NotExists.into())
            }
            Self::SpaceNotInProperty { .. } => {
                Some(OnboardError::SpaceNotInProperty.into())
            }
            Self::SpaceOccupied(_) => Some(OnboardError::SpaceOccupied.into()),
            Self::DepositCurrencyMismatch { .. } => {
                Some(OnboardError::DepositCurrencyMismatch.into())
            }
        }
    }
}

impl AsError for command::send_invoice::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LeaseNotExists(_) => {
                Some(api::query::LeaseError::NotExists.into())
            }
            Self::TenantNotExists(_) => {
                Some(api::query::TenantError::NotExists.into())
            }
            Self::TenantHasNoEmail(_) => {
                Some(InvoiceError::TenantHasNoEmail.into())
            }
        }
    }
}

define_error! {
    enum PropertyCreationError {
        #[code = "PROPERTY_CODE_TAKEN"]
        #[status = CONFLICT]
        #[message = "`Property` with the provided `PropertyCode` already \
                     exists"]
        CodeTaken,
    }
}

define_error! {
    enum SpaceCreationError {
        #[code = "SPACE_NUMBER_TAKEN"]
        #[status = CONFLICT]
        #[message = "`Space` with the provided `SpaceNumber` already exists \
                     under the `Property`"]
        NumberTaken,
    }
}

define_error! {
    enum OnboardError {
        #[code = "SPACE_NOT_IN_PROPERTY"]
        #[status = BAD_REQUEST]
        #[message = "`Space` doesn't belong to the chosen `Property`"]
        SpaceNotInProperty,

        #[code = "SPACE_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "`Space` is already occupied by another `Tenant`"]
        SpaceOccupied,

        #[code = "DEPOSIT_CURRENCY_MISMATCH"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "deposit currency doesn't match the monthly rent's"]
        DepositCurrencyMismatch,
    }
}

define_error! {
    enum InvoiceError {
        #[code = "TENANT_HAS_NO_EMAIL"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "`Tenant` has no email to deliver the invoice to"]
        TenantHasNoEmail,
    }
}
