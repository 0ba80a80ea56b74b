//! [`Property`]-related definitions.

use std::future;

use common::{DateTime, Handler as _, Money, Percent};
use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, read};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A managed property.
#[derive(Clone, Debug, From)]
pub struct Property {
    /// ID of this [`Property`].
    id: Id,

    /// Underlying [`domain::Property`].
    property: OnceCell<domain::Property>,
}

impl From<domain::Property> for Property {
    fn from(property: domain::Property) -> Self {
        Self {
            id: property.id.into(),
            property: OnceCell::new_with(Some(property)),
        }
    }
}

impl Property {
    /// Creates a new [`Property`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Property`] with the provided ID exists,
    /// otherwise accessing this [`Property`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            property: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Property`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Property`] doesn't exist.
    async fn property(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Property, Error> {
        let id = self.id.into();
        self.property
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::property::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|p| {
                        future::ready(p.ok_or_else(|| {
                            api::query::PropertyError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A managed property.
#[graphql_object(context = Context)]
impl Property {
    /// Unique identifier of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Unique business code of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.code",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn code(&self, ctx: &Context) -> Result<Code, Error> {
        Ok(self.property(ctx).await?.code.clone().into())
    }

    /// Name of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.property(ctx).await?.name.clone().into())
    }

    /// Land title number of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.titleNo",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title_no(
        &self,
        ctx: &Context,
    ) -> Result<Option<TitleNo>, Error> {
        Ok(self.property(ctx).await?.title_no.clone().map(Into::into))
    }

    /// Lot number of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.lotNo",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn lot_no(&self, ctx: &Context) -> Result<Option<LotNo>, Error> {
        Ok(self.property(ctx).await?.lot_no.clone().map(Into::into))
    }

    /// Registered owner of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.registeredOwner",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn registered_owner(
        &self,
        ctx: &Context,
    ) -> Result<RegisteredOwner, Error> {
        Ok(self.property(ctx).await?.registered_owner.clone().into())
    }

    /// Address of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.address",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn address(&self, ctx: &Context) -> Result<Address, Error> {
        Ok(self.property(ctx).await?.address.clone().into())
    }

    /// City of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.city",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn city(&self, ctx: &Context) -> Result<City, Error> {
        Ok(self.property(ctx).await?.city.clone().into())
    }

    /// Province of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.province",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn province(
        &self,
        ctx: &Context,
    ) -> Result<Option<Province>, Error> {
        Ok(self.property(ctx).await?.province.clone().map(Into::into))
    }

    /// Kind of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.kind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn kind(&self, ctx: &Context) -> Result<Kind, Error> {
        Ok(self.property(ctx).await?.kind.into())
    }

    /// Total leasable area of this `Property`, in square meters.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.leasableArea",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn leasable_area(&self, ctx: &Context) -> Result<Area, Error> {
        Ok(self.property(ctx).await?.leasable_area.into())
    }

    /// `Company` owning this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.company",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn company(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Company>, Error> {
        Ok(self.property(ctx).await?.company_id.map(|id| {
            #[expect(unsafe_code, reason = "referential integrity")]
            unsafe {
                api::Company::new_unchecked(id)
            }
        }))
    }

    /// `User` acting as custodian of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.custodian",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn custodian(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::User>, Error> {
        Ok(self.property(ctx).await?.custodian_id.map(|id| {
            #[expect(unsafe_code, reason = "referential integrity")]
            unsafe {
                api::User::new_unchecked(id)
            }
        }))
    }

    /// `Space`s of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.spaces",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn spaces(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Space>, Error> {
        ctx.service()
            .execute(query::space::ByProperty::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|spaces| spaces.into_iter().map(Into::into).collect())
    }

    /// Occupancy of this `Property`, derived from its `Space`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.occupancy",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn occupancy(&self, ctx: &Context) -> Result<Occupancy, Error> {
        ctx.service()
            .execute(query::property::OccupancyOf::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Real property tax records filed against this `Property` itself.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.rptRecords",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn rpt_records(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::RptRecord>, Error> {
        ctx.service()
            .execute(query::rpt::ByOwner::by(domain::rpt::Owner::Property(
                self.id.into(),
            )))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|records| records.into_iter().map(Into::into).collect())
    }

    /// `DateTime` when this `Property` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.property(ctx).await?.created_at.coerce())
    }
}

/// Occupancy of a `Property`, derived from its `Space`s.
#[derive(Clone, Debug, From)]
pub struct Occupancy(read::Occupancy);

/// Occupancy of a `Property`, derived from its `Space`s.
#[graphql_object(name = "PropertyOccupancy", context = Context)]
impl Occupancy {
    /// Share of the leasable area which is occupied.
    #[must_use]
    pub fn rate(&self) -> Percent {
        self.0.rate
    }

    /// Sum of the monthly rents over all `Space`s having one set.
    ///
    /// `null` when no rents are set, or when they mix currencies.
    #[must_use]
    pub fn total_rent(&self) -> Option<Money> {
        self.0.total_rent
    }
}

/// Unique identifier of a `Property`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::property::Id)]
#[into(domain::property::Id)]
#[graphql(name = "PropertyId", transparent)]
pub struct Id(Uuid);

/// Unique business code of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyCode",
    with = scalar::Via::<domain::property::Code>,
)]
pub struct Code(domain::property::Code);

/// Name of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyName",
    with = scalar::Via::<domain::property::Name>,
)]
pub struct Name(domain::property::Name);

/// Land title number of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyTitleNo",
    with = scalar::Via::<domain::property::TitleNo>,
)]
pub struct TitleNo(domain::property::TitleNo);

/// Lot number of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyLotNo",
    with = scalar::Via::<domain::property::LotNo>,
)]
pub struct LotNo(domain::property::LotNo);

/// Registered owner of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyRegisteredOwner",
    with = scalar::Via::<domain::property::RegisteredOwner>,
)]
pub struct RegisteredOwner(domain::property::RegisteredOwner);

/// Address of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyAddress",
    with = scalar::Via::<domain::property::Address>,
)]
pub struct Address(domain::property::Address);

/// City of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyCity",
    with = scalar::Via::<domain::property::City>,
)]
pub struct City(domain::property::City);

/// Province of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyProvince",
    with = scalar::Via::<domain::property::Province>,
)]
pub struct Province(domain::property::Province);

/// Area in square meters.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "Area", with = scalar::Via::<domain::property::Area>)]
pub struct Area(domain::property::Area);

/// Kind of a `Property`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "PropertyKind")]
pub enum Kind {
    /// A commercial property.
    Commercial,

    /// A residential property.
    Residential,

    /// An industrial property.
    Industrial,

    /// A mixed-use property.
    MixedUse,
}

impl From<domain::property::Kind> for Kind {
    fn from(kind: domain::property::Kind) -> Self {
        use domain::property::Kind as K;
        match kind {
            K::Commercial => Self::Commercial,
            K::Residential => Self::Residential,
            K::Industrial => Self::Industrial,
            K::MixedUse => Self::MixedUse,
        }
    }
}

impl From<Kind> for domain::property::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Commercial => Self::Commercial,
            Kind::Residential => Self::Residential,
            Kind::Industrial => Self::Industrial,
            Kind::MixedUse => Self::MixedUse,
        }
    }
}

pub mod list {
    //! Definitions related to the [`Property`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{query, read, Query as _};

    use super::{Id, Property};
    use crate::{api::scalar, AsError, Context, Error};

    /// Cursor for the `Property` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(Id, read::property::list::Cursor)]
    #[graphql(
        name = "PropertyListCursor",
        with = scalar::Via::<read::property::list::Cursor>,
    )]
    pub struct Cursor(pub read::property::list::Cursor);

    /// Edge in the [`Property`] list.
    #[derive(Clone, Copy, Debug, From, Into)]
    pub struct Edge(read::property::list::Edge);

    /// Edge in the `Property` list.
    #[graphql_object(name = "PropertyListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `PropertyListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `PropertyListEdge`.
        #[must_use]
        pub fn node(&self) -> Property {
            #[expect(
                unsafe_code,
                reason = "`Edge` loaded from repository guarantees \
                          `Property` existence"
            )]
            unsafe {
                Property::new_unchecked(self.0.node)
            }
        }
    }

    /// Connection of the [`Property`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::property::list::Connection);

    /// Connection of the `Property` list.
    #[graphql_object(name = "PropertyListConnection", context = Context)]
    impl Connection {
        /// Edges of this `PropertyListConnection`.
        #[must_use]
        pub fn edges(&self) -> Vec<Edge> {
            self.0.edges.iter().copied().map(Into::into).collect()
        }

        /// Information about the page.
        #[must_use]
        pub fn page_info(&self) -> PageInfo {
            PageInfo {
                info: self.0.page_info(),
                start_cursor: self.0.edges.first().map(|e| e.cursor.into()),
                end_cursor: self.0.edges.last().map(|e| e.cursor.into()),
            }
        }
    }

    /// Information about a [`Connection`] page.
    #[derive(Clone, Copy, Debug)]
    pub struct PageInfo {
        /// Underlying [`read::property::list::PageInfo`].
        info: read::property::list::PageInfo,

        /// Start cursor of the page.
        start_cursor: Option<Cursor>,

        /// End cursor of the page.
        end_cursor: Option<Cursor>,
    }

    /// Information about a `PropertyListConnection` page.
    #[graphql_object(name = "PropertyListPageInfo", context = Context)]
    impl PageInfo {
        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.info.has_next_page
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.info.has_previous_page
        }

        /// Start cursor of the page.
        #[must_use]
        pub fn start_cursor(&self) -> &Option<Cursor> {
            &self.start_cursor
        }

        /// End cursor of the page.
        #[must_use]
        pub fn end_cursor(&self) -> &Option<Cursor> {
            &self.end_cursor
        }

        /// Total `Property` count.
        pub async fn total_count(&self, ctx: &Context) -> Result<i32, Error> {
            ctx.service()
                .execute(query::properties::TotalCount::by(()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())
                .map(Into::into)
        }
    }
}
