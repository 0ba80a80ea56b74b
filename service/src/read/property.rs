//! [`Property`]-related read definitions.

use common::{Money, Percent};
use rust_decimal::Decimal;

use crate::domain::{space, Space};
#[cfg(doc)]
use crate::domain::{space::Status, Property};

/// Occupancy snapshot of a [`Property`], derived from its [`Space`]s.
///
/// Recomputed from current data on every read, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Occupancy {
    /// Share of the leasable area covered by [`Status::Occupied`] [`Space`]s.
    pub rate: Percent,

    /// Sum of the monthly rent over all [`Space`]s having one set.
    ///
    /// [`None`] if no [`Space`] has a rent set, or the rents mix currencies.
    pub total_rent: Option<Money>,
}

impl Occupancy {
    /// Derives an [`Occupancy`] from the provided [`Space`]s of a
    /// [`Property`] with the provided total leasable area.
    ///
    /// A non-positive leasable area yields a zero rate.
    #[must_use]
    pub fn derive<'s>(
        spaces: impl IntoIterator<Item = &'s Space>,
        leasable_area: Decimal,
    ) -> Self {
        let mut occupied_area = Decimal::ZERO;
        let mut rents = Vec::new();

        for space in spaces {
            if space.status == space::Status::Occupied {
                occupied_area += space.floor_area.as_decimal();
            }
            if let Some(rent) = space.monthly_rent {
                rents.push(rent);
            }
        }

        Self {
            rate: Percent::ratio(occupied_area, leasable_area),
            total_rent: Money::total(rents),
        }
    }
}

pub mod list {
    //! [`Property`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::property;
    #[cfg(doc)]
    use crate::domain::Property;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = property::Id;

    /// Cursor pointing to a specific [`Property`] in a list.
    pub type Cursor = property::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`property::Name`] (or its part) to fuzzy search for.
        pub name: Option<property::Name>,
    }

    /// Total count of [`Property`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}

#[cfg(test)]
mod spec {
    use common::{Currency, DateTime, Money};
    use rust_decimal::Decimal;

    use super::Occupancy;
    use crate::domain::{property, space, Space};

    fn php(s: &str) -> Money {
        Money {
            amount: s.parse().unwrap(),
            currency: Currency::Php,
        }
    }

    fn space(
        status: space::Status,
        area: &str,
        rent: Option<Money>,
    ) -> Space {
        Space {
            id: space::Id::new(),
            property_id: property::Id::new(),
            number: space::Number::new("GF-01").unwrap(),
            floor_area: area.parse().unwrap(),
            rate: None,
            monthly_rent: rent,
            status,
            tenant_id: None,
            created_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn rate_counts_occupied_spaces_only() {
        use space::Status as S;

        let spaces = [
            space(S::Occupied, "50", Some(php("10000"))),
            space(S::Occupied, "25", None),
            space(S::Available, "100", None),
            space(S::UnderMaintenance, "25", None),
        ];

        let occupancy =
            Occupancy::derive(&spaces, Decimal::from(300));
        assert_eq!(occupancy.rate.to_string(), "25.00");
        assert_eq!(occupancy.total_rent, Some(php("10000")));
    }

    #[test]
    fn zero_leasable_area_yields_zero_rate() {
        let spaces = [space(space::Status::Occupied, "50", None)];

        let occupancy = Occupancy::derive(&spaces, Decimal::ZERO);
        assert_eq!(occupancy.rate.to_string(), "0.00");
        assert_eq!(occupancy.total_rent, None);
    }

    #[test]
    fn mixed_currencies_yield_no_total() {
        let usd = Money {
            amount: "100".parse().unwrap(),
            currency: Currency::Usd,
        };
        let spaces = [
            space(space::Status::Occupied, "50", Some(php("10000"))),
            space(space::Status::Available, "50", Some(usd)),
        ];

        let occupancy =
            Occupancy::derive(&spaces, Decimal::from(100));
        assert_eq!(occupancy.total_rent, None);
    }
}
