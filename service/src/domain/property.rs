//! [`Property`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{company, user};
#[cfg(doc)]
use crate::domain::{Company, Space, User};

/// Property managed by the back office.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// Unique [`Code`] of this [`Property`].
    pub code: Code,

    /// [`Name`] of this [`Property`].
    pub name: Name,

    /// Title number of this [`Property`], if any.
    pub title_no: Option<TitleNo>,

    /// Lot number of this [`Property`], if any.
    pub lot_no: Option<LotNo>,

    /// [`RegisteredOwner`] of this [`Property`].
    pub registered_owner: RegisteredOwner,

    /// Street [`Address`] of this [`Property`].
    pub address: Address,

    /// [`City`] this [`Property`] is located in.
    pub city: City,

    /// [`Province`] this [`Property`] is located in, if any.
    pub province: Option<Province>,

    /// [`Kind`] of this [`Property`].
    pub kind: Kind,

    /// Total leasable [`Area`] of this [`Property`].
    ///
    /// Occupancy rate is derived against this value and never stored.
    pub leasable_area: Area,

    /// ID of the [`Company`] owning this [`Property`], if any.
    pub company_id: Option<company::Id>,

    /// ID of the [`User`] acting as custodian of this [`Property`], if any.
    pub custodian_id: Option<user::Id>,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Property`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    derive_more::FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Unique code of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Code(String);

impl Code {
    /// Creates a new [`Code`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `code` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Creates a new [`Code`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`Code`].
    fn check(code: impl AsRef<str>) -> bool {
        let code = code.as_ref();
        code.trim() == code && !code.is_empty() && code.len() <= 64
    }
}

impl FromStr for Code {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Code`")
    }
}

/// Name of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Title number of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct TitleNo(String);

impl TitleNo {
    /// Creates a new [`TitleNo`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `num` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(num: impl Into<String>) -> Self {
        Self(num.into())
    }

    /// Creates a new [`TitleNo`] if the given `num` is valid.
    #[must_use]
    pub fn new(num: impl Into<String>) -> Option<Self> {
        let num = num.into();
        Self::check(&num).then_some(Self(num))
    }

    /// Checks whether the given `num` is a valid [`TitleNo`].
    fn check(num: impl AsRef<str>) -> bool {
        let num = num.as_ref();
        num.trim() == num && !num.is_empty() && num.len() <= 128
    }
}

impl FromStr for TitleNo {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `TitleNo`")
    }
}

/// Lot number of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct LotNo(String);

impl LotNo {
    /// Creates a new [`LotNo`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `num` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(num: impl Into<String>) -> Self {
        Self(num.into())
    }

    /// Creates a new [`LotNo`] if the given `num` is valid.
    #[must_use]
    pub fn new(num: impl Into<String>) -> Option<Self> {
        let num = num.into();
        Self::check(&num).then_some(Self(num))
    }

    /// Checks whether the given `num` is a valid [`LotNo`].
    fn check(num: impl AsRef<str>) -> bool {
        let num = num.as_ref();
        num.trim() == num && !num.is_empty() && num.len() <= 128
    }
}

impl FromStr for LotNo {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `LotNo`")
    }
}

/// Registered owner of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct RegisteredOwner(String);

impl RegisteredOwner {
    /// Creates a new [`RegisteredOwner`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `owner` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(owner: impl Into<String>) -> Self {
        Self(owner.into())
    }

    /// Creates a new [`RegisteredOwner`] if the given `owner` is valid.
    #[must_use]
    pub fn new(owner: impl Into<String>) -> Option<Self> {
        let owner = owner.into();
        Self::check(&owner).then_some(Self(owner))
    }

    /// Checks whether the given `owner` is a valid [`RegisteredOwner`].
    fn check(owner: impl AsRef<str>) -> bool {
        let owner = owner.as_ref();
        owner.trim() == owner && !owner.is_empty() && owner.len() <= 512
    }
}

impl FromStr for RegisteredOwner {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `RegisteredOwner`")
    }
}

/// Street address of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty() && address.len() <= 512
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// City of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct City(String);

impl City {
    /// Creates a new [`City`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `city` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(city: impl Into<String>) -> Self {
        Self(city.into())
    }

    /// Creates a new [`City`] if the given `city` is valid.
    #[must_use]
    pub fn new(city: impl Into<String>) -> Option<Self> {
        let city = city.into();
        Self::check(&city).then_some(Self(city))
    }

    /// Checks whether the given `city` is a valid [`City`].
    fn check(city: impl AsRef<str>) -> bool {
        let city = city.as_ref();
        city.trim() == city && !city.is_empty() && city.len() <= 256
    }
}

impl FromStr for City {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `City`")
    }
}

/// Province of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Province(String);

impl Province {
    /// Creates a new [`Province`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `province` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(province: impl Into<String>) -> Self {
        Self(province.into())
    }

    /// Creates a new [`Province`] if the given `province` is valid.
    #[must_use]
    pub fn new(province: impl Into<String>) -> Option<Self> {
        let province = province.into();
        Self::check(&province).then_some(Self(province))
    }

    /// Checks whether the given `province` is a valid [`Province`].
    fn check(province: impl AsRef<str>) -> bool {
        let province = province.as_ref();
        province.trim() == province
            && !province.is_empty()
            && province.len() <= 256
    }
}

impl FromStr for Province {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Province`")
    }
}

/// Area in square meters.
///
/// Parsed from numeric strings at the boundary, so non-numeric input is
/// rejected before ever reaching persistence.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Area(Decimal);

impl Area {
    /// An [`Area`] of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Area`] if the given `value` is non-negative.
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        (value >= Decimal::ZERO).then_some(Self(value))
    }

    /// Creates a new [`Area`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be non-negative.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns this [`Area`] as a [`Decimal`].
    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        self.0
    }
}

impl FromStr for Area {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Area`: expected a non-negative number")
    }
}

define_kind! {
    #[doc = "Kind of a [`Property`]."]
    enum Kind {
        #[doc = "A commercial property."]
        Commercial = 1,

        #[doc = "A residential property."]
        Residential = 2,

        #[doc = "An industrial property."]
        Industrial = 3,

        #[doc = "A mixed-use property."]
        MixedUse = 4,
    }
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Area;

    #[test]
    fn area_rejects_non_numeric() {
        assert!("12a".parse::<Area>().is_err());
        assert!("".parse::<Area>().is_err());
        assert!("-1".parse::<Area>().is_err());
    }

    #[test]
    fn area_accepts_numeric_strings() {
        assert!("0".parse::<Area>().is_ok());
        assert!("1500".parse::<Area>().is_ok());
        assert!("1500.25".parse::<Area>().is_ok());
    }
}
