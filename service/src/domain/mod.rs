//! Domain definitions.

pub mod billing;
pub mod company;
pub mod lease;
pub mod onboarding;
pub mod property;
pub mod rpt;
pub mod space;
pub mod tenant;
pub mod user;

pub use self::{
    company::Company, lease::Lease, property::Property, rpt::RptRecord,
    space::Space, tenant::Tenant, user::User,
};
