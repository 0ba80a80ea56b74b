//! GraphQL API definitions.

pub mod company;
pub mod lease;
mod mutation;
pub mod property;
mod query;
pub mod rpt;
pub mod scalar;
pub mod space;
pub mod tenant;
pub mod user;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    company::Company, lease::Lease, mutation::Mutation, property::Property,
    query::Query, rpt::RptRecord, space::Space, tenant::Tenant, user::User,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

define_error! {
    enum PaginationError {
        #[code = "AMBIGUOUS_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Ambiguous pagination arguments"]
        Ambiguous,
    }
}
