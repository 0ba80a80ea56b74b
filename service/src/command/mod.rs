//! [`Command`] definition.

pub mod create_company;
pub mod create_property;
pub mod create_space;
pub mod create_user;
pub mod onboard_tenant;
pub mod save_rpt_records;
pub mod send_invoice;
pub mod update_property;
pub mod update_space;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_company::CreateCompany, create_property::CreateProperty,
    create_space::CreateSpace, create_user::CreateUser,
    onboard_tenant::OnboardTenant, save_rpt_records::SaveRptRecords,
    send_invoice::SendInvoice, update_property::UpdateProperty,
    update_space::UpdateSpace,
};
