//! [`Command`] for sending a billing invoice to a [`Tenant`].

use std::fmt;

use common::{
    operations::{By, Perform, Select},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{billing::VatBreakdown, lease, tenant, Lease, Tenant},
    infra::{
        database,
        email::{self, Mailer},
        Database,
    },
    Service,
};

use super::Command;

/// [`Command`] for sending a billing invoice email to the [`Tenant`] of a
/// [`Lease`].
///
/// Delivery is fire-and-forget: a failing [`Mailer`] is logged and never
/// fails the [`Command`] itself.
#[derive(Clone, Debug)]
pub struct SendInvoice {
    /// ID of the [`Lease`] being billed.
    pub lease_id: lease::Id,

    /// Gross VAT-inclusive amount due.
    pub amount_due: Money,
}

impl<Db, M> Command<SendInvoice> for Service<Db, M>
where
    Db: Database<
            Select<By<Option<Lease>, lease::Id>>,
            Ok = Option<Lease>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Tenant>, tenant::Id>>,
            Ok = Option<Tenant>,
            Err = Traced<database::Error>,
        >,
    M: Mailer<Perform<email::Message>, Err: fmt::Display> + Sync,
{
    type Ok = VatBreakdown;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SendInvoice) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SendInvoice {
            lease_id,
            amount_due,
        } = cmd;

        let lease = self
            .database()
            .execute(Select(By::<Option<Lease>, _>::new(lease_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LeaseNotExists(lease_id))
            .map_err(tracerr::wrap!())?;

        let tenant = self
            .database()
            .execute(Select(By::<Option<Tenant>, _>::new(lease.tenant_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TenantNotExists(lease.tenant_id))
            .map_err(tracerr::wrap!())?;
        let to = tenant
            .email
            .clone()
            .ok_or(E::TenantHasNoEmail(tenant.id))
            .map_err(tracerr::wrap!())?;

        // Rounded at the presentation boundary only.
        let breakdown = VatBreakdown::split(amount_due).rounded();

        let message = email::Message {
            to,
            subject: format!(
                "Invoice for {} {}",
                tenant.first_name, tenant.last_name,
            ),
            body_html: format!(
                "<p>Amount due: {amount_due}</p>\
                 <p>VATable amount: {vatable}</p>\
                 <p>VAT (12%): {vat}</p>",
                amount_due = amount_due.rounded(),
                vatable = breakdown.vatable,
                vat = breakdown.vat,
            ),
        };
        if let Err(e) = self.mailer().execute(Perform(message)).await {
            log::warn!(
                lease_id = %lease_id,
                error = %e,
                "failed to send invoice email",
            );
        }

        Ok(breakdown)
    }
}

/// Error of [`SendInvoice`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Lease`] with the provided ID does not exist.
    #[display("`Lease(id: {_0})` does not exist")]
    LeaseNotExists(#[error(not(source))] lease::Id),

    /// [`Tenant`] with the provided ID does not exist.
    #[display("`Tenant(id: {_0})` does not exist")]
    TenantNotExists(#[error(not(source))] tenant::Id),

    /// [`Tenant`] has no email to deliver the invoice to.
    #[display("`Tenant(id: {_0})` has no email")]
    TenantHasNoEmail(#[error(not(source))] tenant::Id),
}
