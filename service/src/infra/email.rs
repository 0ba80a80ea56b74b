//! Outbound email boundary.

use std::convert::Infallible;

use common::operations::Perform;
use tracing as log;

use crate::domain::tenant;

/// [`Mailer`] delivering outbound email.
///
/// [`Mailer`]: common::Handler
pub use common::Handler as Mailer;

/// Outbound email message.
#[derive(Clone, Debug)]
pub struct Message {
    /// Address to deliver this [`Message`] to.
    pub to: tenant::Email,

    /// Subject of this [`Message`].
    pub subject: String,

    /// Rendered HTML body of this [`Message`].
    pub body_html: String,
}

/// [`Mailer`] writing every [`Message`] to the log instead of delivering it.
///
/// Stands in for a real delivery channel in environments without one
/// configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSender;

impl Mailer<Perform<Message>> for LogSender {
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Perform(msg): Perform<Message>,
    ) -> Result<Self::Ok, Self::Err> {
        log::info!(
            to = %msg.to,
            subject = msg.subject,
            "outbound email (delivery disabled)",
        );
        Ok(())
    }
}
