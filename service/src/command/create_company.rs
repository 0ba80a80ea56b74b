//! [`Command`] for creating a new [`Company`].

use common::{
    operations::Insert,
    DateTime,
};
use tracerr::Traced;

use crate::{
    domain::{company, Company},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Company`].
#[derive(Clone, Debug)]
pub struct CreateCompany {
    /// [`company::Name`] of a new [`Company`].
    pub name: company::Name,
}

impl<Db, M> Command<CreateCompany> for Service<Db, M>
where
    Db: Database<Insert<Company>, Err = Traced<database::Error>>,
    M: Sync,
{
    type Ok = Company;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateCompany,
    ) -> Result<Self::Ok, Self::Err> {
        let company = Company {
            id: company::Id::new(),
            name: cmd.name,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(company.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        Ok(company)
    }
}

/// Error of [`CreateCompany`] [`Command`] execution.
pub type ExecutionError = database::Error;
