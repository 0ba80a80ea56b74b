//! [`Command`] for creating a new [`User`].

use common::{
    operations::Insert,
    DateTime,
};
use tracerr::Traced;

use crate::{
    domain::{tenant, user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`user::Name`] of a new [`User`].
    pub name: user::Name,

    /// Email of a new [`User`].
    pub email: Option<tenant::Email>,

    /// [`user::Role`] of a new [`User`].
    pub role: user::Role,
}

impl<Db, M> Command<CreateUser> for Service<Db, M>
where
    Db: Database<Insert<User>, Err = Traced<database::Error>>,
    M: Sync,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        let CreateUser { name, email, role } = cmd;

        let user = User {
            id: user::Id::new(),
            name,
            email,
            role,
            created_at: DateTime::now().coerce(),
        };
        self.database()
            .execute(Insert(user.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
pub type ExecutionError = database::Error;
