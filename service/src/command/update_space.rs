//! [`Command`] for updating an existing [`Space`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, space, Space},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Space`].
///
/// Sparse by design: only the provided fields are changed. The monthly rent
/// is never recomputed from the floor area, it changes only when sent
/// explicitly.
#[derive(Clone, Debug, Default)]
pub struct UpdateSpace {
    /// ID of the [`Space`] to update.
    pub id: space::Id,

    /// New [`space::Number`], if changed.
    pub number: Option<space::Number>,

    /// New floor [`property::Area`], if changed.
    pub floor_area: Option<property::Area>,

    /// New monthly asking rate, if changed.
    pub rate: Option<Option<Money>>,

    /// New total monthly rent, if changed.
    pub monthly_rent: Option<Option<Money>>,

    /// New [`space::Status`], if changed.
    pub status: Option<space::Status>,
}

impl<Db, M> Command<UpdateSpace> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Space>, space::Id>>,
            Ok = Option<Space>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Space, space::Id>>, Err = Traced<database::Error>>
        + Database<Update<Space>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    M: Sync,
{
    type Ok = Space;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateSpace) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateSpace {
            id,
            number,
            floor_area,
            rate,
            monthly_rent,
            status,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Space`.
        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut space = tx
            .execute(Select(By::<Option<Space>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SpaceNotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(number) = number {
            space.number = number;
        }
        if let Some(floor_area) = floor_area {
            space.floor_area = floor_area;
        }
        if let Some(rate) = rate {
            space.rate = rate;
        }
        if let Some(monthly_rent) = monthly_rent {
            space.monthly_rent = monthly_rent;
        }
        if let Some(status) = status {
            space.status = status;
        }

        tx.execute(Update(space.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(space)
    }
}

/// Error of [`UpdateSpace`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Space`] with the provided ID does not exist.
    #[display("`Space(id: {_0})` does not exist")]
    SpaceNotExists(#[error(not(source))] space::Id),
}
