//! [`Command`] for creating a new [`Space`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{property, space, Property, Space},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Space`] under a [`Property`].
#[derive(Clone, Debug)]
pub struct CreateSpace {
    /// ID of the [`Property`] to create a [`Space`] under.
    pub property_id: property::Id,

    /// [`space::Number`] of a new [`Space`], unique within the [`Property`].
    pub number: space::Number,

    /// Floor [`property::Area`] of a new [`Space`].
    pub floor_area: property::Area,

    /// Monthly asking rate per area unit of a new [`Space`].
    ///
    /// The total monthly rent is derived from it once, at creation.
    pub rate: Option<Money>,

    /// Initial [`space::Status`] of a new [`Space`].
    pub status: space::Status,
}

impl<Db, M> Command<CreateSpace> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Space>, (property::Id, space::Number)>>,
            Ok = Option<Space>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Space>, property::Id>>,
            Ok = Vec<Space>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Property, property::Id>>, Err = Traced<database::Error>>
        + Database<Insert<Space>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    M: Sync,
{
    type Ok = (Space, read::Occupancy);
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateSpace) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateSpace {
            property_id,
            number,
            floor_area,
            rate,
            status,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of a `Space` with the same `Number`
        // under the same `Property`.
        tx.execute(Lock(By::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let property = tx
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let existing = tx
            .execute(Select(By::<Option<Space>, _>::new((
                property_id,
                number.clone(),
            ))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::NumberTaken(number)));
        }

        let space = Space {
            id: space::Id::new(),
            property_id,
            number,
            floor_area,
            rate,
            monthly_rent: rate.map(|r| space::total_rent(r, floor_area)),
            status,
            tenant_id: None,
            created_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(space.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        // Read-after-write: the returned occupancy must already include the
        // new `Space`.
        let spaces = tx
            .execute(Select(By::<Vec<Space>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let occupancy = read::Occupancy::derive(
            &spaces,
            property.leasable_area.as_decimal(),
        );

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok((space, occupancy))
    }
}

/// Error of [`CreateSpace`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`Space`] with the provided [`space::Number`] already exists under the
    /// [`Property`].
    #[display("`Space` with the `{_0}` number already exists")]
    NumberTaken(#[error(not(source))] space::Number),
}
