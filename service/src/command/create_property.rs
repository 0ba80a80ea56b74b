//! [`Command`] for creating a new [`Property`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{company, property, user, Company, Property, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// Unique [`property::Code`] of a new [`Property`].
    pub code: property::Code,

    /// [`property::Name`] of a new [`Property`].
    pub name: property::Name,

    /// [`property::TitleNo`] of a new [`Property`].
    pub title_no: Option<property::TitleNo>,

    /// [`property::LotNo`] of a new [`Property`].
    pub lot_no: Option<property::LotNo>,

    /// [`property::RegisteredOwner`] of a new [`Property`].
    pub registered_owner: property::RegisteredOwner,

    /// [`property::Address`] of a new [`Property`].
    pub address: property::Address,

    /// [`property::City`] of a new [`Property`].
    pub city: property::City,

    /// [`property::Province`] of a new [`Property`].
    pub province: Option<property::Province>,

    /// [`property::Kind`] of a new [`Property`].
    pub kind: property::Kind,

    /// Total leasable [`property::Area`] of a new [`Property`].
    pub leasable_area: property::Area,

    /// ID of the [`Company`] owning a new [`Property`].
    pub company_id: Option<company::Id>,

    /// ID of the [`User`] acting as custodian of a new [`Property`].
    pub custodian_id: Option<user::Id>,
}

impl<Db, M> Command<CreateProperty> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Company>, company::Id>>,
            Ok = Option<Company>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Code>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Property, property::Code>>, Err = Traced<database::Error>>
        + Database<Insert<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    M: Sync,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProperty {
            code,
            name,
            title_no,
            lot_no,
            registered_owner,
            address,
            city,
            province,
            kind,
            leasable_area,
            company_id,
            custodian_id,
        } = cmd;

        if let Some(company_id) = company_id {
            self.database()
                .execute(Select(By::<Option<Company>, _>::new(company_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::CompanyNotExists(company_id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }
        if let Some(custodian_id) = custodian_id {
            self.database()
                .execute(Select(By::<Option<User>, _>::new(custodian_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::UserNotExists(custodian_id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of a `Property` with the same `Code`.
        tx.execute(Lock(By::new(code.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Option<Property>, _>::new(code.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::CodeTaken(code)));
        }

        let property = Property {
            id: property::Id::new(),
            code,
            name,
            title_no,
            lot_no,
            registered_owner,
            address,
            city,
            province,
            kind,
            leasable_area,
            company_id,
            custodian_id,
            created_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] with the provided [`property::Code`] already exists.
    #[display("`Property` with the `{_0}` code already exists")]
    CodeTaken(#[error(not(source))] property::Code),

    /// [`Company`] with the provided ID does not exist.
    #[display("`Company(id: {_0})` does not exist")]
    CompanyNotExists(#[error(not(source))] company::Id),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),
}
