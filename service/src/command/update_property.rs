//! [`Command`] for updating an existing [`Property`].

use common::operations::{By, Commit, Lock, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{company, property, user, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Property`].
///
/// Sparse by design: only the provided fields are changed, everything else
/// keeps its persisted value.
#[derive(Clone, Debug, Default)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to update.
    pub id: property::Id,

    /// New [`property::Name`], if changed.
    pub name: Option<property::Name>,

    /// New [`property::TitleNo`], if changed.
    pub title_no: Option<Option<property::TitleNo>>,

    /// New [`property::LotNo`], if changed.
    pub lot_no: Option<Option<property::LotNo>>,

    /// New [`property::RegisteredOwner`], if changed.
    pub registered_owner: Option<property::RegisteredOwner>,

    /// New [`property::Address`], if changed.
    pub address: Option<property::Address>,

    /// New [`property::City`], if changed.
    pub city: Option<property::City>,

    /// New [`property::Province`], if changed.
    pub province: Option<Option<property::Province>>,

    /// New [`property::Kind`], if changed.
    pub kind: Option<property::Kind>,

    /// New leasable [`property::Area`], if changed.
    pub leasable_area: Option<property::Area>,

    /// New owning [`Company`] ID, if changed.
    ///
    /// [`Company`]: crate::domain::Company
    pub company_id: Option<Option<company::Id>>,

    /// New custodian [`User`] ID, if changed.
    ///
    /// [`User`]: crate::domain::User
    pub custodian_id: Option<Option<user::Id>>,
}

impl<Db, M> Command<UpdateProperty> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Property, property::Id>>, Err = Traced<database::Error>>
        + Database<Update<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    M: Sync,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            id,
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

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Property`.
        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut property = tx
            .execute(Select(By::<Option<Property>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(name) = name {
            property.name = name;
        }
        if let Some(title_no) = title_no {
            property.title_no = title_no;
        }
        if let Some(lot_no) = lot_no {
            property.lot_no = lot_no;
        }
        if let Some(registered_owner) = registered_owner {
            property.registered_owner = registered_owner;
        }
        if let Some(address) = address {
            property.address = address;
        }
        if let Some(city) = city {
            property.city = city;
        }
        if let Some(province) = province {
            property.province = province;
        }
        if let Some(kind) = kind {
            property.kind = kind;
        }
        if let Some(leasable_area) = leasable_area {
            property.leasable_area = leasable_area;
        }
        if let Some(company_id) = company_id {
            property.company_id = company_id;
        }
        if let Some(custodian_id) = custodian_id {
            property.custodian_id = custodian_id;
        }

        tx.execute(Update(property.clone()))
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

/// Error of [`UpdateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}
