//! [`Command`] for onboarding a new [`Tenant`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted, Update},
    Currency, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        lease::{self, DepositTerms},
        onboarding, property, space, tenant, Lease, Property, Space, Tenant,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for onboarding a new [`Tenant`] into a [`Space`].
///
/// Applies the final payload of an [`onboarding::Wizard`] atomically: the
/// [`Tenant`], its [`Lease`] and the [`Space`] status change either all
/// commit or none do.
#[derive(Clone, Debug)]
pub struct OnboardTenant {
    /// Tenant identity collected by the wizard.
    pub tenant: onboarding::TenantInfo,

    /// Lease terms collected by the wizard.
    pub terms: onboarding::LeaseTerms,
}

/// Entities produced by a successful [`OnboardTenant`] [`Command`].
#[derive(Clone, Debug)]
pub struct Onboarded {
    /// Created [`Tenant`].
    pub tenant: Tenant,

    /// Created [`Lease`].
    pub lease: Lease,

    /// Updated [`Space`], now occupied by the [`Tenant`].
    pub space: Space,
}

impl<Db, M> Command<OnboardTenant> for Service<Db, M>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Space>, space::Id>>,
            Ok = Option<Space>,
            Err = Traced<database::Error>,
        > + Database<Lock<By<Space, space::Id>>, Err = Traced<database::Error>>
        + Database<Insert<Tenant>, Err = Traced<database::Error>>
        + Database<Insert<Lease>, Err = Traced<database::Error>>
        + Database<Update<Space>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    M: Sync,
{
    type Ok = Onboarded;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: OnboardTenant,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let OnboardTenant { tenant, terms } = cmd;
        let onboarding::LeaseTerms {
            property_id,
            space_id,
            monthly_rent,
            starts_at,
            expires_at,
            security_deposit,
            utility_deposit,
            special_conditions,
        } = terms;

        // Deposits are stored under the rent's currency.
        if let Some(deposit) = [security_deposit, utility_deposit]
            .into_iter()
            .flatten()
            .find(|d| d.currency != monthly_rent.currency)
        {
            return Err(tracerr::new!(E::DepositCurrencyMismatch {
                deposit: deposit.currency,
                rent: monthly_rent.currency,
            }));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid two concurrent onboardings racing on the same `Space`.
        tx.execute(Lock(By::new(space_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let mut space = tx
            .execute(Select(By::<Option<Space>, _>::new(space_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SpaceNotExists(space_id))
            .map_err(tracerr::wrap!())?;
        if space.property_id != property_id {
            return Err(tracerr::new!(E::SpaceNotInProperty {
                space_id,
                property_id,
            }));
        }
        if space.status == space::Status::Occupied {
            return Err(tracerr::new!(E::SpaceOccupied(space_id)));
        }

        let onboarding::TenantInfo {
            bp_code,
            first_name,
            last_name,
            email,
            contact_no,
            address,
            company_name,
        } = tenant;
        let tenant = Tenant {
            id: tenant::Id::new(),
            bp_code,
            first_name,
            last_name,
            email,
            contact_no,
            address,
            company_name,
            created_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(tenant.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let suggested = DepositTerms::suggest(monthly_rent);
        let lease = Lease {
            id: lease::Id::new(),
            property_id,
            space_id,
            tenant_id: tenant.id,
            starts_at,
            expires_at,
            monthly_rent,
            security_deposit: security_deposit.or(Some(suggested.security)),
            utility_deposit: utility_deposit.or(Some(suggested.utility)),
            special_conditions,
            created_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(lease.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        space.status = space::Status::Occupied;
        space.tenant_id = Some(tenant.id);
        tx.execute(Update(space.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(Onboarded {
            tenant,
            lease,
            space,
        })
    }
}

/// Error of [`OnboardTenant`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`Space`] with the provided ID does not exist.
    #[display("`Space(id: {_0})` does not exist")]
    SpaceNotExists(#[error(not(source))] space::Id),

    /// [`Space`] doesn't belong to the chosen [`Property`].
    #[display(
        "`Space(id: {space_id})` doesn't belong to \
         `Property(id: {property_id})`"
    )]
    SpaceNotInProperty {
        /// ID of the chosen [`Space`].
        space_id: space::Id,

        /// ID of the chosen [`Property`].
        property_id: property::Id,
    },

    /// [`Space`] is already occupied by another [`Tenant`].
    #[display("`Space(id: {_0})` is already occupied")]
    SpaceOccupied(#[error(not(source))] space::Id),

    /// Deposit is denominated in a [`Currency`] other than the monthly
    /// rent's.
    #[display(
        "deposit currency `{deposit}` doesn't match the rent's `{rent}`"
    )]
    DepositCurrencyMismatch {
        /// [`Currency`] of the offending deposit.
        deposit: Currency,

        /// [`Currency`] of the monthly rent.
        rent: Currency,
    },
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Commit, Insert, Lock, Select, Transact, Update},
        Currency, DateTime, Money,
    };
    use tracerr::Traced;

    use super::{ExecutionError, OnboardTenant};
    use crate::{
        command::Command as _,
        domain::{
            onboarding, property, space, tenant, Lease, Property, Space,
            Tenant,
        },
        infra::{database, Database},
        Config, Service,
    };

    /// [`Database`] holding a single [`Property`] with a single [`Space`].
    ///
    /// [`Transact`] yields a clone of it, so the transaction serves the same
    /// data.
    #[derive(Clone, Debug)]
    struct InMemory {
        property: Property,
        space: Space,
    }

    impl Database<Transact> for InMemory {
        type Ok = Self;
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
            Ok(self.clone())
        }
    }

    impl Database<Lock<By<Space, space::Id>>> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            _: Lock<By<Space, space::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    impl Database<Select<By<Option<Property>, property::Id>>> for InMemory {
        type Ok = Option<Property>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<Property>, property::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            let id = by.into_inner();
            Ok(Some(self.property.clone()).filter(|p| p.id == id))
        }
    }

    impl Database<Select<By<Option<Space>, space::Id>>> for InMemory {
        type Ok = Option<Space>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<Space>, space::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            let id = by.into_inner();
            Ok(Some(self.space.clone()).filter(|s| s.id == id))
        }
    }

    impl Database<Insert<Tenant>> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            _: Insert<Tenant>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    impl Database<Insert<Lease>> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            _: Insert<Lease>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    impl Database<Update<Space>> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            _: Update<Space>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    impl Database<Commit> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    fn money(amount: &str, currency: Currency) -> Money {
        Money {
            amount: amount.parse().unwrap(),
            currency,
        }
    }

    fn db() -> InMemory {
        let property_id = property::Id::new();
        InMemory {
            property: Property {
                id: property_id,
                code: "MKT-001".parse().unwrap(),
                name: "Makati Tower".parse().unwrap(),
                title_no: None,
                lot_no: None,
                registered_owner: "Acme Holdings".parse().unwrap(),
                address: "6789 Ayala Ave".parse().unwrap(),
                city: "Makati".parse().unwrap(),
                province: None,
                kind: property::Kind::Commercial,
                leasable_area: "500".parse().unwrap(),
                company_id: None,
                custodian_id: None,
                created_at: DateTime::now().coerce(),
            },
            space: Space {
                id: space::Id::new(),
                property_id,
                number: "2F-01".parse().unwrap(),
                floor_area: "20".parse().unwrap(),
                rate: None,
                monthly_rent: None,
                status: space::Status::Available,
                tenant_id: None,
                created_at: DateTime::now().coerce(),
            },
        }
    }

    fn cmd(db: &InMemory) -> OnboardTenant {
        OnboardTenant {
            tenant: onboarding::TenantInfo {
                bp_code: None,
                first_name: tenant::FirstName::new("Juan").unwrap(),
                last_name: tenant::LastName::new("Dela Cruz").unwrap(),
                email: None,
                contact_no: None,
                address: tenant::Address::new("123 Rizal Ave, Manila")
                    .unwrap(),
                company_name: None,
            },
            terms: onboarding::LeaseTerms {
                property_id: db.property.id,
                space_id: db.space.id,
                monthly_rent: money("10000", Currency::Php),
                starts_at: DateTime::from_rfc3339("2024-01-01T00:00:00Z")
                    .unwrap()
                    .coerce(),
                expires_at: DateTime::from_rfc3339("2025-01-01T00:00:00Z")
                    .unwrap()
                    .coerce(),
                security_deposit: None,
                utility_deposit: None,
                special_conditions: None,
            },
        }
    }

    fn service(db: InMemory) -> Service<InMemory, ()> {
        Service::new(
            Config {
                refresh_interval: Duration::from_secs(30),
            },
            db,
            (),
        )
    }

    #[tokio::test]
    async fn rejects_deposit_in_foreign_currency() {
        let db = db();
        let mut cmd = cmd(&db);
        cmd.terms.security_deposit = Some(money("100", Currency::Usd));

        let err = service(db).execute(cmd).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::DepositCurrencyMismatch {
                deposit: Currency::Usd,
                rent: Currency::Php,
            }
        ));
    }

    #[tokio::test]
    async fn rejects_utility_deposit_in_foreign_currency() {
        let db = db();
        let mut cmd = cmd(&db);
        cmd.terms.utility_deposit = Some(money("2000", Currency::Usd));

        let err = service(db).execute(cmd).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::DepositCurrencyMismatch { .. }
        ));
    }

    #[tokio::test]
    async fn defaults_deposits_and_occupies_the_space() {
        let db = db();

        let onboarded = service(db.clone()).execute(cmd(&db)).await.unwrap();

        assert_eq!(
            onboarded.lease.security_deposit,
            Some(money("30000", Currency::Php)),
        );
        assert_eq!(
            onboarded.lease.utility_deposit,
            Some(money("5000", Currency::Php)),
        );
        assert_eq!(onboarded.space.status, space::Status::Occupied);
        assert_eq!(onboarded.space.tenant_id, Some(onboarded.tenant.id));
    }

    #[tokio::test]
    async fn keeps_agreed_deposits_in_the_rent_currency() {
        let db = db();
        let mut cmd = cmd(&db);
        cmd.terms.security_deposit = Some(money("20000", Currency::Php));

        let onboarded = service(db).execute(cmd).await.unwrap();

        assert_eq!(
            onboarded.lease.security_deposit,
            Some(money("20000", Currency::Php)),
        );
    }
}
