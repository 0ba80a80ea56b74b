//! [`Lease`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select, Update},
    Currency, Money,
};
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{lease, space, Lease},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns selected for a [`Lease`].
const COLUMNS: &str = "\
    id, property_id, space_id, tenant_id, starts_at, expires_at, \
    monthly_rent, currency, security_deposit, utility_deposit, \
    special_conditions, created_at";

/// Restores a [`Lease`] from the provided [`Row`].
///
/// Deposits share the `currency` column with the monthly rent.
fn from_row(row: &Row) -> Lease {
    let currency: Currency = row.get("currency");
    let money = |amount: Decimal| Money { amount, currency };

    Lease {
        id: row.get("id"),
        property_id: row.get("property_id"),
        space_id: row.get("space_id"),
        tenant_id: row.get("tenant_id"),
        starts_at: row.get("starts_at"),
        expires_at: row.get("expires_at"),
        monthly_rent: money(row.get("monthly_rent")),
        security_deposit: row
            .get::<_, Option<Decimal>>("security_deposit")
            .map(money),
        utility_deposit: row
            .get::<_, Option<Decimal>>("utility_deposit")
            .map(money),
        special_conditions: row.get("special_conditions"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Lease>, lease::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Lease>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Lease>, lease::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: lease::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM leases \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Option<read::lease::Active<Lease>>, space::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::lease::Active<Lease>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<read::lease::Active<Lease>>, space::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let space_id: space::Id = by.into_inner();

        // Expiration is compared by calendar day, same as
        // `Lease::status()` does.
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM leases \
             WHERE space_id = $1::UUID \
               AND expires_at::DATE >= NOW()::DATE \
             ORDER BY expires_at DESC \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&space_id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| read::lease::Active(from_row(&row))))
    }
}

impl<C> Database<Insert<Lease>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Lease>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(lease): Insert<Lease>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(lease)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Lease>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(lease): Update<Lease>,
    ) -> Result<Self::Ok, Self::Err> {
        let Lease {
            id,
            property_id,
            space_id,
            tenant_id,
            starts_at,
            expires_at,
            monthly_rent,
            security_deposit,
            utility_deposit,
            special_conditions,
            created_at,
        } = lease;

        let security_deposit = security_deposit.map(|m| m.amount);
        let utility_deposit = utility_deposit.map(|m| m.amount);

        const SQL: &str = "\
            INSERT INTO leases (\
                id, property_id, space_id, tenant_id, starts_at, expires_at, \
                monthly_rent, currency, security_deposit, utility_deposit, \
                special_conditions, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::TIMESTAMPTZ, $6::TIMESTAMPTZ, \
                $7::NUMERIC, $8::INT2, $9::NUMERIC, $10::NUMERIC, \
                $11::VARCHAR, $12::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET property_id = EXCLUDED.property_id, \
                space_id = EXCLUDED.space_id, \
                tenant_id = EXCLUDED.tenant_id, \
                starts_at = EXCLUDED.starts_at, \
                expires_at = EXCLUDED.expires_at, \
                monthly_rent = EXCLUDED.monthly_rent, \
                currency = EXCLUDED.currency, \
                security_deposit = EXCLUDED.security_deposit, \
                utility_deposit = EXCLUDED.utility_deposit, \
                special_conditions = EXCLUDED.special_conditions, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &space_id,
                &tenant_id,
                &starts_at,
                &expires_at,
                &monthly_rent.amount,
                &monthly_rent.currency,
                &security_deposit,
                &utility_deposit,
                &special_conditions,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
