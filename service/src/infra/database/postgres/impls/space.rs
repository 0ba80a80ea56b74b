//! [`Space`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Money,
};
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property, space, Space},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns selected for a [`Space`].
const COLUMNS: &str = "\
    id, property_id, number, floor_area, \
    rate, rate_currency, monthly_rent, rent_currency, \
    status, tenant_id, created_at";

/// Restores a [`Space`] from the provided [`Row`].
fn from_row(row: &Row) -> Space {
    let rate = row
        .get::<_, Option<Decimal>>("rate")
        .zip(row.get("rate_currency"))
        .map(|(amount, currency)| Money { amount, currency });
    let monthly_rent = row
        .get::<_, Option<Decimal>>("monthly_rent")
        .zip(row.get("rent_currency"))
        .map(|(amount, currency)| Money { amount, currency });

    Space {
        id: row.get("id"),
        property_id: row.get("property_id"),
        number: row.get("number"),
        floor_area: row.get("floor_area"),
        rate,
        monthly_rent,
        status: row.get("status"),
        tenant_id: row.get("tenant_id"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Space>, space::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Space>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Space>, space::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: space::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM spaces \
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

impl<C> Database<Select<By<Option<Space>, (property::Id, space::Number)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Space>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Space>, (property::Id, space::Number)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (property_id, number) = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM spaces \
             WHERE property_id = $1::UUID \
               AND number = $2::VARCHAR \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&property_id, &number])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<Space>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Space>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Space>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let property_id: property::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM spaces \
             WHERE property_id = $1::UUID \
             ORDER BY number ASC",
        );
        Ok(self
            .query(&sql, &[&property_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Space>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Space>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(space): Insert<Space>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(space)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Space>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(space): Update<Space>,
    ) -> Result<Self::Ok, Self::Err> {
        let Space {
            id,
            property_id,
            number,
            floor_area,
            rate,
            monthly_rent,
            status,
            tenant_id,
            created_at,
        } = space;

        let rate_amount = rate.map(|m| m.amount);
        let rate_currency = rate.map(|m| m.currency);
        let rent_amount = monthly_rent.map(|m| m.amount);
        let rent_currency = monthly_rent.map(|m| m.currency);

        const SQL: &str = "\
            INSERT INTO spaces (\
                id, property_id, number, floor_area, \
                rate, rate_currency, monthly_rent, rent_currency, \
                status, tenant_id, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, $4::NUMERIC, \
                $5::NUMERIC, $6::INT2, $7::NUMERIC, $8::INT2, \
                $9::INT2, $10::UUID, $11::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET property_id = EXCLUDED.property_id, \
                number = EXCLUDED.number, \
                floor_area = EXCLUDED.floor_area, \
                rate = EXCLUDED.rate, \
                rate_currency = EXCLUDED.rate_currency, \
                monthly_rent = EXCLUDED.monthly_rent, \
                rent_currency = EXCLUDED.rent_currency, \
                status = EXCLUDED.status, \
                tenant_id = EXCLUDED.tenant_id, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &number,
                &floor_area,
                &rate_amount,
                &rate_currency,
                &rent_amount,
                &rent_currency,
                &status,
                &tenant_id,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Space, space::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Space, space::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: space::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO spaces_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
