//! [`Company`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{company, Company},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Company>, company::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Company>, company::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: company::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, created_at \
            FROM companies \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Company {
                id: row.get("id"),
                name: row.get("name"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Insert<Company>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Company>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(company): Insert<Company>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(company))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Company>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(company): Update<Company>,
    ) -> Result<Self::Ok, Self::Err> {
        let Company {
            id,
            name,
            created_at,
        } = company;

        const SQL: &str = "\
            INSERT INTO companies (id, name, created_at) \
            VALUES ($1::UUID, $2::VARCHAR, $3::TIMESTAMPTZ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                created_at = EXCLUDED.created_at";
        self.exec(SQL, &[&id, &name, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
