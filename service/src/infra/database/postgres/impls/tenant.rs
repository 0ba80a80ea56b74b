//! [`Tenant`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{tenant, Tenant},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Tenant>, tenant::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Tenant>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Tenant>, tenant::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: tenant::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, bp_code, first_name, last_name, email, contact_no, \
                   address, company_name, created_at \
            FROM tenants \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Tenant {
                id: row.get("id"),
                bp_code: row.get("bp_code"),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                email: row.get("email"),
                contact_no: row.get("contact_no"),
                address: row.get("address"),
                company_name: row.get("company_name"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Insert<Tenant>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Tenant>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(tenant): Insert<Tenant>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(tenant)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Tenant>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(tenant): Update<Tenant>,
    ) -> Result<Self::Ok, Self::Err> {
        let Tenant {
            id,
            bp_code,
            first_name,
            last_name,
            email,
            contact_no,
            address,
            company_name,
            created_at,
        } = tenant;

        const SQL: &str = "\
            INSERT INTO tenants (\
                id, bp_code, first_name, last_name, email, contact_no, \
                address, company_name, created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, \
                $9::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET bp_code = EXCLUDED.bp_code, \
                first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                email = EXCLUDED.email, \
                contact_no = EXCLUDED.contact_no, \
                address = EXCLUDED.address, \
                company_name = EXCLUDED.company_name, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &bp_code,
                &first_name,
                &last_name,
                &email,
                &contact_no,
                &address,
                &company_name,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
