//! [`RptRecord`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property, rpt, space, RptRecord},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns selected for an [`RptRecord`].
const COLUMNS: &str = "\
    id, property_id, space_id, tax_dec_no, payment_mode, due_at, \
    status, remarks, created_at";

/// Restores an [`RptRecord`] from the provided [`Row`].
///
/// Exactly one of `property_id`/`space_id` is non-NULL, enforced by a table
/// constraint.
fn from_row(row: &Row) -> RptRecord {
    let owner = row
        .get::<_, Option<property::Id>>("property_id")
        .map(rpt::Owner::Property)
        .or_else(|| {
            row.get::<_, Option<space::Id>>("space_id").map(rpt::Owner::Space)
        })
        .expect("exactly one owner is non-NULL");

    RptRecord {
        id: row.get("id"),
        owner,
        tax_dec_no: row.get("tax_dec_no"),
        payment_mode: row.get("payment_mode"),
        due_at: row.get("due_at"),
        status: row.get("status"),
        remarks: row.get("remarks"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<RptRecord>, rpt::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<RptRecord>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RptRecord>, rpt::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: rpt::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM rpt_records \
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

impl<C> Database<Select<By<Vec<RptRecord>, rpt::Owner>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<RptRecord>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<RptRecord>, rpt::Owner>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let owner: rpt::Owner = by.into_inner();

        let (column, id) = match &owner {
            rpt::Owner::Property(id) => {
                ("property_id", uuid::Uuid::from(*id))
            }
            rpt::Owner::Space(id) => ("space_id", uuid::Uuid::from(*id)),
        };

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM rpt_records \
             WHERE {column} = $1::UUID \
             ORDER BY due_at ASC",
        );
        Ok(self
            .query(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<RptRecord>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<RptRecord>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(record): Insert<RptRecord>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(record)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<RptRecord>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(record): Update<RptRecord>,
    ) -> Result<Self::Ok, Self::Err> {
        let RptRecord {
            id,
            owner,
            tax_dec_no,
            payment_mode,
            due_at,
            status,
            remarks,
            created_at,
        } = record;

        let property_id = owner.property_id();
        let space_id = owner.space_id();

        const SQL: &str = "\
            INSERT INTO rpt_records (\
                id, property_id, space_id, tax_dec_no, payment_mode, \
                due_at, status, remarks, created_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::VARCHAR, $5::INT2, \
                $6::TIMESTAMPTZ, $7::INT2, $8::VARCHAR, $9::TIMESTAMPTZ \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET tax_dec_no = EXCLUDED.tax_dec_no, \
                payment_mode = EXCLUDED.payment_mode, \
                due_at = EXCLUDED.due_at, \
                status = EXCLUDED.status, \
                remarks = EXCLUDED.remarks";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &space_id,
                &tax_dec_no,
                &payment_mode,
                &due_at,
                &status,
                &remarks,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
