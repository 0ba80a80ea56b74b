//! [`Command`] for saving a batch of [`RptRecord`]s.

use std::convert::Infallible;

use common::{
    operations::{By, Insert, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{property, rpt, space, Property, RptRecord, Space},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for saving a batch of edited [`RptRecord`] rows.
///
/// Rows are applied one by one, each independently: a failing row never
/// blocks nor rolls back the others, and the returned [`Report`] states the
/// outcome of every row in input order. Concurrent edits of the same row are
/// resolved last-writer-wins.
#[derive(Clone, Debug)]
pub struct SaveRptRecords {
    /// Rows to apply, in order.
    pub rows: Vec<Row>,
}

/// Single row of a [`SaveRptRecords`] batch.
#[derive(Clone, Debug)]
pub enum Row {
    /// Row without an identifier, to be created under the given
    /// [`rpt::Owner`].
    New {
        /// [`rpt::Owner`] to bind the new [`RptRecord`] to.
        owner: rpt::Owner,

        /// Field values of the new [`RptRecord`].
        fields: Fields,
    },

    /// Row with an identifier, to be updated in place.
    ///
    /// Ownership cannot change via this path, so no [`rpt::Owner`] is
    /// accepted here.
    Existing {
        /// ID of the [`RptRecord`] to update.
        id: rpt::Id,

        /// New field values of the [`RptRecord`].
        fields: Fields,
    },
}

/// Editable fields of an [`RptRecord`] row.
#[derive(Clone, Debug)]
pub struct Fields {
    /// Tax declaration number.
    pub tax_dec_no: rpt::TaxDecNo,

    /// Payment mode.
    pub payment_mode: rpt::PaymentMode,

    /// Next payment due date.
    pub due_at: rpt::DueDateTime,

    /// Payment status.
    pub status: rpt::Status,

    /// Custodian remarks.
    pub remarks: Option<rpt::Remarks>,
}

/// Per-row outcomes of a [`SaveRptRecords`] [`Command`], in input order.
#[derive(Debug)]
pub struct Report {
    /// Outcome of every row.
    pub outcomes: Vec<RowOutcome>,
}

impl Report {
    /// Indicates whether every row of the batch was applied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| !matches!(o, RowOutcome::Failed(_)))
    }
}

/// Outcome of applying a single [`Row`].
#[derive(Debug)]
pub enum RowOutcome {
    /// The row was created as a new [`RptRecord`].
    Created(RptRecord),

    /// The row updated an existing [`RptRecord`].
    Updated(RptRecord),

    /// The row failed and was skipped.
    Failed(Traced<RowError>),
}

impl<Db, M> Command<SaveRptRecords> for Service<Db, M>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Space>, space::Id>>,
            Ok = Option<Space>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<RptRecord>, rpt::Id>>,
            Ok = Option<RptRecord>,
            Err = Traced<database::Error>,
        > + Database<Insert<RptRecord>, Err = Traced<database::Error>>
        + Database<Update<RptRecord>, Err = Traced<database::Error>>,
    M: Sync,
{
    type Ok = Report;
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: SaveRptRecords,
    ) -> Result<Self::Ok, Self::Err> {
        let mut outcomes = Vec::with_capacity(cmd.rows.len());
        for (num, row) in cmd.rows.into_iter().enumerate() {
            let outcome = match self.apply_row(row).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::warn!(row = num, error = %e, "RPT row failed");
                    RowOutcome::Failed(e)
                }
            };
            outcomes.push(outcome);
        }
        Ok(Report { outcomes })
    }
}

impl<Db, M> Service<Db, M>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Space>, space::Id>>,
            Ok = Option<Space>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<RptRecord>, rpt::Id>>,
            Ok = Option<RptRecord>,
            Err = Traced<database::Error>,
        > + Database<Insert<RptRecord>, Err = Traced<database::Error>>
        + Database<Update<RptRecord>, Err = Traced<database::Error>>,
    M: Sync,
{
    /// Applies a single [`Row`] of a [`SaveRptRecords`] batch.
    async fn apply_row(
        &self,
        row: Row,
    ) -> Result<RowOutcome, Traced<RowError>> {
        use RowError as E;

        match row {
            Row::New { owner, fields } => {
                match owner {
                    rpt::Owner::Property(id) => self
                        .database()
                        .execute(Select(By::<Option<Property>, _>::new(id)))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?
                        .map(drop)
                        .ok_or(E::OwnerNotExists(owner))
                        .map_err(tracerr::wrap!())?,
                    rpt::Owner::Space(id) => self
                        .database()
                        .execute(Select(By::<Option<Space>, _>::new(id)))
                        .await
                        .map_err(tracerr::map_from_and_wrap!(=> E))?
                        .map(drop)
                        .ok_or(E::OwnerNotExists(owner))
                        .map_err(tracerr::wrap!())?,
                }

                let Fields {
                    tax_dec_no,
                    payment_mode,
                    due_at,
                    status,
                    remarks,
                } = fields;
                let record = RptRecord {
                    id: rpt::Id::new(),
                    owner,
                    tax_dec_no,
                    payment_mode,
                    due_at,
                    status,
                    remarks,
                    created_at: DateTime::now().coerce(),
                };
                self.database()
                    .execute(Insert(record.clone()))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;

                Ok(RowOutcome::Created(record))
            }
            Row::Existing { id, fields } => {
                let mut record = self
                    .database()
                    .execute(Select(By::<Option<RptRecord>, _>::new(id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::RecordNotExists(id))
                    .map_err(tracerr::wrap!())?;

                let Fields {
                    tax_dec_no,
                    payment_mode,
                    due_at,
                    status,
                    remarks,
                } = fields;
                record.tax_dec_no = tax_dec_no;
                record.payment_mode = payment_mode;
                record.due_at = due_at;
                record.status = status;
                record.remarks = remarks;

                self.database()
                    .execute(Update(record.clone()))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;

                Ok(RowOutcome::Updated(record))
            }
        }
    }
}

/// Error of applying a single [`Row`] of a [`SaveRptRecords`] batch.
#[derive(Debug, Display, Error, From)]
pub enum RowError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`rpt::Owner`] the new row binds to does not exist.
    #[display("`{_0:?}` does not exist")]
    OwnerNotExists(#[error(not(source))] rpt::Owner),

    /// [`RptRecord`] with the provided ID does not exist.
    #[display("`RptRecord(id: {_0})` does not exist")]
    RecordNotExists(#[error(not(source))] rpt::Id),
}

#[cfg(test)]
mod spec {
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
        time::Duration,
    };

    use common::{
        operations::{By, Insert, Select, Update},
        DateTime,
    };
    use tracerr::Traced;

    use super::{Fields, Row, RowError, RowOutcome, SaveRptRecords};
    use crate::{
        command::Command as _,
        domain::{property, rpt, space, Property, RptRecord, Space},
        infra::{database, Database},
        Config, Service,
    };

    /// [`Database`] holding a single [`Property`] and a set of
    /// [`RptRecord`]s, counting every [`Insert`] and [`Update`] dispatched
    /// to it.
    #[derive(Clone, Debug)]
    struct InMemory {
        property: Property,
        records: Arc<Mutex<HashMap<rpt::Id, RptRecord>>>,
        inserts: Arc<AtomicUsize>,
        updates: Arc<AtomicUsize>,
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
            _: Select<By<Option<Space>, space::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(None)
        }
    }

    impl Database<Select<By<Option<RptRecord>, rpt::Id>>> for InMemory {
        type Ok = Option<RptRecord>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<RptRecord>, rpt::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            let id = by.into_inner();
            Ok(self.records.lock().unwrap().get(&id).cloned())
        }
    }

    impl Database<Insert<RptRecord>> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Insert(record): Insert<RptRecord>,
        ) -> Result<Self::Ok, Self::Err> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            drop(self.records.lock().unwrap().insert(record.id, record));
            Ok(())
        }
    }

    impl Database<Update<RptRecord>> for InMemory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Update(record): Update<RptRecord>,
        ) -> Result<Self::Ok, Self::Err> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            drop(self.records.lock().unwrap().insert(record.id, record));
            Ok(())
        }
    }

    fn property() -> Property {
        Property {
            id: property::Id::new(),
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
        }
    }

    fn record(owner: rpt::Owner) -> RptRecord {
        RptRecord {
            id: rpt::Id::new(),
            owner,
            tax_dec_no: rpt::TaxDecNo::new("TD-2024-001").unwrap(),
            payment_mode: rpt::PaymentMode::Quarterly,
            due_at: DateTime::now().coerce(),
            status: rpt::Status::Unpaid,
            remarks: None,
            created_at: DateTime::now().coerce(),
        }
    }

    fn fields(tax_dec_no: &str) -> Fields {
        Fields {
            tax_dec_no: rpt::TaxDecNo::new(tax_dec_no).unwrap(),
            payment_mode: rpt::PaymentMode::Quarterly,
            due_at: DateTime::from_rfc3339("2024-06-30T00:00:00Z")
                .unwrap()
                .coerce(),
            status: rpt::Status::Unpaid,
            remarks: None,
        }
    }

    fn db(seeded: &RptRecord) -> (InMemory, Property) {
        let property = property();
        let db = InMemory {
            property: property.clone(),
            records: Arc::new(Mutex::new(HashMap::from([(
                seeded.id,
                seeded.clone(),
            )]))),
            inserts: Arc::new(AtomicUsize::new(0)),
            updates: Arc::new(AtomicUsize::new(0)),
        };
        (db, property)
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
    async fn failed_row_never_hides_the_others() {
        let seeded = record(rpt::Owner::Property(property::Id::new()));
        let (db, property) = db(&seeded);
        let service = service(db.clone());

        let report = service
            .execute(SaveRptRecords {
                rows: vec![
                    Row::New {
                        owner: rpt::Owner::Property(property.id),
                        fields: fields("TD-2024-010"),
                    },
                    Row::Existing {
                        id: rpt::Id::new(),
                        fields: fields("TD-2024-404"),
                    },
                    Row::New {
                        owner: rpt::Owner::Property(property.id),
                        fields: fields("TD-2024-011"),
                    },
                    Row::Existing {
                        id: seeded.id,
                        fields: fields("TD-2024-012"),
                    },
                ],
            })
            .await
            .unwrap_or_else(|never| match never {});

        assert_eq!(report.outcomes.len(), 4);
        assert!(matches!(report.outcomes[0], RowOutcome::Created(_)));
        assert!(matches!(
            report.outcomes[1],
            RowOutcome::Failed(ref e)
                if matches!(e.as_ref(), RowError::RecordNotExists(_)),
        ));
        assert!(matches!(report.outcomes[2], RowOutcome::Created(_)));
        assert!(matches!(
            report.outcomes[3],
            RowOutcome::Updated(ref r)
                if AsRef::<str>::as_ref(&r.tax_dec_no) == "TD-2024-012",
        ));
        assert!(!report.is_complete());

        assert_eq!(db.inserts.load(Ordering::SeqCst), 2);
        assert_eq!(db.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn all_applied_rows_complete_the_report() {
        let seeded = record(rpt::Owner::Property(property::Id::new()));
        let (db, property) = db(&seeded);
        let service = service(db.clone());

        let report = service
            .execute(SaveRptRecords {
                rows: vec![
                    Row::New {
                        owner: rpt::Owner::Property(property.id),
                        fields: fields("TD-2024-010"),
                    },
                    Row::Existing {
                        id: seeded.id,
                        fields: fields("TD-2024-011"),
                    },
                ],
            })
            .await
            .unwrap_or_else(|never| match never {});

        assert!(report.is_complete());
        assert_eq!(db.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(db.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_owner_fails_the_row() {
        let seeded = record(rpt::Owner::Property(property::Id::new()));
        let (db, _) = db(&seeded);

        let report = service(db.clone())
            .execute(SaveRptRecords {
                rows: vec![Row::New {
                    owner: rpt::Owner::Property(property::Id::new()),
                    fields: fields("TD-2024-010"),
                }],
            })
            .await
            .unwrap_or_else(|never| match never {});

        assert!(matches!(
            report.outcomes[0],
            RowOutcome::Failed(ref e)
                if matches!(e.as_ref(), RowError::OwnerNotExists(_)),
        ));
        assert_eq!(db.inserts.load(Ordering::SeqCst), 0);
    }
}
