//! In-memory staging of extracted listings

use crate::extract::Listing;
use crate::storage::clock::Clock;
use crate::storage::traits::{BatchSink, StorageResult};
use crate::storage::{BatchStatement, SqlDialect, SqlParam, COLUMN_COUNT, FLAT_COLUMNS};

/// Largest number of records rendered into one statement by [`RecordStore::persist`]
///
/// 12 parameters per record keeps a statement well below SQLite's limit of
/// 32766 bound parameters.
pub const MAX_RECORDS_PER_STATEMENT: usize = 2000;

/// Append-only collection of the listings extracted during one run
///
/// Records keep extraction order. Repeated external ids are stored as-is;
/// collapsing them is left to the database's ignore-on-conflict insert.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Listing>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listing; always succeeds
    pub fn put(&mut self, listing: Listing) -> bool {
        self.records.push(listing);
        true
    }

    /// All listings in extraction order
    pub fn all(&self) -> &[Listing] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Listing> {
        self.records
    }

    /// Renders every stored listing into one MySQL-style batch insert
    ///
    /// Each listing contributes one 12-value tuple; the last value is the
    /// clock's current time.
    ///
    /// # Returns
    ///
    /// * `Some(BatchStatement)` - Statement and flattened parameters
    /// * `None` - The store is empty
    pub fn to_batch_statement(&self, clock: &dyn Clock) -> Option<BatchStatement> {
        build_statement(&self.records, SqlDialect::MySql, &clock.now())
    }

    /// Writes every stored listing through `sink`
    ///
    /// Does nothing for an empty store. Large stores are split into several
    /// statements of at most [`MAX_RECORDS_PER_STATEMENT`] records, all sharing
    /// one `added_dt` value. The statements go to the sink as one unit, so a
    /// failing statement aborts the whole write.
    ///
    /// # Returns
    ///
    /// The number of rows the sink reports as inserted
    pub fn persist<S: BatchSink>(&self, sink: &mut S, clock: &dyn Clock) -> StorageResult<usize> {
        if self.records.is_empty() {
            tracing::debug!("No listings to persist");
            return Ok(0);
        }

        let added = clock.now();
        let dialect = sink.dialect();
        let statements: Vec<BatchStatement> = self
            .records
            .chunks(MAX_RECORDS_PER_STATEMENT)
            .filter_map(|chunk| build_statement(chunk, dialect, &added))
            .collect();

        let inserted = sink.execute_all(&statements)?;

        tracing::info!(
            "Persisted {} of {} listings ({} already stored)",
            inserted,
            self.records.len(),
            self.records.len().saturating_sub(inserted)
        );

        Ok(inserted)
    }
}

fn build_statement(
    records: &[Listing],
    dialect: SqlDialect,
    added: &str,
) -> Option<BatchStatement> {
    if records.is_empty() {
        return None;
    }

    let placeholders = vec!["?"; COLUMN_COUNT].join(",");
    let tuple = format!("({})", placeholders);
    let values = vec![tuple.as_str(); records.len()].join(", ");

    let sql = format!(
        "{} INTO flats ({}) VALUES {};",
        dialect.insert_ignore(),
        FLAT_COLUMNS.join(", "),
        values
    );

    let mut params = Vec::with_capacity(records.len() * COLUMN_COUNT);
    for listing in records {
        params.extend([
            SqlParam::Int(listing.id_external),
            SqlParam::Text(listing.text.clone()),
            SqlParam::Text(listing.district.clone()),
            SqlParam::Text(listing.street.clone()),
            SqlParam::Int(listing.rooms),
            SqlParam::Int(listing.apartment_area),
            SqlParam::Text(listing.floor.clone()),
            SqlParam::Text(listing.house_type.clone()),
            SqlParam::Int(listing.price),
            SqlParam::Text(listing.listing_type.clone()),
            SqlParam::Text(listing.url.clone()),
            SqlParam::Text(added.to_string()),
        ]);
    }

    Some(BatchStatement { sql, params })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::clock::FixedClock;
    use crate::storage::traits::StorageError;

    const TUPLE: &str = "(?,?,?,?,?,?,?,?,?,?,?,?)";

    fn clock() -> FixedClock {
        FixedClock("2024-05-01 12:00:00".to_string())
    }

    fn listing(id: i64) -> Listing {
        Listing {
            id_external: id,
            text: format!("Flat {}", id),
            district: "Centre".to_string(),
            street: "Main St".to_string(),
            rooms: 2,
            apartment_area: 54,
            floor: "3/5".to_string(),
            house_type: "Stalina".to_string(),
            price: 85000,
            listing_type: "sell".to_string(),
            city: "Riga".to_string(),
            url: format!("https://www.ss.lv/msg/{}.html", id),
        }
    }

    /// Records every statement instead of executing it
    #[derive(Default)]
    struct RecordingSink {
        statements: Vec<BatchStatement>,
        fail: bool,
    }

    impl BatchSink for RecordingSink {
        fn dialect(&self) -> SqlDialect {
            SqlDialect::Sqlite
        }

        fn execute_batch(&mut self, statement: &BatchStatement) -> StorageResult<usize> {
            if self.fail {
                return Err(StorageError::Execute {
                    source: rusqlite::Error::InvalidQuery,
                });
            }
            self.statements.push(statement.clone());
            Ok(statement.row_count())
        }
    }

    #[test]
    fn test_put_preserves_order_and_duplicates() {
        let mut store = RecordStore::new();
        assert!(store.put(listing(3)));
        assert!(store.put(listing(1)));
        assert!(store.put(listing(3)));

        let ids: Vec<i64> = store.all().iter().map(|l| l.id_external).collect();
        assert_eq!(ids, vec![3, 1, 3]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_empty_store_has_no_statement() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert!(store.to_batch_statement(&clock()).is_none());
    }

    #[test]
    fn test_batch_statement_shape() {
        let mut store = RecordStore::new();
        for id in 1..=3 {
            store.put(listing(id));
        }

        let statement = store.to_batch_statement(&clock()).unwrap();

        assert!(statement.sql.starts_with(
            "INSERT IGNORE INTO flats (id_external, text, district, street, rooms, \
             apartment_area, floor, house_type, price, type, url, added_dt) VALUES "
        ));
        assert!(statement.sql.ends_with(");"));
        assert_eq!(statement.sql.matches(TUPLE).count(), 3);
        assert_eq!(statement.params.len(), 36);
        assert_eq!(statement.row_count(), 3);
    }

    #[test]
    fn test_batch_params_follow_record_order() {
        let mut store = RecordStore::new();
        store.put(listing(20));
        store.put(listing(10));

        let statement = store.to_batch_statement(&clock()).unwrap();
        let params = &statement.params;

        assert_eq!(params[0], SqlParam::Int(20));
        assert_eq!(params[1], SqlParam::Text("Flat 20".to_string()));
        assert_eq!(params[9], SqlParam::Text("sell".to_string()));
        assert_eq!(
            params[10],
            SqlParam::Text("https://www.ss.lv/msg/20.html".to_string())
        );
        assert_eq!(params[11], SqlParam::Text("2024-05-01 12:00:00".to_string()));
        assert_eq!(params[12], SqlParam::Int(10));
        assert_eq!(params[23], SqlParam::Text("2024-05-01 12:00:00".to_string()));
    }

    #[test]
    fn test_persist_empty_store_is_noop() {
        let store = RecordStore::new();
        let mut sink = RecordingSink::default();
        assert_eq!(store.persist(&mut sink, &clock()).unwrap(), 0);
        assert!(sink.statements.is_empty());
    }

    #[test]
    fn test_persist_uses_sink_dialect() {
        let mut store = RecordStore::new();
        store.put(listing(1));
        let mut sink = RecordingSink::default();

        store.persist(&mut sink, &clock()).unwrap();

        assert_eq!(sink.statements.len(), 1);
        assert!(sink.statements[0]
            .sql
            .starts_with("INSERT OR IGNORE INTO flats"));
    }

    #[test]
    fn test_persist_splits_large_stores() {
        let mut store = RecordStore::new();
        for id in 0..(MAX_RECORDS_PER_STATEMENT as i64 + 5) {
            store.put(listing(id));
        }
        let mut sink = RecordingSink::default();

        let inserted = store.persist(&mut sink, &clock()).unwrap();

        assert_eq!(inserted, MAX_RECORDS_PER_STATEMENT + 5);
        assert_eq!(sink.statements.len(), 2);
        assert_eq!(sink.statements[0].row_count(), MAX_RECORDS_PER_STATEMENT);
        assert_eq!(sink.statements[1].row_count(), 5);
        assert_eq!(
            sink.statements[1].params[0],
            SqlParam::Int(MAX_RECORDS_PER_STATEMENT as i64)
        );
    }

    #[test]
    fn test_persist_surfaces_sink_failure() {
        let mut store = RecordStore::new();
        store.put(listing(1));
        let mut sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };

        let result = store.persist(&mut sink, &clock());
        assert!(matches!(result, Err(StorageError::Execute { .. })));
    }
}
