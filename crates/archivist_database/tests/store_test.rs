//! Live PostgreSQL tests. Run with `--features database-tests` and
//! `DATABASE_URL` pointing at a scratch database.

#![cfg(feature = "database-tests")]

use archivist_core::{FieldMapping, RecordBuilder, RecordField};
use archivist_database::{create_table_sql, database_url, establish_pool, PgRecordStore};
use archivist_interface::{RecordStore, TableInspector};
use diesel::RunQueryDsl;

const TABLE: &str = "archivist_store_test";

fn pool() -> archivist_database::PgPool {
    dotenvy::dotenv().ok();
    establish_pool(&database_url().unwrap()).unwrap()
}

fn setup() -> PgRecordStore {
    let pool = pool();
    let mut conn = pool.get().unwrap();
    diesel::sql_query(format!("DROP TABLE IF EXISTS public.{}", TABLE))
        .execute(&mut conn)
        .unwrap();
    diesel::sql_query(create_table_sql(TABLE).unwrap())
        .execute(&mut conn)
        .unwrap();
    PgRecordStore::new(pool)
}

#[tokio::test]
async fn test_insert_then_lookup_roundtrip() {
    let store = setup();

    let columns = store.table_columns(TABLE).await.unwrap();
    assert!(columns.contains(&"image_url".to_string()));

    let record = RecordBuilder::default()
        .name("SCP-173")
        .classification("Euclid")
        .containment("Locked container.")
        .description("Statue.")
        .image_reference("")
        .build()
        .unwrap();
    let row = FieldMapping::default_columns().map_record(&record);
    store.insert_rows(TABLE, &[row]).await.unwrap();

    let found = store
        .existing_values(
            TABLE,
            "name",
            &["SCP-173".to_string(), "SCP-049".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert!(found.contains("SCP-173"));
}

#[tokio::test]
async fn test_missing_table_is_not_found() {
    let store = PgRecordStore::new(pool());
    let err = store.table_columns("archivist_no_such_table").await.unwrap_err();
    assert!(err.user_message().contains("not found"));
}

#[tokio::test]
async fn test_spaced_columns_are_written_and_found() {
    let table = "archivist_spaced_test";
    let pool = pool();
    {
        let mut conn = pool.get().unwrap();
        diesel::sql_query(format!("DROP TABLE IF EXISTS public.{}", table))
            .execute(&mut conn)
            .unwrap();
        diesel::sql_query(format!(
            "CREATE TABLE public.{} (\"Item #\" TEXT, \"Object Class\" TEXT)",
            table
        ))
        .execute(&mut conn)
        .unwrap();
    }
    let store = PgRecordStore::new(pool);

    let columns = store.table_columns(table).await.unwrap();
    let mapping = FieldMapping::infer_from_columns(&columns);
    assert_eq!(mapping.column(RecordField::Name), Some("Item #"));
    assert_eq!(
        mapping.column(RecordField::Classification),
        Some("Object Class")
    );

    let record = RecordBuilder::default()
        .name("SCP-096")
        .classification("Euclid")
        .containment("")
        .description("")
        .image_reference("")
        .build()
        .unwrap();
    store
        .insert_rows(table, &[mapping.map_record(&record)])
        .await
        .unwrap();

    let found = store
        .existing_values(table, "Item #", &["SCP-096".to_string()])
        .await
        .unwrap();
    assert!(found.contains("SCP-096"));
}
