use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use tessera_core::{
    driver::{CancelToken, Connection as _, Cx, Driver},
    stmt::Value,
    Dialect,
};
use tessera_driver_sqlite::{Connection, Sqlite};

async fn accounts() -> Connection {
    let mut connection = Connection::in_memory().unwrap();
    let cx = Cx::background();

    connection
        .execute(
            &cx,
            "CREATE TABLE accounts (id TEXT PRIMARY KEY, company TEXT NOT NULL, seats INTEGER)",
            &[],
        )
        .await
        .unwrap();

    let fixtures = [
        ("1", "Acme, Inc.", Value::I64(12)),
        ("2", "Dunder Mifflin", Value::Null),
    ];

    for (id, company, seats) in fixtures {
        connection
            .execute(
                &cx,
                "INSERT INTO accounts (id, company, seats) VALUES (?, ?, ?)",
                &[Value::from(id), Value::from(company), seats],
            )
            .await
            .unwrap();
    }

    connection
}

#[tokio::test]
async fn query_binds_params_and_reads_rows() {
    let mut connection = accounts().await;
    let cx = Cx::background();

    let rows = connection
        .query(
            &cx,
            "SELECT id, company, seats FROM accounts WHERE id <> ? ORDER BY id",
            &[Value::from("0")],
        )
        .await
        .unwrap()
        .collect()
        .await
        .unwrap();

    assert_eq!(
        rows,
        [
            vec![Value::from("1"), Value::from("Acme, Inc."), Value::I64(12)],
            vec![Value::from("2"), Value::from("Dunder Mifflin"), Value::Null],
        ]
    );
}

#[tokio::test]
async fn execute_reports_affected_rows() {
    let mut connection = accounts().await;

    let count = connection
        .execute(
            &Cx::background(),
            "UPDATE accounts SET seats = ? WHERE seats IS NULL",
            &[Value::I64(1)],
        )
        .await
        .unwrap();

    assert_eq!(count, 1);
}

#[tokio::test]
async fn unique_violation_is_a_conflict() {
    let mut connection = accounts().await;

    let err = connection
        .execute(
            &Cx::background(),
            "INSERT INTO accounts (id, company) VALUES (?, ?)",
            &[Value::from("1"), Value::from("Duplicate")],
        )
        .await
        .unwrap_err();

    assert!(err.is_driver_operation_failed());
    // SQLITE_CONSTRAINT_PRIMARYKEY
    assert_eq!(err.driver_code(), Some("1555"));
    assert!(Sqlite::in_memory().dialect().is_conflict_error(&err));
}

#[tokio::test]
async fn syntax_error_is_not_a_conflict() {
    let mut connection = accounts().await;

    let err = connection
        .query(&Cx::background(), "SELEC id FROM accounts", &[])
        .await
        .unwrap_err();

    assert!(err.is_driver_operation_failed());
    assert!(!Sqlite::in_memory().dialect().is_conflict_error(&err));
}

#[tokio::test]
async fn cancelled_context_fails() {
    let mut connection = accounts().await;

    let token = CancelToken::new();
    token.cancel();
    let cx = Cx::background().with_cancel(token);

    let err = connection
        .query(&cx, "SELECT id FROM accounts", &[])
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn cancelling_between_rows_stops_the_cursor() {
    let mut connection = accounts().await;

    let token = CancelToken::new();
    let cx = Cx::background().with_cancel(token.clone());

    let mut rows = connection
        .query(&cx, "SELECT id FROM accounts ORDER BY id", &[])
        .await
        .unwrap();

    assert!(rows.next().await.unwrap());
    token.cancel();
    assert!(rows.next().await.unwrap_err().is_cancelled());
}

const ENDLESS_QUERY: &str =
    "WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM c) SELECT count(*) FROM c";

#[tokio::test]
async fn deadline_interrupts_running_statement() {
    let mut connection = accounts().await;
    let cx = Cx::background().with_timeout(Duration::from_millis(100));

    let started = Instant::now();
    let err = connection.query(&cx, ENDLESS_QUERY, &[]).await.unwrap_err();

    assert!(err.is_deadline_exceeded(), "{err}");
    assert!(started.elapsed() < Duration::from_secs(10));

    // The interrupted statement releases the connection
    let rows = connection
        .query(&Cx::background(), "SELECT count(*) FROM accounts", &[])
        .await
        .unwrap()
        .collect()
        .await
        .unwrap();
    assert_eq!(rows, [vec![Value::I64(2)]]);
}

#[tokio::test]
async fn cancel_interrupts_running_statement() {
    let mut connection = accounts().await;

    let token = CancelToken::new();
    let cx = Cx::background().with_cancel(token.clone());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });

    let err = connection.query(&cx, ENDLESS_QUERY, &[]).await.unwrap_err();
    assert!(err.is_cancelled(), "{err}");

    let count = connection
        .execute(
            &Cx::background(),
            "UPDATE accounts SET seats = 1 WHERE id = ?",
            &[Value::from("2")],
        )
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn url_parsing() {
    assert!(matches!(
        Sqlite::new("sqlite::memory:").unwrap(),
        Sqlite::InMemory
    ));
    assert!(matches!(
        Sqlite::new("sqlite:/tmp/app.db").unwrap(),
        Sqlite::File(path) if path == std::path::Path::new("/tmp/app.db")
    ));
    assert!(Sqlite::new("postgresql://localhost/app")
        .unwrap_err()
        .is_invalid_connection_url());
    assert_eq!(Sqlite::in_memory().max_connections(), Some(1));
    assert_eq!(Sqlite::open("app.db").max_connections(), None);
}
