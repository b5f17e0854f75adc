//! Throwaway databases for integration tests.

use anyhow::{anyhow, Result};
use deadpool_diesel::Manager;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::Connection;
use futures::Future;

use crate::Pool;

#[derive(Clone)]
pub struct TestDatabase {
    pub name: String,
    pub pool: Pool,
    pub url: String,
    global_connect_str: String,
}

impl TestDatabase {
    pub fn drop_db(&self) -> Result<()> {
        let mut conn = PgConnection::establish(self.global_connect_str.as_str())?;
        diesel::sql_query(format!(r##"DROP DATABASE "{}" (FORCE)"##, self.name))
            .execute(&mut conn)?;
        Ok(())
    }
}

pub async fn run_database_test<F, R>(f: F)
where
    F: FnOnce(TestDatabase) -> R,
    R: Future<Output = Result<(), anyhow::Error>>,
{
    let database = create_database().await.expect("Creating database");
    f(database.clone()).await.unwrap();
    database.drop_db().expect("Cleaning up");
}

pub async fn create_database() -> Result<TestDatabase> {
    dotenv::dotenv().ok();
    let host = std::env::var("TEST_DATABASE_HOST")
        .or_else(|_| std::env::var("DATABASE_HOST"))
        .unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("TEST_DATABASE_PORT")
        .or_else(|_| std::env::var("DATABASE_PORT"))
        .map_err(anyhow::Error::new)
        .and_then(|val| val.parse::<u16>().map_err(|e| anyhow!(e)))
        .unwrap_or(5432);
    let user = std::env::var("TEST_DATABASE_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = std::env::var("TEST_DATABASE_PASSWORD").unwrap_or_default();
    let global_test_db =
        std::env::var("TEST_DATABASE_GLOBAL_DB").unwrap_or_else(|_| "postgres".to_string());

    let base_connect = format!("postgresql://{user}:{password}@{host}:{port}");
    let global_connect = format!("{base_connect}/{global_test_db}");
    let database = format!("sports_hub_test_{}", crate::new_uuid().simple());
    println!("Database name: {}", database);

    let mut global_conn = PgConnection::establish(global_connect.as_str())?;
    diesel::sql_query(format!(r##"CREATE DATABASE "{}""##, database)).execute(&mut global_conn)?;
    drop(global_conn);

    let db_conn_str = format!("{base_connect}/{database}");
    let manager = Manager::new(db_conn_str.clone(), deadpool_diesel::Runtime::Tokio1);
    let pool = Pool::builder(manager).max_size(4).build()?;

    let mut conn = PgConnection::establish(db_conn_str.as_str())?;
    crate::run_migrations(&mut conn)?;
    drop(conn);

    Ok(TestDatabase {
        pool,
        url: db_conn_str,
        name: database,
        global_connect_str: global_connect,
    })
}
