use diesel::r2d2::{self, ConnectionManager};
use diesel::sqlite::SqliteConnection;

/// Connection pool shared by repository instances.
pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Pooled connection checked out for a single repository call.
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

/// Build an r2d2 connection pool for the SQLite database at `database_url`.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder().build(manager)
}
