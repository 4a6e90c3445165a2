use config::Config;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use std::sync::OnceLock;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;
pub type PgPooledConnection = PooledConnection<ConnectionManager<PgConnection>>;

static POOL: OnceLock<PgPool> = OnceLock::new();

fn load_settings() -> Config {
    Config::builder()
        .add_source(config::File::with_name("appsettings"))
        .add_source(config::Environment::with_prefix("SHOP").separator("__"))
        .build()
        .expect("Failed to load configuration")
}

/// The address the HTTP server listens on.
pub fn server_bind() -> String {
    load_settings()
        .get_string("server.bind")
        .unwrap_or_else(|_| "127.0.0.1:3001".to_string())
}

pub fn init_pool() -> PgPool {
    let settings = load_settings();

    let database_url = settings
        .get_string("database.url")
        .expect("Database URL not found");
    let pool_size = settings.get_int("database.pool_size").unwrap_or(10) as u32;
    let timeout = settings.get_int("database.timeout_seconds").unwrap_or(30) as u64;

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(pool_size)
        .connection_timeout(std::time::Duration::from_secs(timeout))
        .build(manager)
        .expect("Failed to create pool")
}

pub fn get_pool() -> &'static PgPool {
    POOL.get_or_init(init_pool)
}

pub fn get_conn() -> PgPooledConnection {
    get_pool().get().expect("Failed to get connection from pool")
}
