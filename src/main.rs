use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

use product_catalog::db::establish_connection_pool;
use product_catalog::repository::DieselRepository;
use product_catalog::services::import;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let Some(path) = env::args().nth(1).map(PathBuf::from) else {
        log::error!("usage: product-catalog <catalog.csv>");
        std::process::exit(1);
    };

    let database_url = env::var("DATABASE_URL").unwrap_or("catalog.db".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    match import::import_file(&repo, &path) {
        Ok(summary) => {
            if summary.has_failures() {
                log::warn!("{} rows could not be imported", summary.failed);
            }
        }
        Err(e) => {
            log::error!("Import failed: {e}");
            std::process::exit(1);
        }
    }
}
