use std::process;

use actix_web::{App, HttpServer, middleware, web};

use category_media::assets::FsAssetStore;
use category_media::db::establish_connection_pool;
use category_media::models::config::ServerConfig;
use category_media::repository::DieselRepository;
use category_media::routes;
use category_media::services::CategoryLocks;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            process::exit(1);
        }
    };

    let store = match FsAssetStore::new(&server_config.upload_dir) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to prepare upload directory {}: {e}", server_config.upload_dir);
            process::exit(1);
        }
    };

    let repo = web::Data::new(DieselRepository::new(pool));
    let store = web::Data::new(store);
    let locks = web::Data::new(CategoryLocks::new());

    log::info!(
        "Starting server at {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .app_data(store.clone())
            .app_data(locks.clone())
            .configure(routes::configure)
    })
    .bind((server_config.address.as_str(), server_config.port))?
    .run()
    .await
}
