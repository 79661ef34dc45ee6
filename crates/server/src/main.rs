use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use contract::ContractRenderer;
use contratos_server::{configure, cors, AppConfig, AppState, HttpClientDirectory, PgContractStore};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    std::fs::create_dir_all(&config.contracts_dir).with_context(|| {
        format!(
            "Cannot create contracts directory {}",
            config.contracts_dir.display()
        )
    })?;
    if !config.logo_path.is_file() {
        log::warn!(
            "Logo {} not found; contracts will be rendered without it",
            config.logo_path.display()
        );
    }

    let store = PgContractStore::connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;
    store
        .ensure_schema()
        .await
        .context("Failed to create the contratos table")?;
    log::info!("Database tables checked");

    let clients = HttpClientDirectory::new(
        config.clients_api_url.as_str(),
        config.api_user.as_str(),
        config.api_password.as_str(),
    )
    .context("Failed to build the partner API client")?;

    let state = web::Data::new(AppState::new(
        ContractRenderer::new(config.render_options()),
        Arc::new(clients),
        Arc::new(store),
        config.contracts_dir.clone(),
    ));
    let origins = config.allowed_origins.clone();

    log::info!("Starting server at http://{}", config.bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&origins))
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(config.bind_addr.as_str())
    .with_context(|| format!("Cannot bind {}", config.bind_addr))?
    .run()
    .await?;

    Ok(())
}
