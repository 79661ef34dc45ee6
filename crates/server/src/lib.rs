//! HTTP service around the contract renderer
//!
//! Routes:
//! - `GET /clientes/{id}` proxies the partner client API
//! - `POST /gerar-contrato` renders a contract from a multipart form
//! - `GET /contratos` lists generated contracts, newest first

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod store;
pub mod uploads;

pub use clients::{ClientDirectory, HttpClientDirectory, LookupError};
pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;
pub use store::{ContractRecord, ContractStore, MemoryContractStore, NewContract, PgContractStore};

use actix_cors::Cors;
use actix_web::{http::header, web};

/// Register every route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/clientes/{id}").route(web::get().to(handlers::get_client)))
        .service(
            web::resource("/gerar-contrato").route(web::post().to(handlers::generate_contract)),
        )
        .service(web::resource("/contratos").route(web::get().to(handlers::list_contracts)));
}

/// CORS limited to the configured origins
pub fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
