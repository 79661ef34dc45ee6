//! Route handlers

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::NewContract;
use crate::uploads::{self, UploadError};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::NaiveDateTime;
use contract::ClientRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// URL prefix under which generated PDFs are published
pub const CONTRACTS_URL_PREFIX: &str = "/contratos_gerados";

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub status: String,
    pub message: String,
    pub contrato_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContractSummary {
    pub id: i32,
    pub cliente_id: String,
    pub cliente_nome: String,
    pub url: String,
    pub data_criacao: NaiveDateTime,
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Field(_) | UploadError::Utf8(_) => ApiError::BadRequest(err.to_string()),
            UploadError::Io(_) => ApiError::Internal(err.to_string()),
        }
    }
}

fn contract_url(filename: &str) -> String {
    format!("{CONTRACTS_URL_PREFIX}/{filename}")
}

/// `contrato_{cliente_id}_{8 hex}.pdf`
fn contract_filename(client_id: &str) -> String {
    let safe = sanitize_filename::sanitize(client_id).replace(' ', "_");
    let safe = if safe.is_empty() { "cliente".to_string() } else { safe };
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("contrato_{safe}_{}.pdf", &suffix[..8])
}

fn remove_orphan(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => log::warn!("Removed contract {} with no stored record", path.display()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => log::error!("Cannot remove contract {}: {err}", path.display()),
    }
}

/// Deletes a generated PDF unless its record was stored.
///
/// Dropping the guard while the render is still running on the blocking
/// pool flags the output as abandoned; the render then removes its own file.
struct PendingContract {
    path: PathBuf,
    abandoned: Arc<AtomicBool>,
    stored: bool,
}

impl PendingContract {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            abandoned: Arc::new(AtomicBool::new(false)),
            stored: false,
        }
    }

    fn stored(mut self) {
        self.stored = true;
    }
}

impl Drop for PendingContract {
    fn drop(&mut self) {
        if self.stored {
            return;
        }
        self.abandoned.store(true, Ordering::SeqCst);
        remove_orphan(&self.path);
    }
}

/// GET /clientes/{id}
pub async fn get_client(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let client_id = path.into_inner();
    let record = state.clients.fetch(&client_id).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// POST /gerar-contrato
pub async fn generate_contract(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = uploads::receive(payload).await?;
    let client_id = upload
        .client_id
        .clone()
        .ok_or_else(|| ApiError::BadRequest("O campo cliente_id é obrigatório.".to_string()))?;

    let raw = state.clients.fetch(&client_id).await?;
    let record = ClientRecord::from_value(&raw);
    let client_name = record.buyer_name().unwrap_or("N/A").to_string();

    let filename = contract_filename(&client_id);
    let output = state.contracts_dir.join(&filename);
    log::info!(
        "Generating contract for client {client_id}: {} signatures, {} attachments",
        upload.signatures.len(),
        upload.attachments.len()
    );

    let pending = PendingContract::new(output.clone());
    let abandoned = pending.abandoned.clone();
    let renderer = state.renderer.clone();
    let signatures = upload.signatures.clone();
    let attachments = upload.attachments.clone();
    let report = web::block(move || {
        let report = renderer.render(&record, &signatures, &attachments, &output)?;
        if abandoned.load(Ordering::SeqCst) {
            remove_orphan(&output);
        }
        Ok::<_, contract::RenderError>(report)
    })
    .await??;
    // Uploaded files are only needed by the render
    drop(upload);

    log::info!(
        "Contract {filename} rendered: {} pages, {} attachments, {} skipped assets",
        report.page_count,
        report.attachments_embedded,
        report.warnings.len()
    );

    state
        .store
        .insert(NewContract {
            cliente_id: client_id,
            cliente_nome: client_name,
            caminho_pdf: filename.clone(),
        })
        .await?;
    pending.stored();

    Ok(HttpResponse::Created().json(GenerateResponse {
        status: "sucesso".to_string(),
        message: "Contrato gerado com sucesso!".to_string(),
        contrato_url: contract_url(&filename),
    }))
}

/// GET /contratos
pub async fn list_contracts(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let contracts: Vec<ContractSummary> = state
        .store
        .list()
        .await?
        .into_iter()
        .map(|record| ContractSummary {
            id: record.id,
            url: contract_url(&record.caminho_pdf),
            cliente_id: record.cliente_id,
            cliente_nome: record.cliente_nome,
            data_criacao: record.data_criacao,
        })
        .collect();
    Ok(HttpResponse::Ok().json(contracts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_filename() {
        let name = contract_filename("123");
        assert!(name.starts_with("contrato_123_"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(name.len(), "contrato_123_".len() + 8 + ".pdf".len());

        assert!(contract_filename("../x").starts_with("contrato_..x_"));
        assert_ne!(contract_filename("1"), contract_filename("1"));
    }

    #[test]
    fn test_pending_contract_removes_file_unless_stored() {
        let dir = tempfile::tempdir().unwrap();
        let orphan = dir.path().join("contrato_1_aaaaaaaa.pdf");
        let kept = dir.path().join("contrato_2_bbbbbbbb.pdf");
        std::fs::write(&orphan, b"%PDF-").unwrap();
        std::fs::write(&kept, b"%PDF-").unwrap();

        drop(PendingContract::new(orphan.clone()));
        PendingContract::new(kept.clone()).stored();

        assert!(!orphan.exists());
        assert!(kept.exists());
    }

    #[test]
    fn test_pending_contract_flags_unfinished_render() {
        let dir = tempfile::tempdir().unwrap();
        let pending = PendingContract::new(dir.path().join("contrato_3_cccccccc.pdf"));
        let abandoned = pending.abandoned.clone();

        // Nothing written yet
        drop(pending);
        assert!(abandoned.load(Ordering::SeqCst));
    }

    #[test]
    fn test_contract_url() {
        assert_eq!(contract_url("a.pdf"), "/contratos_gerados/a.pdf");
    }
}
