//! Multipart form of `POST /gerar-contrato`

use actix_multipart::Multipart;
use contract::{AttachmentList, SignatureRole, SignatureSet};
use futures_util::StreamExt;
use sanitize_filename::sanitize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Multipart field error: {0}")]
    Field(String),

    #[error("Invalid UTF-8 in field {0}")]
    Utf8(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything the form carried
///
/// Uploaded files live in `dir` and are deleted when this value drops,
/// whatever happens to the request.
#[derive(Debug)]
pub struct ContractUpload {
    pub client_id: Option<String>,
    pub signatures: SignatureSet,
    pub attachments: AttachmentList,
    dir: TempDir,
}

impl ContractUpload {
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

fn signature_role(field: &str) -> Option<SignatureRole> {
    match field {
        "assinatura_cliente" => Some(SignatureRole::Buyer),
        "assinatura_vendedor" => Some(SignatureRole::Seller),
        "assinatura_testemunha1" => Some(SignatureRole::Witness1),
        "assinatura_testemunha2" => Some(SignatureRole::Witness2),
        _ => None,
    }
}

/// Extension of the client's file name, `.png` when it has none
fn extension_of(filename: &str) -> String {
    Path::new(&sanitize(filename))
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| (1..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| ".png".to_string())
}

async fn save_field(
    field: &mut actix_multipart::Field,
    path: &Path,
) -> Result<u64, UploadError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0u64;
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| UploadError::Field(e.to_string()))?;
        file.write_all(&data).await?;
        written += data.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

async fn read_text(field: &mut actix_multipart::Field, name: &str) -> Result<String, UploadError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| UploadError::Field(e.to_string()))?;
        buffer.extend_from_slice(&data);
    }
    String::from_utf8(buffer).map_err(|_| UploadError::Utf8(name.to_string()))
}

/// Drain the form into a fresh temporary directory
///
/// File fields without a file name (an empty file input) are ignored,
/// as are fields this form does not know.
pub async fn receive(mut payload: Multipart) -> Result<ContractUpload, UploadError> {
    let dir = tempfile::Builder::new().prefix("contrato_upload_").tempdir()?;
    let mut client_id = None;
    let mut signatures = SignatureSet::new();
    let mut attachments: Vec<PathBuf> = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadError::Field(e.to_string()))?;
        let disposition = field
            .content_disposition()
            .ok_or_else(|| UploadError::Field("Content disposition not found".to_string()))?;
        let name = disposition
            .get_name()
            .ok_or_else(|| UploadError::Field("Field name not found".to_string()))?
            .to_string();
        let filename = disposition
            .get_filename()
            .map(str::to_string)
            .filter(|f| !f.trim().is_empty());

        if name == "cliente_id" {
            let value = read_text(&mut field, &name).await?;
            let value = value.trim();
            if !value.is_empty() {
                client_id = Some(value.to_string());
            }
            continue;
        }

        let Some(filename) = filename else {
            // Drain and drop
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| UploadError::Field(e.to_string()))?;
            }
            continue;
        };

        let prefix = if let Some(role) = signature_role(&name) {
            format!("ass_{role}")
        } else if name == "anexos" {
            format!("anexo_{}", attachments.len())
        } else {
            log::debug!("Ignoring unknown upload field {name}");
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| UploadError::Field(e.to_string()))?;
            }
            continue;
        };

        let path = dir.path().join(format!(
            "temp_{prefix}_{}{}",
            uuid::Uuid::new_v4().simple(),
            extension_of(&filename)
        ));
        let bytes = save_field(&mut field, &path).await?;
        log::debug!("Saved {name} ({bytes} bytes) to {}", path.display());

        match signature_role(&name) {
            Some(role) => signatures.set(role, path),
            None => attachments.push(path),
        }
    }

    Ok(ContractUpload {
        client_id,
        signatures,
        attachments: AttachmentList::new(attachments),
        dir,
    })
}
