//! Contract renderer - credit sale contracts as PDF
//!
//! This crate provides:
//! - The client record and signature/attachment inputs
//! - Binding of client data into the contract clauses
//! - Page decoration (watermark, logo, header rule)
//! - The signature grid and the attachments section
//! - Rendering of the whole document to a PDF file, written atomically
//!
//! # Example
//!
//! ```ignore
//! use contract::{AttachmentList, ClientRecord, ContractRenderer, RenderOptions, SignatureSet};
//!
//! let record = ClientRecord::from_value(&partner_json);
//! let renderer = ContractRenderer::new(RenderOptions::default());
//! let report = renderer.render(&record, &SignatureSet::default(), &AttachmentList::default(), "contrato.pdf")?;
//! println!("{} pages", report.page_count);
//! ```

mod assets;
mod attachments;
pub mod binder;
pub mod clauses;
mod decorator;
mod record;
mod renderer;
mod signature;
mod styles;

pub use assets::{AssetError, AssetKind, AssetWarning, AttachmentList, SignatureRole, SignatureSet};
pub use attachments::AttachmentAppender;
pub use binder::{format_credit_limit, month_name_pt, ContractFields, TemplateBinder};
pub use decorator::ContractPageDecorator;
pub use record::ClientRecord;
pub use renderer::{Composition, ContractRenderer, RenderOptions, RenderReport};
pub use signature::SignatureBlockComposer;
pub use styles::ContractStyles;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a render
///
/// Asset problems (missing logo, unreadable signature) never show up
/// here; they are reported as [`AssetWarning`]s.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("Layout error: {0}")]
    Layout(String),
}

/// Result type for contract rendering
pub type Result<T> = std::result::Result<T, RenderError>;
