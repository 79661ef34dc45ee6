use crate::clients::ClientDirectory;
use crate::store::ContractStore;
use contract::ContractRenderer;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared by every request
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<ContractRenderer>,
    pub clients: Arc<dyn ClientDirectory>,
    pub store: Arc<dyn ContractStore>,
    /// Directory generated PDFs are written to
    pub contracts_dir: PathBuf,
}

impl AppState {
    pub fn new(
        renderer: ContractRenderer,
        clients: Arc<dyn ClientDirectory>,
        store: Arc<dyn ContractStore>,
        contracts_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            renderer: Arc::new(renderer),
            clients,
            store,
            contracts_dir: contracts_dir.into(),
        }
    }
}
