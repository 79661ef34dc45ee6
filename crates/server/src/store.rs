//! Persistence of generated contract records

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tokio::sync::RwLock;

/// A generated contract as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ContractRecord {
    pub id: i32,
    pub cliente_id: String,
    pub cliente_nome: String,
    /// File name inside the contracts directory
    pub caminho_pdf: String,
    pub data_criacao: NaiveDateTime,
}

/// Fields of a record about to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContract {
    pub cliente_id: String,
    pub cliente_nome: String,
    pub caminho_pdf: String,
}

#[async_trait]
pub trait ContractStore: Send + Sync {
    async fn insert(&self, contract: NewContract) -> Result<ContractRecord, sqlx::Error>;

    /// All records, newest first
    async fn list(&self) -> Result<Vec<ContractRecord>, sqlx::Error>;
}

/// `contratos` table in Postgres
#[derive(Debug, Clone)]
pub struct PgContractStore {
    pool: PgPool,
}

impl PgContractStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the table when it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contratos (
                id SERIAL PRIMARY KEY,
                cliente_id TEXT NOT NULL,
                cliente_nome TEXT NOT NULL,
                caminho_pdf TEXT NOT NULL UNIQUE,
                data_criacao TIMESTAMP NOT NULL DEFAULT (now() AT TIME ZONE 'utc')
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS ix_contratos_cliente_id ON contratos (cliente_id)")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ContractStore for PgContractStore {
    async fn insert(&self, contract: NewContract) -> Result<ContractRecord, sqlx::Error> {
        sqlx::query_as::<_, ContractRecord>(
            r#"
            INSERT INTO contratos (cliente_id, cliente_nome, caminho_pdf, data_criacao)
            VALUES ($1, $2, $3, $4)
            RETURNING id, cliente_id, cliente_nome, caminho_pdf, data_criacao
            "#,
        )
        .bind(&contract.cliente_id)
        .bind(&contract.cliente_nome)
        .bind(&contract.caminho_pdf)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await
    }

    async fn list(&self) -> Result<Vec<ContractRecord>, sqlx::Error> {
        sqlx::query_as::<_, ContractRecord>(
            "SELECT id, cliente_id, cliente_nome, caminho_pdf, data_criacao FROM contratos ORDER BY data_criacao DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
    }
}

/// In-process store for tests and local runs without a database
#[derive(Debug, Default)]
pub struct MemoryContractStore {
    records: RwLock<Vec<ContractRecord>>,
}

impl MemoryContractStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractStore for MemoryContractStore {
    async fn insert(&self, contract: NewContract) -> Result<ContractRecord, sqlx::Error> {
        let mut records = self.records.write().await;
        let record = ContractRecord {
            id: records.len() as i32 + 1,
            cliente_id: contract.cliente_id,
            cliente_nome: contract.cliente_nome,
            caminho_pdf: contract.caminho_pdf,
            data_criacao: Utc::now().naive_utc(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ContractRecord>, sqlx::Error> {
        let records = self.records.read().await;
        let mut newest_first = records.clone();
        newest_first.sort_by(|a, b| b.data_criacao.cmp(&a.data_criacao).then(b.id.cmp(&a.id)));
        Ok(newest_first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn new_contract(client: &str) -> NewContract {
        NewContract {
            cliente_id: client.to_string(),
            cliente_nome: "N/A".to_string(),
            caminho_pdf: format!("contrato_{client}.pdf"),
        }
    }

    #[tokio::test]
    async fn test_memory_store_lists_newest_first() {
        let store = MemoryContractStore::new();
        store.insert(new_contract("1")).await.unwrap();
        store.insert(new_contract("2")).await.unwrap();
        let third = store.insert(new_contract("3")).await.unwrap();
        assert_eq!(third.id, 3);

        let ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.cliente_id)
            .collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }
}
