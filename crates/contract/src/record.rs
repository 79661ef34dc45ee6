//! Client record from the partner API

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Buyer and branch data used to fill in a contract
///
/// Every field is optional. Missing values render as empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub nome_filial: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cnpj_filial: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub endereco_filial: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nome_comprador: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rg: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cpf: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub endereco: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub numero: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cidade: Option<String>,
    /// Raw credit limit; see [`ClientRecord::credit_limit`]
    #[serde(default)]
    pub limite_credito: Option<Value>,
}

/// Convert a JSON scalar to text; null becomes `None`
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value))
}

impl ClientRecord {
    /// Build a record from any JSON value
    ///
    /// Never fails: a value that is not an object yields an empty record.
    pub fn from_value(value: &Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("Client record is not a JSON object ({err}); using empty record");
                Self::default()
            }
        }
    }

    /// Credit limit as a number
    ///
    /// JSON numbers and numeric strings (with `.` or `,` as decimal
    /// separator) are accepted; anything else, including a missing value,
    /// is 0.
    pub fn credit_limit(&self) -> f64 {
        let parsed = match &self.limite_credito {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().replace(',', ".").parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(value) if value.is_finite() => value,
            _ => 0.0,
        }
    }

    /// Buyer name, if present and not blank
    pub fn buyer_name(&self) -> Option<&str> {
        self.nome_comprador
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
