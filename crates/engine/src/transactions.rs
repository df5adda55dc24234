//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense record stored in the
//! [`COLLECTION`] collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::{Document, EngineError, ObjectId};

/// Name of the collection holding transactions.
pub const COLLECTION: &str = "transactions";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub const ALL: [Self; 2] = [Self::Expense, Self::Income];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(EngineError::InvalidPayload(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

/// The validated fields of a transaction, without id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Number,
    pub description: String,
}

impl NewTransaction {
    /// Document fields for the store, exactly the validated ones.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::from(self.kind.as_str()));
        fields.insert("amount".to_string(), Value::Number(self.amount.clone()));
        fields.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        fields
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Number,
    pub description: String,
}

impl TryFrom<Document> for Transaction {
    type Error = EngineError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        let NewTransaction {
            kind,
            amount,
            description,
        } = serde_json::from_value(Value::Object(document.fields))?;

        Ok(Self {
            id: document.id,
            kind,
            amount,
            description,
        })
    }
}
