use serde::{Deserialize, Serialize};
use serde_json::Number;

pub mod error {
    use super::*;

    /// Body of every non-2xx response produced by the server.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub message: String,
    }

    impl ErrorResponse {
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
            }
        }
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionType {
        Expense,
        Income,
    }

    /// A stored transaction, as returned by every read and write endpoint.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        /// Store identifier, 24 lowercase hex characters.
        pub id: String,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        /// Signed amount. Negative values are conventionally expenses.
        ///
        /// Kept as a JSON number so integers round-trip as integers.
        pub amount: Number,
        pub description: String,
    }

    /// Request body for `POST /transactions` and `PUT /transactions/{id}`.
    ///
    /// The server validates the raw JSON itself, this type is a convenience
    /// for clients.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub amount: Number,
        pub description: String,
    }

    /// Query string of `GET /transactions`.
    ///
    /// Both values are kept as raw strings: anything that does not parse
    /// falls back to the defaults instead of rejecting the request.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionListQuery {
        pub page: Option<String>,
        pub limit: Option<String>,
    }
}
