pub use documents::Document;
pub use error::EngineError;
pub use object_id::ObjectId;
pub use ops::{Collection, Store, StoreBuilder};
pub use pagination::{DEFAULT_LIMIT, MAX_LIMIT, Page, paginate};
pub use transactions::{NewTransaction, Transaction, TransactionType};
pub use validation::validate_transaction;

mod documents;
mod error;
mod object_id;
mod ops;
pub mod pagination;
pub mod transactions;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;
