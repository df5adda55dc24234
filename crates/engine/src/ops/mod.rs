use sea_orm::DatabaseConnection;

use crate::ResultEngine;

mod collection;
mod transactions;

pub use collection::Collection;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Process-wide handle on the document store.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct Store {
    database: DatabaseConnection,
}

impl Store {
    /// Return a builder for `Store`. Help to build the struct.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Handle on the collection called `name`.
    pub fn collection<'a>(&'a self, name: &'a str) -> Collection<'a> {
        Collection::new(&self.database, name)
    }

    /// Close the underlying connection pool.
    pub async fn close(self) -> ResultEngine<()> {
        self.database.close().await?;
        tracing::debug!("document store closed");
        Ok(())
    }
}

/// The builder for `Store`
#[derive(Default)]
pub struct StoreBuilder {
    database: DatabaseConnection,
}

impl StoreBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> StoreBuilder {
        self.database = db;
        self
    }

    /// Construct `Store`, checking that the database answers.
    pub async fn build(self) -> ResultEngine<Store> {
        self.database.ping().await?;
        Ok(Store {
            database: self.database,
        })
    }
}
