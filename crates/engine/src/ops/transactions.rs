use crate::{
    NewTransaction, ObjectId, ResultEngine, Transaction, pagination::Page, transactions::COLLECTION,
};

use super::Store;

impl Store {
    /// A page of transactions, in insertion order.
    pub async fn list_transactions(&self, page: Page) -> ResultEngine<Vec<Transaction>> {
        self.collection(COLLECTION)
            .find(page.skip, page.limit)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    pub async fn transaction(&self, id: &ObjectId) -> ResultEngine<Option<Transaction>> {
        self.collection(COLLECTION)
            .find_one(id)
            .await?
            .map(Transaction::try_from)
            .transpose()
    }

    pub async fn insert_transaction(&self, tx: &NewTransaction) -> ResultEngine<Transaction> {
        let document = self.collection(COLLECTION).insert_one(tx.to_fields()).await?;
        Transaction::try_from(document)
    }

    /// Returns `false` when no transaction had the given id.
    pub async fn delete_transaction(&self, id: &ObjectId) -> ResultEngine<bool> {
        let deleted = self.collection(COLLECTION).delete_one(id).await?;
        Ok(deleted > 0)
    }

    /// Replace the fields of the transaction `id`, creating it when absent.
    pub async fn upsert_transaction(
        &self,
        id: &ObjectId,
        tx: &NewTransaction,
    ) -> ResultEngine<Transaction> {
        let document = self
            .collection(COLLECTION)
            .find_one_and_upsert(id, tx.to_fields())
            .await?;
        Transaction::try_from(document)
    }
}
