use sea_orm::{Database, DatabaseConnection};
use serde_json::{Map, Number, Value, json};

use engine::{NewTransaction, ObjectId, Store, TransactionType, paginate, validate_transaction};
use migration::MigratorTrait;

async fn store_with_db() -> (Store, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let store = Store::builder().database(db.clone()).build().await.unwrap();
    (store, db)
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(fields) => fields,
        other => panic!("not an object: {other}"),
    }
}

fn expense() -> NewTransaction {
    NewTransaction {
        kind: TransactionType::Expense,
        amount: Number::from(-1567),
        description: "expense test".to_string(),
    }
}

fn income() -> NewTransaction {
    NewTransaction {
        kind: TransactionType::Income,
        amount: Number::from(1678),
        description: "income test".to_string(),
    }
}

#[tokio::test]
async fn insert_then_find_one() {
    let (store, _db) = store_with_db().await;

    let created = store.insert_transaction(&expense()).await.unwrap();
    let found = store.transaction(&created.id).await.unwrap().unwrap();

    assert_eq!(found, created);
    assert_eq!(found.kind, TransactionType::Expense);
    assert_eq!(found.amount, Number::from(-1567));
    assert_eq!(found.description, "expense test");
}

#[tokio::test]
async fn missing_transaction_is_none() {
    let (store, _db) = store_with_db().await;

    let id = ObjectId::parse_str("58b2169e8d51e83a48b0b8d7").unwrap();
    assert_eq!(store.transaction(&id).await.unwrap(), None);
}

#[tokio::test]
async fn list_keeps_insertion_order_and_pages() {
    let (store, _db) = store_with_db().await;

    let first = store.insert_transaction(&expense()).await.unwrap();
    let second = store.insert_transaction(&income()).await.unwrap();

    let all = store.list_transactions(paginate(None, None)).await.unwrap();
    assert_eq!(all, vec![first.clone(), second.clone()]);

    let page_two = store
        .list_transactions(paginate(Some("2"), Some("1")))
        .await
        .unwrap();
    assert_eq!(page_two, vec![second]);

    let page_three = store
        .list_transactions(paginate(Some("3"), Some("1")))
        .await
        .unwrap();
    assert!(page_three.is_empty());
}

#[tokio::test]
async fn delete_reports_whether_something_was_deleted() {
    let (store, _db) = store_with_db().await;

    let created = store.insert_transaction(&expense()).await.unwrap();
    assert!(store.delete_transaction(&created.id).await.unwrap());
    assert!(!store.delete_transaction(&created.id).await.unwrap());
    assert_eq!(store.transaction(&created.id).await.unwrap(), None);
}

#[tokio::test]
async fn upsert_creates_with_given_id() {
    let (store, _db) = store_with_db().await;

    let id = ObjectId::parse_str("58b2169e8d51e83a48b0b8d7").unwrap();
    let upserted = store.upsert_transaction(&id, &income()).await.unwrap();

    assert_eq!(upserted.id, id);
    assert_eq!(store.transaction(&id).await.unwrap(), Some(upserted));
}

#[tokio::test]
async fn upsert_replaces_fields_in_place() {
    let (store, _db) = store_with_db().await;

    let first = store.insert_transaction(&expense()).await.unwrap();
    let second = store.insert_transaction(&income()).await.unwrap();

    let update = validate_transaction(&json!({
        "type": "income",
        "amount": 99.5,
        "description": "refund",
    }))
    .unwrap();
    let updated = store.upsert_transaction(&first.id, &update).await.unwrap();

    assert_eq!(updated.id, first.id);
    assert_eq!(updated.kind, TransactionType::Income);
    assert_eq!(updated.amount, Number::from_f64(99.5).unwrap());
    assert_eq!(updated.description, "refund");

    // Still a single document, still first in natural order.
    let all = store.list_transactions(paginate(None, None)).await.unwrap();
    assert_eq!(all, vec![updated, second]);
}

#[tokio::test]
async fn upsert_keeps_fields_it_does_not_set() {
    let (store, _db) = store_with_db().await;
    let collection = store.collection("notes");

    let created = collection
        .insert_one(fields(json!({"title": "a", "pinned": true})))
        .await
        .unwrap();
    let updated = collection
        .find_one_and_upsert(&created.id, fields(json!({"title": "b"})))
        .await
        .unwrap();

    assert_eq!(updated.fields, fields(json!({"title": "b", "pinned": true})));
}

#[tokio::test]
async fn collections_are_isolated() {
    let (store, _db) = store_with_db().await;

    let note = store
        .collection("notes")
        .insert_one(fields(json!({"title": "a"})))
        .await
        .unwrap();
    store.insert_transaction(&expense()).await.unwrap();

    assert_eq!(store.transaction(&note.id).await.unwrap(), None);
    assert_eq!(store.collection("notes").find(0, 10).await.unwrap(), vec![note]);
    assert_eq!(store.collection("transactions").clear().await.unwrap(), 1);
    assert!(store.list_transactions(paginate(None, None)).await.unwrap().is_empty());
}
