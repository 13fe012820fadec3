mod common;

use addonvault::models::{Author, Category, Resource, ResourceVersion};
use addonvault::DbError;
use mongodb::bson::doc;

fn sample_resource() -> Resource {
    let mut resource = Resource::new(
        1234,
        "a resource",
        Author::new(6643, "inventivetalent"),
        Category::new(1, "fake category"),
    );
    resource.tag = "does things".to_string();
    resource
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn insert_then_get_returns_equal_domain_fields() {
    let env = common::TestEnv::start().await;
    let repo = env.client.resources();

    repo.insert(&sample_resource()).await.unwrap();

    let read = repo.get(1234).await.unwrap().expect("resource missing");
    assert_eq!(read.id, 1234);
    assert_eq!(read.name, "a resource");
    assert_eq!(read.tag, "does things");
    // References come back by id; hydration is the caller's job.
    assert_eq!(read.author.id, 6643);
    assert!(read.author.entity.is_none());
    assert_eq!(read.category.id, 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn insert_stamps_first_and_latest_fetch_equally() {
    let env = common::TestEnv::start().await;
    env.client.resources().insert(&sample_resource()).await.unwrap();

    let raw = env
        .client
        .database()
        .collection::<mongodb::bson::Document>("resources")
        .find_one(doc! { "_id": 1234_i64 })
        .await
        .unwrap()
        .expect("raw document missing");

    let fetch = raw.get_document("fetch").unwrap();
    let first = fetch.get_i64("first").unwrap();
    let latest = fetch.get_i64("latest").unwrap();
    assert_eq!(first, latest);

    // Stored references are normalized cross-collection pointers.
    let author = raw.get_document("author").unwrap();
    assert_eq!(author.get_str("$ref").unwrap(), "authors");
    assert_eq!(author.get_i64("$id").unwrap(), 6643);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn duplicate_insert_surfaces_duplicate_key() {
    let env = common::TestEnv::start().await;
    let repo = env.client.resources();

    repo.insert(&sample_resource()).await.unwrap();
    let err = repo.insert(&sample_resource()).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::DuplicateKey {
            collection: "resources",
            id: 1234
        }
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn update_merges_fields_and_keeps_first_fetch() {
    let env = common::TestEnv::start().await;
    let repo = env.client.resources();
    repo.insert(&sample_resource()).await.unwrap();

    // Plant a field the update payload does not carry.
    let collection = env
        .client
        .database()
        .collection::<mongodb::bson::Document>("resources");
    collection
        .update_one(
            doc! { "_id": 1234_i64 },
            doc! { "$set": { "downloads": 4200_i64 } },
        )
        .await
        .unwrap();

    let mut changed = sample_resource();
    changed.name = "a renamed resource".to_string();
    let outcome = repo.update(&changed).await.unwrap();
    assert_eq!(outcome.matched, 1);
    assert!(outcome.applied());

    let raw = collection
        .find_one(doc! { "_id": 1234_i64 })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw.get_str("name").unwrap(), "a renamed resource");
    // Untouched fields persist.
    assert_eq!(raw.get_i64("downloads").unwrap(), 4200);
    // fetch.first survives the dotted-path stamp of fetch.latest.
    assert!(raw.get_document("fetch").unwrap().get_i64("first").is_ok());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn update_of_missing_id_is_a_reported_no_op() {
    let env = common::TestEnv::start().await;
    let outcome = env
        .client
        .resources()
        .update(&sample_resource())
        .await
        .unwrap();
    assert_eq!(outcome.matched, 0);
    assert!(!outcome.applied());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn upsert_creates_then_updates() {
    let env = common::TestEnv::start().await;
    let repo = env.client.versions();

    let version = ResourceVersion {
        id: 9001,
        name: "1.0".to_string(),
        resource: 1234,
        release_date: 1_600_000_000,
    };

    let created = repo.upsert(&version).await.unwrap();
    assert!(created.created);

    let mut renamed = version.clone();
    renamed.name = "1.0.1".to_string();
    let updated = repo.upsert(&renamed).await.unwrap();
    assert!(!updated.created);
    assert_eq!(updated.matched, 1);

    let read = repo.get(9001).await.unwrap().unwrap();
    assert_eq!(read.name, "1.0.1");
    assert_eq!(read.release_date, 1_600_000_000);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn delete_is_idempotent_and_final() {
    let env = common::TestEnv::start().await;
    let repo = env.client.resources();
    repo.insert(&sample_resource()).await.unwrap();

    repo.delete(1234).await.unwrap();
    assert!(repo.get(1234).await.unwrap().is_none());

    // Deleting an absent id is not an error.
    repo.delete(1234).await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn malformed_stored_document_is_surfaced() {
    let env = common::TestEnv::start().await;
    env.client
        .database()
        .collection::<mongodb::bson::Document>("resources")
        .insert_one(doc! { "_id": 77_i64, "name": 12345_i64 })
        .await
        .unwrap();

    let err = env.client.resources().get(77).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::Malformed {
            collection: "resources",
            ..
        }
    ));
}
