mod common;

use std::collections::HashSet;

use addonvault::db::WebhookRepository;
use addonvault::models::Webhook;
use mongodb::bson::doc;

async fn seed(env: &common::TestEnv, id: i64, events: &[&str]) {
    let events: Vec<&str> = events.to_vec();
    env.client
        .database()
        .collection::<mongodb::bson::Document>("webhooks")
        .insert_one(doc! {
            "_id": id,
            "url": format!("https://example.org/hook/{id}"),
            "events": events,
            "failed_connections": 0_i64,
            "fail_status": false,
        })
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn list_filters_by_subscribed_event() {
    let env = common::TestEnv::start().await;
    seed(&env, 1, &["resource-update", "new-resource"]).await;
    seed(&env, 2, &["new-author"]).await;

    let subscribed = env
        .client
        .webhooks()
        .list(Some("resource-update"))
        .await
        .unwrap();
    assert_eq!(subscribed.len(), 1);
    assert_eq!(subscribed[0].id, 1);

    let all = env.client.webhooks().list(None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn delivery_state_update_touches_only_the_failure_fields() {
    let env = common::TestEnv::start().await;
    seed(&env, 1, &["resource-update"]).await;

    let webhook = Webhook {
        id: 1,
        // Deliberately different from the stored registration; must not be
        // written back.
        url: "https://evil.example.org".to_string(),
        events: HashSet::new(),
        failed_connections: 3,
        fail_status: true,
    };
    env.client
        .webhooks()
        .update_delivery_state(&webhook)
        .await
        .unwrap();

    let read = env.client.webhooks().list(None).await.unwrap();
    assert_eq!(read.len(), 1);
    assert_eq!(read[0].failed_connections, 3);
    assert!(read[0].fail_status);
    assert_eq!(read[0].url, "https://example.org/hook/1");
    assert!(read[0].events.contains("resource-update"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn delete_is_idempotent() {
    let env = common::TestEnv::start().await;
    seed(&env, 1, &["resource-update"]).await;

    env.client.webhooks().delete(1).await.unwrap();
    assert!(env.client.webhooks().list(None).await.unwrap().is_empty());

    env.client.webhooks().delete(1).await.unwrap();
}
