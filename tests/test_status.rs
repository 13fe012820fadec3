mod common;

use addonvault::db::StatusRepository;
use serde_json::json;

#[tokio::test]
#[ignore = "requires Docker"]
async fn set_then_get_round_trips_scalars() {
    let env = common::TestEnv::start().await;
    let status = env.client.status();

    status.set("crawler.cursor", json!(1234)).await.unwrap();
    assert_eq!(status.get("crawler.cursor").await.unwrap(), Some(json!(1234)));

    status.set("crawler.cursor", json!(5678)).await.unwrap();
    assert_eq!(status.get("crawler.cursor").await.unwrap(), Some(json!(5678)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn missing_key_is_an_absence() {
    let env = common::TestEnv::start().await;
    assert_eq!(env.client.status().get("never.set").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn rename_moves_the_value_to_the_new_key() {
    let env = common::TestEnv::start().await;
    let status = env.client.status();

    status.set("old_cursor", json!(42)).await.unwrap();
    status.rename("old_cursor", "new_cursor").await.unwrap();

    assert_eq!(status.get("old_cursor").await.unwrap(), None);
    assert_eq!(status.get("new_cursor").await.unwrap(), Some(json!(42)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn rename_of_missing_key_is_a_silent_no_op() {
    let env = common::TestEnv::start().await;
    let status = env.client.status();

    status.set("unrelated", json!("keep")).await.unwrap();

    // The documented sharp edge: renaming a key that does not exist reports
    // success and leaves the table unchanged.
    status.rename("old_cursor", "new_cursor").await.unwrap();

    assert_eq!(status.get("old_cursor").await.unwrap(), None);
    assert_eq!(status.get("new_cursor").await.unwrap(), None);
    assert_eq!(
        status.get("unrelated").await.unwrap(),
        Some(json!("keep"))
    );
}
