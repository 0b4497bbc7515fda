mod common;

use common::{anonymous_client, signed_in_client, user_json};
use icebreaker_assistant::prelude::*;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_current_user(server: &MockServer, user_id: &str) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(user_id)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn unauthenticated_save_never_reaches_the_store() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/saved_messages"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let notes = Arc::new(NotificationCenter::new());
    let app = App::for_client(Arc::new(anonymous_client(&server.uri())), notes.clone());

    let err = app.profile_form().save_icebreaker("Hello").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthRequired);
    assert!(notes.drain().iter().all(Notification::is_error));
}

#[tokio::test]
async fn generate_then_save_a_candidate() {
    let server = MockServer::start().await;
    mock_current_user(&server, "user-1").await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/generate-icebreaker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "icebreakers": "1. Hello there 2. How's it going 3. Nice to meet you"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/saved_messages"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = signed_in_client(&server.uri(), "user-1");
    let notes = Arc::new(NotificationCenter::new());
    let app = App::for_client(Arc::new(client), notes.clone());

    app.update_field("userAge", "29");
    app.generate().await.unwrap();

    let section = app.profile_form().icebreakers_section();
    assert_eq!(
        section.items(),
        ["Hello there", "How's it going", "Nice to meet you"]
    );
    section.save(2).await.unwrap();

    assert_eq!(
        notes.drain(),
        [Notification::success("Icebreaker saved successfully")]
    );
}

#[tokio::test]
async fn deleting_a_profile_refetches_the_list() {
    let server = MockServer::start().await;
    mock_current_user(&server, "user-1").await;

    let row = |id: &str, name: &str| {
        json!({ "id": id, "user_id": "user-1", "profile_name": name,
                "user_age": null, "user_gender": null, "target_age": null, "target_gender": null })
    };

    // the mounted fetch sees both rows
    Mock::given(method("GET"))
        .and(path("/rest/v1/user_profiles"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([row("p1", "Park"), row("p2", "Pub")])),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/user_profiles"))
        .and(query_param("id", "eq.p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row("p1", "Park")])))
        .expect(1)
        .mount(&server)
        .await;

    // the refetch after the delete
    Mock::given(method("GET"))
        .and(path("/rest/v1/user_profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row("p2", "Pub")])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = signed_in_client(&server.uri(), "user-1");
    let app = App::for_client(Arc::new(client), Arc::new(NotificationCenter::new()));

    let list = app.open_saved_profiles().await;
    assert_eq!(list.profiles().len(), 2);

    list.delete_profile("p1").await.unwrap();

    let remaining: Vec<_> = list.profiles().into_iter().map(|p| p.id).collect();
    assert_eq!(remaining, ["p2"]);
}

#[tokio::test]
async fn blank_rename_sends_nothing() {
    let server = MockServer::start().await;
    mock_current_user(&server, "user-1").await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/user_profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "p1", "user_id": "user-1", "profile_name": "Park" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/user_profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _) = signed_in_client(&server.uri(), "user-1");
    let app = App::for_client(Arc::new(client), Arc::new(NotificationCenter::new()));
    let list = app.open_saved_profiles().await;

    list.start_editing(&list.profiles()[0]);
    list.set_editing_name(" \t ");

    assert!(!list.save_profile_name().await.unwrap());
    assert_eq!(list.editing_id().as_deref(), Some("p1"));
}
