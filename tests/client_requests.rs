//
//  sysdig-client
//  tests/client_requests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end request handling against a mock Sysdig API.

use mockito::{Matcher, Server, ServerGuard};
use reqwest::StatusCode;
use serde_json::json;

use sysdig_client::api::monitor::NotificationChannel;
use sysdig_client::api::platform::{IpFilter, Team, TeamMember};
use sysdig_client::api::{
    Client, GroupMappingsApi, IpFiltersApi, NotificationChannelsApi, PoliciesApi,
    PostureZonesApi, TeamsApi, UsersApi,
};
use sysdig_client::config::ClientConfig;
use sysdig_client::Error;

fn client(server: &ServerGuard) -> Client {
    let config = ClientConfig::builder(server.url())
        .token("test-token")
        .extra_header("X-Sysdig-Region", "eu1")
        .max_retries(0)
        .build()
        .unwrap();
    Client::with_token(config).unwrap()
}

#[tokio::test]
async fn test_every_request_carries_auth_content_type_and_extra_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/teams")
        .match_header("authorization", "Bearer test-token")
        .match_header("content-type", "application/json")
        .match_header("x-sysdig-region", "eu1")
        .match_header("user-agent", Matcher::Regex("^sysdig-client/".into()))
        .with_status(200)
        .with_body(r#"{"teams":[{"id":1,"name":"Monitor Operations","products":["SDC"]}]}"#)
        .create_async()
        .await;

    let teams = client(&server).list_teams().await.unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].name, "Monitor Operations");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_team_resolves_members_and_accepts_201() {
    let mut server = Server::new_async().await;
    let users = server
        .mock("GET", "/api/users/light")
        .with_status(200)
        .with_body(r#"{"users":[{"id":7,"username":"Jane@Example.com"},{"id":8,"username":"bob@example.com"}]}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/teams")
        .match_body(Matcher::PartialJson(json!({
            "team": {
                "name": "platform",
                "userRoles": [{"userId": 7, "role": "ROLE_TEAM_EDIT"}]
            }
        })))
        .with_status(201)
        .with_body(r#"{"team":{"id":12,"name":"platform","userRoles":[{"userId":7,"userName":"jane@example.com","role":"ROLE_TEAM_EDIT"}]}}"#)
        .create_async()
        .await;

    let team = Team {
        name: "platform".to_string(),
        products: vec!["SDS".to_string()],
        ..Default::default()
    };
    let members = [TeamMember::new("jane@example.com", "ROLE_TEAM_EDIT")];

    let created = client(&server).create_team(&team, &members).await.unwrap();
    assert_eq!(created.id, Some(12));
    assert_eq!(created.user_roles[0].user_id, 7);

    users.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_unknown_member_fails_before_team_is_created() {
    let mut server = Server::new_async().await;
    let _users = server
        .mock("GET", "/api/users/light")
        .with_status(200)
        .with_body(r#"{"users":[{"id":8,"username":"bob@example.com"}]}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/teams")
        .expect(0)
        .create_async()
        .await;

    let team = Team {
        name: "platform".to_string(),
        ..Default::default()
    };
    let members = [TeamMember::new("ghost@example.com", "ROLE_TEAM_READ")];

    let err = client(&server).create_team(&team, &members).await.unwrap_err();
    assert!(matches!(&err, Error::UserNotFound(email) if email == "ghost@example.com"));
    assert!(err.is_not_found());

    create.assert_async().await;
}

#[tokio::test]
async fn test_server_error_carries_extracted_message() {
    let mut server = Server::new_async().await;
    let _error = server
        .mock("POST", "/api/teams")
        .with_status(500)
        .with_body(r#"{"message":"bad request","errors":[{"reason":"invalid","message":"field X"}]}"#)
        .create_async()
        .await;

    let team = Team {
        name: "platform".to_string(),
        ..Default::default()
    };
    let err = client(&server).create_team(&team, &[]).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.to_string(), "bad request, invalid, field X");
}

#[tokio::test]
async fn test_unparseable_error_body_falls_back_to_status() {
    let mut server = Server::new_async().await;
    let _forbidden = server
        .mock("GET", "/api/users/4")
        .with_status(403)
        .with_body("<html>Forbidden</html>")
        .create_async()
        .await;

    let err = client(&server).get_user(4).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(err.to_string(), "403 Forbidden");
}

#[tokio::test]
async fn test_get_user_by_email_is_case_insensitive() {
    let mut server = Server::new_async().await;
    let _light = server
        .mock("GET", "/api/users/light")
        .with_status(200)
        .with_body(r#"{"users":[{"id":7,"username":"Jane@Example.com"}]}"#)
        .create_async()
        .await;
    let _user = server
        .mock("GET", "/api/users/7")
        .with_status(200)
        .with_body(r#"{"user":{"id":7,"username":"Jane@Example.com","firstName":"Jane"}}"#)
        .create_async()
        .await;

    let user = client(&server)
        .get_user_by_email("jane@example.com")
        .await
        .unwrap();
    assert_eq!(user.id, Some(7));
    assert_eq!(user.first_name.as_deref(), Some("Jane"));
}

#[tokio::test]
async fn test_ip_filter_calls_send_provider_marker() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/platform/v1/ip-filters")
        .match_header("sysdig-provider", "Terraform")
        .match_body(Matcher::PartialJson(json!({"ipRange": "10.0.0.0/8", "isEnabled": true})))
        .with_status(201)
        .with_body(r#"{"id":3,"ipRange":"10.0.0.0/8","isEnabled":true,"lastUpdated":"2025-01-01T00:00:00Z"}"#)
        .create_async()
        .await;

    let filter = IpFilter {
        ip_range: "10.0.0.0/8".to_string(),
        is_enabled: true,
        ..Default::default()
    };
    let created = client(&server).create_ip_filter(&filter).await.unwrap();
    assert_eq!(created.id, Some(3));
    assert!(created.last_updated.is_some());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_notification_channel_maps_to_sentinel() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/api/notificationChannels/41")
        .with_status(404)
        .with_body(r#"{"message":"Notification channel not found"}"#)
        .create_async()
        .await;

    let err = client(&server)
        .get_notification_channel(41)
        .await
        .unwrap_err();
    assert!(matches!(&err, Error::NotificationChannelNotFound(id) if id == "41"));
}

#[tokio::test]
async fn test_notification_channel_create_wraps_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/notificationChannels")
        .match_body(Matcher::PartialJson(json!({
            "notificationChannel": {"name": "pd", "type": "PAGER_DUTY", "enabled": true}
        })))
        .with_status(201)
        .with_body(r#"{"notificationChannel":{"id":5,"version":0,"name":"pd","type":"PAGER_DUTY","enabled":true,"options":{"account":"acme"}}}"#)
        .create_async()
        .await;

    let channel = NotificationChannel {
        name: "pd".to_string(),
        kind: "PAGER_DUTY".to_string(),
        enabled: true,
        ..Default::default()
    };
    let created = client(&server)
        .create_notification_channel(&channel)
        .await
        .unwrap();
    assert_eq!(created.id, Some(5));
    assert_eq!(created.options.extra["account"], "acme");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_deleting_a_missing_policy_succeeds() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/v2/policies/9")
        .with_status(404)
        .create_async()
        .await;

    client(&server).delete_policy(9).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_posture_zone_maps_to_sentinel() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/api/cspm/v1/policy/zones/77")
        .match_header("sysdig-provider", "Terraform")
        .with_status(404)
        .create_async()
        .await;

    let err = client(&server).get_posture_zone("77").await.unwrap_err();
    assert!(matches!(&err, Error::PostureZoneNotFound(id) if id == "77"));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_member_lookup_folds_non_ascii_case() {
    let mut server = Server::new_async().await;
    let _light = server
        .mock("GET", "/api/users/light")
        .with_status(200)
        .with_body(r#"{"users":[{"id":9,"username":"Élodie@Example.com"}]}"#)
        .create_async()
        .await;
    let _user = server
        .mock("GET", "/api/users/9")
        .with_status(200)
        .with_body(r#"{"user":{"id":9,"username":"Élodie@Example.com"}}"#)
        .create_async()
        .await;

    let user = client(&server)
        .get_user_by_email("élodie@example.com")
        .await
        .unwrap();
    assert_eq!(user.id, Some(9));
}

#[tokio::test]
async fn test_missing_group_mapping_maps_to_sentinel() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/groupmappings/31")
        .with_status(404)
        .with_body(r#"{"message":"Group mapping not found"}"#)
        .create_async()
        .await;

    let err = client(&server).get_group_mapping(31).await.unwrap_err();
    assert!(matches!(err, Error::GroupMappingNotFound(31)));
    assert!(err.is_not_found());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_deleting_a_missing_notification_channel_succeeds() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/notificationChannels/41")
        .with_status(404)
        .create_async()
        .await;

    client(&server)
        .delete_notification_channel(41)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_ip_filter_delete_accepts_only_no_content() {
    let mut server = Server::new_async().await;
    let deleted = server
        .mock("DELETE", "/platform/v1/ip-filters/3")
        .match_header("sysdig-provider", "Terraform")
        .with_status(204)
        .create_async()
        .await;
    let _missing = server
        .mock("DELETE", "/platform/v1/ip-filters/4")
        .with_status(404)
        .with_body(r#"{"message":"IP filter not found"}"#)
        .create_async()
        .await;

    let client = client(&server);
    client.delete_ip_filter(3).await.unwrap();
    deleted.assert_async().await;

    let err = client.delete_ip_filter(4).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "IP filter not found");
}

#[tokio::test]
async fn test_update_without_id_fails_before_any_request() {
    let mut server = Server::new_async().await;
    let put = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let team = Team {
        name: "platform".to_string(),
        ..Default::default()
    };
    let err = client(&server).update_team(&team, &[]).await.unwrap_err();
    assert!(matches!(err, Error::MissingId(_)));

    put.assert_async().await;
}
