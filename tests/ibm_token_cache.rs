//
//  sysdig-client
//  tests/ibm_token_cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! IBM IAM authentication: token caching, refresh and request headers.

use mockito::{Matcher, Mock, Server, ServerGuard};

use sysdig_client::api::ibm::{GRANT_TYPE, IAM_TOKEN_PATH};
use sysdig_client::api::{Client, TeamsApi};
use sysdig_client::config::{ClientConfig, IbmConfig};
use sysdig_client::Error;

const TEAMS_BODY: &str = r#"{"teams":[]}"#;

fn ibm_client(server: &ServerGuard, team_id: Option<i64>) -> Client {
    let config = ClientConfig::builder(server.url())
        .max_retries(0)
        .build()
        .unwrap();
    let mut ibm = IbmConfig::new("api-key", "instance-guid").with_iam_url(server.url());
    if let Some(team_id) = team_id {
        ibm = ibm.with_team_id(team_id);
    }
    Client::with_ibm(config, ibm).unwrap()
}

async fn iam_mock(server: &mut ServerGuard, expiration: i64, hits: usize) -> Mock {
    server
        .mock("POST", IAM_TOKEN_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), GRANT_TYPE.into()),
            Matcher::UrlEncoded("apikey".into(), "api-key".into()),
        ]))
        .with_status(200)
        .with_body(format!(
            r#"{{"access_token":"iam-token","refresh_token":"not-used","token_type":"Bearer","expires_in":3600,"expiration":{expiration}}}"#
        ))
        .expect(hits)
        .create_async()
        .await
}

async fn teams_mock(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("GET", "/api/teams")
        .match_header("authorization", "Bearer iam-token")
        .match_header("ibminstanceid", "instance-guid")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(TEAMS_BODY)
        .expect(hits)
        .create_async()
        .await
}

fn in_an_hour() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_share_one_refresh() {
    let mut server = Server::new_async().await;
    let iam = iam_mock(&mut server, in_an_hour(), 1).await;
    let api = teams_mock(&mut server, 8).await;

    let client = ibm_client(&server, None);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.list_teams().await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    iam.assert_async().await;
    api.assert_async().await;
}

#[tokio::test]
async fn test_valid_token_is_reused_across_calls() {
    let mut server = Server::new_async().await;
    let iam = iam_mock(&mut server, in_an_hour(), 1).await;
    let api = teams_mock(&mut server, 3).await;

    let client = ibm_client(&server, None);
    for _ in 0..3 {
        client.list_teams().await.unwrap();
    }

    iam.assert_async().await;
    api.assert_async().await;
}

#[tokio::test]
async fn test_expired_token_is_refreshed_on_every_call() {
    let mut server = Server::new_async().await;
    let already_expired = chrono::Utc::now().timestamp() - 10;
    let iam = iam_mock(&mut server, already_expired, 3).await;
    let api = teams_mock(&mut server, 3).await;

    let client = ibm_client(&server, None);
    for _ in 0..3 {
        client.list_teams().await.unwrap();
    }

    iam.assert_async().await;
    api.assert_async().await;
}

#[tokio::test]
async fn test_team_id_header_is_sent_when_configured() {
    let mut server = Server::new_async().await;
    let _iam = iam_mock(&mut server, in_an_hour(), 1).await;
    let api = server
        .mock("GET", "/api/teams")
        .match_header("sysdigteamid", "42")
        .with_status(200)
        .with_body(TEAMS_BODY)
        .create_async()
        .await;

    ibm_client(&server, Some(42)).list_teams().await.unwrap();

    api.assert_async().await;
}

#[tokio::test]
async fn test_refresh_failure_is_reported_and_no_api_call_is_made() {
    let mut server = Server::new_async().await;
    let _iam = server
        .mock("POST", IAM_TOKEN_PATH)
        .with_status(400)
        .with_body(r#"{"errorCode":"BXNIM0415E","errorMessage":"Provided API key could not be found","message":"Provided API key could not be found"}"#)
        .create_async()
        .await;
    let api = teams_mock(&mut server, 0).await;

    let err = ibm_client(&server, None).list_teams().await.unwrap_err();
    assert!(matches!(err, Error::TokenRefresh(_)));
    assert!(err.to_string().contains("Provided API key could not be found"));

    api.assert_async().await;
}
