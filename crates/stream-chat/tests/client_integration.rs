//! Request construction, response wrapping and error mapping against a mock backend.

mod common;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use serde_json::json;
use stream_chat::{Error, RateLimitsQuery, SortOption};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{API_KEY, TestApi, claims, payload_param};

#[tokio::test]
async fn test_every_request_is_signed() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/app"))
        .and(query_param("api_key", API_KEY))
        .and(header("stream-auth-type", "jwt"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"app": {"name": "demo"}})))
        .expect(1)
        .mount(&api.server)
        .await;

    let response = api.client.app().get_settings().await?;
    assert_eq!(response.status(), 200);
    assert_eq!(response["app"]["name"], "demo");

    let request = api.single_request().await;
    let token = request.headers.get("authorization").unwrap().to_str()?;
    assert!(!token.starts_with("Bearer"));
    assert_eq!(claims(token), json!({"server": "true"}));

    let client_header = request.headers.get("x-stream-client").unwrap().to_str()?;
    assert!(client_header.starts_with("stream-chat-rust-client-"));

    assert!(request.body.is_empty());
    let encoding = request.headers.get("accept-encoding").unwrap().to_str()?;
    assert!(encoding.contains("gzip"));

    Ok(())
}

#[tokio::test]
async fn test_rate_limit_headers_on_success() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/rate_limits"))
        .and(query_param("server_side", "true"))
        .and(query_param("endpoints", "QueryChannels,SendMessage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"server_side": {}}))
                .insert_header("x-ratelimit-limit", "1000")
                .insert_header("x-ratelimit-remaining", "999")
                .insert_header("x-ratelimit-reset", "1700000000"),
        )
        .expect(1)
        .mount(&api.server)
        .await;

    let query = RateLimitsQuery {
        server_side: true,
        endpoints: Some(vec!["QueryChannels".into(), "SendMessage".into()]),
        ..Default::default()
    };
    let response = api.client.app().rate_limits(&query).await?;

    let limits = response.rate_limit().expect("all three headers were sent");
    assert_eq!(limits.limit, 1000);
    assert_eq!(limits.remaining, 999);
    assert_eq!(limits.reset, Utc.timestamp_opt(1_700_000_000, 0).unwrap());

    Ok(())
}

#[tokio::test]
async fn test_rate_limited_error_exposes_headers() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/messages/m1"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({
                    "code": 9,
                    "message": "Too many requests, check response headers",
                    "StatusCode": 429,
                }))
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000060"),
        )
        .mount(&api.server)
        .await;

    let err = api.client.messages().get("m1").await.unwrap_err();

    assert!(err.is_rate_limited());
    assert_eq!(err.status(), Some(429));
    assert_eq!(err.rate_limit_limit(), Some(60));
    assert_eq!(err.rate_limit_remaining(), Some(0));
    assert_eq!(err.rate_limit_reset().map(|r| r.timestamp()), Some(1_700_000_060));
    match err {
        Error::Api {
            code, message, body, ..
        } => {
            assert_eq!(code, Some(9));
            assert_eq!(message, "Too many requests, check response headers");
            assert!(body.contains("StatusCode"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_error_without_json_body() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks/t1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&api.server)
        .await;

    let err = api.client.tasks().get("t1").await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.rate_limit_limit(), None);
    match err {
        Error::Api { code, message, .. } => {
            assert_eq!(code, None);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_empty_body_decodes_to_object() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("DELETE"))
        .and(path("/roles/editor"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&api.server)
        .await;

    let response = api.client.permissions().delete_role("editor").await?;
    assert_eq!(*response.body(), json!({}));
    assert!(response.rate_limit().is_none());

    Ok(())
}

#[tokio::test]
async fn test_query_channels_injects_defaults() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/channels"))
        .and(body_json(json!({
            "filter_conditions": {"members": {"$in": ["jane"]}},
            "sort": [{"field": "last_message_at", "direction": -1}],
            "state": true,
            "watch": false,
            "presence": false,
            "limit": 10,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"channels": []})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .channels()
        .query(
            json!({"members": {"$in": ["jane"]}}),
            &[SortOption::desc("last_message_at")],
            Some(json!({"limit": 10})),
        )
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_query_channels_keeps_explicit_flags() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/channels"))
        .and(body_json(json!({
            "filter_conditions": {"type": "messaging"},
            "sort": [],
            "state": false,
            "watch": false,
            "presence": true,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"channels": []})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .channels()
        .query(
            json!({"type": "messaging"}),
            &[],
            Some(json!({"state": false, "presence": true})),
        )
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_query_channels_rejects_empty_filter() -> Result<()> {
    let api = TestApi::start().await;

    let err = api
        .client
        .channels()
        .query(json!({}), &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(ref m) if m == "filterConditions can't be empty"));
    assert!(api.requests().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_query_users_sends_payload_param() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": []})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .users()
        .query(
            json!({"id": {"$in": ["jane"]}}),
            &[SortOption::asc("last_active")],
            Some(json!({"limit": 5})),
        )
        .await?;

    let request = api.single_request().await;
    assert_eq!(
        payload_param(&request),
        json!({
            "filter_conditions": {"id": {"$in": ["jane"]}},
            "sort": [{"field": "last_active", "direction": 1}],
            "limit": 5,
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_search_expands_sort_shorthand() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .messages()
        .search(
            json!({"cid": "messaging:general"}),
            "supercalifragilisticexpialidocious",
            Some(json!({"limit": 2, "sort": [{"created_at": -1}]})),
        )
        .await?;

    let request = api.single_request().await;
    assert_eq!(
        payload_param(&request),
        json!({
            "filter_conditions": {"cid": "messaging:general"},
            "query": "supercalifragilisticexpialidocious",
            "limit": 2,
            "sort": [{"field": "created_at", "direction": -1}],
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_search_with_message_filter() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&api.server)
        .await;

    api.client
        .messages()
        .search(
            json!({"type": "messaging"}),
            json!({"text": {"$autocomplete": "cious"}}),
            None,
        )
        .await?;

    let payload = payload_param(&api.single_request().await);
    assert_eq!(
        payload["message_filter_conditions"],
        json!({"text": {"$autocomplete": "cious"}})
    );
    assert!(payload.get("query").is_none());
    assert_eq!(payload["sort"], json!([]));

    Ok(())
}

#[tokio::test]
async fn test_search_rejects_offset_with_next_or_sort() -> Result<()> {
    let api = TestApi::start().await;

    let with_sort = api
        .client
        .messages()
        .search(
            json!({"type": "messaging"}),
            "query",
            Some(json!({"sort": [{"created_at": -1}], "offset": 1})),
        )
        .await;
    assert!(matches!(with_sort, Err(Error::InvalidArgument(_))));

    let with_next = api
        .client
        .messages()
        .search(
            json!({"type": "messaging"}),
            "query",
            Some(json!({"next": "abc", "offset": 1})),
        )
        .await;
    assert!(matches!(with_next, Err(Error::InvalidArgument(_))));

    assert!(api.requests().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_upsert_users_keyed_by_id() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({
            "users": {
                "jane": {"id": "jane", "role": "admin"},
                "joe": {"id": "joe"},
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"users": {}})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .users()
        .upsert_many(vec![json!({"id": "jane", "role": "admin"}), json!({"id": "joe"})])
        .await?;

    let err = api.client.users().upsert(json!({"name": "anonymous"})).await;
    assert!(matches!(err, Err(Error::InvalidArgument(_))));

    Ok(())
}

#[tokio::test]
async fn test_delete_user_options_become_query() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/jane"))
        .and(query_param("mark_messages_deleted", "true"))
        .and(query_param("hard_delete", "true"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"id": "jane"}})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .users()
        .delete(
            "jane",
            Some(json!({"mark_messages_deleted": true, "hard_delete": true})),
        )
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_revoke_user_tokens() -> Result<()> {
    let api = TestApi::start().await;
    let before = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    Mock::given(method("PATCH"))
        .and(path("/users"))
        .and(body_json(json!({
            "users": [
                {"id": "jane", "set": {"revoke_tokens_issued_before": "2024-01-02T03:04:05Z"}},
                {"id": "joe", "set": {"revoke_tokens_issued_before": "2024-01-02T03:04:05Z"}},
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"users": {}})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .users()
        .revoke_tokens(&["jane", "joe"], Some(before))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_app_revoke_tokens_can_be_lifted() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("PATCH"))
        .and(path("/app"))
        .and(body_json(json!({"revoke_tokens_issued_before": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client.app().revoke_tokens(None).await?;
    Ok(())
}

#[tokio::test]
async fn test_channel_type_defaults_commands() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/channeltypes"))
        .and(body_json(json!({"name": "livestream2", "commands": ["all"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"name": "livestream2"})))
        .expect(1)
        .mount(&api.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/channeltypes"))
        .and(body_json(json!({"name": "support", "commands": ["giphy"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"name": "support"})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .channel_types()
        .create(json!({"name": "livestream2", "commands": []}))
        .await?;
    api.client
        .channel_types()
        .create(json!({"name": "support", "commands": ["giphy"]}))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_unban_uses_delete_with_query() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("DELETE"))
        .and(path("/moderation/ban"))
        .and(query_param("target_user_id", "troll"))
        .and(query_param("shadow", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .moderation()
        .remove_shadow_ban("troll", None)
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_ban_user_body() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/moderation/ban"))
        .and(body_json(json!({
            "target_user_id": "troll",
            "user_id": "admin",
            "timeout": 60,
            "shadow": true,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .moderation()
        .shadow_ban("troll", Some(json!({"user_id": "admin", "timeout": 60})))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_pin_message_partial_update() -> Result<()> {
    let api = TestApi::start().await;
    let expires = Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap();

    Mock::given(method("PUT"))
        .and(path("/messages/m1"))
        .and(body_json(json!({
            "user": {"id": "jane"},
            "set": {"pinned": true, "pin_expires": "2030-06-01T00:00:00Z"},
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": {"id": "m1"}})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client.messages().pin("m1", "jane", Some(expires)).await?;
    Ok(())
}

#[tokio::test]
async fn test_update_message_requires_id() -> Result<()> {
    let api = TestApi::start().await;

    let err = api.client.messages().update(json!({"text": "edited"})).await;
    assert!(matches!(err, Err(Error::InvalidArgument(ref m)) if m == "A message must have an id"));
    assert!(api.requests().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_device_delete_uses_query() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("DELETE"))
        .and(path("/devices"))
        .and(query_param("id", "device-1"))
        .and(query_param("user_id", "jane"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client.devices().delete("device-1", "jane").await?;
    assert!(api.single_request().await.body.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_update_live_location() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/live_locations"))
        .and(query_param("user_id", "jane"))
        .and(body_json(json!({
            "latitude": 40.7128,
            "longitude": -74.006,
            "message_id": "m1",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client
        .users()
        .update_live_location("jane", "m1", json!({"latitude": 40.7128, "longitude": -74.006}))
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_reminders() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("POST"))
        .and(path("/messages/m1/reminders"))
        .and(body_json(json!({"user_id": "jane"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"reminder": {"message_id": "m1", "user_id": "jane"}})),
        )
        .expect(1)
        .mount(&api.server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/messages/m1/reminders"))
        .and(query_param("user_id", "jane"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&api.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/reminders/query"))
        .and(body_json(json!({
            "user_id": "jane",
            "filter_conditions": {"message_id": "m1"},
            "sort": [],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reminders": []})))
        .expect(1)
        .mount(&api.server)
        .await;

    let response = api.client.reminders().create("m1", "jane", None).await?;
    assert_eq!(response["reminder"]["message_id"], "m1");
    api.client.reminders().delete("m1", "jane").await?;
    api.client
        .reminders()
        .query("jane", Some(json!({"message_id": "m1"})), &[], None)
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_campaign_schedule_and_stop() -> Result<()> {
    let api = TestApi::start().await;

    Mock::given(method("PATCH"))
        .and(path("/campaigns/c1/schedule"))
        .and(body_json(json!({"send_at": 1_900_000_000})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&api.server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/campaigns/c1/stop"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&api.server)
        .await;

    api.client.campaigns().schedule("c1", 1_900_000_000).await?;
    api.client.campaigns().stop("c1").await?;

    Ok(())
}

#[tokio::test]
async fn test_user_token_claims() -> Result<()> {
    let api = TestApi::start().await;

    let token = api.client.create_token("tommaso", Some(1_900_000_000), None)?;
    let claims = claims(&token);
    assert_eq!(claims["user_id"], "tommaso");
    assert_eq!(claims["exp"], 1_900_000_000);
    assert!(claims.get("iat").is_none());

    Ok(())
}
