//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use chrono::{TimeDelta, Utc};
use httpmock::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

/// A team token resource as the list endpoint returns it. Ages are in days
/// before now; `None` leaves the timestamp null.
pub fn token_json(
    id: &str,
    description: Option<&str>,
    team_id: &str,
    created_days: i64,
    last_used_days: Option<i64>,
    expired_days: Option<i64>,
) -> Value {
    let ago = |days: i64| (Utc::now() - TimeDelta::days(days)).to_rfc3339();
    json!({
        "id": id,
        "type": "authentication-tokens",
        "attributes": {
            "description": description,
            "created-at": ago(created_days),
            "last-used-at": last_used_days.map(ago),
            "expired-at": expired_days.map(ago),
            "token": null
        },
        "relationships": {
            "team": { "data": { "id": team_id, "type": "teams" } }
        }
    })
}

/// One page of a team token listing.
pub fn page_json(items: Vec<Value>, current: u32, total: u32) -> Value {
    let next = if current < total { json!(current + 1) } else { Value::Null };
    json!({
        "data": items,
        "meta": { "pagination": {
            "current-page": current,
            "next-page": next,
            "prev-page": null,
            "total-pages": total,
            "total-count": 0
        } }
    })
}

/// The three-token organization: one expired, one idle, one fresh.
pub fn acme_tokens() -> Vec<Value> {
    vec![
        token_json("at-expired", Some("old ci"), "team-1", 100, Some(1), Some(1)),
        token_json("at-idle", None, "team-1", 100, Some(45), None),
        token_json("at-fresh", None, "team-1", 5, Some(0), None),
    ]
}

pub fn mock_team(server: &MockServer, id: &str, name: &str) {
    let (id, name) = (id.to_string(), name.to_string());
    server.mock(move |when, then| {
        when.method(GET).path(format!("/api/v2/teams/{id}"));
        then.status(200).json_body(json!({
            "data": { "id": id, "type": "teams", "attributes": { "name": name } }
        }));
    });
}

/// The binary wired to `server`, isolated from any user config.
pub fn prune_cmd(server: &MockServer, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("team-token-prune").unwrap();
    cmd.env_clear()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("TFE_ADDRESS", server.base_url())
        .env("TFE_TOKEN", "secret")
        .env("TFE_ORGANIZATION", "acme")
        .env("TFE_PRUNE_MAX_RETRIES", "0");
    cmd
}
