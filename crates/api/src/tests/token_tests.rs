// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use boleteria_domain::Role;
use time::Duration;

use crate::{AuthError, Claims, TokenConfig, issue_token, verify_token};

use super::helpers::{NOW, token_config};

fn assert_auth_failed(result: Result<Claims, AuthError>, expected: &str) {
    match result {
        Err(AuthError::AuthenticationFailed { reason }) => assert_eq!(reason, expected),
        other => panic!("Expected AuthenticationFailed({expected}), got {other:?}"),
    }
}

#[test]
fn test_issued_token_verifies_with_subject_and_role() {
    let config = token_config();
    let issued = issue_token("alice", Role::Client, &config, NOW).unwrap();

    assert_eq!(issued.expires_at, NOW + Duration::hours(1));

    let claims = verify_token(&issued.token, &config, NOW + Duration::minutes(30)).unwrap();
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.roles, vec![String::from("CLIENT")]);
    assert_eq!(claims.role(), Some(Role::Client));
    assert_eq!(claims.iat, NOW.unix_timestamp());
}

#[test]
fn test_token_is_rejected_at_and_after_expiry() {
    let config = token_config();
    let issued = issue_token("alice", Role::Client, &config, NOW).unwrap();

    assert_auth_failed(
        verify_token(&issued.token, &config, issued.expires_at),
        "token expired",
    );
    assert_auth_failed(
        verify_token(&issued.token, &config, NOW + Duration::days(1)),
        "token expired",
    );
}

#[test]
fn test_token_signed_with_another_secret_is_rejected() {
    let issued = issue_token("alice", Role::Admin, &token_config(), NOW).unwrap();
    let other = TokenConfig::new("a-different-secret", Duration::hours(1));

    assert_auth_failed(verify_token(&issued.token, &other, NOW), "invalid token");
}

#[test]
fn test_malformed_token_is_rejected() {
    assert_auth_failed(
        verify_token("not.a.token", &token_config(), NOW),
        "invalid token",
    );
    assert_auth_failed(verify_token("", &token_config(), NOW), "invalid token");
}

#[test]
fn test_claims_role_tolerates_prefix_and_skips_unknown_names() {
    let claims = Claims {
        sub: String::from("root"),
        roles: vec![String::from("SUPERUSER"), String::from("ROLE_ADMIN")],
        iat: 0,
        exp: 1,
    };
    assert_eq!(claims.role(), Some(Role::Admin));

    let unknown = Claims {
        roles: vec![String::from("GUEST")],
        ..claims
    };
    assert_eq!(unknown.role(), None);
}

#[test]
fn test_token_config_debug_redacts_secret() {
    let rendered = format!("{:?}", token_config());
    assert!(!rendered.contains("test-signing-secret"));
    assert!(rendered.contains("redacted"));
}
