#![cfg(feature = "reqwest")]

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
// self
use openhumans_oauth2::{
	_preludet::*,
	config::ApiVersion,
	error::{Error, ParseError},
	strategy::ReqwestStrategy,
};

fn build_strategy(server: &MockServer) -> ReqwestStrategy {
	// The fixture origin "external-app" must reach the wire as "external".
	build_reqwest_test_strategy(&server.base_url(), ApiVersion::V2)
}

#[tokio::test]
async fn exchanging_a_code_yields_a_token_set() {
	let server = MockServer::start_async().await;
	let strategy = build_strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/access_token")
				.header("content-type", "application/x-www-form-urlencoded")
				.body_includes("grant_type=authorization_code")
				.body_includes("code=valid-code")
				.body_includes("origin=external");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"access-success\",\"refresh_token\":\"refresh-success\",\"token_type\":\"bearer\",\"expires_in\":3600,\"scope\":\"read\"}",
			);
		})
		.await;
	let tokens = strategy
		.exchange_code("valid-code")
		.await
		.expect("Authorization code exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(tokens.access_token, "access-success");
	assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-success"));
	assert_eq!(tokens.scopes, Some(vec!["read".to_owned()]));
	assert_eq!(tokens.expires_in, Some(Duration::from_secs(3600)));
}

#[tokio::test]
async fn provider_rejections_surface_as_token_endpoint_errors() {
	let server = MockServer::start_async().await;
	let strategy = build_strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/access_token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_grant\",\"error_description\":\"already used\"}");
		})
		.await;
	let err = strategy
		.exchange_code("stale-code")
		.await
		.expect_err("Provider rejections must fail the exchange.");

	mock.assert_async().await;

	match err {
		Error::TokenEndpoint { reason } => {
			assert!(reason.contains("invalid_grant"), "Reason should name the OAuth error code.");
			assert!(reason.contains("already used"), "Reason should keep the provider description.");
		},
		other => panic!("Expected a token endpoint error, got {other:?}."),
	}
}

#[tokio::test]
async fn malformed_token_responses_propagate_parse_errors() {
	let server = MockServer::start_async().await;
	let strategy = build_strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/access_token");
			then.status(200).header("content-type", "application/json").body("not json");
		})
		.await;
	let err = strategy
		.exchange_code("valid-code")
		.await
		.expect_err("Malformed token responses must fail the exchange.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Parse(ParseError::TokenResponse { .. })));
}
