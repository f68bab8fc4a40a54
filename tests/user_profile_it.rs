#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use openhumans_oauth2::{
	_preludet::*,
	config::ApiVersion,
	error::{Error, ParseError, TransportError},
	strategy::OpenHumansStrategy,
};

const ACCESS_TOKEN: &str = "access-it";

#[tokio::test]
async fn fetches_and_normalizes_the_member_profile() {
	let server = MockServer::start_async().await;
	let strategy = build_reqwest_test_strategy(&server.base_url(), ApiVersion::V2);
	let body = r#"{"id":"42","username":"alice","name":"Alice A.","url":"https://x/alice","email":"alice@example.com"}"#;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/profile/current/")
				.header("authorization", "Bearer access-it");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await;
	let profile = strategy
		.user_profile(ACCESS_TOKEN)
		.await
		.expect("Profile fetch should succeed for a well-formed body.");

	mock.assert_async().await;

	assert_eq!(profile.provider, "open-humans");
	assert_eq!(profile.id.as_deref(), Some("42"));
	assert_eq!(profile.username.as_deref(), Some("alice"));
	assert_eq!(profile.display_name.as_deref(), Some("Alice A."));
	assert_eq!(profile.profile_url.as_deref(), Some("https://x/alice"));
	assert_eq!(profile.emails, vec!["alice@example.com".to_owned()]);
	assert_eq!(profile.raw_body, body, "Raw body must be retained unmodified.");
}

#[tokio::test]
async fn legacy_deployment_uses_the_member_endpoint() {
	let server = MockServer::start_async().await;
	let strategy = build_reqwest_test_strategy(&server.base_url(), ApiVersion::V1);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/member/");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"id":7,"username":"bob"}"#);
		})
		.await;
	let profile = strategy
		.user_profile(ACCESS_TOKEN)
		.await
		.expect("Profile fetch should succeed against the legacy endpoint.");

	mock.assert_async().await;

	assert_eq!(profile.id.as_deref(), Some("7"));
	assert_eq!(profile.username.as_deref(), Some("bob"));
}

#[tokio::test]
async fn non_success_statuses_fail_with_the_profile_endpoint_error() {
	let server = MockServer::start_async().await;
	let strategy = build_reqwest_test_strategy(&server.base_url(), ApiVersion::V2);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/profile/current/");
			then.status(403).body("permission denied");
		})
		.await;
	let err = strategy
		.user_profile(ACCESS_TOKEN)
		.await
		.expect_err("Non-success statuses must fail the profile fetch.");

	mock.assert_async().await;

	match err {
		Error::ProfileEndpoint { status, body_preview } => {
			assert_eq!(status, 403);
			assert_eq!(body_preview.as_deref(), Some("permission denied"));
		},
		other => panic!("Expected a profile endpoint error, got {other:?}."),
	}
}

#[tokio::test]
async fn malformed_bodies_propagate_parse_errors_consistently() {
	let server = MockServer::start_async().await;
	let strategy = build_reqwest_test_strategy(&server.base_url(), ApiVersion::V2);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/profile/current/");
			then.status(200).header("content-type", "text/html").body("<html>maintenance</html>");
		})
		.await;

	for _ in 0..2 {
		let err = strategy
			.user_profile(ACCESS_TOKEN)
			.await
			.expect_err("Malformed bodies must propagate a parse error on every call.");

		assert!(matches!(err, Error::Parse(ParseError::Profile { .. })));
	}

	assert_eq!(mock.hits_async().await, 2);
}

#[tokio::test]
async fn transport_failures_are_wrapped_before_propagation() {
	// Port 1 is never bound; the connection is refused before any HTTP exchange.
	let unreachable = Url::parse("http://127.0.0.1:1/api/profile/current/")
		.expect("Unreachable URL fixture should parse successfully.");
	let config = test_config_builder()
		.profile_url(unreachable)
		.build()
		.expect("Transport test configuration should build successfully.");
	let strategy =
		OpenHumansStrategy::new(config).expect("Transport test strategy should build successfully.");
	let err = strategy
		.user_profile(ACCESS_TOKEN)
		.await
		.expect_err("Unreachable profile endpoints must fail the fetch.");

	assert!(
		matches!(err, Error::Transport(TransportError::Network { .. })),
		"Transport failures must surface as wrapped network errors, got {err:?}."
	);
}
