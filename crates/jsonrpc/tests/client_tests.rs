// Integration tests for the JSON-RPC HTTP client against a mock endpoint.

use jsonrpc::{Client, Cookie, Headers, Params, Request, TransportError};
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn send_posts_envelope_as_json_and_parses_response() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "id": "0",
            "method": "getStatus",
            "params": { "verbose": true },
            "jsonrpc": "2.0"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "0", "result": { "ok": true }, "jsonrpc": "2.0" }).to_string())
        .create_async()
        .await;

    let client = Client::new(server.url()).unwrap();
    let response = client
        .send(&Request::new("getStatus", Params::new().add("verbose", true)))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.id.as_deref(), Some("0"));
    assert_eq!(response.content().unwrap(), json!({ "ok": true }));
}

#[tokio::test]
async fn raw_params_reach_the_wire_as_an_array() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "searchSchool",
            "params": [{ "search": "example" }]
        })))
        .with_body(json!({ "result": { "schools": [] } }).to_string())
        .create_async()
        .await;

    let client = Client::new(server.url()).unwrap();
    client
        .send(&Request::raw("searchSchool", r#"[{"search":"example"}]"#))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn caller_headers_are_merged_into_the_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_header("x-request-source", "tests")
        .with_body(json!({ "result": null }).to_string())
        .create_async()
        .await;

    let client = Client::new(server.url()).unwrap();
    let headers = Headers::new().add("X-Request-Source", "tests");
    client
        .send_with_headers(&Request::new("ping", Params::new()), &headers)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn stored_cookies_are_sent_with_every_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("cookie", "JSESSIONID=abc123")
        .with_body(json!({ "result": [] }).to_string())
        .expect(2)
        .create_async()
        .await;

    let mut client = Client::new(server.url()).unwrap();
    client.add_cookie(&Cookie::new("JSESSIONID", "abc123")).unwrap();

    let request = Request::new("getSubjects", Params::new());
    client.send(&request).await.unwrap();
    client.send(&request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn request_without_cookies_sends_no_cookie_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("cookie", Matcher::Missing)
        .with_body(json!({ "result": [] }).to_string())
        .create_async()
        .await;

    let client = Client::new(server.url()).unwrap();
    client.send(&Request::new("getSubjects", Params::new())).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn server_set_cookies_are_retained() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_header("set-cookie", "JSESSIONID=from-server; Path=/")
        .with_body(json!({ "result": null }).to_string())
        .create_async()
        .await;

    let client = Client::new(server.url()).unwrap();
    client.send(&Request::new("ping", Params::new())).await.unwrap();

    assert_eq!(
        client.cookies().unwrap(),
        vec![Cookie::new("JSESSIONID", "from-server")]
    );
}

#[tokio::test]
async fn structured_error_is_returned_through_content() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_body(
            json!({
                "result": null,
                "error": { "code": -32601, "message": "Method not found" },
                "jsonrpc": "2.0"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = Client::new(server.url()).unwrap();
    let response = client.send(&Request::new("nope", Params::new())).await.unwrap();

    let error = response.content().unwrap_err();
    assert_eq!(error.to_string(), "Method not found (-32601)");
}

#[tokio::test]
async fn non_envelope_body_is_a_decoding_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let client = Client::new(server.url()).unwrap();
    let err = client
        .send(&Request::new("ping", Params::new()))
        .await
        .unwrap_err();

    match err {
        TransportError::Decoding { status, .. } => assert_eq!(status, 502),
        other => panic!("expected decoding error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_header_fails_before_any_request_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = Client::new(server.url()).unwrap();
    let err = client
        .send_with_headers(
            &Request::new("ping", Params::new()),
            &Headers::new().add("bad header", "x"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Configuration { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_raw_params_fail_before_any_request_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = Client::new(server.url()).unwrap();
    let err = client
        .send(&Request::raw("searchSchool", "[{"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Serialization { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let client = Client::new("http://127.0.0.1:1/jsonrpc").unwrap();
    let err = client
        .send(&Request::new("ping", Params::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Network { .. }));
}
