//! Wire details the demo server never produces: unusual content types,
//! empty bodies, request headers and methods.

use restkit_core::headers::{AUTHORIZATION, CONTENT_TYPE};
use restkit_core::{
    mime, BodyParams, ContentKind, Error, FileDescriptor, HttpMethod, Payload, QueryParams,
    RequestContext, RestClient,
};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use wiremock::matchers::{body_json, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> RestClient {
    RestClient::new().unwrap()
}

#[tokio::test]
async fn unrecognized_content_type_is_an_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logo"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"))
        .mount(&server)
        .await;

    let mut ctx = RequestContext::new();
    let result = client()
        .make_request(&mut ctx, &format!("{}/logo", server.uri()), HttpMethod::Get, None, None)
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(
        ctx.outcome.content_kind,
        Some(ContentKind::Unrecognized("image/png".to_string()))
    );
}

/// Serve one canned HTTP/1.1 response on a random port.
async fn serve_raw_once(response: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await.unwrap();
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn missing_content_type_is_an_empty_success() {
    let base = serve_raw_once(
        "HTTP/1.1 200 OK\r\nContent-Length: 9\r\nConnection: close\r\n\r\nraw bytes",
    )
    .await;

    let mut ctx = RequestContext::new();
    let result = client()
        .make_request(&mut ctx, &format!("{base}/raw"), HttpMethod::Get, None, None)
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(ctx.outcome.content_kind, None);
    assert_eq!(ctx.outcome.status, Some(200));
}

#[tokio::test]
async fn truncated_body_still_records_status_and_headers() {
    let base = serve_raw_once(
        "HTTP/1.1 503 Service Unavailable\r\nContent-Type: text/plain\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort",
    )
    .await;

    let mut ctx = RequestContext::new();
    let err = client()
        .make_request(&mut ctx, &format!("{base}/partial"), HttpMethod::Get, None, None)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(ctx.outcome.status, Some(503));
    assert!(ctx
        .outcome
        .headers
        .iter()
        .any(|(name, value)| name.eq_ignore_ascii_case("content-length") && value == "100"));
}

#[tokio::test]
async fn no_content_is_an_empty_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/items/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut ctx = RequestContext::new();
    let result = client()
        .make_request(&mut ctx, &format!("{}/items/7", server.uri()), HttpMethod::Delete, None, None)
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(ctx.outcome.status, Some(204));
}

#[tokio::test]
async fn invalid_json_on_success_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"sum\": ", "application/json"))
        .mount(&server)
        .await;

    let mut ctx = RequestContext::new();
    let err = client()
        .make_request(&mut ctx, &format!("{}/broken", server.uri()), HttpMethod::Get, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { kind: ContentKind::Json, .. }));
    assert_eq!(ctx.outcome.content_kind, Some(ContentKind::Json));
}

#[tokio::test]
async fn json_error_body_gives_server_error_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fail"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "maintenance"})))
        .mount(&server)
        .await;

    let mut ctx = RequestContext::new();
    let err = client()
        .make_request(&mut ctx, &format!("{}/fail", server.uri()), HttpMethod::Get, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Server { status: 503, message: None }));
    assert!(err.is_server_error());
}

#[tokio::test]
async fn bearer_token_and_custom_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("authorization", "Bearer t0k3n"))
        .and(header("accept-language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
        .expect(2)
        .mount(&server)
        .await;

    let mut ctx = RequestContext::new();
    ctx.add_header(AUTHORIZATION, "t0k3n");
    ctx.add_header("Accept-Language", "en");
    let url = format!("{}/secure", server.uri());

    // Headers persist on the context across requests.
    for _ in 0..2 {
        let result = client()
            .make_request(&mut ctx, &url, HttpMethod::Get, None, None)
            .await
            .unwrap();
        assert_eq!(result, Some(Payload::Text("welcome".to_string())));
    }
}

#[tokio::test]
async fn patch_sends_json_body_and_encoded_query() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/profile"))
        .and(query_param("note", "a b+c=d"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"age": 26, "hero": "Superman"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updated": true})))
        .mount(&server)
        .await;

    let query = QueryParams::from([("note".to_string(), "a b+c=d".to_string())]);
    let body: BodyParams = json!({"age": 26, "hero": "Superman"})
        .as_object()
        .cloned()
        .unwrap();

    let mut ctx = RequestContext::new();
    let result = client()
        .make_request(
            &mut ctx,
            &format!("{}/profile", server.uri()),
            HttpMethod::Patch,
            Some(&query),
            Some(&body),
        )
        .await
        .unwrap();

    assert_eq!(result, Some(Payload::Json(json!({"updated": true}))));
    assert!(!ctx.headers.contains(CONTENT_TYPE));
}

#[tokio::test]
async fn upload_sends_multipart_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/files"))
        .and(header_regex(
            "content-type",
            r"^multipart/form-data; boundary=-+boundary\d+$",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_string("stored\n"))
        .mount(&server)
        .await;

    let files = [FileDescriptor::new(b"col1,col2\n".to_vec(), mime::TEXT_CSV, "data.csv")];
    let mut ctx = RequestContext::new();
    let result = client()
        .upload_files(
            &mut ctx,
            &format!("{}/files", server.uri()),
            HttpMethod::Put,
            None,
            None,
            &files,
        )
        .await
        .unwrap();

    assert_eq!(result, Some(Payload::Text("stored".to_string())));

    let received = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body).into_owned();
    assert!(body.contains("filename=\"data.csv\"\r\nContent-Type: text/csv\r\n\r\ncol1,col2\n\r\n"));
    assert!(body.ends_with("--\r\n"));
}
