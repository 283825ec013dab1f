//! Shared helpers for unit tests.

/// Serve an axum router on an ephemeral local port and return its base URL.
pub(crate) async fn spawn_mock_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    format!("http://{}", addr)
}
