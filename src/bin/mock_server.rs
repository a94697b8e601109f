//! Stand-in receiver for exercising the submission client locally.
//!
//! Accepts JSON POSTs on `/post` and echoes them back in the response
//! contract the client expects; `GET /api/test` answers a liveness probe.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use submit_relay::SubmitResponse;

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/api/test", get(liveness))
        .route("/post", post(receive));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Mock receiver listening on http://{}", addr);
    println!("Try: POST http://{}/post", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn liveness() -> Json<SubmitResponse> {
    Json(SubmitResponse {
        success: true,
        message: Some("mock receiver is running".to_string()),
        data: None,
    })
}

async fn receive(body: String) -> Json<SubmitResponse> {
    match serde_json::from_str::<Value>(&body) {
        Ok(data) => {
            println!("Received data: {data}");
            Json(SubmitResponse {
                success: true,
                message: Some("Data received successfully".to_string()),
                data: Some(data),
            })
        }
        Err(error) => Json(SubmitResponse {
            success: false,
            message: Some(format!("Error parsing data: {error}")),
            data: None,
        }),
    }
}
