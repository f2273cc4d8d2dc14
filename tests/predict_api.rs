//! End-to-end tests for the prediction API using a mock model.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use catdog_infer::classifier::CatDogClassifier;
use catdog_infer::core::ClassifierError;
use catdog_infer::inference::ForwardModel;
use catdog_infer::processors::Preprocessor;
use http_body_util::BodyExt;
use ndarray::ArrayView4;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "catdog-test-boundary";
const MAX_BODY: usize = 32 * 1024 * 1024;

/// Mock model returning a fixed score, asserting the preprocessed shape.
struct FixedScore(f32);

impl ForwardModel for FixedScore {
    fn forward(&self, input: ArrayView4<'_, f32>) -> Result<f32, ClassifierError> {
        assert_eq!(input.shape(), &[1, 256, 256, 3]);
        assert!(input.iter().all(|&v| (0.0..=1.0).contains(&v)));
        Ok(self.0)
    }
}

fn test_app(score: f32) -> Router {
    let classifier = Arc::new(CatDogClassifier::from_parts(
        Preprocessor::default(),
        Arc::new(FixedScore(score)),
        0.5,
    ));
    catdog_infer::server::router(classifier, MAX_BODY)
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(64, 64, image::Rgb([255, 255, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn multipart_request(field_name: &str, payload: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"upload.png\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/predict/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn dog_prediction_round_trips() {
    let response = test_app(0.73)
        .oneshot(multipart_request("file", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({"class": "Dog", "confidence": 73.0}));
}

#[tokio::test]
async fn cat_prediction_round_trips() {
    let response = test_app(0.2)
        .oneshot(multipart_request("file", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({"class": "Cat", "confidence": 80.0}));
}

#[tokio::test]
async fn garbage_upload_is_unprocessable() {
    let response = test_app(0.73)
        .oneshot(multipart_request("file", b"these are not image bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn missing_file_field_is_bad_request() {
    let response = test_app(0.73)
        .oneshot(multipart_request("attachment", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn health_probe_responds() {
    let response = test_app(0.5)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({"status": "ok"}));
}
