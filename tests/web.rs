use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use queue_log_report::web::{router, AppState};

fn test_app(upload_dir: &TempDir) -> Router {
    router(AppState {
        upload_dir: upload_dir.path().to_path_buf(),
        events_path: "tests/fixtures/eventos.json".into(),
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>, Option<String>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, body, content_type)
}

#[tokio::test]
async fn download_without_upload_is_a_client_error() {
    let dir = TempDir::new().unwrap();
    let (status, body, _) = get(test_app(&dir), "/generar/csv").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("Primero debes subir un archivo"));
}

#[tokio::test]
async fn download_with_unknown_archivo_is_a_client_error() {
    let dir = TempDir::new().unwrap();
    let (status, body, _) = get(test_app(&dir), "/generar/csv?archivo=nada.log").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("Primero debes subir un archivo"));
}

#[tokio::test]
async fn unknown_formato_is_rejected_with_400() {
    let dir = TempDir::new().unwrap();
    let (status, body, _) = get(test_app(&dir), "/generar/pdf?archivo=queue.log").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("unknown export format 'pdf'"));
}

#[tokio::test]
async fn csv_download_streams_the_exported_report() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("queue.log"),
        "1700000000|x|soporte|y|CONNECT|z|5551234\n",
    )
    .unwrap();

    let (status, body, content_type) =
        get(test_app(&dir), "/generar/csv?archivo=queue.log").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/csv"));
    assert_eq!(&body[..3], b"\xef\xbb\xbf");
    let text = std::str::from_utf8(&body[3..]).unwrap();
    assert!(text.starts_with("timestamp,fecha_legible,cola,evento,numero_telefono\n"));
    // Translated via the fixture table.
    assert!(text.contains("soporte,Atendida,5551234"));
}

#[tokio::test]
async fn excel_download_sends_a_workbook_attachment() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("queue.log"),
        "1700000000|x|soporte|y|CONNECT|z|5551234\n",
    )
    .unwrap();

    let (status, body, content_type) =
        get(test_app(&dir), "/generar/excel?archivo=queue.log").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        content_type.as_deref(),
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    );
    assert_eq!(&body[..2], b"PK");
}

#[tokio::test]
async fn index_renders_the_upload_form() {
    let dir = TempDir::new().unwrap();
    let (status, body, _) = get(test_app(&dir), "/").await;

    assert_eq!(status, StatusCode::OK);
    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("Generador de Reportes"));
    assert!(body.contains("Sube un archivo para ver la vista previa"));
}
