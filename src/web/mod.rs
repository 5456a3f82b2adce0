//! HTTP surface: upload + preview page and the two download endpoints.
//!
//! Routes:
//!
//! - `GET /` — upload form with an empty preview
//! - `POST /` — multipart upload (field `file`), renders the first 20 normalized
//!   rows and download links
//! - `GET /generar/{formato}?archivo=<name>` — re-parses the named upload and
//!   streams the export
//!
//! There is no session: the uploaded file's identifier travels in the download
//! URL, so every request names the file it operates on. Uploads land in a fixed
//! directory, same-named files are overwritten (last write wins), and every
//! preview/download re-reads the file from disk.

use std::path::PathBuf;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::export::{self, ExportFormat};
use crate::ingest::generate_report;
use crate::types::Report;

/// Upload extensions accepted besides extension-less names.
const ALLOWED_EXTENSIONS: [&str; 3] = ["txt", "log", "csv"];

/// Fallback name when sanitization leaves nothing usable.
const FALLBACK_FILE_NAME: &str = "queue_log";

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Directory uploads are persisted to.
    pub upload_dir: PathBuf,
    /// Path of the event translation table (`eventos.json`).
    pub events_path: PathBuf,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(upload))
        .route("/generar/{formato}", get(download))
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render_page("", &placeholder_preview(), None))
}

async fn upload(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    let (mensaje, preview, archivo) = match handle_upload(&state, multipart).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("upload failed: {e}");
            (
                format!(
                    "⚠️ No se pudo procesar el archivo: {}",
                    escape_html(&e.to_string())
                ),
                placeholder_preview(),
                None,
            )
        }
    };
    Html(render_page(&mensaje, &preview, archivo.as_deref()))
}

async fn handle_upload(
    state: &AppState,
    mut multipart: Multipart,
) -> anyhow::Result<(String, String, Option<String>)> {
    let mut uploaded: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?;
            if !name.is_empty() {
                uploaded = Some((name, data.to_vec()));
            }
        }
    }

    let Some((client_name, data)) = uploaded else {
        return Ok((
            "⚠️ No se seleccionó ningún archivo.".to_string(),
            placeholder_preview(),
            None,
        ));
    };

    if !allowed_extension(&client_name) {
        tracing::warn!(file = %client_name, "rejected upload: extension not allowed");
        return Ok((
            "⚠️ Tipo de archivo no permitido.".to_string(),
            placeholder_preview(),
            None,
        ));
    }

    let file_name = sanitize_file_name(&client_name);
    let dest = state.upload_dir.join(&file_name);
    tokio::fs::write(&dest, &data).await?;
    tracing::info!(file = %file_name, bytes = data.len(), "upload stored");

    let report = generate_report(&dest, &state.events_path)?;
    let preview = if report.is_empty() {
        placeholder_preview()
    } else {
        preview_table(&report)
    };
    let mensaje = format!(
        "✅ Archivo <b>{}</b> subido con éxito.",
        escape_html(&file_name)
    );
    Ok((mensaje, preview, Some(file_name)))
}

#[derive(Debug, Deserialize)]
struct DownloadQuery {
    archivo: Option<String>,
}

async fn download(
    State(state): State<AppState>,
    Path(formato): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    let format = match ExportFormat::parse(&formato) {
        Ok(f) => f,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let Some(archivo) = query.archivo.filter(|a| !a.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            "❌ Primero debes subir un archivo.",
        )
            .into_response();
    };

    // Re-sanitize so the query value can never escape the upload directory.
    let path = state.upload_dir.join(sanitize_file_name(&archivo));
    if !path.is_file() {
        return (
            StatusCode::BAD_REQUEST,
            "❌ Primero debes subir un archivo.",
        )
            .into_response();
    }

    let report = match generate_report(&path, &state.events_path) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("parse failed for {}: {e}", path.display());
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };
    let bytes = match export::export(&report, format) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("export failed: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };
    tracing::info!(
        formato = %formato,
        rows = report.row_count(),
        bytes = bytes.len(),
        "report exported"
    );

    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Whether the upload's extension is in the allow-list. Names without an
/// extension are allowed.
fn allowed_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => true,
    }
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Path separators are stripped, remaining characters are filtered to
/// `[A-Za-z0-9._-]`, and names that end up empty or all dots fall back to
/// [`FALLBACK_FILE_NAME`].
fn sanitize_file_name(raw: &str) -> String {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let clean: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if clean.chars().all(|c| c == '.') {
        FALLBACK_FILE_NAME.to_string()
    } else {
        clean
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn placeholder_preview() -> String {
    "<p class='text-gray-500'>Sube un archivo para ver la vista previa aquí.</p>".to_string()
}

/// First 20 normalized rows as an HTML table.
fn preview_table(report: &Report) -> String {
    let columns = report.columns();

    let mut html = String::from(
        "<table class=\"table-auto w-full border-collapse border border-blue-200 \
         text-sm text-gray-800\"><thead><tr>",
    );
    for column in &columns {
        html.push_str(&format!("<th class=\"border px-2 py-1\">{}</th>", column.name()));
    }
    html.push_str("</tr></thead><tbody>");
    for row in report.preview() {
        html.push_str("<tr>");
        for &column in &columns {
            let value = row.cell(column).unwrap_or_default();
            html.push_str(&format!(
                "<td class=\"border px-2 py-1\">{}</td>",
                escape_html(&value)
            ));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

fn render_page(mensaje: &str, preview_html: &str, archivo: Option<&str>) -> String {
    let (botones_disabled, query) = match archivo {
        Some(name) => (String::new(), format!("?archivo={name}")),
        None => ("opacity-50 pointer-events-none".to_string(), String::new()),
    };

    format!(
        r#"<!doctype html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <title>Generador de Reportes</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gradient-to-r from-blue-50 to-blue-100 min-h-screen flex items-center justify-center p-6">
    <div class="max-w-6xl w-full bg-white shadow-2xl rounded-2xl p-8">
        <h1 class="text-3xl font-bold text-blue-800 mb-4 text-center">📊 Generador de Reportes</h1>

        <p class="text-center text-green-600 mb-4">{mensaje}</p>

        <form method="POST" enctype="multipart/form-data" class="text-center mb-6">
            <input type="file" name="file"
                   class="mb-4 block w-full text-sm text-gray-600 file:mr-4 file:py-2 file:px-4
                          file:rounded-lg file:border-0 file:text-sm file:font-semibold
                          file:bg-blue-600 file:text-white hover:file:bg-blue-700"/>
            <button type="submit"
                    class="bg-blue-700 hover:bg-blue-800 text-white font-semibold py-2 px-6 rounded-xl shadow-lg transition">
                📤 Subir archivo
            </button>
        </form>

        <div class="flex justify-center gap-4 mb-8 {botones_disabled}">
            <a href="/generar/excel{query}"
               class="bg-blue-700 hover:bg-blue-800 text-white font-semibold py-3 px-6 rounded-xl shadow-lg transition">
               📥 Descargar Excel
            </a>
            <a href="/generar/csv{query}"
               class="bg-green-600 hover:bg-green-700 text-white font-semibold py-3 px-6 rounded-xl shadow-lg transition">
               📥 Descargar CSV
            </a>
        </div>

        <h2 class="text-xl font-semibold text-blue-700 mb-3">Vista previa (20 filas):</h2>
        <div class="overflow-x-auto rounded-lg border border-blue-200 bg-blue-50 p-2">
            {preview_html}
        </div>
    </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_extension_honors_allow_list() {
        assert!(allowed_extension("queue.log"));
        assert!(allowed_extension("datos.TXT"));
        assert!(allowed_extension("reporte.csv"));
        assert!(allowed_extension("sin_extension"));
        assert!(!allowed_extension("script.sh"));
        assert!(!allowed_extension("informe.xlsx"));
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\logs\\queue.log"), "queue.log");
        assert_eq!(sanitize_file_name("cola lunes.log"), "colalunes.log");
    }

    #[test]
    fn sanitize_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_file_name(".."), FALLBACK_FILE_NAME);
        assert_eq!(sanitize_file_name("¡¿!"), FALLBACK_FILE_NAME);
    }

    #[test]
    fn preview_table_renders_present_columns_only() {
        use crate::ingest::parse_queue_log_str;
        use crate::translate::EventTable;

        let report = parse_queue_log_str("1700000000|x|soporte\n", &EventTable::empty());
        let html = preview_table(&report);
        assert!(html.contains("<th class=\"border px-2 py-1\">cola</th>"));
        assert!(!html.contains("numero_telefono"));
        assert!(html.contains("soporte"));
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<b>&\"x\"</b>"),
            "&lt;b&gt;&amp;&quot;x&quot;&lt;/b&gt;"
        );
    }
}
