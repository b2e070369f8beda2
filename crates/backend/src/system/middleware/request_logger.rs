use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Human-readable response size
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// Logs method, path, status, duration and response size of every request
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    // Buffer the body to learn its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(
                %method,
                %path,
                status,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "failed to read response body: {}",
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let size = format_size(bytes.len());
    if parts.status.is_success() {
        tracing::info!(%method, %path, status, elapsed_ms, %size, "request");
    } else {
        tracing::warn!(%method, %path, status, elapsed_ms, %size, "request");
    }

    Response::from_parts(parts, Body::from(bytes))
}
