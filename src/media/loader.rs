//! Document and image loading for local resources

use std::path::{Path, PathBuf};

use super::{EventSink, MediaError, NativeEvent};

/// Map a resource URL onto a local path. Remote URLs are not fetched here.
fn resolve_local(url: &str) -> Result<PathBuf, MediaError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return Err(MediaError::Load(format!("remote resource is not available offline: {url}")));
    }
    Ok(PathBuf::from(url.strip_prefix("file://").unwrap_or(url)))
}

pub fn count_pdf_pages(path: &Path) -> Result<u32, MediaError> {
    let document = lopdf::Document::load(path)
        .map_err(|e| MediaError::Load(format!("Failed to load PDF: {e}")))?;
    let pages = document.get_pages().len() as u32;
    if pages == 0 {
        return Err(MediaError::Load("Failed to load PDF: document has no pages".to_string()));
    }
    Ok(pages)
}

pub fn probe_image(path: &Path) -> Result<(u32, u32), MediaError> {
    image::image_dimensions(path).map_err(|e| MediaError::Load(format!("Failed to load image: {e}")))
}

pub(super) fn spawn_document_load(url: String, sink: EventSink) {
    tokio::task::spawn_blocking(move || {
        let event = match resolve_local(&url).and_then(|path| count_pdf_pages(&path)) {
            Ok(pages) => {
                tracing::info!(url = %url, pages, "Document loaded");
                NativeEvent::DocumentLoaded { pages }
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Document failed to load");
                NativeEvent::LoadFailed { reason: e.to_string() }
            }
        };
        sink.emit(event);
    });
}

pub(super) fn spawn_image_load(url: String, sink: EventSink) {
    tokio::task::spawn_blocking(move || {
        let event = match resolve_local(&url).and_then(|path| probe_image(&path)) {
            Ok((width, height)) => {
                tracing::info!(url = %url, width, height, "Image loaded");
                NativeEvent::ImageLoaded { width, height }
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Image failed to load");
                NativeEvent::LoadFailed { reason: e.to_string() }
            }
        };
        sink.emit(event);
    });
}
