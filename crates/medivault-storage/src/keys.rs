//! Object key layout and media type guessing.

use uuid::Uuid;

/// Key for an uploaded document file: `{owner}/{uuid}-{file_name}`.
///
/// Path separators and parent references in either component are replaced so
/// the key always stays inside the owner's prefix.
pub fn document_key(owner_id: &str, id: Uuid, file_name: &str) -> String {
    format!("{}/{}-{}", sanitize(owner_id), id, sanitize(file_name))
}

fn sanitize(component: &str) -> String {
    let cleaned: String = component
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.replace("..", "_");
    let cleaned = cleaned.trim().trim_start_matches('.');
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Guess a media type from a file name extension.
pub fn mime_from_path(path: &str) -> Option<&'static str> {
    let (_, ext) = path.rsplit_once('.')?;
    let mime = match ext.to_lowercase().as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "dcm" | "dicom" => "application/dicom",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime)
}
