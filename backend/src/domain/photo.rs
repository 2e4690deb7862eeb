//! # Pet Photos
//!
//! A stored photo value is one of several things: an embedded image
//! payload (data URL), an absolute URL, a path, a bare filename left over
//! from older versions of the site, the placeholder image, or nothing.
//! [`PetPhoto`] names those cases so the rest of the backend never has to
//! sniff strings again.
//!
//! Uploaded images arrive as data URLs produced by the browser's file
//! reader. [`PhotoReader`] decodes one off the async runtime and yields
//! either a usable payload or a [`PhotoReadError`], exactly once.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::{ASSET_FOLDER, PLACEHOLDER_PHOTO};
use thiserror::Error;
use tracing::debug;

const ABSOLUTE_URL_PREFIXES: [&str; 4] = ["http://", "https://", "//", "blob:"];

/// Largest decoded image accepted for embedding
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetPhoto {
    /// No photo recorded
    Missing,
    /// The site's placeholder image
    Placeholder,
    /// Self-describing image payload ("data:image/...;base64,...")
    Embedded(String),
    /// Absolute URL, used verbatim
    Url(String),
    /// Relative or absolute path, used verbatim
    Path(String),
    /// Filename without any folder, assumed to live in the asset folder
    BareFilename(String),
}

impl PetPhoto {
    /// Classify a stored photo value
    pub fn parse(stored: &str) -> Self {
        if stored.is_empty() {
            PetPhoto::Missing
        } else if stored == PLACEHOLDER_PHOTO {
            PetPhoto::Placeholder
        } else if stored.starts_with("data:") {
            PetPhoto::Embedded(stored.to_string())
        } else if ABSOLUTE_URL_PREFIXES.iter().any(|p| stored.starts_with(p)) {
            PetPhoto::Url(stored.to_string())
        } else if stored.contains('/') || stored.contains('\\') {
            PetPhoto::Path(stored.to_string())
        } else {
            PetPhoto::BareFilename(stored.to_string())
        }
    }

    /// Value written back to storage
    pub fn to_stored(&self) -> String {
        match self {
            PetPhoto::Missing => String::new(),
            PetPhoto::Placeholder => PLACEHOLDER_PHOTO.to_string(),
            PetPhoto::Embedded(value)
            | PetPhoto::Url(value)
            | PetPhoto::Path(value)
            | PetPhoto::BareFilename(value) => value.clone(),
        }
    }

    /// Rewrite a bare filename into a path inside the asset folder.
    /// Every other value passes through unchanged, so applying this twice is
    /// the same as applying it once.
    pub fn migrated(self) -> Self {
        match self {
            PetPhoto::BareFilename(name) => PetPhoto::Path(asset_path(&name)),
            other => other,
        }
    }

    /// Source the page can render directly
    pub fn src(&self) -> String {
        match self {
            PetPhoto::Missing | PetPhoto::Placeholder => PLACEHOLDER_PHOTO.to_string(),
            PetPhoto::BareFilename(name) => asset_path(name),
            PetPhoto::Embedded(value) | PetPhoto::Url(value) | PetPhoto::Path(value) => {
                value.clone()
            }
        }
    }
}

fn asset_path(name: &str) -> String {
    format!("{}/{}", ASSET_FOLDER, name)
}

/// Resolve a stored photo value to a renderable source
pub fn resolve_photo_src(stored: &str) -> String {
    PetPhoto::parse(stored).src()
}

/// Apply the legacy-filename migration to a stored value.
/// Returns the new value only when it differs from the input.
pub fn migrate_photo_value(stored: &str) -> Option<String> {
    match PetPhoto::parse(stored) {
        bare @ PetPhoto::BareFilename(_) => Some(bare.migrated().to_stored()),
        _ => None,
    }
}

/// Decoded image upload, ready to be embedded in a pet record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPayload {
    pub mime_type: String,
    pub byte_len: usize,
    pub data_url: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum PhotoReadError {
    #[error("photo is not a base64 data URL")]
    NotADataUrl,
    #[error("photo has type {0}, expected an image")]
    NotAnImage(String),
    #[error("photo payload is not valid base64: {0}")]
    InvalidEncoding(String),
    #[error("photo is empty")]
    Empty,
    #[error("photo is {0} bytes, larger than the 2 MiB limit")]
    TooLarge(usize),
    #[error("photo read was interrupted")]
    Interrupted,
}

/// Single-shot reader for uploaded photos
pub struct PhotoReader;

impl PhotoReader {
    /// Decode an uploaded data URL on the blocking pool
    pub async fn read(data_url: String) -> Result<PhotoPayload, PhotoReadError> {
        tokio::task::spawn_blocking(move || decode_data_url(&data_url))
            .await
            .map_err(|_| PhotoReadError::Interrupted)?
    }
}

/// Validate a "data:<mime>;base64,<payload>" string
pub fn decode_data_url(data_url: &str) -> Result<PhotoPayload, PhotoReadError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(PhotoReadError::NotADataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(PhotoReadError::NotADataUrl)?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or(PhotoReadError::NotADataUrl)?
        .to_ascii_lowercase();

    if !mime_type.starts_with("image/") {
        return Err(PhotoReadError::NotAnImage(mime_type));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| PhotoReadError::InvalidEncoding(e.to_string()))?;
    if bytes.is_empty() {
        return Err(PhotoReadError::Empty);
    }
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(PhotoReadError::TooLarge(bytes.len()));
    }

    debug!("Decoded {} photo of {} bytes", mime_type, bytes.len());

    Ok(PhotoPayload {
        mime_type,
        byte_len: bytes.len(),
        data_url: data_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bare_filename_uses_asset_folder() {
        assert_eq!(resolve_photo_src("dog.jpg"), "images/dog.jpg");
    }

    #[test]
    fn test_resolve_verbatim_values() {
        assert_eq!(resolve_photo_src("http://x/y.jpg"), "http://x/y.jpg");
        assert_eq!(resolve_photo_src("https://x/y.jpg"), "https://x/y.jpg");
        assert_eq!(resolve_photo_src("uploads/cat.png"), "uploads/cat.png");
        assert_eq!(
            resolve_photo_src("data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_resolve_missing_uses_placeholder() {
        assert_eq!(resolve_photo_src(""), PLACEHOLDER_PHOTO);
        assert_eq!(resolve_photo_src(PLACEHOLDER_PHOTO), PLACEHOLDER_PHOTO);
    }

    #[test]
    fn test_migrate_only_touches_bare_filenames() {
        assert_eq!(migrate_photo_value("dogmyanimals.jpg"), Some("images/dogmyanimals.jpg".to_string()));
        assert_eq!(migrate_photo_value("images/dogmyanimals.jpg"), None);
        assert_eq!(migrate_photo_value("logo.png"), None);
        assert_eq!(migrate_photo_value(""), None);
        assert_eq!(migrate_photo_value("https://x/y.jpg"), None);
        assert_eq!(migrate_photo_value("data:image/png;base64,AAAA"), None);
    }

    #[test]
    fn test_migration_is_idempotent() {
        let once = PetPhoto::parse("fish.jpg").migrated();
        let twice = PetPhoto::parse(&once.to_stored()).migrated();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_decode_valid_image() {
        let payload = decode_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.byte_len, 8);
    }

    #[test]
    fn test_decode_rejects_bad_payloads() {
        assert_eq!(decode_data_url("dog.jpg"), Err(PhotoReadError::NotADataUrl));
        assert_eq!(
            decode_data_url("data:text/plain;base64,aGk="),
            Err(PhotoReadError::NotAnImage("text/plain".to_string()))
        );
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(PhotoReadError::InvalidEncoding(_))
        ));
        assert_eq!(decode_data_url("data:image/png;base64,"), Err(PhotoReadError::Empty));
    }

    #[tokio::test]
    async fn test_reader_yields_payload_once() {
        let result = PhotoReader::read("data:image/gif;base64,R0lGODlh".to_string()).await;
        assert_eq!(result.unwrap().mime_type, "image/gif");
    }
}
