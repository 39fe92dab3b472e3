//! Data URI encoding for uploaded bio images

use std::path::Path;

use base64::Engine;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Encode `bytes` as a `data:<mime>;base64,<payload>` URI
///
/// The MIME type is guessed from the file extension of `path`, falling back
/// to `application/octet-stream`.
pub fn encode(path: &Path, bytes: &[u8]) -> String {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("{DATA_PREFIX}{}{BASE64_MARKER}{payload}", mime.essence_str())
}

/// Read a file and encode it as a data URI
pub async fn read_file(path: &Path) -> std::io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(encode(path, &bytes))
}

/// MIME type of a data URI, if `value` is one
pub fn mime_of(value: &str) -> Option<&str> {
    let rest = value.strip_prefix(DATA_PREFIX)?;
    let end = rest.find([';', ','])?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png() {
        let uri = encode(Path::new("logo.png"), b"\x89PNG");
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        let uri = encode(Path::new("blob"), b"hi");
        assert_eq!(uri, "data:application/octet-stream;base64,aGk=");
    }

    #[test]
    fn test_mime_of() {
        assert_eq!(mime_of("data:image/jpeg;base64,AAAA"), Some("image/jpeg"));
        assert_eq!(mime_of("plain bio text"), None);
    }

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bio.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let uri = read_file(&path).await.unwrap();
        assert!(uri.starts_with("data:image/gif;base64,"));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_file(&dir.path().join("missing.png")).await.is_err());
    }
}
