//! MIME type inference.
//!
//! Three sources, tried by the inspector in this order:
//! - the `data:<mime>;base64,` prefix of a data URI
//! - magic-byte signatures at the start of the decoded content
//! - the filename extension, for text formats that carry no signature

use std::collections::HashMap;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATA_URI: Regex = Regex::new(
        r"(?i)^data:([a-z0-9][a-z0-9!#_.+-]*/[a-z0-9][a-z0-9!#_.+-]*)(?:;[a-z0-9_.+-]+=[^;,]*)*;base64,"
    )
    .unwrap();
}

/// A base64 string split into its data-URI MIME type and payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUri<'a> {
    /// MIME type from the prefix, if the string had one
    pub mime_type: Option<&'a str>,
    /// The base64 payload with any prefix removed
    pub payload: &'a str,
}

impl<'a> DataUri<'a> {
    /// Split off a `data:<mime>[;param=value]*;base64,` prefix.
    pub fn split(input: &'a str) -> Self {
        let trimmed = input.trim_start();
        match DATA_URI.captures(trimmed) {
            Some(caps) => {
                let prefix_len = caps.get(0).map_or(0, |m| m.end());
                Self {
                    mime_type: caps.get(1).map(|m| m.as_str()),
                    payload: &trimmed[prefix_len..],
                }
            }
            None => Self {
                mime_type: None,
                payload: input,
            },
        }
    }
}

/// A fixed-offset byte signature.
struct Signature {
    offset: usize,
    magic: &'static [u8],
    mime: &'static str,
}

const fn sig(offset: usize, magic: &'static [u8], mime: &'static str) -> Signature {
    Signature { offset, magic, mime }
}

/// Simple signatures, most specific first.
const SIGNATURES: &[Signature] = &[
    // Images
    sig(0, b"\x89PNG\r\n\x1a\n", "image/png"),
    sig(0, b"\xff\xd8\xff", "image/jpeg"),
    sig(0, b"GIF87a", "image/gif"),
    sig(0, b"GIF89a", "image/gif"),
    sig(0, b"BM", "image/bmp"),
    sig(0, b"\x00\x00\x01\x00", "image/x-icon"),
    sig(0, b"II*\x00", "image/tiff"),
    sig(0, b"MM\x00*", "image/tiff"),
    sig(0, b"8BPS", "image/vnd.adobe.photoshop"),
    // Documents
    sig(0, b"%PDF-", "application/pdf"),
    sig(0, b"{\\rtf", "application/rtf"),
    sig(0, b"SQLite format 3\x00", "application/x-sqlite3"),
    // Archives
    sig(0, b"PK\x03\x04", "application/zip"),
    sig(0, b"PK\x05\x06", "application/zip"),
    sig(0, b"\x1f\x8b", "application/gzip"),
    sig(0, b"BZh", "application/x-bzip2"),
    sig(0, b"\xfd7zXZ\x00", "application/x-xz"),
    sig(0, b"7z\xbc\xaf\x27\x1c", "application/x-7z-compressed"),
    sig(0, b"Rar!\x1a\x07", "application/x-rar-compressed"),
    sig(257, b"ustar", "application/x-tar"),
    // Audio and video
    sig(0, b"ID3", "audio/mpeg"),
    sig(0, b"OggS", "audio/ogg"),
    sig(0, b"fLaC", "audio/x-flac"),
    sig(0, b"MThd", "audio/midi"),
    sig(0, b"\x1a\x45\xdf\xa3", "video/x-matroska"),
    // Executables
    sig(0, b"\x00asm", "application/wasm"),
    sig(0, b"\x7fELF", "application/x-elf"),
    // Fonts
    sig(0, b"wOFF", "font/woff"),
    sig(0, b"wOF2", "font/woff2"),
    sig(0, b"OTTO", "font/otf"),
    sig(0, b"\x00\x01\x00\x00\x00", "font/ttf"),
];

/// Detect a MIME type from magic bytes.
///
/// Returns `None` for content with no known signature, which includes
/// every plain-text format.
pub fn sniff(bytes: &[u8]) -> Option<&'static str> {
    if let Some(mime) = sniff_riff(bytes).or_else(|| sniff_ftyp(bytes)) {
        return Some(mime);
    }

    SIGNATURES
        .iter()
        .find(|s| {
            bytes
                .get(s.offset..s.offset + s.magic.len())
                .map_or(false, |window| window == s.magic)
        })
        .map(|s| s.mime)
}

/// RIFF containers: `RIFF....<form>`.
fn sniff_riff(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" {
        return None;
    }
    match &bytes[8..12] {
        b"WEBP" => Some("image/webp"),
        b"WAVE" => Some("audio/wav"),
        b"AVI " => Some("video/vnd.avi"),
        _ => None,
    }
}

/// ISO base media files: `....ftyp<brand>`.
fn sniff_ftyp(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 12 || &bytes[4..8] != b"ftyp" {
        return None;
    }
    let mime = match &bytes[8..12] {
        b"avif" | b"avis" => "image/avif",
        b"heic" | b"heix" | b"mif1" => "image/heic",
        b"qt  " => "video/quicktime",
        b"M4A " => "audio/x-m4a",
        b"3gp4" | b"3gp5" => "video/3gpp",
        _ => "video/mp4",
    };
    Some(mime)
}

/// Extension to MIME type lookup for formats without a signature.
pub struct ExtensionMimeMap {
    extension_map: HashMap<String, &'static str>,
}

impl Default for ExtensionMimeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionMimeMap {
    /// Create a map with the default text-format mappings.
    pub fn new() -> Self {
        let mut extension_map = HashMap::new();

        for ext in &[".txt", ".text"] {
            extension_map.insert(ext.to_string(), "text/plain");
        }
        for ext in &[".js", ".mjs"] {
            extension_map.insert(ext.to_string(), "application/javascript");
        }
        for ext in &[".html", ".htm"] {
            extension_map.insert(ext.to_string(), "text/html");
        }
        extension_map.insert(".css".to_string(), "text/css");
        extension_map.insert(".json".to_string(), "application/json");
        extension_map.insert(".csv".to_string(), "text/csv");
        extension_map.insert(".md".to_string(), "text/markdown");
        extension_map.insert(".xml".to_string(), "application/xml");
        extension_map.insert(".svg".to_string(), "image/svg+xml");

        Self { extension_map }
    }

    /// Look up the MIME type for a filename by its extension.
    pub fn lookup(&self, filename: &str) -> Option<&'static str> {
        let extension = Path::new(filename.trim())
            .extension()
            .and_then(|e| e.to_str())?;
        let ext_key = format!(".{}", extension.to_lowercase());
        self.extension_map.get(&ext_key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_split() {
        let uri = DataUri::split("data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(uri.mime_type, Some("image/png"));
        assert_eq!(uri.payload, "iVBORw0KGgo=");

        let with_params = DataUri::split("data:text/plain;charset=utf-8;base64,aGk=");
        assert_eq!(with_params.mime_type, Some("text/plain"));
        assert_eq!(with_params.payload, "aGk=");

        let plain = DataUri::split("aGVsbG8=");
        assert_eq!(plain.mime_type, None);
        assert_eq!(plain.payload, "aGVsbG8=");
    }

    #[test]
    fn test_data_uri_requires_base64_marker() {
        let uri = DataUri::split("data:text/plain,hello");
        assert_eq!(uri.mime_type, None);
        assert_eq!(uri.payload, "data:text/plain,hello");
    }

    #[test]
    fn test_sniff_images() {
        assert_eq!(sniff(b"\x89PNG\r\n\x1a\n\x00\x00"), Some("image/png"));
        assert_eq!(sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff(b"GIF89a..."), Some("image/gif"));
        assert_eq!(sniff(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
    }

    #[test]
    fn test_sniff_containers() {
        assert_eq!(sniff(b"RIFF\x24\x00\x00\x00WAVEfmt "), Some("audio/wav"));
        assert_eq!(sniff(b"\x00\x00\x00\x18ftypmp42"), Some("video/mp4"));
        assert_eq!(sniff(b"\x00\x00\x00\x1cftypavif"), Some("image/avif"));
        assert_eq!(sniff(b"%PDF-1.7\n"), Some("application/pdf"));
        assert_eq!(sniff(b"PK\x03\x04\x14\x00"), Some("application/zip"));

        let mut tar = vec![0u8; 512];
        tar[257..262].copy_from_slice(b"ustar");
        assert_eq!(sniff(&tar), Some("application/x-tar"));
    }

    #[test]
    fn test_sniff_text_and_short_input() {
        assert_eq!(sniff(b"hello world"), None);
        assert_eq!(sniff(b"{\"a\": 1}"), None);
        assert_eq!(sniff(b""), None);
        assert_eq!(sniff(b"\x89P"), None);
    }

    #[test]
    fn test_extension_lookup() {
        let map = ExtensionMimeMap::new();
        assert_eq!(map.lookup("notes.txt"), Some("text/plain"));
        assert_eq!(map.lookup("app.js"), Some("application/javascript"));
        assert_eq!(map.lookup("index.HTML"), Some("text/html"));
        assert_eq!(map.lookup("style.css"), Some("text/css"));
        assert_eq!(map.lookup("data.json"), Some("application/json"));
        assert_eq!(map.lookup("archive.tar.gz"), None);
        assert_eq!(map.lookup("unknown_file"), None);
        assert_eq!(map.lookup(""), None);
    }
}
