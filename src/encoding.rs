//! Encoding detection and decoding module
//!
//! Reads a whole text file and decodes it to UTF-8, detecting the source
//! encoding from a byte order mark or by sampling the content.

use anyhow::Context;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;

/// Bytes sampled for encoding detection
const SAMPLE_SIZE: usize = 64 * 1024;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f32,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Decoded file content
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub encoding: EncodingInfo,
    /// Size of the raw file in bytes
    pub byte_len: u64,
    /// Whether undecodable bytes were replaced
    pub had_errors: bool,
}

/// Detect the encoding of raw content
pub fn detect_encoding(content: &[u8]) -> EncodingInfo {
    if content.is_empty() {
        return EncodingInfo::default();
    }

    // Check for BOM first
    if let Some(encoding) = detect_bom(content) {
        return EncodingInfo {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        };
    }

    let sample = &content[..content.len().min(SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == content.len());

    let encoding = detector.guess(None, true);

    // Rough confidence: valid UTF-8 content is certain
    let confidence = if encoding == encoding_rs::UTF_8 {
        if std::str::from_utf8(sample).is_ok() {
            1.0
        } else {
            0.5
        }
    } else {
        0.8
    };

    EncodingInfo {
        name: encoding.name(),
        confidence,
        encoding,
    }
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(content).map(|(encoding, _)| encoding)
}

/// Decode raw content, stripping any BOM
pub fn decode(content: &[u8]) -> (String, EncodingInfo, bool) {
    let info = detect_encoding(content);
    let (decoded, _, had_errors) = info.encoding.decode(content);

    if had_errors {
        log::warn!("Encoding errors while decoding as {}, using lossy conversion", info.name);
    }

    (decoded.into_owned(), info, had_errors)
}

/// Read and decode a whole text file
pub fn read_text(path: &Path) -> anyhow::Result<DecodedText> {
    let content = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let (text, encoding, had_errors) = decode(&content);

    log::debug!(
        "Read {:?}: {} bytes as {} (confidence {:.1})",
        path,
        content.len(),
        encoding.name,
        encoding.confidence
    );

    Ok(DecodedText {
        text,
        encoding,
        byte_len: content.len() as u64,
        had_errors,
    })
}
