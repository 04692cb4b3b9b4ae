//! Turns an HTTP 200 response into PDF bytes.
//!
//! The API answers in one of three shapes: a raw PDF body, a JSON object
//! `{"pdf": "<base64>"}`, or a JSON array whose first element is such an
//! object. The base64 string may carry a `data:application/pdf;base64,` prefix.

use crate::utils::error::Result;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_json::{Map, Value};

pub const PDF_SIGNATURE: &[u8] = b"%PDF";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
pub const DATA_URL_PREFIX: &str = "data:application/pdf;base64,";
const PDF_FIELD: &str = "pdf";

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Where the `pdf` field is expected to live, decided before any lookup.
#[derive(Clone, Copy)]
enum JsonShape<'a> {
    Object(&'a Map<String, Value>),
    FirstOfList(&'a Map<String, Value>),
    Unrecognized,
}

impl<'a> JsonShape<'a> {
    fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => JsonShape::Object(map),
            Value::Array(items) => match items.first() {
                Some(Value::Object(map)) => JsonShape::FirstOfList(map),
                _ => JsonShape::Unrecognized,
            },
            _ => JsonShape::Unrecognized,
        }
    }

    fn pdf_field(self) -> Option<&'a Value> {
        match self {
            JsonShape::Object(map) | JsonShape::FirstOfList(map) => map.get(PDF_FIELD),
            JsonShape::Unrecognized => None,
        }
    }
}

pub fn is_pdf_response(content_type: Option<&str>, body: &[u8]) -> bool {
    let declared = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/pdf"))
        .unwrap_or(false);
    declared || body.starts_with(PDF_SIGNATURE)
}

/// Returns `Ok(None)` when the body matches none of the recognized shapes.
/// Only a base64 string that neither decoder accepts is an error.
pub fn extract_pdf_bytes(content_type: Option<&str>, body: &[u8]) -> Result<Option<Vec<u8>>> {
    if is_pdf_response(content_type, body) {
        return Ok(Some(body.to_vec()));
    }

    // servers sometimes prefix JSON with a UTF-8 BOM
    let json = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    let data: Value = match serde_json::from_slice(json) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!("Response body is not JSON: {}", e);
            return Ok(None);
        }
    };

    let encoded = match JsonShape::classify(&data).pdf_field() {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    decode_base64(strip_data_url(encoded)).map(Some)
}

fn strip_data_url(field: &str) -> &str {
    let field = field.trim();
    field.strip_prefix(DATA_URL_PREFIX).unwrap_or(field).trim()
}

/// Strict standard base64 first, then a permissive pass over the
/// alphabet characters only.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    match STANDARD.decode(encoded) {
        Ok(bytes) => Ok(bytes),
        Err(strict_err) => {
            tracing::debug!("Strict base64 decode failed ({}), retrying leniently", strict_err);
            let cleaned: String = encoded
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '+' || *c == '/')
                .collect();
            Ok(LENIENT.decode(cleaned)?)
        }
    }
}

/// Diagnostic text for a response that yielded no PDF.
pub fn body_snippet(body: &[u8]) -> String {
    match std::str::from_utf8(body) {
        Ok(text) if !text.is_empty() => text.chars().take(500).collect(),
        _ => {
            let head = &body[..body.len().min(200)];
            format!("b\"{}\"", head.escape_ascii())
        }
    }
}
