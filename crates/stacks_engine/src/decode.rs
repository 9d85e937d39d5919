use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// The input started with a byte order mark, which is not part of `html`.
    pub byte_order_mark: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset -> chardetng guess.
///
/// Used for fetched pages and for the bookmarks file read from disk, which has
/// no Content-Type and relies on the BOM or detection.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding).map(|decoded| DecodedHtml {
            byte_order_mark: true,
            ..decoded
        });
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedHtml, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "malformed byte sequence".into(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
        byte_order_mark: false,
    })
}
