use encoding_rs::{EUC_JP, Encoding, ISO_2022_JP, SHIFT_JIS, UTF_8, UTF_16BE, UTF_16LE};
use log::debug;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
    #[error("unsupported encoding name: {0}")]
    Unsupported(String),

    #[error("could not decode input as {0}")]
    Decode(&'static str),
}

/// Result of a successful resolution. `lossy` is set when no decoder accepted
/// the bytes and they were forced through as UTF-8.
#[derive(Debug, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: &'static str,
    pub lossy: bool,
}

// Trial order for undeclared input. A hit is a guess: ambiguous byte
// sequences may decode cleanly under the wrong codec.
fn fallback_encodings() -> [&'static Encoding; 5] {
    [SHIFT_JIS, EUC_JP, ISO_2022_JP, UTF_16LE, UTF_16BE]
}

pub fn encoding_for_name(name: &str) -> Result<&'static Encoding, EncodingError> {
    match name.trim().to_lowercase().as_str() {
        "shift-jis" | "shift_jis" | "shiftjis" | "sjis" => Ok(SHIFT_JIS),
        "euc-jp" | "eucjp" => Ok(EUC_JP),
        "iso-2022-jp" | "iso2022jp" => Ok(ISO_2022_JP),
        "utf-16le" | "utf16le" => Ok(UTF_16LE),
        "utf-16be" | "utf16be" => Ok(UTF_16BE),
        "utf-8" | "utf8" => Ok(UTF_8),
        _ => Err(EncodingError::Unsupported(name.to_string())),
    }
}

/// Turns raw file bytes into UTF-8 text.
///
/// With an explicit name the named codec is used and any malformed input is an
/// error. Without one, valid UTF-8 passes through untouched, then each fallback
/// codec is tried in order, and as a last resort the bytes are converted lossily.
pub fn resolve(bytes: &[u8], explicit: Option<&str>) -> Result<Decoded, EncodingError> {
    if let Some(name) = explicit {
        let encoding = encoding_for_name(name)?;
        let text = decode_strict(encoding, bytes).ok_or(EncodingError::Decode(encoding.name()))?;
        return Ok(Decoded {
            text,
            encoding: encoding.name(),
            lossy: false,
        });
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Decoded {
            text: text.to_string(),
            encoding: UTF_8.name(),
            lossy: false,
        });
    }

    for encoding in fallback_encodings() {
        if let Some(text) = decode_strict(encoding, bytes) {
            debug!("Detected {} ({} bytes)", encoding.name(), bytes.len());
            return Ok(Decoded {
                text,
                encoding: encoding.name(),
                lossy: false,
            });
        }
    }

    Ok(Decoded {
        text: String::from_utf8_lossy(bytes).into_owned(),
        encoding: UTF_8.name(),
        lossy: true,
    })
}

fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    let (encoding, body) = if encoding == UTF_16LE || encoding == UTF_16BE {
        match Encoding::for_bom(bytes) {
            Some((bom_encoding, bom_len)) if bom_encoding == UTF_16LE || bom_encoding == UTF_16BE => {
                (bom_encoding, &bytes[bom_len..])
            }
            _ => (encoding, bytes),
        }
    } else {
        (encoding, bytes)
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
}
