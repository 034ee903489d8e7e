// Wed Oct 14 2026 - Alex

use crate::extraction::SourceEncoding;
use encoding_rs::{EUC_KR, UTF_16BE, UTF_16LE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub encoding: SourceEncoding,
    pub text: String,
}

/// Decodes one buffer under each configured text encoding. Undecodable
/// sequences become U+FFFD; an encoding that produces nothing usable is
/// simply absent from the result.
#[derive(Debug, Clone)]
pub struct MultiEncodingDecoder {
    encodings: Vec<SourceEncoding>,
}

impl MultiEncodingDecoder {
    pub fn new() -> Self {
        Self {
            encodings: SourceEncoding::TEXT_ENCODINGS.to_vec(),
        }
    }

    pub fn with_encodings(encodings: Vec<SourceEncoding>) -> Self {
        Self { encodings }
    }

    pub fn decode(&self, bytes: &[u8]) -> Vec<DecodedText> {
        self.encodings
            .iter()
            .filter_map(|&encoding| {
                decode_lossy(bytes, encoding).map(|text| DecodedText { encoding, text })
            })
            .collect()
    }
}

impl Default for MultiEncodingDecoder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn decode_lossy(bytes: &[u8], encoding: SourceEncoding) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let text = match encoding {
        SourceEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        // BOM sniffing; little-endian when there is none.
        SourceEncoding::Utf16 => UTF_16LE.decode(bytes).0.into_owned(),
        SourceEncoding::Cp949 => EUC_KR.decode_without_bom_handling(bytes).0.into_owned(),
        SourceEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        SourceEncoding::Binary => {
            log::debug!("BINARY is not a text encoding; skipping");
            return None;
        }
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Decodes a previously written report: the first encoding that decodes
/// without errors wins, Latin-1 being the catch-all.
pub fn decode_report(bytes: &[u8]) -> (String, SourceEncoding) {
    if let Ok(text) = std::str::from_utf8(bytes) {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        return (text.to_string(), SourceEncoding::Utf8);
    }

    if bytes.starts_with(&[0xFF, 0xFE]) {
        if let Some(text) = UTF_16LE.decode_without_bom_handling_and_without_replacement(&bytes[2..]) {
            return (text.into_owned(), SourceEncoding::Utf16);
        }
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        if let Some(text) = UTF_16BE.decode_without_bom_handling_and_without_replacement(&bytes[2..]) {
            return (text.into_owned(), SourceEncoding::Utf16);
        }
    }

    if let Some(text) = EUC_KR.decode_without_bom_handling_and_without_replacement(bytes) {
        return (text.into_owned(), SourceEncoding::Cp949);
    }

    (bytes.iter().map(|&b| b as char).collect(), SourceEncoding::Latin1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_produces_one_stream_per_encoding() {
        let decoded = MultiEncodingDecoder::new().decode(b"SELECT * FROM PERSON");
        let encodings: Vec<_> = decoded.iter().map(|d| d.encoding).collect();
        assert_eq!(encodings, SourceEncoding::TEXT_ENCODINGS.to_vec());
        assert_eq!(decoded[0].text, "SELECT * FROM PERSON");
        assert_eq!(decoded[3].text, "SELECT * FROM PERSON");
    }

    #[test]
    fn test_empty_buffer_yields_nothing() {
        assert!(MultiEncodingDecoder::new().decode(b"").is_empty());
    }

    #[test]
    fn test_invalid_bytes_are_replaced_not_fatal() {
        let text = decode_lossy(&[b'S', 0xFF, b'Q'], SourceEncoding::Utf8).unwrap();
        assert_eq!(text, "S\u{fffd}Q");
    }

    #[test]
    fn test_utf16_little_endian() {
        let bytes: Vec<u8> = "UPDATE PERSON".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        assert_eq!(decode_lossy(&bytes, SourceEncoding::Utf16).unwrap(), "UPDATE PERSON");
    }

    #[test]
    fn test_cp949_hangul() {
        // "수진자" in CP949
        let bytes = [0xBC, 0xF6, 0xC1, 0xF8, 0xC0, 0xDA];
        assert_eq!(decode_lossy(&bytes, SourceEncoding::Cp949).unwrap(), "수진자");
    }

    #[test]
    fn test_binary_is_not_decoded() {
        let decoder = MultiEncodingDecoder::with_encodings(vec![SourceEncoding::Binary]);
        assert!(decoder.decode(b"SELECT").is_empty());
    }

    #[test]
    fn test_decode_report_falls_back() {
        assert_eq!(decode_report("[쿼리 #1]".as_bytes()).1, SourceEncoding::Utf8);
        assert_eq!(decode_report(&[0xBC, 0xF6]).1, SourceEncoding::Cp949);
        let (text, encoding) = decode_report(&[0x80, 0xFF]);
        assert_eq!(encoding, SourceEncoding::Latin1);
        assert_eq!(text.chars().count(), 2);
    }
}
