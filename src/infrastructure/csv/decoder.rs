// ============================================================
// TEXT DECODER
// ============================================================
// Strict byte-to-text decoding for the supported source encodings

use encoding_rs::{EUC_KR, UTF_8};
use std::borrow::Cow;

use crate::domain::dataset::SourceEncoding;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode `bytes` with `encoding`, or `None` on any malformed sequence.
///
/// Plain UTF-8 refuses a leading byte-order mark, which is left to the
/// signature-aware attempt. CP949 and EUC-KR share the WHATWG EUC-KR decoder,
/// which covers the Windows-949 extensions.
pub fn decode(bytes: &[u8], encoding: SourceEncoding) -> Option<Cow<'_, str>> {
    match encoding {
        SourceEncoding::Utf8 => {
            if bytes.starts_with(UTF8_BOM) {
                return None;
            }
            UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
        }
        SourceEncoding::Utf8Sig => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            UTF_8.decode_without_bom_handling_and_without_replacement(body)
        }
        SourceEncoding::Cp949 | SourceEncoding::EucKr => {
            EUC_KR.decode_without_bom_handling_and_without_replacement(bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_refuses_bom_and_sig_strips_it() {
        let bytes = b"\xEF\xBB\xBFname,val\n";
        assert!(decode(bytes, SourceEncoding::Utf8).is_none());
        assert_eq!(
            decode(bytes, SourceEncoding::Utf8Sig).as_deref(),
            Some("name,val\n")
        );
    }

    #[test]
    fn test_euc_kr_bytes_fail_utf8() {
        let (bytes, _, had_errors) = EUC_KR.encode("종목명,평가액\n삼성전자,100\n");
        assert!(!had_errors);

        assert!(decode(&bytes, SourceEncoding::Utf8).is_none());
        assert!(decode(&bytes, SourceEncoding::Utf8Sig).is_none());
        assert_eq!(
            decode(&bytes, SourceEncoding::Cp949).as_deref(),
            Some("종목명,평가액\n삼성전자,100\n")
        );
    }

    #[test]
    fn test_plain_utf8() {
        let text = "종목명,평가액\n";
        assert_eq!(
            decode(text.as_bytes(), SourceEncoding::Utf8).as_deref(),
            Some(text)
        );
    }
}
