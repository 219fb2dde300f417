//! Best-effort decoders for values of unknown encoding.
//!
//! Each function either succeeds with text or reports a [`DecodeError`];
//! the `*_best_effort` entry points decide what to fall back to.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use percent_encoding::percent_decode_str;

use crate::error::DecodeError;

/// Percent-decode `input`, rejecting malformed escapes and non-UTF-8 output.
///
/// # Examples
///
/// ```
/// use urlinspect::percent_decode_strict;
///
/// assert_eq!(percent_decode_strict("a%20b").unwrap(), "a b");
/// assert!(percent_decode_strict("100%").is_err());
/// ```
pub fn percent_decode_strict(input: &str) -> Result<String, DecodeError> {
    let bytes = input.as_bytes();
    let mut start = 0;

    while let Some(offset) = bytes[start..].iter().position(|&b| b == b'%') {
        let position = start + offset;
        let well_formed = bytes
            .get(position + 1..position + 3)
            .map_or(false, |hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(DecodeError::MalformedEscape { position });
        }
        start = position + 3;
    }

    Ok(percent_decode_str(input).decode_utf8()?.into_owned())
}

/// Decode `input` as form data: `+` becomes a space, then percent escapes
/// are decoded. Malformed escapes are kept literally.
///
/// # Examples
///
/// ```
/// use urlinspect::plus_decode;
///
/// assert_eq!(plus_decode("a+b%21").unwrap(), "a b!");
/// assert_eq!(plus_decode("50%+off").unwrap(), "50% off");
/// ```
pub fn plus_decode(input: &str) -> Result<String, DecodeError> {
    let spaced = input.replace('+', " ");
    Ok(percent_decode_str(&spaced).decode_utf8()?.into_owned())
}

/// Unquote a percent-encoded value without ever failing.
///
/// Tries strict percent-decoding first, then `+`-aware decoding, then keeps
/// the input. The chosen text always gets one more lenient percent-decoding
/// pass, so values that were encoded twice come out readable. That pass keeps
/// malformed escapes literally and is skipped only on non-UTF-8 output.
///
/// # Examples
///
/// ```
/// use urlinspect::unquote_best_effort;
///
/// assert_eq!(unquote_best_effort("hello%20world"), "hello world");
/// assert_eq!(unquote_best_effort("%2541"), "A");
/// assert_eq!(unquote_best_effort("a+b%zz"), "a b%zz");
/// ```
pub fn unquote_best_effort(input: &str) -> String {
    let first = match percent_decode_strict(input) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::debug!(%err, "strict unquote failed, retrying with '+' as space");
            plus_decode(input).unwrap_or_else(|err| {
                tracing::debug!(%err, "unquote failed, keeping value as-is");
                input.to_string()
            })
        }
    };

    match percent_decode_str(&first).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => first,
    }
}

/// Decode standard padded base64 into UTF-8 text.
///
/// Unpadded or otherwise malformed input is an error; no repair is attempted.
///
/// # Examples
///
/// ```
/// use urlinspect::decode_base64_best_effort;
///
/// assert_eq!(decode_base64_best_effort("aGVsbG8=").unwrap(), "hello");
/// assert!(decode_base64_best_effort("aGVsbG8").is_err());
/// assert!(decode_base64_best_effort("not-base64!!").is_err());
/// ```
pub fn decode_base64_best_effort(input: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD.decode(input)?;
    Ok(String::from_utf8(bytes)?)
}
