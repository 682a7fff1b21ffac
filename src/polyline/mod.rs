//! Precision-5 encoded polyline decoding and encoding
//!
//! Values alternate latitude, longitude. The first pair is absolute, every
//! later pair is a delta from the previous point, all scaled by 1e5.

pub mod lexer;

use logos::Logos;

use crate::error::{DecodeError, Span};
use crate::projection::GeoPoint;

use lexer::{is_continuation, LexError, Token};

/// Coordinates are stored as integers in units of 1e-5 degrees
const PRECISION: f64 = 1e5;

/// Decode a polyline into points, in encoded order
///
/// # Example
///
/// ```rust
/// use route_sketch::polyline::decode;
///
/// let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert_eq!(points[0].latitude, 38.5);
/// assert_eq!(points[0].longitude, -120.2);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, DecodeError> {
    let mut points = Vec::new();
    let mut lat = 0i64;
    let mut lng = 0i64;
    let mut pending: Option<(i64, Span)> = None;

    for (token, span) in Token::lexer(encoded).spanned() {
        let value = match token {
            Ok(Token::Value(v)) => v,
            Err(LexError::Overflow) => return Err(DecodeError::Overflow { span }),
            Err(LexError::Unrecognized) => return Err(classify(encoded, span.start)),
        };

        match pending.take() {
            None => pending = Some((value, span)),
            Some((dlat, _)) => {
                lat += dlat;
                lng += value;
                points.push(GeoPoint::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
            }
        }
    }

    if let Some((_, span)) = pending {
        return Err(DecodeError::UnpairedValue { span });
    }

    Ok(points)
}

/// Encode points as a polyline, rounding to 1e-5 degrees
pub fn encode(points: &[GeoPoint]) -> String {
    let mut out = String::new();
    let mut prev = (0i64, 0i64);

    for p in points {
        let lat = (p.latitude * PRECISION).round() as i64;
        let lng = (p.longitude * PRECISION).round() as i64;
        encode_value(lat - prev.0, &mut out);
        encode_value(lng - prev.1, &mut out);
        prev = (lat, lng);
    }

    out
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push(char::from(((0x20 | (v & 0x1F)) + 63) as u8));
        v >>= 5;
    }
    out.push(char::from((v + 63) as u8));
}

/// Work out why the lexer stopped at `start`
///
/// Continuation chunks running into the end of input mean the last value
/// was cut short; otherwise the first byte that is not a continuation chunk
/// is the culprit.
fn classify(source: &str, start: usize) -> DecodeError {
    let bytes = source.as_bytes();
    let mut pos = start;
    while pos < bytes.len() && is_continuation(bytes[pos]) {
        pos += 1;
    }

    if pos == bytes.len() {
        return DecodeError::Truncated { span: start..pos };
    }

    let found = source
        .get(pos..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    DecodeError::UnexpectedCharacter {
        found,
        span: pos..pos + found.len_utf8(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    #[test]
    fn test_decode_reference_polyline() {
        let points = decode(SAMPLE).unwrap();
        assert_eq!(
            points,
            vec![
                GeoPoint::new(38.5, -120.2),
                GeoPoint::new(40.7, -120.95),
                GeoPoint::new(43.252, -126.453),
            ]
        );
    }

    #[test]
    fn test_encode_reference_points() {
        let points = [
            GeoPoint::new(38.5, -120.2),
            GeoPoint::new(40.7, -120.95),
            GeoPoint::new(43.252, -126.453),
        ];
        assert_eq!(encode(&points), SAMPLE);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode(""), Ok(vec![]));
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_repeated_point_encodes_zero_delta() {
        let p = GeoPoint::new(0.001, 0.001);
        assert_eq!(encode(&[p, p]), "gEgE??");
        assert_eq!(decode("gEgE??").unwrap(), vec![p, p]);
    }

    #[test]
    fn test_unpaired_latitude() {
        assert_eq!(
            decode("_p~iF~ps|U_ulL"),
            Err(DecodeError::UnpairedValue { span: 10..14 })
        );
    }

    #[test]
    fn test_truncated_value() {
        assert_eq!(
            decode("_p~iF~ps|"),
            Err(DecodeError::Truncated { span: 5..9 })
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            decode("_p~iF ~ps|U"),
            Err(DecodeError::UnexpectedCharacter {
                found: ' ',
                span: 5..6
            })
        );
    }

    #[test]
    fn test_unexpected_multibyte_character() {
        assert_eq!(
            decode("é"),
            Err(DecodeError::UnexpectedCharacter {
                found: 'é',
                span: 0..2
            })
        );
    }

    #[test]
    fn test_oversized_value() {
        assert_eq!(
            decode("~~~~~~~??"),
            Err(DecodeError::Overflow { span: 0..8 })
        );
    }
}
