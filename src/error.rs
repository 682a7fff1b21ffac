//! Error types for polyline decoding

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("unexpected character {found:?} in polyline at {span:?}")]
    UnexpectedCharacter { found: char, span: Span },

    #[error("polyline ends in the middle of a value at {span:?}")]
    Truncated { span: Span },

    #[error("latitude at {span:?} has no matching longitude")]
    UnpairedValue { span: Span },

    #[error("value at {span:?} is too long for a coordinate")]
    Overflow { span: Span },
}

impl DecodeError {
    /// Location of the problem in the encoded string
    pub fn span(&self) -> &Span {
        match self {
            DecodeError::UnexpectedCharacter { span, .. }
            | DecodeError::Truncated { span }
            | DecodeError::UnpairedValue { span }
            | DecodeError::Overflow { span } => span,
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            DecodeError::UnexpectedCharacter { .. } => {
                "polylines only contain characters from '?' to '~'"
            }
            DecodeError::Truncated { .. } => "this value is missing its final chunk",
            DecodeError::UnpairedValue { .. } => "points need both a latitude and a longitude",
            DecodeError::Overflow { .. } => "values are at most seven characters long",
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let span = self.span().clone();

        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.hint())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
