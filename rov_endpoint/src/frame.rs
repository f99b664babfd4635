//! Command frame parser.
//!
//! A frame is one text line of [`FRAME_FIELDS`] decimal numbers joined by
//! [`FRAME_DELIMITER`]:
//!
//! ```text
//! longitudinal||lateral||pitch||zoom_out||zoom_in||descend||ascend||shutter
//! ```
//!
//! Parsing happens in two steps so each failure class is reported
//! separately:
//! 1. [`parse_fields`] splits the text into a [`RawFrame`] of numbers
//!    (`FrameError::MalformedFrame` on wrong field count or non-numeric text)
//! 2. [`CommandFrame::try_from`] checks every value against its field domain
//!    (`FrameError::InvalidAxisValue`)

use rov_common::consts::{FRAME_DELIMITER, FRAME_FIELDS};
use std::fmt;
use thiserror::Error;

/// Frame decoding errors. Both classes reject the whole frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// Wrong field count, non-numeric field or non-UTF-8 payload.
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// Numeric value outside the field's domain.
    #[error("Invalid value {value} for field '{field}'")]
    InvalidAxisValue {
        /// Offending field.
        field: FrameField,
        /// Received value.
        value: f64,
    },
}

/// Value domain of a frame field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDomain {
    /// −1, 0 or 1.
    TriState,
    /// 0 or 1.
    Flag,
}

/// Named frame field, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameField {
    /// Forward (−1) / stop (0) / backward (1).
    Longitudinal,
    /// Right (−1) / neutral (0) / left (1).
    Lateral,
    /// Pitch down (−1) / neutral (0) / pitch up (1).
    Pitch,
    /// Zoom out request.
    ZoomOut,
    /// Zoom in request.
    ZoomIn,
    /// Descend request.
    Descend,
    /// Ascend request.
    Ascend,
    /// Shutter request.
    Shutter,
}

impl FrameField {
    /// All fields in wire order.
    pub const ALL: [FrameField; FRAME_FIELDS] = [
        FrameField::Longitudinal,
        FrameField::Lateral,
        FrameField::Pitch,
        FrameField::ZoomOut,
        FrameField::ZoomIn,
        FrameField::Descend,
        FrameField::Ascend,
        FrameField::Shutter,
    ];

    /// Position of the field on the wire.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            FrameField::Longitudinal => 0,
            FrameField::Lateral => 1,
            FrameField::Pitch => 2,
            FrameField::ZoomOut => 3,
            FrameField::ZoomIn => 4,
            FrameField::Descend => 5,
            FrameField::Ascend => 6,
            FrameField::Shutter => 7,
        }
    }

    /// Field name used in logs and errors.
    pub const fn name(self) -> &'static str {
        match self {
            FrameField::Longitudinal => "longitudinal",
            FrameField::Lateral => "lateral",
            FrameField::Pitch => "pitch",
            FrameField::ZoomOut => "zoom_out",
            FrameField::ZoomIn => "zoom_in",
            FrameField::Descend => "descend",
            FrameField::Ascend => "ascend",
            FrameField::Shutter => "shutter",
        }
    }

    /// Accepted values of the field.
    pub const fn domain(self) -> FieldDomain {
        match self {
            FrameField::Longitudinal | FrameField::Lateral | FrameField::Pitch => {
                FieldDomain::TriState
            }
            _ => FieldDomain::Flag,
        }
    }
}

impl fmt::Display for FrameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Three-position axis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tri {
    /// Wire value −1.
    Negative,
    /// Wire value 0.
    #[default]
    Neutral,
    /// Wire value 1.
    Positive,
}

impl Tri {
    /// Decode an exact −1/0/1 value.
    pub fn from_value(value: f64) -> Option<Self> {
        if value == -1.0 {
            Some(Tri::Negative)
        } else if value == 0.0 {
            Some(Tri::Neutral)
        } else if value == 1.0 {
            Some(Tri::Positive)
        } else {
            None
        }
    }

    /// Wire value.
    #[inline]
    pub const fn value(self) -> i8 {
        match self {
            Tri::Negative => -1,
            Tri::Neutral => 0,
            Tri::Positive => 1,
        }
    }
}

fn flag_from_value(value: f64) -> Option<bool> {
    if value == 0.0 {
        Some(false)
    } else if value == 1.0 {
        Some(true)
    } else {
        None
    }
}

/// Ordered numeric field values of one frame, before domain checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFrame([f64; FRAME_FIELDS]);

impl RawFrame {
    /// Field values in wire order.
    #[inline]
    pub fn values(&self) -> &[f64; FRAME_FIELDS] {
        &self.0
    }

    /// Value of one field.
    #[inline]
    pub fn get(&self, field: FrameField) -> f64 {
        self.0[field.index()]
    }
}

/// Split one text frame into its numeric fields.
///
/// Surrounding ASCII whitespace of each field is ignored, so a trailing
/// newline from a line-oriented client is accepted.
///
/// # Errors
/// `FrameError::MalformedFrame` if the field count is not [`FRAME_FIELDS`]
/// or a field is not a number.
pub fn parse_fields(text: &str) -> Result<RawFrame, FrameError> {
    let fields: Vec<&str> = text.split(FRAME_DELIMITER).collect();
    if fields.len() != FRAME_FIELDS {
        return Err(FrameError::MalformedFrame(format!(
            "expected {} fields, got {}",
            FRAME_FIELDS,
            fields.len()
        )));
    }

    let mut values = [0.0; FRAME_FIELDS];
    for (idx, field) in fields.iter().enumerate() {
        let field = field.trim();
        values[idx] = field.parse::<f64>().map_err(|_| {
            FrameError::MalformedFrame(format!(
                "field {} ({}) is not a number: {:?}",
                idx,
                FrameField::ALL[idx],
                field
            ))
        })?;
    }
    Ok(RawFrame(values))
}

/// Decode a received payload into a typed command frame.
///
/// # Errors
/// `FrameError::MalformedFrame` for non-UTF-8 payloads and field-level
/// syntax errors, `FrameError::InvalidAxisValue` for out-of-domain values.
pub fn parse_frame(payload: &[u8]) -> Result<CommandFrame, FrameError> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| FrameError::MalformedFrame(format!("payload is not UTF-8: {e}")))?;
    CommandFrame::try_from(parse_fields(text)?)
}

/// Typed command vector of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommandFrame {
    /// Forward (`Negative`) / stop / backward (`Positive`).
    pub longitudinal: Tri,
    /// Right (`Negative`) / neutral / left (`Positive`).
    pub lateral: Tri,
    /// Pitch down (`Negative`) / neutral / pitch up (`Positive`).
    pub pitch: Tri,
    /// Zoom out held.
    pub zoom_out: bool,
    /// Zoom in held.
    pub zoom_in: bool,
    /// Descend held.
    pub descend: bool,
    /// Ascend held.
    pub ascend: bool,
    /// Shutter held.
    pub shutter: bool,
}

impl CommandFrame {
    /// All axes neutral, no flag held.
    pub const REST: CommandFrame = CommandFrame {
        longitudinal: Tri::Neutral,
        lateral: Tri::Neutral,
        pitch: Tri::Neutral,
        zoom_out: false,
        zoom_in: false,
        descend: false,
        ascend: false,
        shutter: false,
    };

    /// Wire value of one field.
    pub fn value(&self, field: FrameField) -> i8 {
        match field {
            FrameField::Longitudinal => self.longitudinal.value(),
            FrameField::Lateral => self.lateral.value(),
            FrameField::Pitch => self.pitch.value(),
            FrameField::ZoomOut => self.zoom_out as i8,
            FrameField::ZoomIn => self.zoom_in as i8,
            FrameField::Descend => self.descend as i8,
            FrameField::Ascend => self.ascend as i8,
            FrameField::Shutter => self.shutter as i8,
        }
    }

    /// Encode to the wire format.
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl TryFrom<RawFrame> for CommandFrame {
    type Error = FrameError;

    fn try_from(raw: RawFrame) -> Result<Self, Self::Error> {
        let tri = |field: FrameField| {
            let value = raw.get(field);
            Tri::from_value(value).ok_or(FrameError::InvalidAxisValue { field, value })
        };
        let flag = |field: FrameField| {
            let value = raw.get(field);
            flag_from_value(value).ok_or(FrameError::InvalidAxisValue { field, value })
        };

        Ok(CommandFrame {
            longitudinal: tri(FrameField::Longitudinal)?,
            lateral: tri(FrameField::Lateral)?,
            pitch: tri(FrameField::Pitch)?,
            zoom_out: flag(FrameField::ZoomOut)?,
            zoom_in: flag(FrameField::ZoomIn)?,
            descend: flag(FrameField::Descend)?,
            ascend: flag(FrameField::Ascend)?,
            shutter: flag(FrameField::Shutter)?,
        })
    }
}

impl fmt::Display for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, field) in FrameField::ALL.iter().enumerate() {
            if idx > 0 {
                f.write_str(FRAME_DELIMITER)?;
            }
            write!(f, "{}", self.value(*field))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields_preserves_order() {
        let raw = parse_fields("-1||1||0||1||0||1||0||1").unwrap();
        assert_eq!(raw.values(), &[-1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        assert_eq!(raw.get(FrameField::Longitudinal), -1.0);
        assert_eq!(raw.get(FrameField::Shutter), 1.0);
    }

    #[test]
    fn test_parse_fields_accepts_decimal_and_whitespace() {
        let raw = parse_fields("1.0|| -1 ||0.0||0||0||0||0||1\n").unwrap();
        assert_eq!(raw.values()[0], 1.0);
        assert_eq!(raw.values()[1], -1.0);
        assert_eq!(raw.values()[7], 1.0);
    }

    #[test]
    fn test_wrong_field_count_is_malformed() {
        for text in ["1||0||0", "0||0||0||0||0||0||0||0||0", "", "0|0|0|0|0|0|0|0"] {
            assert!(
                matches!(parse_fields(text), Err(FrameError::MalformedFrame(_))),
                "{text:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        let err = parse_fields("0||0||x||0||0||0||0||0").unwrap_err();
        assert!(matches!(err, FrameError::MalformedFrame(_)));
        assert!(err.to_string().contains("pitch"));

        // Trailing end marker is not part of the wire format.
        assert!(parse_fields("0||0||0||0||0||0||0||0||E").is_err());
    }

    #[test]
    fn test_out_of_domain_values_are_invalid() {
        let err = parse_frame(b"2||0||0||0||0||0||0||0").unwrap_err();
        assert_eq!(
            err,
            FrameError::InvalidAxisValue {
                field: FrameField::Longitudinal,
                value: 2.0
            }
        );

        // Flag fields do not accept −1.
        let err = parse_frame(b"0||0||0||0||0||-1||0||0").unwrap_err();
        assert!(matches!(
            err,
            FrameError::InvalidAxisValue {
                field: FrameField::Descend,
                ..
            }
        ));

        assert!(matches!(
            parse_frame(b"0.5||0||0||0||0||0||0||0"),
            Err(FrameError::InvalidAxisValue { .. })
        ));
        assert!(matches!(
            parse_frame(b"NaN||0||0||0||0||0||0||0"),
            Err(FrameError::InvalidAxisValue { .. })
        ));
        assert!(matches!(
            parse_frame(b"0||inf||0||0||0||0||0||0"),
            Err(FrameError::InvalidAxisValue { .. })
        ));
    }

    #[test]
    fn test_non_utf8_payload_is_malformed() {
        let err = parse_frame(&[0xff, 0xfe, b'|', b'|']).unwrap_err();
        assert!(matches!(err, FrameError::MalformedFrame(_)));
    }

    #[test]
    fn test_parse_frame_named_fields() {
        let frame = parse_frame(b"-1||1||-1||0||1||0||1||1").unwrap();
        assert_eq!(frame.longitudinal, Tri::Negative);
        assert_eq!(frame.lateral, Tri::Positive);
        assert_eq!(frame.pitch, Tri::Negative);
        assert!(!frame.zoom_out);
        assert!(frame.zoom_in);
        assert!(!frame.descend);
        assert!(frame.ascend);
        assert!(frame.shutter);
    }

    #[test]
    fn test_negative_zero_is_neutral() {
        let frame = parse_frame(b"-0||0||0||0||0||0||0||0").unwrap();
        assert_eq!(frame, CommandFrame::REST);
    }

    #[test]
    fn test_wire_encoding() {
        let frame = CommandFrame {
            longitudinal: Tri::Positive,
            shutter: true,
            ..CommandFrame::REST
        };
        assert_eq!(frame.to_wire(), "1||0||0||0||0||0||0||1");
        assert_eq!(parse_frame(frame.to_wire().as_bytes()).unwrap(), frame);
    }

    #[test]
    fn test_field_table_is_in_wire_order() {
        for (idx, field) in FrameField::ALL.iter().enumerate() {
            assert_eq!(field.index(), idx);
        }
        assert_eq!(FrameField::Pitch.domain(), FieldDomain::TriState);
        assert_eq!(FrameField::ZoomIn.domain(), FieldDomain::Flag);
    }
}
