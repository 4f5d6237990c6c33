use codee::{Decoder, Encoder};
use serde::{Deserialize, Serialize};

use crate::error::CommonError;
use crate::values::{format_number, parse_position};

/// Target positions for both axes, sent while the backend is in manual mode.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PositionCommand {
    pub coax: f64,
    pub cross: f64,
}

impl PositionCommand {
    pub fn new(coax: f64, cross: f64) -> Self {
        Self { coax, cross }
    }

    /// Build a command from the raw text of the two slider inputs.
    pub fn from_inputs(coax: &str, cross: &str) -> Result<Self, CommonError> {
        Ok(Self {
            coax: parse_position(coax)?,
            cross: parse_position(cross)?,
        })
    }
}

/// Text codec for manual position frames on the live socket.
///
/// A frame is the two positions separated by a single space, coax first:
///
/// ```rust,ignore
/// use codee::Encoder;
/// use coax_common::{PositionCommand, PositionTextCodec};
///
/// let frame = PositionTextCodec::encode(&PositionCommand::new(10.0, 20.0))?;
/// assert_eq!(frame, "10 20");
/// ```
pub struct PositionTextCodec;

impl Encoder<PositionCommand> for PositionTextCodec {
    type Error = CommonError;
    type Encoded = String;

    fn encode(val: &PositionCommand) -> Result<Self::Encoded, Self::Error> {
        Ok(format!(
            "{} {}",
            format_number(val.coax),
            format_number(val.cross)
        ))
    }
}

impl Decoder<PositionCommand> for PositionTextCodec {
    type Error = CommonError;
    type Encoded = str;

    fn decode(val: &Self::Encoded) -> Result<PositionCommand, Self::Error> {
        let mut parts = val.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(coax), Some(cross), None) => PositionCommand::from_inputs(coax, cross)
                .map_err(|_| CommonError::MalformedFrame(val.to_string())),
            _ => Err(CommonError::MalformedFrame(val.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_integral_positions() {
        let frame = PositionTextCodec::encode(&PositionCommand::new(10.0, 20.0)).unwrap();
        assert_eq!(frame, "10 20");
    }

    #[test]
    fn test_encode_fractional_positions() {
        let frame = PositionTextCodec::encode(&PositionCommand::new(0.25, -3.5)).unwrap();
        assert_eq!(frame, "0.25 -3.5");
    }

    #[test]
    fn test_decode_frame() {
        let cmd = PositionTextCodec::decode("12.5 7").unwrap();
        assert_eq!(cmd, PositionCommand::new(12.5, 7.0));
    }

    #[test]
    fn test_decode_rejects_wrong_arity() {
        assert!(PositionTextCodec::decode("12.5").is_err());
        assert!(PositionTextCodec::decode("1 2 3").is_err());
        assert!(PositionTextCodec::decode("a b").is_err());
    }

    #[test]
    fn test_from_inputs_rejects_empty_slider() {
        assert_eq!(
            PositionCommand::from_inputs("", "3").unwrap_err(),
            CommonError::InvalidNumber(String::new())
        );
    }
}
