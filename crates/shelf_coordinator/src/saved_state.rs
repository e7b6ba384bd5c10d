//! Header position persisted across teardown
//!
//! The position is stored relative to a panel rather than as an absolute
//! offset so it survives the panels being re-measured at a different size.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShelfError};
use crate::header::Header;

/// Current envelope version written by [`SavedPosition::encode`]
pub const SAVED_POSITION_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedPosition {
    /// First panel still (partly) visible
    pub panel_index: usize,
    /// The panel was showing exactly its minimum width
    pub at_minimum_width: bool,
    /// Visible part of the panel relative to its width
    pub fraction_visible: f32,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    position: &'a SavedPosition,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    position: serde_json::Value,
}

impl SavedPosition {
    /// Describe where `offset` leaves the header, or None if no panel is visible
    pub fn capture(header: &Header, offset: i32) -> Option<Self> {
        let inset = header.left_inset();
        for (index, span) in header.spans().iter().enumerate() {
            let visible_right = span.trailing + offset;
            if span.leading + offset > 0 || visible_right < 0 {
                continue;
            }
            let panel = header.panel_at(index)?;
            let fraction_visible = if panel.width > 0 {
                visible_right as f32 / panel.width as f32
            } else {
                0.0
            };
            return Some(SavedPosition {
                panel_index: index,
                at_minimum_width: visible_right == panel.min_width + inset,
                fraction_visible,
            });
        }
        None
    }

    /// Absolute offset for this position against the header as laid out now
    pub fn resolve(&self, header: &Header) -> Option<i32> {
        let panel = header.panel_at(self.panel_index)?;
        let span = header.span_at(self.panel_index)?;
        let mut offset = -span.trailing;
        if self.at_minimum_width {
            offset += panel.min_width + header.left_inset();
        } else {
            offset += (panel.width as f32 * self.fraction_visible).round() as i32;
        }
        Some(offset)
    }

    pub fn encode(&self) -> Result<String> {
        let envelope = EnvelopeRef {
            version: SAVED_POSITION_VERSION,
            position: self,
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    pub fn decode(encoded: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(encoded)?;
        if envelope.version != SAVED_POSITION_VERSION {
            return Err(ShelfError::UnsupportedVersion(envelope.version));
        }
        Ok(serde_json::from_value(envelope.position)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::ScrollFlags;
    use crate::panel::Panel;

    fn header() -> Header {
        let mut header = Header::new();
        header.add_panel(
            Panel::new(300)
                .with_min_width(100)
                .with_flags(ScrollFlags::SCROLL | ScrollFlags::EXIT_UNTIL_COLLAPSED),
        );
        header.add_panel(Panel::new(200));
        header
    }

    #[test]
    fn test_capture_fraction() {
        let position = SavedPosition::capture(&header(), -150).unwrap();
        assert_eq!(position.panel_index, 0);
        assert!(!position.at_minimum_width);
        assert_eq!(position.fraction_visible, 0.5);
        assert_eq!(position.resolve(&header()), Some(-150));
    }

    #[test]
    fn test_capture_at_minimum_width() {
        let position = SavedPosition::capture(&header(), -200).unwrap();
        assert!(position.at_minimum_width);

        // Re-measured wider: still shows exactly the minimum width
        let mut wider = Header::new();
        wider.add_panel(Panel::new(400).with_min_width(100));
        assert_eq!(position.resolve(&wider), Some(-300));
    }

    #[test]
    fn test_resolve_missing_panel() {
        let position = SavedPosition {
            panel_index: 5,
            at_minimum_width: false,
            fraction_visible: 1.0,
        };
        assert_eq!(position.resolve(&header()), None);
    }

    #[test]
    fn test_encode_envelope() {
        let position = SavedPosition::capture(&header(), -150).unwrap();
        let encoded = position.encode().unwrap();
        assert!(encoded.contains("\"version\":1"));
        assert_eq!(SavedPosition::decode(&encoded).unwrap(), position);
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let blob = r#"{"version":7,"position":{"panel_index":0,"at_minimum_width":false,"fraction_visible":1.0}}"#;
        assert!(matches!(
            SavedPosition::decode(blob),
            Err(ShelfError::UnsupportedVersion(7))
        ));
        assert!(matches!(
            SavedPosition::decode("not json"),
            Err(ShelfError::SavedState(_))
        ));
    }
}
