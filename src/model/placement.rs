use crate::foundation::error::{WeaveError, WeaveResult};

/// Default maximum length (in characters, after trimming) of a contributed word.
pub const MAX_TEXT_CHARS: usize = 50;

/// One contributed word anchored on the canvas.
///
/// Positions are normalized to `[0,1)` and never mutated after creation.
/// `timestamp` is assigned by the store on append and is absent on the
/// outgoing submission body.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WordPlacement {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl WordPlacement {
    pub fn new(text: impl Into<String>, x: f64, y: f64, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            color: color.into(),
            timestamp: None,
        }
    }

    pub fn with_timestamp(self, timestamp: u64) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..self
        }
    }

    /// Same authored fields, ignoring the store-assigned timestamp.
    pub fn same_content(&self, other: &WordPlacement) -> bool {
        self.text == other.text
            && self.x == other.x
            && self.y == other.y
            && self.color == other.color
    }
}

/// Trim `raw` and check it is 1..=`max_chars` characters long.
pub fn validate_text(raw: &str, max_chars: usize) -> WeaveResult<String> {
    let text = raw.trim();
    let len = text.chars().count();
    if len == 0 {
        return Err(WeaveError::invalid_input("text is empty"));
    }
    if len > max_chars {
        return Err(WeaveError::invalid_input(format!(
            "text is {len} characters, limit is {max_chars}"
        )));
    }
    Ok(text.to_owned())
}

#[cfg(test)]
#[path = "../../tests/unit/model/placement.rs"]
mod tests;
