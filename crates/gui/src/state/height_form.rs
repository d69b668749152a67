//! Height input form (data only).
//!
//! The text field itself is drawn by ui/height_panel.rs in the binary crate.

use crate::validation::{parse_height, HeightInputError};

/// Single height text field with the digits-only rule
#[derive(Default, Debug, Clone)]
pub struct HeightForm {
    pub value: String,
}

impl HeightForm {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Validation error for the current value, if any
    pub fn errors(&self) -> Option<HeightInputError> {
        parse_height(&self.value).err()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_none()
    }

    /// Parsed height in meters (empty is 0)
    pub fn height(&self) -> Result<f64, HeightInputError> {
        parse_height(&self.value)
    }
}
