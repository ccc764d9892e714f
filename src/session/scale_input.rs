use crate::encode::request::Scale;
use crate::foundation::error::{TimelapseError, TimelapseResult};

type ValidityCallback = Box<dyn FnMut(bool) + Send>;

/// Editable width/height pair, as typed by the user.
///
/// Valid when both fields are empty (no scaling) or both hold positive integers. A registered
/// callback is told about every change of validity, and only about changes.
pub struct ScaleInput {
    width: String,
    height: String,
    cached_is_valid: bool,
    on_validity_changed: Option<ValidityCallback>,
}

impl Default for ScaleInput {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScaleInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaleInput")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("is_valid", &self.cached_is_valid)
            .finish_non_exhaustive()
    }
}

impl ScaleInput {
    /// Empty input (no scaling).
    pub fn new() -> Self {
        Self {
            width: String::new(),
            height: String::new(),
            cached_is_valid: true,
            on_validity_changed: None,
        }
    }

    /// Register the callback invoked with the new validity whenever it flips.
    pub fn set_validity_changed_callback(&mut self, callback: impl FnMut(bool) + Send + 'static) {
        self.on_validity_changed = Some(Box::new(callback));
    }

    /// Current width text.
    pub fn width_text(&self) -> &str {
        &self.width
    }

    /// Current height text.
    pub fn height_text(&self) -> &str {
        &self.height
    }

    /// Replace the width text.
    pub fn set_width_text(&mut self, text: impl Into<String>) {
        self.width = text.into();
        self.update_validity();
    }

    /// Replace the height text.
    pub fn set_height_text(&mut self, text: impl Into<String>) {
        self.height = text.into();
        self.update_validity();
    }

    /// Fill both fields, e.g. with the size of the first selected image.
    pub fn set_width_and_height(&mut self, width: u32, height: u32) {
        self.width = width.to_string();
        self.height = height.to_string();
        self.update_validity();
    }

    /// Empty both fields.
    pub fn clear(&mut self) {
        self.width.clear();
        self.height.clear();
        self.update_validity();
    }

    /// Return `true` when the fields describe no scaling or a complete scale.
    pub fn is_valid(&self) -> bool {
        self.scale().is_ok()
    }

    /// Parse the fields into an optional [`Scale`].
    pub fn scale(&self) -> TimelapseResult<Option<Scale>> {
        let width = parse_dimension("width", &self.width)?;
        let height = parse_dimension("height", &self.height)?;
        Scale::from_parts(width, height)
    }

    fn update_validity(&mut self) {
        let is_valid = self.is_valid();
        if is_valid == self.cached_is_valid {
            return;
        }
        self.cached_is_valid = is_valid;
        tracing::debug!(is_valid, "image scale validity changed");
        if let Some(callback) = self.on_validity_changed.as_mut() {
            callback(is_valid);
        }
    }
}

fn parse_dimension(name: &str, text: &str) -> TimelapseResult<Option<u32>> {
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<u32>() {
        Ok(v) if v > 0 => Ok(Some(v)),
        _ => {
            tracing::debug!("Invalid text entry \"{text}\"");
            Err(TimelapseError::validation(format!(
                "{name} must be a positive integer, got \"{text}\""
            )))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scale_input.rs"]
mod tests;
