/// Encoding validation for image sets.
pub mod encoding;
/// Header probing (content type and dimensions).
pub mod probe;
