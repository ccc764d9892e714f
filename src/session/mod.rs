//! UI-independent workflow state: selection, scale fields, status line, in-flight build.

/// Select → build → report controller.
pub mod controller;
/// Width/height fields with live validity reporting.
pub mod scale_input;
