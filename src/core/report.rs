//! Report render model
//!
//! The structured shape handed to the embed renderer: a title, an accent
//! color, and named fields. Gateways turn this into whatever the platform's
//! embed type is; the pipeline never builds platform embeds directly.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Extracted from per-command embed construction

/// Discord embed field value limit
pub const FIELD_LIMIT: usize = 1024;

/// Accent color for informational reports
pub const COLOR_INFO: u32 = 0x3498db;
/// Accent color for destructive prompts and cancellations
pub const COLOR_DANGER: u32 = 0xe74c3c;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub color: u32,
    pub fields: Vec<ReportField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Report {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            color,
            fields: Vec::new(),
        }
    }

    /// Append a field; the value is truncated to the platform field limit.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(ReportField {
            name: name.into(),
            value: truncate_field(&value.into()),
            inline,
        });
        self
    }
}

/// Truncate text to fit an embed field, adding ellipsis if needed
pub fn truncate_field(text: &str) -> String {
    if text.len() <= FIELD_LIMIT {
        text.to_string()
    } else {
        // Find a safe UTF-8 boundary
        let mut end = FIELD_LIMIT - 3; // Room for "..."
        while !text.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}
