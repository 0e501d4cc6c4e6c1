#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationValidation {
    Valid,
    Invalid,
}

impl LocationValidation {
    pub fn is_valid(self) -> bool {
        self == LocationValidation::Valid
    }
}

/// Free-text location input. Revalidated on every edit; the message to show
/// next to the input is stored alongside the verdict, not derived later.
#[derive(Debug, Clone)]
pub struct LocationField {
    text: String,
    message: Option<&'static str>,
}

impl Default for LocationField {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationField {
    /// A fresh field is empty, and therefore invalid.
    pub fn new() -> Self {
        Self { text: String::new(), message: validate("") }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.message = validate(text);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn validation(&self) -> LocationValidation {
        if self.message.is_none() {
            LocationValidation::Valid
        } else {
            LocationValidation::Invalid
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validation().is_valid()
    }

    /// Inline message for the input, `None` while the field is valid.
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }
}

fn validate(text: &str) -> Option<&'static str> {
    if text.trim().is_empty() {
        return Some("Location is required.");
    }
    if !text.chars().all(is_allowed) {
        return Some("Location may only contain letters, spaces, and , . ' -");
    }
    None
}

fn is_allowed(c: char) -> bool {
    c.is_alphabetic() || c == ' ' || matches!(c, ',' | '.' | '\'' | '-')
}
