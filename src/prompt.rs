//! Modal text input used for property edits.

/// Asks the user for a value.
///
/// Returning `None` means the prompt was cancelled and nothing changes.
pub trait PropertyPrompt {
    fn prompt(&mut self, title: &str, label: &str, initial: &str, multiline: bool) -> Option<String>;
}
