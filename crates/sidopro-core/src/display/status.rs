//! One-line outcome messages for CLI commands.

use std::fmt;

/// Outcome of a command that produces no document to show.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.success { "✓" } else { "✗" };
        writeln!(f, "{mark} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks() {
        assert_eq!(
            OperationStatus::success("Deleted report 4").to_string(),
            "✓ Deleted report 4\n"
        );
        assert!(OperationStatus::failure("Draft kept").to_string().starts_with("✗"));
    }
}
