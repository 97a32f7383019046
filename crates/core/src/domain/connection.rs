// Connection Name Rules

use crate::domain::error::{DomainError, Result};

/// Name used when the caller does not specify a connection explicitly
pub const DEFAULT_CONNECTION_NAME: &str = "default";

/// Reject blank connection names before any I/O happens
pub fn require_non_blank(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DomainError::BlankConnectionName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_name_accepted() {
        assert!(require_non_blank("primary").is_ok());
        assert!(require_non_blank(DEFAULT_CONNECTION_NAME).is_ok());
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(matches!(
            require_non_blank(""),
            Err(DomainError::BlankConnectionName)
        ));
        assert!(matches!(
            require_non_blank("   "),
            Err(DomainError::BlankConnectionName)
        ));
        assert!(matches!(
            require_non_blank("\t\n"),
            Err(DomainError::BlankConnectionName)
        ));
    }
}
