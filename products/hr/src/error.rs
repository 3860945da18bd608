use platform_store::StoreError;
use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    /// Caller-correctable input problem; nothing was changed.
    #[error("{0}")]
    Validation(String),
    /// Every identifier up to the integer limit is taken; nothing was changed.
    #[error("no employee identifiers left")]
    IdsExhausted,
    /// The backing store could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl HrError {
    pub fn code(&self) -> &'static str {
        match self {
            HrError::Validation(_) => "VALIDATION",
            HrError::IdsExhausted => "IDS_EXHAUSTED",
            HrError::Storage(_) => "STORAGE",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, HrError::Validation(_))
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_distinguish_kinds() {
        let bad = HrError::validation("Salary cannot be negative");
        assert_eq!(bad.code(), "VALIDATION");
        assert!(bad.is_validation());
        assert_eq!(bad.to_string(), "Salary cannot be negative");

        let storage = HrError::from(StoreError::Poisoned);
        assert_eq!(storage.code(), "STORAGE");
        assert!(!storage.is_validation());
        assert!(storage.to_string().starts_with("storage error"));

        assert_eq!(HrError::IdsExhausted.code(), "IDS_EXHAUSTED");
        assert!(!HrError::IdsExhausted.is_validation());
    }
}
