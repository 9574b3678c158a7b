pub type DeckResult<T> = Result<T, DeckError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckErrorCategory {
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl DeckErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} [{}] {}", category.as_str(), code, message)]
pub struct DeckError {
    category: DeckErrorCategory,
    code: &'static str,
    message: String,
}

impl DeckError {
    pub fn new(
        category: DeckErrorCategory,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::InputValidationError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::IoSystemError, code, message)
    }

    pub fn computation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::ComputationError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DeckErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> DeckErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::{DeckError, DeckErrorCategory};

    #[test]
    fn category_exit_mapping_is_stable() {
        let cases = [
            (DeckErrorCategory::InputValidationError, 2),
            (DeckErrorCategory::IoSystemError, 3),
            (DeckErrorCategory::ComputationError, 4),
            (DeckErrorCategory::InternalError, 5),
        ];

        for (category, exit_code) in cases {
            assert_eq!(category.exit_code(), exit_code);
        }
    }

    #[test]
    fn error_renders_diagnostic_line_with_stable_code() {
        let error = DeckError::input_validation("FIT.INSUFFICIENT_DATA", "got 1 sample point");

        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.code(), "FIT.INSUFFICIENT_DATA");
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [FIT.INSUFFICIENT_DATA] got 1 sample point"
        );
        assert_eq!(
            error.to_string(),
            "InputValidationError [FIT.INSUFFICIENT_DATA] got 1 sample point"
        );
    }
}
