use crate::compare::ComparisonResult;
use crate::error::CompareError;

/// What the result area currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ComparisonState {
    #[default]
    Idle,
    Loading,
    Success {
        summary: String,
    },
    Error {
        message: String,
    },
}

impl ComparisonState {
    pub fn succeeded(result: &ComparisonResult) -> Self {
        Self::Success {
            summary: result.summary(),
        }
    }

    pub fn failed(error: &CompareError) -> Self {
        Self::Error {
            message: error.user_message(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Error { .. })
    }

    pub fn result_area_visible(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn result_text(&self) -> &str {
        match self {
            Self::Success { summary } => summary,
            _ => "",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}
