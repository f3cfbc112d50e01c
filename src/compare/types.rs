use crate::error::CompareError;
use crate::utils::format::FormatUtils;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSlot {
    First,
    Second,
}

impl FileSlot {
    /// Multipart field name expected by the comparison service.
    pub fn field_name(self) -> &'static str {
        match self {
            FileSlot::First => "file1",
            FileSlot::Second => "file2",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: Option<u64>,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let size = std::fs::metadata(&path).ok().map(|meta| meta.len());
        Self { path, name, size }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRequest {
    pub file1: SelectedFile,
    pub file2: SelectedFile,
}

impl ComparisonRequest {
    pub fn from_selection(
        file1: Option<&SelectedFile>,
        file2: Option<&SelectedFile>,
    ) -> Result<Self, CompareError> {
        match (file1, file2) {
            (Some(file1), Some(file2)) => Ok(Self {
                file1: file1.clone(),
                file2: file2.clone(),
            }),
            _ => Err(CompareError::MissingFiles),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub filename1: String,
    pub filename2: String,
    pub correlation_index: f64,
}

impl ComparisonResult {
    /// Reads a success body. Missing or non-string filenames fall back to
    /// the names that were sent rather than rendering `undefined` or a
    /// coerced value; anything but a numeric index is rejected.
    pub fn from_value(value: &Value, request: &ComparisonRequest) -> Option<Self> {
        let object = value.as_object()?;
        let correlation_index = object.get("correlation_index")?.as_f64()?;
        let filename = |key: &str, fallback: &SelectedFile| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| fallback.name.clone())
        };

        Some(Self {
            filename1: filename("filename1", &request.file1),
            filename2: filename("filename2", &request.file2),
            correlation_index,
        })
    }

    pub fn summary(&self) -> String {
        let percentage = FormatUtils::to_fixed(self.correlation_index * 100.0, 2);
        format!(
            "Os arquivos \"{}\" e \"{}\" possuem um índice de correlação de {} ({}%).",
            self.filename1,
            self.filename2,
            FormatUtils::to_fixed(self.correlation_index, 4),
            percentage
        )
    }
}

/// The `error` field of a failure body, if it holds anything worth showing.
/// Non-string values are shown as their JSON text, so an array reads
/// `["a","b"]` and not the comma-joined `a,b`.
pub fn error_field(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
