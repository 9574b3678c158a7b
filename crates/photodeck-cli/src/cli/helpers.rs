use super::CliError;
use photodeck_core::domain::DeckError;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub(super) fn read_json_file<T: DeserializeOwned>(
    path: &Path,
    read_code: &'static str,
    parse_code: &'static str,
) -> Result<T, CliError> {
    let source = fs::read_to_string(path).map_err(|source| {
        CliError::Compute(DeckError::io_system(
            read_code,
            format!("failed to read '{}': {}", path.display(), source),
        ))
    })?;

    serde_json::from_str(&source).map_err(|source| {
        CliError::Compute(DeckError::input_validation(
            parse_code,
            format!("failed to parse '{}': {}", path.display(), source),
        ))
    })
}
