//! Structural validation of batch descriptions.
//!
//! Runs before any path parsing, file I/O or value encoding. Checks are
//! ordered and not cumulative: the first failing check is reported.

use crate::error::ValidationError;
use crate::model::SetInput;

/// Validates a batch description.
///
/// Checks, in order:
/// 1. At least one path-bearing list is non-empty
/// 2. Update files and update values are not both given
/// 3. Replace files and replace values are not both given
/// 4. Update paths match the populated update value or file list in length
/// 5. Replace paths match the populated replace value or file list in length
pub fn validate_set_input(input: &SetInput) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::NoPaths);
    }
    if !input.update_files.is_empty() && !input.update_values.is_empty() {
        return Err(ValidationError::UpdateFileAndValue);
    }
    if !input.replace_files.is_empty() && !input.replace_values.is_empty() {
        return Err(ValidationError::ReplaceFileAndValue);
    }
    if !lengths_match(&input.update_paths, &input.update_values, &input.update_files) {
        return Err(ValidationError::MissingUpdateValue);
    }
    if !lengths_match(&input.replace_paths, &input.replace_values, &input.replace_files) {
        return Err(ValidationError::MissingReplaceValue);
    }
    Ok(())
}

fn lengths_match(paths: &[String], values: &[String], files: &[String]) -> bool {
    paths.len() == values.len() || paths.len() == files.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/p{i}")).collect()
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(validate_set_input(&SetInput::default()), Err(ValidationError::NoPaths));

        // Values without paths still count as no paths.
        let mut input = SetInput::default();
        input.update_values = strings(2);
        assert_eq!(validate_set_input(&input), Err(ValidationError::NoPaths));
    }

    #[test]
    fn test_file_and_value_exclusive() {
        let mut input = SetInput::default().update_value("/a", "1");
        input.update_files.push("a.json".to_string());
        assert_eq!(validate_set_input(&input), Err(ValidationError::UpdateFileAndValue));

        let mut input = SetInput::default().replace_value("/a", "1");
        input.replace_files.push("a.json".to_string());
        assert_eq!(validate_set_input(&input), Err(ValidationError::ReplaceFileAndValue));
    }

    #[test]
    fn test_update_checked_before_replace() {
        let mut input = SetInput::default();
        input.update_paths = strings(2);
        input.update_values = strings(1);
        input.replace_paths = strings(2);
        input.replace_values = strings(1);
        input.replace_files = strings(1);
        // Replace exclusivity (check 3) precedes update length (check 4).
        assert_eq!(validate_set_input(&input), Err(ValidationError::ReplaceFileAndValue));

        input.replace_files.clear();
        assert_eq!(validate_set_input(&input), Err(ValidationError::MissingUpdateValue));

        input.update_values = strings(2);
        assert_eq!(validate_set_input(&input), Err(ValidationError::MissingReplaceValue));
    }

    #[test]
    fn test_valid_inputs() {
        assert!(validate_set_input(&SetInput::default().delete("/a")).is_ok());
        assert!(validate_set_input(&SetInput::default().update_file("/a", "a.yml")).is_ok());
        assert!(validate_set_input(
            &SetInput::default().update_value("/a", "1").replace_file("/b", "b.json")
        )
        .is_ok());
    }

    proptest! {
        #[test]
        fn prop_files_and_values_never_mix(
            paths in 0usize..4,
            values in 1usize..4,
            files in 1usize..4,
            deletes in 0usize..3,
        ) {
            let mut input = SetInput::default();
            input.deletes = strings(deletes);
            input.update_paths = strings(paths);
            input.update_values = strings(values);
            input.update_files = strings(files);
            let result = validate_set_input(&input);
            if input.is_empty() {
                prop_assert_eq!(result, Err(ValidationError::NoPaths));
            } else {
                prop_assert_eq!(result, Err(ValidationError::UpdateFileAndValue));
            }
        }

        #[test]
        fn prop_length_mismatch_rejected(paths in 1usize..6, values in 0usize..6) {
            prop_assume!(paths != values);
            let mut input = SetInput::default();
            input.replace_paths = strings(paths);
            input.replace_values = strings(values);
            prop_assert_eq!(validate_set_input(&input), Err(ValidationError::MissingReplaceValue));
        }
    }
}
