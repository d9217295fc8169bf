//! Modal path forms standing in for the OS file pickers. One single-line
//! input covers both flows: the add form accepts a literal path or a glob
//! pattern, the save form a destination path.

use std::path::PathBuf;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::{Error, Result};

/// Characters that switch the add form from literal-path to glob expansion.
const GLOB_META: &[char] = &['*', '?', '['];

/// Single-line text input rendered inside a modal popup.
#[derive(Default, Clone)]
pub(crate) struct PathForm {
    pub(crate) value: String,
    pub(crate) error: Option<String>,
}

impl PathForm {
    /// Append a printable character to the input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    /// Remove the last character from the input.
    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    /// Whether the user submitted an empty input, i.e. cancelled the picker.
    pub(crate) fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Expand the typed value into concrete input paths for the add flow.
    ///
    /// A value containing glob metacharacters is expanded against the file
    /// system (files only, sorted for a deterministic merge order); anything
    /// else is treated as one literal path that must exist. Extension
    /// validation is deliberately not done here: the controller checks the
    /// whole batch so a pattern matching a non-PDF fails atomically.
    pub(crate) fn expand_inputs(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.value.trim();

        if !pattern.contains(GLOB_META) {
            let path = PathBuf::from(pattern);
            if !path.is_file() {
                return Err(Error::NoFilesMatched(pattern.to_string()));
            }
            return Ok(vec![path]);
        }

        let entries = glob::glob(pattern).map_err(|err| Error::InvalidGlob(err.to_string()))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        if paths.is_empty() {
            return Err(Error::NoFilesMatched(pattern.to_string()));
        }
        paths.sort();
        Ok(paths)
    }

    /// Resolve the typed value into the merge destination, appending the
    /// `.pdf` default extension when the name carries none.
    pub(crate) fn destination(&self) -> PathBuf {
        let mut path = PathBuf::from(self.value.trim());
        if path.extension().is_none() {
            path.set_extension("pdf");
        }
        path
    }

    /// Render the input line for the modal form.
    pub(crate) fn build_line(&self, field_name: &str, placeholder: &str) -> Line<'static> {
        let (display, style) = if self.value.is_empty() {
            (placeholder.to_string(), Style::default().fg(Color::DarkGray))
        } else {
            (self.value.clone(), Style::default().fg(Color::Yellow))
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Character count of the input, used to place the cursor.
    pub(crate) fn value_len(&self) -> usize {
        self.value.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn form_with(value: &str) -> PathForm {
        PathForm {
            value: value.to_string(),
            error: None,
        }
    }

    #[test]
    fn blank_input_means_cancel() {
        assert!(form_with("").is_blank());
        assert!(form_with("   ").is_blank());
        assert!(!form_with("/a/x.pdf").is_blank());
    }

    #[test]
    fn literal_path_must_exist() {
        let err = form_with("/no/such/file.pdf").expand_inputs().unwrap_err();
        assert!(matches!(err, Error::NoFilesMatched(_)));
    }

    #[test]
    fn literal_path_expands_to_itself() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("one.pdf");
        fs::write(&file, b"stub").unwrap();

        let form = form_with(file.to_str().unwrap());
        assert_eq!(form.expand_inputs().unwrap(), vec![file]);
    }

    #[test]
    fn glob_expands_sorted_and_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.pdf"), b"stub").unwrap();
        fs::write(dir.path().join("a.pdf"), b"stub").unwrap();
        fs::create_dir(dir.path().join("c.pdf")).unwrap();

        let pattern = dir.path().join("*.pdf");
        let form = form_with(pattern.to_str().unwrap());
        let paths = form.expand_inputs().unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("a.pdf"), dir.path().join("b.pdf")]
        );
    }

    #[test]
    fn glob_matching_nothing_is_an_error() {
        let dir = TempDir::new().unwrap();
        let pattern = dir.path().join("*.pdf");
        let err = form_with(pattern.to_str().unwrap())
            .expand_inputs()
            .unwrap_err();
        assert!(matches!(err, Error::NoFilesMatched(_)));
    }

    #[test]
    fn destination_gets_default_extension() {
        assert_eq!(
            form_with("/out/merged").destination(),
            PathBuf::from("/out/merged.pdf")
        );
        assert_eq!(
            form_with("/out/merged.pdf").destination(),
            PathBuf::from("/out/merged.pdf")
        );
    }
}
