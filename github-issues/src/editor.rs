// ABOUTME: Editor bridge that runs the user's text editor on a temporary file
// ABOUTME: Seeds the file, waits for the editor to exit, reads the result and removes the file

use crate::constants::editor::{DEFAULT_EDITOR, TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Editor '{program}' was not found in PATH")]
    ToolNotFound { program: String },

    #[error("Editor '{program}' did not exit cleanly: {reason}")]
    EditorExited { program: String, reason: String },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl EditorError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            EditorError::ToolNotFound { .. } => {
                Some("Set GIT_EDITOR to an installed editor, e.g. export GIT_EDITOR=nano")
            }
            _ => None,
        }
    }
}

/// Anything that can hand text to the user and return their edit
pub trait TextEditor {
    fn edit(&self, initial: &str) -> Result<Vec<u8>, EditorError>;
}

/// Runs an external editor program attached to the current terminal
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// `command` is a program name or path, optionally followed by arguments (`code --wait`)
    ///
    /// The whole value is tried as a program first, so paths containing spaces work.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn resolve(&self) -> Result<(String, PathBuf, Vec<String>), EditorError> {
        let whole = self.command.trim();
        // A path such as "/opt/My Editors/ed" names one program, not a command line
        if !whole.is_empty() {
            if let Ok(bin) = which::which(whole) {
                return Ok((whole.to_string(), bin, Vec::new()));
            }
        }

        let mut parts = whole.split_whitespace();
        let program = parts.next().unwrap_or(DEFAULT_EDITOR).to_string();
        let args = parts.map(str::to_string).collect();

        let bin = which::which(&program).map_err(|_| EditorError::ToolNotFound {
            program: program.clone(),
        })?;

        Ok((program, bin, args))
    }

    fn launch(
        &self,
        program: &str,
        bin: &Path,
        args: &[String],
        file: &Path,
    ) -> Result<Vec<u8>, EditorError> {
        log::debug!("Launching {} on {}", bin.display(), file.display());

        let status = Command::new(bin)
            .args(args)
            .arg(file)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| EditorError::EditorExited {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(EditorError::EditorExited {
                program: program.to_string(),
                reason: status.to_string(),
            });
        }

        std::fs::read(file).map_err(|source| EditorError::Io {
            context: format!("Failed to read {}", file.display()),
            source,
        })
    }
}

impl TextEditor for ExternalEditor {
    fn edit(&self, initial: &str) -> Result<Vec<u8>, EditorError> {
        let (program, bin, args) = self.resolve()?;

        let mut file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(TEMP_FILE_SUFFIX)
            .tempfile()
            .map_err(|source| EditorError::Io {
                context: "Failed to create temporary file".to_string(),
                source,
            })?;

        file.write_all(initial.as_bytes())
            .map_err(|source| EditorError::Io {
                context: format!("Failed to write {}", file.path().display()),
                source,
            })?;

        // Some editors refuse files that are still held open
        let path = file.into_temp_path();

        let result = self.launch(&program, &bin, &args, &path);

        if let Err(e) = path.close() {
            log::warn!("Failed to remove temporary file: {}", e);
        }

        result
    }
}
