//! Tool operation classification.
//!
//! [`ToolOperation`] is the closed set of operations an agent may attempt
//! against the host. Each variant captures the context the policy engine
//! needs to classify it. The set is deliberately an enum rather than a
//! string-keyed table: adding an operation kind is a compile-checked
//! exhaustiveness requirement, and wire names that do not parse fall
//! through to the deny-by-default path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw tool arguments as received from the agent, keyed by parameter name.
pub type ToolArgs = serde_json::Map<String, serde_json::Value>;

/// An operation an agent wants to perform against the host machine.
///
/// Each variant represents a category of operation with enough context
/// for the policy engine to classify it and for a human to make an
/// informed allow/deny decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ToolOperation {
    /// Read a file's contents.
    ReadFile {
        /// Path being read.
        path: String,
    },

    /// Write or create a file.
    WriteFile {
        /// Path being written.
        path: String,
    },

    /// List a directory's entries.
    ListDirectory {
        /// Directory being listed.
        path: String,
    },

    /// Search for files by name or content.
    SearchFiles {
        /// Root of the search.
        path: String,
        /// Search pattern.
        pattern: String,
    },

    /// Move or rename a file.
    MoveFile {
        /// Current path.
        source: String,
        /// Target path.
        destination: String,
    },

    /// Delete a file.
    DeleteFile {
        /// Path being deleted.
        path: String,
    },

    /// Execute a shell command.
    RunCommand {
        /// The full command line.
        command: String,
        /// Directory to execute in, if the caller specified one.
        working_dir: Option<String>,
    },

    /// Fetch a web page.
    FetchPage {
        /// Target URL.
        url: String,
    },

    /// Run a web search.
    WebSearch {
        /// Search query.
        query: String,
    },

    /// Download a remote file to the local filesystem.
    DownloadFile {
        /// Source URL.
        url: String,
        /// Local destination path.
        destination: String,
    },
}

impl ToolOperation {
    /// Get the wire name of this operation kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "read_file",
            Self::WriteFile { .. } => "write_file",
            Self::ListDirectory { .. } => "list_directory",
            Self::SearchFiles { .. } => "search_files",
            Self::MoveFile { .. } => "move_file",
            Self::DeleteFile { .. } => "delete_file",
            Self::RunCommand { .. } => "run_command",
            Self::FetchPage { .. } => "fetch_page",
            Self::WebSearch { .. } => "web_search",
            Self::DownloadFile { .. } => "download_file",
        }
    }

    /// Check if a failure of this operation kind invalidates the rest of a
    /// multi-step plan.
    ///
    /// Writes and command executions build state that later steps depend
    /// on; when one of them fails mid-plan, continuing is worse than
    /// stopping. Other kinds (a failed search, an unreachable page) are
    /// tolerable per-step failures.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::WriteFile { .. } | Self::RunCommand { .. })
    }

    /// Parse a wire name and argument map into an operation.
    ///
    /// # Errors
    ///
    /// Returns [`OperationParseError::UnknownKind`] for names outside the
    /// closed set, and [`OperationParseError::MissingArgument`] when a
    /// required argument is absent or not a string. Callers are expected
    /// to map both onto a blocked decision.
    pub fn parse(name: &str, args: &ToolArgs) -> Result<Self, OperationParseError> {
        let str_arg = |key: &'static str| -> Result<String, OperationParseError> {
            args.get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| OperationParseError::MissingArgument {
                    kind: name.to_string(),
                    name: key,
                })
        };

        match name {
            "read_file" => Ok(Self::ReadFile { path: str_arg("path")? }),
            "write_file" => Ok(Self::WriteFile { path: str_arg("path")? }),
            "list_directory" => Ok(Self::ListDirectory { path: str_arg("path")? }),
            "search_files" => Ok(Self::SearchFiles {
                path: str_arg("path")?,
                pattern: str_arg("pattern")?,
            }),
            "move_file" => Ok(Self::MoveFile {
                source: str_arg("source")?,
                destination: str_arg("destination")?,
            }),
            "delete_file" => Ok(Self::DeleteFile { path: str_arg("path")? }),
            "run_command" => Ok(Self::RunCommand {
                command: str_arg("command")?,
                working_dir: args
                    .get("working_dir")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string),
            }),
            "fetch_page" => Ok(Self::FetchPage { url: str_arg("url")? }),
            "web_search" => Ok(Self::WebSearch { query: str_arg("query")? }),
            "download_file" => Ok(Self::DownloadFile {
                url: str_arg("url")?,
                destination: str_arg("destination")?,
            }),
            other => Err(OperationParseError::UnknownKind {
                kind: other.to_string(),
            }),
        }
    }

    /// Get a human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::ReadFile { path } => format!("Read: {path}"),
            Self::WriteFile { path } => format!("Write: {path}"),
            Self::ListDirectory { path } => format!("List: {path}"),
            Self::SearchFiles { path, pattern } => format!("Search '{pattern}' under {path}"),
            Self::MoveFile {
                source,
                destination,
            } => format!("Move {source} -> {destination}"),
            Self::DeleteFile { path } => format!("Delete: {path}"),
            Self::RunCommand { command, .. } => format!("Execute: {command}"),
            Self::FetchPage { url } => format!("Fetch: {url}"),
            Self::WebSearch { query } => format!("Web search: {query}"),
            Self::DownloadFile { url, destination } => {
                format!("Download {url} -> {destination}")
            },
        }
    }
}

impl fmt::Display for ToolOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Errors from parsing a wire-format tool call into a [`ToolOperation`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationParseError {
    /// The operation name is not in the closed set of known kinds.
    #[error("unknown operation kind '{kind}'")]
    UnknownKind {
        /// The unrecognized wire name.
        kind: String,
    },

    /// A required argument was absent or had the wrong type.
    #[error("operation '{kind}' is missing required argument '{name}'")]
    MissingArgument {
        /// The operation kind being parsed.
        kind: String,
        /// The missing argument name.
        name: &'static str,
    },
}
