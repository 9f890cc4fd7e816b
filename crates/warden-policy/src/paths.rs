//! Path resolution and containment.
//!
//! Every path argument is expanded (home-directory alias), made absolute,
//! and resolved through the filesystem's symlink chain before containment
//! is tested, so a symlink planted inside an allowed directory cannot be
//! used to reach a target outside it. A fixed deny-list of sensitive
//! locations is checked before the allow-list and wins even for paths
//! nominally inside an allowed directory.

use std::path::{Component, Path, PathBuf};

/// Path fragments that are never accessible, regardless of the allow-list.
///
/// System directories, credential stores, secret/env files, and
/// version-control internals.
const SENSITIVE_FRAGMENTS: &[&str] = &[
    "/etc/",
    "/sys/",
    "/proc/",
    "/boot/",
    "/dev/",
    "/.ssh/",
    "/.aws/",
    "/.gnupg/",
    "/.kube/",
    "/.git/",
    ".env",
    "credentials",
    "secrets",
    "id_rsa",
    "id_ed25519",
];

/// The outcome of resolving a path and testing it against policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathAssessment {
    /// Resolved inside an allowed directory; carries the resolved path.
    Contained(PathBuf),
    /// Resolved to a protected system or credential location.
    Sensitive(PathBuf),
    /// Resolved outside every allowed directory.
    Outside(PathBuf),
    /// Could not be resolved (traversal sequence, no home directory,
    /// nonexistent ancestors). Treated as a refusal by callers.
    Unresolvable(String),
}

/// Resolves paths and tests containment against an allow-list of roots.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Canonicalized allow-list roots.
    allowed: Vec<PathBuf>,
}

impl PathResolver {
    /// Build a resolver from configured allow-list directories.
    ///
    /// Each root is home-expanded and canonicalized where possible; roots
    /// that do not exist are kept in lexical form (they simply never
    /// contain a canonicalized path).
    #[must_use]
    pub fn new(allowed_directories: &[PathBuf]) -> Self {
        let allowed = allowed_directories
            .iter()
            .map(|dir| {
                let expanded = expand_home(dir).unwrap_or_else(|| dir.clone());
                expanded.canonicalize().unwrap_or(expanded)
            })
            .collect();
        Self { allowed }
    }

    /// Resolve a raw path argument and assess it against policy.
    ///
    /// The sensitive-location check runs before containment, so a protected
    /// path inside an allowed directory is still refused.
    #[must_use]
    pub fn assess(&self, raw: &str) -> PathAssessment {
        let resolved = match resolve(raw) {
            Ok(p) => p,
            Err(reason) => return PathAssessment::Unresolvable(reason),
        };

        if sensitive_fragment(&resolved).is_some() {
            return PathAssessment::Sensitive(resolved);
        }

        if self.contains(&resolved) {
            PathAssessment::Contained(resolved)
        } else {
            PathAssessment::Outside(resolved)
        }
    }

    /// Check whether a resolved path lies inside any allowed root.
    #[must_use]
    pub fn contains(&self, resolved: &Path) -> bool {
        self.allowed.iter().any(|root| resolved.starts_with(root))
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Returns `None` when the path is home-relative but no home directory can
/// be determined.
#[must_use]
pub fn expand_home(path: &Path) -> Option<PathBuf> {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix("~/") {
        let base = directories::BaseDirs::new()?;
        return Some(base.home_dir().join(rest));
    }
    if text == "~" {
        let base = directories::BaseDirs::new()?;
        return Some(base.home_dir().to_path_buf());
    }
    Some(path.to_path_buf())
}

/// Resolve a raw path to an absolute, symlink-free form.
///
/// Traversal sequences (`..`) are rejected outright rather than normalized;
/// an agent has no legitimate reason to reach upward through an allowed
/// root. For paths that do not exist yet (a file about to be written), the
/// nearest existing ancestor is canonicalized and the remaining components
/// are appended.
pub(crate) fn resolve(raw: &str) -> Result<PathBuf, String> {
    let expanded = expand_home(Path::new(raw))
        .ok_or_else(|| "home directory could not be determined".to_string())?;

    if expanded
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err("path contains traversal sequence (..)".to_string());
    }

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map_err(|e| format!("working directory unavailable: {e}"))?
            .join(expanded)
    };

    canonicalize_allowing_missing_tail(&absolute)
}

/// Canonicalize a path, tolerating a not-yet-existing tail.
fn canonicalize_allowing_missing_tail(absolute: &Path) -> Result<PathBuf, String> {
    if let Ok(canonical) = absolute.canonicalize() {
        return Ok(canonical);
    }

    let mut missing = Vec::new();
    let mut cursor = absolute.to_path_buf();
    loop {
        if let Ok(base) = cursor.canonicalize() {
            let mut out = base;
            for component in missing.iter().rev() {
                out.push(component);
            }
            return Ok(out);
        }
        match (cursor.parent(), cursor.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                cursor = parent.to_path_buf();
            },
            _ => return Err(format!("no existing ancestor for {}", absolute.display())),
        }
    }
}

/// Return the sensitive fragment a path matches, if any.
#[must_use]
pub fn sensitive_fragment(path: &Path) -> Option<&'static str> {
    let text = path.to_string_lossy();
    SENSITIVE_FRAGMENTS.iter().copied().find(|fragment| {
        if let Some(dir) = fragment.strip_suffix('/') {
            // Directory fragments match inside the path or as its final
            // component ("/etc/passwd" and "/etc" both match "/etc/").
            text.contains(fragment) || text.ends_with(dir)
        } else {
            text.contains(fragment)
        }
    })
}
