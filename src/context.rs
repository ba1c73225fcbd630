//! ShellContext - the home, user and working directory a query is resolved against
//!
//! Routing never reads process-wide state directly; everything that depends
//! on "where am I and who am I" goes through a context value so tests can
//! pin it down.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellContext {
    home: PathBuf,
    user: String,
    cwd: PathBuf,
}

impl ShellContext {
    pub fn new(home: impl Into<PathBuf>, user: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            user: user.into(),
            cwd: cwd.into(),
        }
    }

    /// Snapshot the context of the running process.
    /// - cwd falls back to `/` when the current directory is gone
    /// - user falls back to `user` when `$USER` is unset
    pub fn from_process() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let home = dirs::home_dir().unwrap_or_else(|| cwd.clone());
        let user = std::env::var("USER").unwrap_or_else(|_| "user".to_string());

        Self { home, user, cwd }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn home_string(&self) -> String {
        self.home.display().to_string()
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn cwd_string(&self) -> String {
        self.cwd.display().to_string()
    }

    /// Resolve `target` against the working directory without touching the
    /// filesystem. `.` and `..` are folded lexically; the path need not exist.
    pub fn absolute(&self, target: impl AsRef<Path>) -> PathBuf {
        let target = target.as_ref();
        let joined = if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.cwd.join(target)
        };
        normalize_lexically(&joined)
    }

    pub fn absolute_string(&self, target: impl AsRef<Path>) -> String {
        self.absolute(target).display().to_string()
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ShellContext {
        ShellContext::new("/home/ada", "ada", "/home/ada/work")
    }

    #[test]
    fn test_relative_joins_cwd() {
        assert_eq!(ctx().absolute_string("notes"), "/home/ada/work/notes");
    }

    #[test]
    fn test_absolute_is_kept() {
        assert_eq!(ctx().absolute_string("/tmp"), "/tmp");
    }

    #[test]
    fn test_dots_are_folded() {
        assert_eq!(ctx().absolute_string("../src/./lib"), "/home/ada/src/lib");
        assert_eq!(ctx().absolute_string("/../.."), "/");
    }

    #[test]
    fn test_from_process_has_absolute_cwd() {
        let ctx = ShellContext::from_process();
        assert!(ctx.cwd().is_absolute());
        assert!(!ctx.user().is_empty());
    }
}
