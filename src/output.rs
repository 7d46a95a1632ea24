//! Where the finished agenda goes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

/// Stdout sentinel for `orgfile`.
const STDOUT_SENTINEL: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Unset, empty, and `-` all mean stdout.
    pub fn from_org_file(org_file: Option<&str>) -> Self {
        match org_file {
            None | Some("") | Some(STDOUT_SENTINEL) => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(PathBuf::from(path)),
        }
    }

    pub fn write(&self, agenda: &str) -> Result<()> {
        match self {
            OutputTarget::Stdout => {
                println!("{}", agenda);
                Ok(())
            }
            OutputTarget::File(path) => {
                info!("Writing agenda to {}", path.display());
                std::fs::write(path, agenda)
                    .with_context(|| format!("Error writing to {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_org_file() {
        assert_eq!(OutputTarget::from_org_file(None), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_org_file(Some("")), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_org_file(Some("-")), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_org_file(Some("/tmp/cal.org")),
            OutputTarget::File(PathBuf::from("/tmp/cal.org"))
        );
    }

    #[test]
    fn test_file_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cal.org");

        OutputTarget::File(path.clone()).write("* Cal\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "* Cal\n");
    }

    #[test]
    fn test_write_error_names_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("cal.org");

        let err = OutputTarget::File(path.clone()).write("x").unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }
}
