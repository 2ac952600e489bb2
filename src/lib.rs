//! Rewrites one attribute of a `locals` block in an HCL file.
//!
//! A run is a straight pipeline: open the file, [`loader::load`] it into a
//! [`document::Document`], [`updater::update_attribute`], then write it back
//! with [`writer::save`] (or [`writer::save_atomic`]). The first failure
//! stops the run and comes back as a [`WrapError`] naming the stage.

pub mod document;
pub mod error;
pub mod handle;
pub mod hcl;
pub mod loader;
pub mod logging;
pub mod updater;
pub mod writer;

use std::path::PathBuf;

use tracing::{debug, info};

pub use crate::error::{EditError, Stage, ToWrapErrorResult, WrapError};
pub use crate::updater::LOCALS_BLOCK;
pub use crate::writer::SaveStrategy;

use crate::handle::Closing;
use crate::hcl::HclDocument;

/// What one run edits: the file, the local to change and its new value.
#[derive(Debug, Clone)]
pub struct Target {
    pub path: PathBuf,
    pub attribute: String,
    pub value: String,
}

pub fn run(target: &Target, strategy: SaveStrategy) -> Result<(), WrapError> {
    let origin = target
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.path.display().to_string());

    let file = handle::open(&target.path).wrap(Stage::Open)?;
    let mut file = Closing::new(origin.clone(), file);

    let mut document: HclDocument = loader::load(&mut *file, &origin).wrap(Stage::Parse)?;
    debug!(file = %origin, "file parsed");

    updater::update_attribute(&mut document, LOCALS_BLOCK, &target.attribute, &target.value)
        .wrap(Stage::Update)?;

    match strategy {
        SaveStrategy::InPlace => writer::save(&mut *file, &document),
        SaveStrategy::Atomic => writer::save_atomic(&target.path, &document),
    }
    .wrap(Stage::Save)?;

    info!(file = %target.path.display(), attribute = %target.attribute, "file updated successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MAIN_TF: &str = r#"locals {
		# pin the target versions of the code
		other_code_version = "3.3.3.3"
		code_version       = "1.1.1.1"
	  }

	  output "test_version_string" {
		value = var.other_code_version
	  }

	  output "test_version_number" {
		value = var.code_version
	  }
"#;

    fn target(dir: &tempfile::TempDir, content: &str, attribute: &str, value: &str) -> Target {
        let path = dir.path().join("main.tf");
        fs::write(&path, content).unwrap();
        Target {
            path,
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn run_updates_the_local_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, MAIN_TF, "code_version", "v2.55.4");
        run(&target, SaveStrategy::InPlace).unwrap();
        assert_eq!(
            fs::read_to_string(&target.path).unwrap(),
            MAIN_TF.replace("\"1.1.1.1\"", "\"v2.55.4\"")
        );
    }

    #[test]
    fn run_updates_the_local_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, MAIN_TF, "code_version", "v2.55.4");
        run(&target, SaveStrategy::Atomic).unwrap();
        assert_eq!(
            fs::read_to_string(&target.path).unwrap(),
            MAIN_TF.replace("\"1.1.1.1\"", "\"v2.55.4\"")
        );
    }

    #[test]
    fn running_twice_matches_running_once() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, MAIN_TF, "code_version", "v2.55.4");
        run(&target, SaveStrategy::InPlace).unwrap();
        let once = fs::read(&target.path).unwrap();
        run(&target, SaveStrategy::InPlace).unwrap();
        assert_eq!(fs::read(&target.path).unwrap(), once);
    }

    #[test]
    fn run_keeps_crlf_line_endings() {
        let original = "# header\r\nlocals {\r\n  # pin\r\n  other = \"3\"\r\n  code_version = \"1.1.1.1\"\r\n}\r\n\r\noutput \"x\" {\r\n  value = local.code_version\r\n}\r\n";
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, original, "code_version", "v2");
        run(&target, SaveStrategy::InPlace).unwrap();
        assert_eq!(
            fs::read_to_string(&target.path).unwrap(),
            original.replace("\"1.1.1.1\"", "\"v2\"")
        );
    }

    #[test]
    fn mixed_line_endings_are_left_alone() {
        let original = "locals {\r\n  code_version = \"1.1.1.1\"\n}\n";
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, original, "code_version", "v2");
        let err = run(&target, SaveStrategy::InPlace).unwrap_err();
        assert_eq!(err.stage, Stage::Parse);
        assert_eq!(fs::read_to_string(&target.path).unwrap(), original);
    }

    #[test]
    fn missing_local_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, MAIN_TF, "missing_var", "v2.55.4");
        let err = run(&target, SaveStrategy::InPlace).unwrap_err();
        assert_eq!(err.stage, Stage::Update);
        assert!(err.to_string().contains("failed to update local"));
        assert!(err.to_string().contains("'missing_var' not found"));
        assert_eq!(fs::read_to_string(&target.path).unwrap(), MAIN_TF);
    }

    #[test]
    fn block_without_body_fails_at_parse_stage() {
        let broken = MAIN_TF.replace("output \"test_version_string\" {", "output \"test_version_string\"");
        let dir = tempfile::tempdir().unwrap();
        let target = target(&dir, &broken, "code_version", "v2.55.4");
        let err = run(&target, SaveStrategy::InPlace).unwrap_err();
        assert_eq!(err.stage, Stage::Parse);
        assert!(matches!(err.kind(), EditError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse HCL file"));
        assert_eq!(fs::read_to_string(&target.path).unwrap(), broken);
    }

    #[test]
    fn missing_file_fails_at_open_stage() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target {
            path: dir.path().join("nope.tf"),
            attribute: "code_version".to_string(),
            value: "v2.55.4".to_string(),
        };
        let err = run(&target, SaveStrategy::InPlace).unwrap_err();
        assert_eq!(err.stage, Stage::Open);
        assert!(err.kind().is_file_access());
        assert!(err.to_string().starts_with("failed to open file"));
    }
}
