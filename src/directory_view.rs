use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::{debug, info};

use crate::{selection::TimetableView, snapshot::Snapshot, snapshot_error::SnapshotError};

const CLASSES_DIR: &str = "classes";
const SUBJECTS_DIR: &str = "subjects";
const RENDER_EXTENSIONS: [&str; 2] = ["svg", "html"];

/// A timetable view backed by renders saved from the browser, laid out as
/// `classes/<class>.svg` and `subjects/<subject>.html` (either extension works
/// for both). A name without a saved render cannot be selected.
#[derive(Debug)]
pub struct DirectoryView {
    root: PathBuf,
    current: Option<PathBuf>,
}

impl DirectoryView {
    pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            anyhow::bail!("snapshot directory {} does not exist", root.display());
        }
        info!("Reading timetable renders from {}", root.display());
        Ok(Self {
            root,
            current: None,
        })
    }

    fn find_render(&self, kind: &str, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return None;
        }
        RENDER_EXTENSIONS
            .iter()
            .map(|extension| self.root.join(kind).join(format!("{name}.{extension}")))
            .find(|path| path.is_file())
    }

    fn select(&mut self, kind: &str, name: &str) -> bool {
        self.current = self.find_render(kind, name);
        if let Some(path) = &self.current {
            debug!("Selected {}", path.display());
        }
        self.current.is_some()
    }
}

fn read_render(path: &Path) -> anyhow::Result<Snapshot> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read render {}", path.display()))?;
    let snapshot = match path.extension().and_then(|extension| extension.to_str()) {
        Some("svg") => Snapshot::from_svg(&contents),
        _ => Snapshot::from_html(&contents),
    };
    snapshot.with_context(|| format!("failed to capture {}", path.display()))
}

impl TimetableView for DirectoryView {
    fn select_class(&mut self, class_name: &str) -> bool {
        self.select(CLASSES_DIR, class_name)
    }

    fn select_subject(&mut self, subject_name: &str) -> bool {
        self.select(SUBJECTS_DIR, subject_name)
    }

    fn snapshot(&mut self) -> anyhow::Result<Snapshot> {
        match &self.current {
            Some(path) => read_render(path),
            None => Err(SnapshotError::new("no class or subject selected").into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RENDER: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"><rect x="1" y="2" width="3" height="4" fill="#fff"><title>Math</title></rect></svg>"##;

    fn saved_renders() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(CLASSES_DIR)).unwrap();
        fs::create_dir(dir.path().join(SUBJECTS_DIR)).unwrap();
        fs::write(dir.path().join(CLASSES_DIR).join("3г-SEIS18.svg"), RENDER).unwrap();
        fs::write(
            dir.path().join(SUBJECTS_DIR).join("Оперативни системи.html"),
            format!("<html><body>{RENDER}</body></html>"),
        )
        .unwrap();
        dir
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DirectoryView::open(dir.path().join("nope")).is_err());
    }

    #[test]
    fn selects_saved_renders_only() {
        let dir = saved_renders();
        let mut view = DirectoryView::open(dir.path()).unwrap();

        assert!(view.select_class("3г-SEIS18"));
        assert_eq!(view.snapshot().unwrap().rects.len(), 1);

        assert!(view.select_subject("Оперативни системи"));
        assert_eq!(
            view.snapshot().unwrap().rects[0].title.as_deref(),
            Some("Math")
        );

        assert!(!view.select_subject("3г-SEIS18"));
        assert!(!view.select_class("../classes/3г-SEIS18"));
        assert!(!view.select_class(""));
    }

    #[test]
    fn failed_selection_forgets_previous_render() {
        let dir = saved_renders();
        let mut view = DirectoryView::open(dir.path()).unwrap();
        assert!(view.select_class("3г-SEIS18"));
        assert!(!view.select_class("2г-SIIS"));
        let err = view.snapshot().unwrap_err();
        assert!(err.downcast_ref::<SnapshotError>().is_some());
    }
}
