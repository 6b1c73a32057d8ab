use log::{info, warn};

use crate::{entry_parser::Entry, extractor::Extractor, snapshot::Snapshot};

/// The rendered timetable a scraper drives. Selecting a class or subject
/// re-renders the view; `snapshot` captures whatever is currently shown.
pub trait TimetableView {
    /// Whether the class could be selected.
    fn select_class(&mut self, class_name: &str) -> bool;
    /// Whether the subject could be selected.
    fn select_subject(&mut self, subject_name: &str) -> bool;
    fn snapshot(&mut self) -> anyhow::Result<Snapshot>;
}

/// True when the filter is empty or `subject` contains one of its items.
pub fn matches_subject_filter(subject: &str, subject_filter: &[String]) -> bool {
    subject_filter.is_empty() || subject_filter.iter().any(|item| subject.contains(item.as_str()))
}

fn extract_current_view(view: &mut impl TimetableView, extractor: &Extractor) -> Vec<Entry> {
    match view.snapshot() {
        Ok(snapshot) => extractor.extract(&snapshot),
        Err(e) => {
            warn!("Failed to capture timetable view: {e:#}");
            vec![]
        }
    }
}

/// Entries of one class, optionally narrowed to the subjects in
/// `subject_filter`. Empty if the class cannot be selected.
pub fn extract_class_schedule(
    view: &mut impl TimetableView,
    extractor: &Extractor,
    class_name: &str,
    subject_filter: &[String],
) -> Vec<Entry> {
    if !view.select_class(class_name) {
        warn!("Failed to select class {class_name}");
        return vec![];
    }
    let mut entries = extract_current_view(view, extractor);
    entries.retain(|entry| matches_subject_filter(&entry.subject, subject_filter));
    info!("Class {class_name}: {} entries", entries.len());
    entries
}

/// Entries of every subject in turn, concatenated in input order. Subjects
/// that cannot be selected contribute nothing.
pub fn extract_subject_schedule(
    view: &mut impl TimetableView,
    extractor: &Extractor,
    subject_names: &[String],
) -> Vec<Entry> {
    let mut all_subject_data = vec![];
    for subject_name in subject_names {
        if !view.select_subject(subject_name) {
            warn!("Failed to select subject {subject_name}");
            continue;
        }
        let subject_data = extract_current_view(view, extractor);
        info!("Subject {subject_name}: {} entries", subject_data.len());
        all_subject_data.extend(subject_data);
    }
    all_subject_data
}
