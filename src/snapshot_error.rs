#[derive(Debug)]
pub struct SnapshotError {
    details: String,
}

impl SnapshotError {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
        }
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SnapshotError: {}", self.details)
    }
}

impl std::error::Error for SnapshotError {}
