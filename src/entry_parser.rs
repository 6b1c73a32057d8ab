use serde::Serialize;

use crate::vocabulary::{Day, TimeSlot};

/// A resolved timetable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub day: Day,
    pub time: TimeSlot,
    pub subject: String,
    pub professor: String,
    pub location: String,
}

/// The three tooltip lines of a class block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassInfo {
    pub subject: String,
    pub professor: String,
    pub location: String,
}

impl ClassInfo {
    pub fn into_entry(self, day: Day, time: TimeSlot) -> Entry {
        Entry {
            day,
            time,
            subject: self.subject,
            professor: self.professor,
            location: self.location,
        }
    }
}

/// Splits a tooltip into subject, professor and location lines. Missing lines
/// are empty, extra lines are ignored and nothing is trimmed.
pub fn parse_payload(payload: &str) -> ClassInfo {
    let mut lines = payload.split('\n');
    let mut next_line = || lines.next().unwrap_or_default().to_string();
    ClassInfo {
        subject: next_line(),
        professor: next_line(),
        location: next_line(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(subject: &str, professor: &str, location: &str) -> ClassInfo {
        ClassInfo {
            subject: subject.to_string(),
            professor: professor.to_string(),
            location: location.to_string(),
        }
    }

    #[test]
    fn subject_only() {
        assert_eq!(parse_payload("Math"), info("Math", "", ""));
    }

    #[test]
    fn subject_and_professor() {
        assert_eq!(parse_payload("Math\nSmith"), info("Math", "Smith", ""));
    }

    #[test]
    fn all_three_fields() {
        assert_eq!(
            parse_payload("Math\nSmith\nRoom 4"),
            info("Math", "Smith", "Room 4")
        );
    }

    #[test]
    fn extra_lines_are_dropped_and_text_is_verbatim() {
        assert_eq!(
            parse_payload(" Math \n\nRoom 4\nweeks 1-15"),
            info(" Math ", "", "Room 4")
        );
        assert_eq!(parse_payload("Math\r\nSmith"), info("Math\r", "Smith", ""));
    }

    #[test]
    fn empty_payload_gives_empty_fields() {
        assert_eq!(parse_payload(""), ClassInfo::default());
    }
}
