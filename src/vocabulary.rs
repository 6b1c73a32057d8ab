use serde::{Serialize, Serializer};

/// The five teaching days, in the order they appear as grid columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Day {
    #[serde(rename = "Понеделник")]
    Monday,
    #[serde(rename = "Вторник")]
    Tuesday,
    #[serde(rename = "Среда")]
    Wednesday,
    #[serde(rename = "Четврток")]
    Thursday,
    #[serde(rename = "Петок")]
    Friday,
}

impl Day {
    pub const COUNT: usize = 5;

    pub const ALL: [Day; Day::COUNT] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// The header text the timetable renders for this day.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Понеделник",
            Day::Tuesday => "Вторник",
            Day::Wednesday => "Среда",
            Day::Thursday => "Четврток",
            Day::Friday => "Петок",
        }
    }

    /// Exact match only, no trimming or case folding.
    pub fn from_name(name: &str) -> Option<Day> {
        Self::ALL.into_iter().find(|day| day.name() == name)
    }

    pub fn column(self) -> usize {
        self as usize
    }
}

const TIME_SLOT_LABELS: [&str; 13] = [
    "8:00", "9:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
    "18:00", "19:00", "20:00",
];

/// One of the 13 hourly rows of the timetable, identified by its start label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot(usize);

impl TimeSlot {
    pub const COUNT: usize = TIME_SLOT_LABELS.len();

    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..Self::COUNT).map(TimeSlot)
    }

    /// Looks up a start label such as `"8:00"`. `"08:00"` is not a slot.
    pub fn from_label(label: &str) -> Option<TimeSlot> {
        TIME_SLOT_LABELS
            .iter()
            .position(|slot| *slot == label)
            .map(TimeSlot)
    }

    pub fn label(self) -> &'static str {
        TIME_SLOT_LABELS[self.0]
    }

    pub fn row(self) -> usize {
        self.0
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
