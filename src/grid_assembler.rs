use log::debug;

use crate::{
    entry_parser::Entry,
    vocabulary::{Day, TimeSlot},
};

type Cells = [[Option<String>; Day::COUNT]; TimeSlot::COUNT];

/// The weekly table: one row per time slot, one column per day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    cells: Cells,
    overwritten: usize,
}

/// What a grid cell shows for an entry.
pub fn format_label(entry: &Entry) -> String {
    format!("{} {}", entry.subject, entry.location)
}

impl Grid {
    /// Writes every entry into its cell in input order. When two entries share
    /// a cell the later one wins.
    pub fn assemble<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Grid {
        let mut cells = Cells::default();
        let mut overwritten = 0;
        for entry in entries {
            let cell = &mut cells[entry.time.row()][entry.day.column()];
            if let Some(previous) = cell.replace(format_label(entry)) {
                debug!(
                    "{} {}: {:?} replaced by {:?}",
                    entry.day.name(),
                    entry.time.label(),
                    previous,
                    cell
                );
                overwritten += 1;
            }
        }
        Grid { cells, overwritten }
    }

    pub fn cell(&self, time: TimeSlot, day: Day) -> Option<&str> {
        self.cells[time.row()][day.column()].as_deref()
    }

    /// How many writes landed on an already filled cell.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    pub fn filled(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Spreadsheet layout: a header row of day names behind an empty corner,
    /// one blank row, then a row per time slot led by its label.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let width = Day::COUNT + 1;
        let mut rows = Vec::with_capacity(TimeSlot::COUNT + 2);

        let mut header = vec![String::new()];
        header.extend(Day::ALL.iter().map(|day| day.name().to_string()));
        rows.push(header);
        rows.push(vec![String::new(); width]);

        for time in TimeSlot::all() {
            let mut row = Vec::with_capacity(width);
            row.push(time.label().to_string());
            row.extend(
                Day::ALL
                    .iter()
                    .map(|day| self.cell(time, *day).unwrap_or_default().to_string()),
            );
            rows.push(row);
        }
        rows
    }
}
