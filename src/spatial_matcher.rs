use log::{debug, trace};

use crate::{
    entry_parser::{Entry, parse_payload},
    scene::{Anchor, Block, Scene},
    vocabulary::TimeSlot,
};

/// How far, in the rendered view's units, a block may sit from the anchor it
/// is matched to. Calibrated for the FINKI timetable at its default size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Horizontal distance between a block's center and a day header.
    pub day: f64,
    /// Vertical distance between a block's top edge and a time header.
    pub time: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            day: 300.0,
            time: 100.0,
        }
    }
}

/// The anchor closest to `target`, if it is strictly within `tolerance`.
/// Equidistant anchors resolve to the first one in slice order.
pub fn nearest_anchor<T>(
    anchors: &[Anchor<T>],
    target: f64,
    tolerance: f64,
) -> Option<&Anchor<T>> {
    let mut best: Option<(&Anchor<T>, f64)> = None;
    for anchor in anchors {
        let distance = (anchor.position - target).abs();
        if distance.is_nan() || distance >= tolerance {
            continue;
        }
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((anchor, distance)),
        }
    }
    best.map(|(anchor, _)| anchor)
}

/// Resolves one block to an entry, or `None` if it does not sit in a known
/// day column and time row or carries no text.
pub fn match_block(scene: &Scene, block: &Block, tolerances: Tolerances) -> Option<Entry> {
    if block.payload.is_empty() {
        return None;
    }
    let day = nearest_anchor(&scene.days, block.center_x(), tolerances.day)?.value;
    let time_anchor = nearest_anchor(&scene.times, block.y, tolerances.time)?;
    let Some(time) = TimeSlot::from_label(&time_anchor.value) else {
        trace!("Time header {} is not a timetable slot", time_anchor.value);
        return None;
    };
    Some(parse_payload(&block.payload).into_entry(day, time))
}

pub fn match_scene(scene: &Scene, tolerances: Tolerances) -> Vec<Entry> {
    let entries = scene
        .blocks
        .iter()
        .filter_map(|block| match_block(scene, block, tolerances))
        .collect::<Vec<_>>();
    debug!(
        "Matched {} of {} blocks to the timetable",
        entries.len(),
        scene.blocks.len()
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::Day;

    fn day(value: Day, position: f64) -> Anchor<Day> {
        Anchor { value, position }
    }

    fn time(label: &str, position: f64) -> Anchor<String> {
        Anchor {
            value: label.to_string(),
            position,
        }
    }

    fn block(x: f64, width: f64, y: f64, payload: &str) -> Block {
        Block {
            x,
            y,
            width,
            height: 40.0,
            payload: payload.to_string(),
        }
    }

    fn week_scene(blocks: Vec<Block>) -> Scene {
        Scene {
            days: vec![
                day(Day::Monday, 200.0),
                day(Day::Tuesday, 800.0),
                day(Day::Wednesday, 1400.0),
            ],
            times: vec![
                time("8:00", 50.0),
                time("9:00", 250.0),
                time("10:00", 450.0),
            ],
            blocks,
        }
    }

    #[test]
    fn picks_the_nearest_anchor_not_the_first_in_range() {
        let anchors = vec![time("8:00", 50.0), time("9:00", 120.0)];
        let nearest = nearest_anchor(&anchors, 110.0, 100.0).unwrap();
        assert_eq!(nearest.value, "9:00");
    }

    #[test]
    fn equidistant_anchors_resolve_to_the_first() {
        let anchors = vec![time("8:00", 50.0), time("9:00", 150.0)];
        assert_eq!(nearest_anchor(&anchors, 100.0, 100.0).unwrap().value, "8:00");
    }

    #[test]
    fn tolerance_is_exclusive() {
        let anchors = vec![time("8:00", 50.0)];
        assert!(nearest_anchor(&anchors, 150.0, 100.0).is_none());
        assert!(nearest_anchor(&anchors, 149.5, 100.0).is_some());
        assert!(nearest_anchor::<String>(&[], 0.0, 100.0).is_none());
    }

    #[test]
    fn block_inside_one_cell_yields_one_entry() {
        let scene = week_scene(vec![block(780.0, 40.0, 260.0, "Физика\nД-р Х\nЛаб 1")]);
        let entries = match_scene(&scene, Tolerances::default());
        assert_eq!(
            entries,
            vec![Entry {
                day: Day::Tuesday,
                time: TimeSlot::from_label("9:00").unwrap(),
                subject: "Физика".to_string(),
                professor: "Д-р Х".to_string(),
                location: "Лаб 1".to_string(),
            }]
        );
    }

    #[test]
    fn block_far_from_every_day_is_dropped() {
        let scene = week_scene(vec![block(2500.0, 40.0, 50.0, "Math")]);
        assert!(match_scene(&scene, Tolerances::default()).is_empty());
    }

    #[test]
    fn block_far_from_every_time_is_dropped() {
        let scene = week_scene(vec![block(180.0, 40.0, 900.0, "Math")]);
        assert!(match_scene(&scene, Tolerances::default()).is_empty());
    }

    #[test]
    fn unknown_time_header_drops_the_block() {
        let mut scene = week_scene(vec![block(180.0, 40.0, 650.0, "Math")]);
        scene.times.push(time("07:30", 650.0));
        assert!(match_scene(&scene, Tolerances::default()).is_empty());
    }

    #[test]
    fn empty_tooltip_is_not_an_entry() {
        let scene = week_scene(vec![block(180.0, 40.0, 50.0, "")]);
        assert!(match_scene(&scene, Tolerances::default()).is_empty());
    }

    #[test]
    fn tighter_tolerances_reject_loose_blocks() {
        let scene = week_scene(vec![block(300.0, 40.0, 80.0, "Math")]);
        assert_eq!(match_scene(&scene, Tolerances::default()).len(), 1);
        let tight = Tolerances {
            day: 50.0,
            time: 20.0,
        };
        assert!(match_scene(&scene, tight).is_empty());
    }

    #[test]
    fn keeps_block_order() {
        let scene = week_scene(vec![
            block(1380.0, 40.0, 450.0, "C"),
            block(180.0, 40.0, 50.0, "A"),
            block(780.0, 40.0, 250.0, "B"),
        ]);
        let subjects: Vec<_> = match_scene(&scene, Tolerances::default())
            .into_iter()
            .map(|entry| entry.subject)
            .collect();
        assert_eq!(subjects, vec!["C", "A", "B"]);
    }
}
