use log::trace;
use regex::Regex;

use crate::{
    snapshot::{RectNode, Snapshot},
    text_manipulators::range_start,
    utils::sort_by_float_key,
    vocabulary::Day,
};

/// A header label and its position along the axis it labels: `x` for day
/// columns, `y` for time rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor<T> {
    pub value: T,
    pub position: f64,
}

pub type DayAnchor = Anchor<Day>;

/// Carries the start label exactly as rendered. Whether it is one of the
/// canonical slots is decided when a block is matched against it.
pub type TimeAnchor = Anchor<String>;

/// A filled rectangle with a tooltip: a candidate scheduled class.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub payload: String,
}

impl Block {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// `None` for background and decorative rects: no visible fill, no
    /// tooltip, or a coordinate that did not parse.
    pub fn from_rect(rect: &RectNode) -> Option<Block> {
        if !has_visible_fill(rect.fill.as_deref()) {
            return None;
        }
        Some(Block {
            x: rect.x?,
            y: rect.y?,
            width: rect.width?,
            height: rect.height?,
            payload: rect.title.clone()?,
        })
    }
}

fn has_visible_fill(fill: Option<&str>) -> bool {
    match fill.map(str::trim) {
        None | Some("") | Some("transparent") | Some("none") => false,
        Some(_) => true,
    }
}

/// The anchors and blocks of one rendered view, anchors sorted by position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub days: Vec<DayAnchor>,
    pub times: Vec<TimeAnchor>,
    pub blocks: Vec<Block>,
}

pub struct SceneReader {
    // Matches time row headers such as "8:00 - 9:00", anchored at the start.
    time_header_regex: Regex,
}

impl SceneReader {
    pub fn new() -> anyhow::Result<Self> {
        let time_header_regex = Regex::new(r"^\d+:\d+ - \d+:\d+")?;
        Ok(Self { time_header_regex })
    }

    pub fn read(&self, snapshot: &Snapshot) -> Scene {
        let mut days = vec![];
        let mut times = vec![];

        for node in &snapshot.texts {
            if let Some(day) = Day::from_name(&node.text) {
                match node.x {
                    Some(position) => days.push(Anchor {
                        value: day,
                        position,
                    }),
                    None => trace!("Day header {} has no usable x", node.text),
                }
            } else if self.time_header_regex.is_match(&node.text) {
                match node.y {
                    Some(position) => times.push(Anchor {
                        value: range_start(&node.text).to_string(),
                        position,
                    }),
                    None => trace!("Time header {} has no usable y", node.text),
                }
            }
        }

        sort_by_float_key(&mut days, |anchor| anchor.position);
        sort_by_float_key(&mut times, |anchor| anchor.position);

        let blocks = snapshot
            .rects
            .iter()
            .filter_map(Block::from_rect)
            .collect::<Vec<_>>();
        trace!(
            "Scene has {} day anchors, {} time anchors, {} of {} rects as blocks",
            days.len(),
            times.len(),
            blocks.len(),
            snapshot.rects.len()
        );

        Scene {
            days,
            times,
            blocks,
        }
    }
}
