mod config;
mod directory_view;
mod entry_parser;
mod extractor;
mod grid_assembler;
mod publisher;
mod scene;
mod selection;
mod snapshot;
mod snapshot_error;
mod spatial_matcher;
mod text_manipulators;
mod utils;
mod vocabulary;

pub use config::{LoadFromEnv, PublishingConfig, ScrapingConfig};
pub use directory_view::DirectoryView;
pub use entry_parser::{ClassInfo, Entry, parse_payload};
pub use extractor::Extractor;
pub use grid_assembler::{Grid, format_label};
pub use publisher::{GridPublisher, JsonFilePublisher, SheetsApiError, SheetsPublisher};
pub use scene::{Anchor, Block, DayAnchor, Scene, SceneReader, TimeAnchor};
pub use selection::{
    TimetableView, extract_class_schedule, extract_subject_schedule, matches_subject_filter,
};
pub use snapshot::{RectNode, Snapshot, TextNode};
pub use snapshot_error::SnapshotError;
pub use spatial_matcher::{Tolerances, match_block, match_scene, nearest_anchor};
pub use vocabulary::{Day, TimeSlot};
