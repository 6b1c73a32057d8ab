use crate::{
    entry_parser::Entry,
    scene::SceneReader,
    snapshot::Snapshot,
    spatial_matcher::{Tolerances, match_scene},
};

/// Turns one rendered view into timetable entries.
pub struct Extractor {
    pub scene_reader: SceneReader,
    pub tolerances: Tolerances,
}

impl Extractor {
    pub fn new(tolerances: Tolerances) -> anyhow::Result<Self> {
        let scene_reader = SceneReader::new()?;
        Ok(Extractor {
            scene_reader,
            tolerances,
        })
    }

    pub fn extract(&self, snapshot: &Snapshot) -> Vec<Entry> {
        let scene = self.scene_reader.read(snapshot);
        match_scene(&scene, self.tolerances)
    }
}
