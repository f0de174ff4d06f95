use bevy::prelude::*;

/// Loading milestones. Configuration counts as resolved once it is either
/// parsed or has failed to load; the scene must actually spawn.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub scene_spawned: bool,
    pub positions_resolved: bool,
    pub content_resolved: bool,
}

impl LoadingProgress {
    pub fn is_loaded(&self) -> bool {
        self.scene_spawned && self.positions_resolved && self.content_resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loaded_needs_scene_and_both_files() {
        let mut progress = LoadingProgress {
            positions_resolved: true,
            content_resolved: true,
            ..default()
        };
        assert!(!progress.is_loaded());

        progress.scene_spawned = true;
        assert!(progress.is_loaded());

        progress.content_resolved = false;
        assert!(!progress.is_loaded());
    }
}
