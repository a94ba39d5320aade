//! Session-scoped settings overrides and the effective-settings resolver

use crate::utils::config::{ConfigStore, Resolution, Settings, VideoFormat};
use std::path::PathBuf;

/// Settings changed for the current session only.
///
/// Never written to disk. Each field, when set, wins over the permanent value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOverrides {
    pub save_path: Option<PathBuf>,
    pub resolution: Option<Resolution>,
    pub format: Option<VideoFormat>,
}

impl SessionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.save_path.is_none() && self.resolution.is_none() && self.format.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Apply the overrides on top of `base`, field by field
    pub fn apply(&self, base: Settings) -> Settings {
        Settings {
            save_path: self.save_path.clone().unwrap_or(base.save_path),
            resolution: self.resolution.unwrap_or(base.resolution),
            format: self.format.unwrap_or(base.format),
        }
    }
}

/// Settings to use for the next download.
///
/// Reads the store on every call, so permanent edits show up immediately for
/// any field the session has not overridden.
pub fn effective_settings(store: &ConfigStore, overrides: &SessionOverrides) -> Settings {
    overrides.apply(store.load())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::CONFIG_FILE_NAME;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn permanent() -> Settings {
        Settings {
            save_path: PathBuf::from("/permanent"),
            resolution: Resolution::P1080,
            format: VideoFormat::Mkv,
        }
    }

    #[test]
    fn test_empty_overrides_leave_settings_untouched() {
        let overrides = SessionOverrides::new();
        assert!(overrides.is_empty());
        assert_eq!(overrides.apply(permanent()), permanent());
    }

    #[test]
    fn test_partial_override_only_replaces_set_fields() {
        let overrides = SessionOverrides {
            resolution: Some(Resolution::P360),
            ..Default::default()
        };

        let merged = overrides.apply(permanent());
        assert_eq!(merged.resolution, Resolution::P360);
        assert_eq!(merged.format, VideoFormat::Mkv);
        assert_eq!(merged.save_path, PathBuf::from("/permanent"));
    }

    #[test]
    fn test_clear_removes_all_overrides() {
        let mut overrides = SessionOverrides {
            save_path: Some(PathBuf::from("/tmp/session")),
            resolution: Some(Resolution::P480),
            format: Some(VideoFormat::Webm),
        };
        overrides.clear();
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_effective_settings_tracks_permanent_changes() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE_NAME));
        let overrides = SessionOverrides {
            format: Some(VideoFormat::Webm),
            ..Default::default()
        };

        store.save(&permanent()).unwrap();
        let before = effective_settings(&store, &overrides);
        assert_eq!(before.resolution, Resolution::P1080);
        assert_eq!(before.format, VideoFormat::Webm);

        let mut updated = permanent();
        updated.resolution = Resolution::P720;
        updated.format = VideoFormat::Mp4;
        store.save(&updated).unwrap();

        let after = effective_settings(&store, &overrides);
        assert_eq!(after.resolution, Resolution::P720);
        assert_eq!(after.format, VideoFormat::Webm);
    }

    #[test]
    fn test_cleared_overrides_match_store() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE_NAME));
        store.save(&permanent()).unwrap();

        let mut overrides = SessionOverrides {
            resolution: Some(Resolution::P360),
            ..Default::default()
        };
        overrides.clear();
        assert_eq!(effective_settings(&store, &overrides), store.load());
    }

    fn resolution_strategy() -> impl Strategy<Value = Resolution> {
        prop::sample::select(Resolution::ALL.to_vec())
    }

    fn format_strategy() -> impl Strategy<Value = VideoFormat> {
        prop::sample::select(VideoFormat::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_override_wins_per_field(
            base_res in resolution_strategy(),
            base_fmt in format_strategy(),
            base_path in "[a-z]{1,12}",
            over_res in prop::option::of(resolution_strategy()),
            over_fmt in prop::option::of(format_strategy()),
            over_path in prop::option::of("[a-z]{1,12}"),
        ) {
            let base = Settings {
                save_path: PathBuf::from(&base_path),
                resolution: base_res,
                format: base_fmt,
            };
            let overrides = SessionOverrides {
                save_path: over_path.clone().map(PathBuf::from),
                resolution: over_res,
                format: over_fmt,
            };

            let merged = overrides.apply(base.clone());
            prop_assert_eq!(merged.resolution, over_res.unwrap_or(base.resolution));
            prop_assert_eq!(merged.format, over_fmt.unwrap_or(base.format));
            prop_assert_eq!(
                merged.save_path,
                over_path.map(PathBuf::from).unwrap_or(base.save_path)
            );
        }
    }
}
