//! Missionary photo discovery
//!
//! Photos are dropped into the instance `photos/` folder by hand, named
//! `{surname}-{missionary id}.{extension}`. They are looked up again on every
//! refresh, so a new or deleted photo shows up within one refresh interval
//! even while the roster itself is unchanged.

use crate::models::{Gender, Missionary};
use mboard_common::SyncConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Finds photo files for missionary ids
#[derive(Debug, Clone)]
pub struct PhotoLocator {
    photos_dir: PathBuf,
}

/// URLs used when building a slide's `photo_url`
#[derive(Debug, Clone)]
pub struct PhotoUrls {
    pub photo_prefix: String,
    pub couple_placeholder: String,
    pub sister_placeholder: String,
    pub elder_placeholder: String,
}

impl PhotoUrls {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            photo_prefix: config.photo_url_prefix.clone(),
            couple_placeholder: config.couple_placeholder.clone(),
            sister_placeholder: config.sister_placeholder.clone(),
            elder_placeholder: config.elder_placeholder.clone(),
        }
    }

    /// URL for a slide: the located photo, else a placeholder chosen by
    /// couple first, then gender.
    pub fn photo_url_for(&self, missionary: &Missionary) -> String {
        if !missionary.image_path.is_empty() {
            format!("{}{}", self.photo_prefix, missionary.image_path)
        } else if missionary.couple {
            self.couple_placeholder.clone()
        } else if missionary.gender == Some(Gender::Female) {
            self.sister_placeholder.clone()
        } else {
            self.elder_placeholder.clone()
        }
    }
}

impl PhotoLocator {
    pub fn new(photos_dir: impl Into<PathBuf>) -> Self {
        Self {
            photos_dir: photos_dir.into(),
        }
    }

    pub fn photos_dir(&self) -> &Path {
        &self.photos_dir
    }

    /// Find the photo filename for a missionary id
    ///
    /// Returns the first matching filename in name order, or an empty string
    /// when there is none (including when the folder does not exist).
    pub fn find_photo(&self, missionary_id: i64) -> String {
        let walker = WalkDir::new(&self.photos_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Cannot read photos folder entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if matches_photo_name(&file_name, missionary_id) {
                return file_name.into_owned();
            }
        }

        String::new()
    }

    /// Recompute `image_path` and `photo_url` for every slide in place
    pub fn refresh_photos(&self, missionaries: &mut [Missionary], urls: &PhotoUrls) {
        for missionary in missionaries.iter_mut() {
            let image_path = self.find_photo(missionary.id);
            if !image_path.is_empty() {
                if image_path != missionary.image_path {
                    info!(id = missionary.id, "Photo found for {}", missionary.name);
                }
            } else if !missionary.image_path.is_empty() {
                info!(id = missionary.id, "Photo removed for {}", missionary.name);
            }
            missionary.image_path = image_path;
            missionary.photo_url = urls.photo_url_for(missionary);
        }
    }
}

/// `*-{id}.*`, ignoring hidden files
///
/// The id must sit between a dash and a dot, so `123` never matches the photo
/// of `123456789`.
fn matches_photo_name(file_name: &str, missionary_id: i64) -> bool {
    if file_name.starts_with('.') {
        return false;
    }
    let needle = format!("-{}.", missionary_id);
    file_name.contains(&needle)
}
