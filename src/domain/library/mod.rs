// SPDX-License-Identifier: MPL-2.0
//! Library item types.
//!
//! A library is a flat, ordered dataset of media records that the grid
//! pages through. Records are identified by a stable id and are only ever
//! changed through patches produced by in-viewer edits.

mod rating;

pub use rating::{rating_bounds, Rating};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

// =============================================================================
// LibraryItem Trait
// =============================================================================

/// A record that can live in a page and be edited in place.
///
/// `apply_patch` must be idempotent: applying the same patch twice leaves
/// the item exactly as applying it once.
pub trait LibraryItem: Clone {
    /// Stable identifier, unchanged by edits.
    type Id: Clone + Eq + Hash + fmt::Debug;

    /// Partial update merged into the item.
    type Patch: Clone + fmt::Debug;

    /// Returns the item's id.
    fn id(&self) -> &Self::Id;

    /// Merges `patch` into the item. Returns `true` if anything changed.
    fn apply_patch(&mut self, patch: &Self::Patch) -> bool;
}

// =============================================================================
// MediaItem
// =============================================================================

/// Identifier of a media record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MediaId(pub u64);

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of media a record points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
    /// Animated GIF or WebP, played like a video.
    AnimatedImage,
}

impl MediaKind {
    /// Stable string form used by select filters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::AnimatedImage => "animated_image",
        }
    }
}

/// Image or video metadata shown in the grid and the lightbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: MediaId,
    pub title: String,
    pub kind: MediaKind,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub captured_on: Option<NaiveDate>,
}

impl MediaItem {
    /// Creates an unrated image record with no tags.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: MediaId(id),
            title: title.into(),
            kind: MediaKind::Image,
            rating: None,
            tags: Vec::new(),
            favorite: false,
            captured_on: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    #[must_use]
    pub fn with_captured_on(mut self, date: NaiveDate) -> Self {
        self.captured_on = Some(date);
        self
    }
}

/// Rating change carried by a [`MediaPatch`].
///
/// Clearing is its own variant so it survives formats that drop `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingEdit {
    Set(Rating),
    Clear,
}

impl RatingEdit {
    /// Rating the item holds once the edit is applied.
    #[must_use]
    pub fn resulting(self) -> Option<Rating> {
        match self {
            Self::Set(rating) => Some(rating),
            Self::Clear => None,
        }
    }
}

/// Edit made from the lightbox. `Some` fields overwrite, `None` fields
/// are left alone, which makes every patch idempotent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingEdit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl MediaPatch {
    /// Patch that sets the rating.
    #[must_use]
    pub fn rating(rating: Rating) -> Self {
        Self {
            rating: Some(RatingEdit::Set(rating)),
            ..Self::default()
        }
    }

    /// Patch that removes the rating.
    #[must_use]
    pub fn clear_rating() -> Self {
        Self {
            rating: Some(RatingEdit::Clear),
            ..Self::default()
        }
    }

    /// Patch that replaces the tag list.
    #[must_use]
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Patch that sets the favorite flag.
    #[must_use]
    pub fn favorite(favorite: bool) -> Self {
        Self {
            favorite: Some(favorite),
            ..Self::default()
        }
    }

    /// Returns `true` if the patch touches no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rating.is_none()
            && self.tags.is_none()
            && self.favorite.is_none()
            && self.title.is_none()
    }
}

impl LibraryItem for MediaItem {
    type Id = MediaId;
    type Patch = MediaPatch;

    fn id(&self) -> &MediaId {
        &self.id
    }

    fn apply_patch(&mut self, patch: &MediaPatch) -> bool {
        let mut changed = false;

        if let Some(edit) = patch.rating {
            let rating = edit.resulting();
            changed |= self.rating != rating;
            self.rating = rating;
        }
        if let Some(tags) = &patch.tags {
            changed |= &self.tags != tags;
            self.tags.clone_from(tags);
        }
        if let Some(favorite) = patch.favorite {
            changed |= self.favorite != favorite;
            self.favorite = favorite;
        }
        if let Some(title) = &patch.title {
            changed |= &self.title != title;
            self.title.clone_from(title);
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_patch_is_idempotent() {
        let mut once = MediaItem::new(1, "sunset.jpg");
        let mut twice = once.clone();
        let patch = MediaPatch::rating(Rating::new(4));

        assert!(once.apply_patch(&patch));
        assert!(twice.apply_patch(&patch));
        assert!(!twice.apply_patch(&patch));
        assert_eq!(once, twice);
        assert_eq!(once.rating, Some(Rating::new(4)));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut item = MediaItem::new(1, "sunset.jpg").with_favorite(true);
        let before = item.clone();

        assert!(MediaPatch::default().is_empty());
        assert!(!item.apply_patch(&MediaPatch::default()));
        assert_eq!(item, before);
    }

    #[test]
    fn clear_rating_removes_existing_rating() {
        let mut item = MediaItem::new(1, "sunset.jpg").with_rating(Rating::new(3));

        assert!(item.apply_patch(&MediaPatch::clear_rating()));
        assert!(item.rating.is_none());
    }

    #[test]
    fn clear_rating_survives_serialization() {
        let text = toml::to_string(&MediaPatch::clear_rating()).expect("serializable");
        let parsed: MediaPatch = toml::from_str(&text).expect("valid toml");

        assert_eq!(parsed, MediaPatch::clear_rating());
        assert!(!parsed.is_empty());

        let mut item = MediaItem::new(1, "sunset.jpg").with_rating(Rating::new(3));
        assert!(item.apply_patch(&parsed));
        assert!(item.rating.is_none());
    }

    #[test]
    fn rating_edit_reads_from_toml() {
        let set: MediaPatch = toml::from_str("rating = { set = 4 }").expect("valid toml");
        let clear: MediaPatch = toml::from_str("rating = \"clear\"").expect("valid toml");
        let untouched: MediaPatch = toml::from_str("favorite = true").expect("valid toml");

        assert_eq!(set, MediaPatch::rating(Rating::new(4)));
        assert_eq!(clear, MediaPatch::clear_rating());
        assert_eq!(untouched.rating, None);
    }

    #[test]
    fn patch_leaves_id_and_untouched_fields_alone() {
        let mut item = MediaItem::new(9, "clip.mp4")
            .with_kind(MediaKind::Video)
            .with_tags(["beach"]);

        item.apply_patch(&MediaPatch::favorite(true));

        assert_eq!(item.id, MediaId(9));
        assert_eq!(item.kind, MediaKind::Video);
        assert_eq!(item.tags, vec!["beach".to_string()]);
        assert!(item.favorite);
    }

    #[test]
    fn tags_patch_replaces_whole_list() {
        let mut item = MediaItem::new(1, "a.png").with_tags(["old", "stale"]);

        item.apply_patch(&MediaPatch::tags(["new"]));

        assert_eq!(item.tags, vec!["new".to_string()]);
    }

    #[test]
    fn media_kind_string_forms_are_stable() {
        assert_eq!(MediaKind::Image.as_str(), "image");
        assert_eq!(MediaKind::Video.as_str(), "video");
        assert_eq!(MediaKind::AnimatedImage.as_str(), "animated_image");
    }
}
