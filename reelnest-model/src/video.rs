use crate::account::AccountSummary;
use crate::engagement::EngagementKind;
use crate::ids::{AccountID, VideoID};

/// A published or draft video. `author_id` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Video {
    pub id: VideoID,
    pub title: String,
    pub src: String,
    pub published: bool,
    pub author_id: AccountID,
}

impl Video {
    pub fn summary(&self) -> VideoSummary {
        VideoSummary {
            id: self.id,
            title: self.title.clone(),
        }
    }

    pub fn is_owned_by(&self, account: AccountID) -> bool {
        self.author_id == account
    }
}

/// Minimal video projection used inside relation sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoSummary {
    pub id: VideoID,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoRef {
    pub id: VideoID,
}

/// Input for video creation. The author comes from the acting identity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewVideo {
    pub title: String,
    pub src: String,
}

/// Partial update of a video's descriptive fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoPatch {
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub src: Option<String>,
}

impl VideoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.src.is_none()
    }
}

/// A video together with its engagement edge sets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoWithRelations {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub video: Video,
    pub liked_by: Vec<AccountSummary>,
    pub favorited_by: Vec<AccountSummary>,
}

impl VideoWithRelations {
    pub fn detached(video: Video) -> Self {
        Self {
            video,
            liked_by: Vec::new(),
            favorited_by: Vec::new(),
        }
    }

    pub fn id(&self) -> VideoID {
        self.video.id
    }

    pub fn is_published(&self) -> bool {
        self.video.published
    }

    /// The edge set backing `kind`.
    pub fn engaged(&self, kind: EngagementKind) -> &[AccountSummary] {
        match kind {
            EngagementKind::Like => &self.liked_by,
            EngagementKind::Favorite => &self.favorited_by,
        }
    }

    pub fn is_engaged_by(
        &self,
        kind: EngagementKind,
        account: AccountID,
    ) -> bool {
        self.engaged(kind).iter().any(|summary| summary.id == account)
    }
}
