use std::fmt;

/// The two independent engagement edge kinds between an account and a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EngagementKind {
    Like,
    Favorite,
}

impl EngagementKind {
    pub const ALL: [EngagementKind; 2] =
        [EngagementKind::Like, EngagementKind::Favorite];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementKind::Like => "like",
            EngagementKind::Favorite => "favorite",
        }
    }
}

impl fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
