use std::fmt;

use async_trait::async_trait;
use reelnest_model::{AccountID, EngagementKind, VideoID};

use crate::error::Result;

/// Identifies a single stored edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeRef {
    /// `follower` follows `target`.
    Follow {
        follower: AccountID,
        target: AccountID,
    },
    /// `account` has a `kind` engagement with `video`.
    Engagement {
        account: AccountID,
        video: VideoID,
        kind: EngagementKind,
    },
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeRef::Follow { follower, target } => {
                write!(f, "follow {follower} -> {target}")
            }
            EdgeRef::Engagement {
                account,
                video,
                kind,
            } => write!(f, "{kind} {account} -> {video}"),
        }
    }
}

/// Outcome of a conditional edge mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChange {
    Applied,
    /// The condition no longer held at write time and nothing was written.
    Unchanged,
}

impl EdgeChange {
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            EdgeChange::Applied
        } else {
            EdgeChange::Unchanged
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, EdgeChange::Applied)
    }
}

/// Edge connect/disconnect primitives.
///
/// Every call is a single atomic check-and-set: `connect` writes only when the
/// edge is absent and `disconnect` only when it is present. Engagement edges
/// additionally require the video to be published at write time.
#[async_trait]
pub trait EdgesRepository: Send + Sync {
    async fn connect(&self, edge: EdgeRef) -> Result<EdgeChange>;
    async fn disconnect(&self, edge: EdgeRef) -> Result<EdgeChange>;
}
