use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::ids::{AccountID, VideoID};
use crate::video::{VideoRef, VideoSummary};

/// Account role. Stored and serialized in upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum Role {
    #[default]
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDENT" => Ok(Role::Student),
            "TEACHER" => Ok(Role::Teacher),
            other => Err(ModelError::InvalidRole(other.to_string())),
        }
    }
}

/// A registered account. The password credential never travels with this
/// value; it stays with the store and the auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    pub id: AccountID,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub photo: Option<String>,
}

impl Account {
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Minimal account projection used inside relation sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountSummary {
    pub id: AccountID,
    pub email: String,
}

/// Input for account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: Role,
    #[cfg_attr(feature = "serde", serde(default))]
    pub photo: Option<String>,
}

/// An account together with a snapshot of every relation set it takes part in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountWithRelations {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub account: Account,
    pub following: Vec<AccountSummary>,
    pub followed_by: Vec<AccountSummary>,
    pub videos: Vec<VideoSummary>,
    pub favorite_videos: Vec<VideoSummary>,
    pub likes: Vec<VideoRef>,
}

impl AccountWithRelations {
    /// An account with every relation set empty.
    pub fn detached(account: Account) -> Self {
        Self {
            account,
            following: Vec::new(),
            followed_by: Vec::new(),
            videos: Vec::new(),
            favorite_videos: Vec::new(),
            likes: Vec::new(),
        }
    }

    pub fn id(&self) -> AccountID {
        self.account.id
    }

    /// Whether `follower` currently follows this account.
    pub fn is_followed_by(&self, follower: AccountID) -> bool {
        self.followed_by.iter().any(|summary| summary.id == follower)
    }

    pub fn is_following(&self, target: AccountID) -> bool {
        self.following.iter().any(|summary| summary.id == target)
    }

    pub fn likes_video(&self, video: VideoID) -> bool {
        self.likes.iter().any(|like| like.id == video)
    }
}
