#![allow(dead_code)]

use anyhow::Result;
use reelnest_core::application::unit_of_work::AppUnitOfWork;
use reelnest_core::domain::{
    AccountService, EngagementService, PublicationService, SocialGraphService,
    VideoService,
};
use reelnest_model::{AccountID, NewAccount, NewVideo, Role, VideoID};

/// Every domain service wired onto one unit of work.
pub struct TestWorld {
    pub unit_of_work: AppUnitOfWork,
    pub accounts: AccountService,
    pub videos: VideoService,
    pub social: SocialGraphService,
    pub engagement: EngagementService,
    pub publication: PublicationService,
}

impl TestWorld {
    pub fn in_memory() -> Self {
        Self::new(AppUnitOfWork::in_memory())
    }

    pub fn new(unit_of_work: AppUnitOfWork) -> Self {
        Self {
            accounts: AccountService::new(&unit_of_work),
            videos: VideoService::new(&unit_of_work),
            social: SocialGraphService::new(&unit_of_work),
            engagement: EngagementService::new(&unit_of_work),
            publication: PublicationService::new(&unit_of_work),
            unit_of_work,
        }
    }

    pub async fn account(&self, name: &str) -> Result<AccountID> {
        let account = self
            .accounts
            .create(
                NewAccount {
                    name: name.to_string(),
                    email: format!("{name}@example.com"),
                    role: Role::Student,
                    photo: None,
                },
                "$argon2id$test",
            )
            .await?;
        Ok(account.id)
    }

    pub async fn draft_video(&self, owner: AccountID) -> Result<VideoID> {
        let video = self
            .videos
            .create(
                NewVideo {
                    title: "Funny Video".to_string(),
                    src: "https://youtu.be/-LFSpfxBcm4".to_string(),
                },
                owner,
            )
            .await?;
        Ok(video.id)
    }

    pub async fn published_video(&self, owner: AccountID) -> Result<VideoID> {
        let video = self.draft_video(owner).await?;
        self.publication.publish(video, owner).await?;
        Ok(video)
    }

    pub async fn followers_of(&self, id: AccountID) -> Result<Vec<AccountID>> {
        let account = self.accounts.find(id).await?;
        Ok(account.followed_by.iter().map(|summary| summary.id).collect())
    }
}
