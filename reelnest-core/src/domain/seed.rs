//! Demo data for local development.

use reelnest_model::{Account, NewAccount, NewVideo, Role, Video};
use tracing::info;

use crate::application::unit_of_work::AppUnitOfWork;
use crate::domain::accounts::AccountService;
use crate::domain::error::RelationResult;
use crate::domain::videos::VideoService;

/// Plain-text password shared by every demo account.
pub const DEMO_PASSWORD: &str = "secret123";

const DEMO_PHOTO: &str = "https://robohash.org/stefan-two";

const DEMO_ACCOUNTS: [(&str, &str, &str, &str); 2] = [
    (
        "john",
        "john@example.com",
        "Funny Video",
        "https://youtu.be/-LFSpfxBcm4",
    ),
    (
        "jane",
        "jane@example.com",
        "Funny Video #2",
        "https://youtu.be/_d4zSb3OR7g",
    ),
];

#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub accounts: Vec<Account>,
    pub videos: Vec<Video>,
    /// Emails that already existed and were left untouched.
    pub skipped: Vec<String>,
}

/// Insert the demo accounts, each owning one draft video. Accounts whose
/// email is already registered are skipped, so running twice is harmless.
///
/// `password_hash` is the stored credential for [`DEMO_PASSWORD`].
pub async fn seed_demo(
    unit_of_work: &AppUnitOfWork,
    password_hash: &str,
) -> RelationResult<SeedReport> {
    let accounts = AccountService::new(unit_of_work);
    let videos = VideoService::new(unit_of_work);
    let mut report = SeedReport::default();

    for (name, email, title, src) in DEMO_ACCOUNTS {
        if accounts.find_by_email(email).await?.is_some() {
            report.skipped.push(email.to_string());
            continue;
        }

        let account = accounts
            .create(
                NewAccount {
                    name: name.to_string(),
                    email: email.to_string(),
                    role: Role::Student,
                    photo: Some(DEMO_PHOTO.to_string()),
                },
                password_hash,
            )
            .await?;
        let video = videos
            .create(
                NewVideo {
                    title: title.to_string(),
                    src: src.to_string(),
                },
                account.id,
            )
            .await?;

        report.accounts.push(account);
        report.videos.push(video);
    }

    info!(
        created = report.accounts.len(),
        skipped = report.skipped.len(),
        "demo seed finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ports::accounts::AccountsRepository;

    #[tokio::test]
    async fn seeding_twice_skips_existing_accounts() {
        let unit_of_work = AppUnitOfWork::in_memory();

        let first = seed_demo(&unit_of_work, "hash").await.unwrap();
        assert_eq!(first.accounts.len(), 2);
        assert!(first.videos.iter().all(|video| !video.published));
        assert_eq!(first.videos[1].title, "Funny Video #2");
        assert_eq!(first.videos[1].author_id, first.accounts[1].id);

        let second = seed_demo(&unit_of_work, "hash").await.unwrap();
        assert!(second.accounts.is_empty());
        assert_eq!(second.skipped, vec!["john@example.com", "jane@example.com"]);
        assert_eq!(unit_of_work.accounts.list_accounts().await.unwrap().len(), 2);
    }
}
