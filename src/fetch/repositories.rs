use super::EventFetcher;
use crate::error::DoraError;
use crate::github::types::RepoMeta;
use crate::models::Repository;
use tracing::info;

#[derive(Debug, Clone, Copy)]
enum AccountKind {
    Organization,
    User,
}

impl From<RepoMeta> for Repository {
    fn from(meta: RepoMeta) -> Self {
        Self {
            name: meta.name,
            full_name: meta.full_name,
            description: meta.description,
            private: meta.private,
            default_branch: meta.default_branch.unwrap_or_else(|| "main".to_string()),
            updated_at: meta.updated_at,
        }
    }
}

impl EventFetcher {
    /// Repositories owned by `account`, most recently updated first.
    ///
    /// The identifier is tried as an organization first; a 404 retries it as
    /// a personal account.
    pub async fn list_repositories(&self, account: &str) -> Result<Vec<Repository>, DoraError> {
        match self.account_repositories(account, AccountKind::Organization).await {
            Ok(repos) => Ok(repos),
            Err(e) if e.is_not_found() => {
                info!("{} is not an organization, listing user repositories", account);
                self.account_repositories(account, AccountKind::User).await
            }
            Err(e) => Err(e),
        }
    }

    async fn account_repositories(&self, account: &str, kind: AccountKind) -> Result<Vec<Repository>, DoraError> {
        let mut repos = Vec::new();
        let mut page = 1;

        loop {
            let items = match kind {
                AccountKind::Organization => self.source.list_org_repositories(account, page).await?,
                AccountKind::User => self.source.list_user_repositories(account, page).await?,
            };
            let page_len = items.len();
            repos.extend(items.into_iter().map(Repository::from));

            if self.is_last_page(page_len) {
                break;
            }
            page += 1;
        }

        Ok(repos)
    }
}
