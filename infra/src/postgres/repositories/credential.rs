use async_trait::async_trait;
use secrecy::{ExposeSecret as _, SecretString};

use domain::{
    DomainError, DomainErrorKind, DomainResult, domain_error,
    models::{Account, AccountIdentifier, StoredCredential},
    repositories::CredentialStore,
    repository_error,
};

use super::{PgRepository, commit, rollback};

#[derive(sqlx::FromRow)]
struct AccountRow {
    email: String,
    password_hash: String,
    updated_at: Option<i64>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            identifier: row.email.try_into()?,
            stored_credential: SecretString::from(row.password_hash),
            updated_at: row.updated_at,
        })
    }
}

pub type PgCredentialStore = PgRepository<Account>;

#[async_trait]
impl CredentialStore for PgCredentialStore {
    /// 識別子でアカウントを取得する。
    #[tracing::instrument(skip(self), err)]
    async fn by_identifier(&self, identifier: &AccountIdentifier) -> DomainResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT email, password_hash, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(&identifier.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;
        row.map(Account::try_from).transpose()
    }

    /// アカウントの資格情報と更新日時を更新する。
    #[tracing::instrument(skip(self, stored_credential), err)]
    async fn update_credential(
        &self,
        identifier: &AccountIdentifier,
        stored_credential: &StoredCredential,
        updated_at: i64,
    ) -> DomainResult<()> {
        let mut tx = self.begin().await?;
        let affected_rows = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $1, updated_at = $2
            WHERE email = $3
            "#,
        )
        .bind(stored_credential.0.expose_secret())
        .bind(updated_at)
        .bind(&identifier.0)
        .execute(&mut *tx)
        .await
        .map_err(repository_error)?;
        match affected_rows.rows_affected() {
            0 => {
                rollback(tx).await?;
                account_not_found(identifier)
            }
            1 => commit(tx).await,
            n => {
                // 識別子は一意なので、複数行の更新は確定させない
                rollback(tx).await?;
                Err(domain_error(
                    DomainErrorKind::Unexpected,
                    format!("{n} accounts matched the identifier {identifier}"),
                ))
            }
        }
    }
}

fn account_not_found<T>(identifier: &AccountIdentifier) -> DomainResult<T> {
    Err(domain_error(
        DomainErrorKind::NotFound,
        format!("No account found with identifier {identifier}"),
    ))
}
