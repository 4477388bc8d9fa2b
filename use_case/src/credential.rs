use domain::{
    DomainErrorKind, DomainResult, domain_error,
    models::{AccountIdentifier, ResetRequest},
    password::CredentialHasher,
    repositories::CredentialStore,
};

/// 資格情報リセットユースケース
///
/// アカウントの検索、資格情報の計算、資格情報の更新の順に実行する。
/// 資格情報ストアへの問い合わせは、検索の1回と更新の1回だけで、並行に実行しない。
pub struct ResetCredentialUseCase<CS, H>
where
    CS: CredentialStore,
    H: CredentialHasher,
{
    /// 資格情報ストア
    pub credential_store: CS,
    /// 資格情報ハッシャー
    pub hasher: H,
}

impl<CS, H> ResetCredentialUseCase<CS, H>
where
    CS: CredentialStore,
    H: CredentialHasher,
{
    /// 資格情報リセットユースケースを作成する。
    pub fn new(credential_store: CS, hasher: H) -> Self {
        Self {
            credential_store,
            hasher,
        }
    }

    /// アカウントのパスワードをリセットする。
    ///
    /// アカウントが存在しない場合は、資格情報ストアを更新しない。
    ///
    /// # 引数
    ///
    /// * `request` - パスワードリセット要求
    /// * `updated_at` - 更新日時（UNIXエポックからのミリ秒）
    ///
    /// # 戻り値
    ///
    /// 資格情報を更新したアカウントの識別子
    #[tracing::instrument(skip(self, request), fields(identifier = %request.identifier), err)]
    pub async fn reset(
        &self,
        request: &ResetRequest,
        updated_at: i64,
    ) -> DomainResult<AccountIdentifier> {
        // アカウントを検索
        let account = self
            .credential_store
            .by_identifier(&request.identifier)
            .await?
            .ok_or_else(|| {
                domain_error(
                    DomainErrorKind::NotFound,
                    format!("No account found with identifier {}", request.identifier),
                )
            })?;
        // 保存する資格情報を計算
        let stored_credential = self
            .hasher
            .compute_stored_credential(&request.new_password)?;
        // 資格情報を更新
        self.credential_store
            .update_credential(&account.identifier, &stored_credential, updated_at)
            .await?;
        tracing::info!("the stored credential was replaced");
        Ok(account.identifier)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use async_trait::async_trait;
    use secrecy::{ExposeSecret as _, SecretString};

    use domain::models::{Account, RawPassword, StoredCredential};

    use super::*;

    const FIXED_CREDENTIAL: &str =
        "12dcc089649a68f01b426c070ebf4aeb50ebe84d7ca17d0edb14e360564a0d33";

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum StoreCall {
        ByIdentifier(String),
        UpdateCredential(String, String, i64),
    }

    /// 呼び出しを記録するメモリ上の資格情報ストア
    #[derive(Default)]
    struct RecordingStore {
        accounts: Mutex<HashMap<String, (String, Option<i64>)>>,
        calls: Mutex<Vec<StoreCall>>,
        fail_lookup: bool,
        fail_update: bool,
    }

    impl RecordingStore {
        fn with_account(identifier: &str, credential: &str) -> Self {
            let store = Self::default();
            store.accounts.lock().unwrap().insert(
                identifier.to_string(),
                (credential.to_string(), Some(1_000)),
            );
            store
        }

        fn calls(&self) -> Vec<StoreCall> {
            self.calls.lock().unwrap().clone()
        }

        fn credential_of(&self, identifier: &str) -> Option<(String, Option<i64>)> {
            self.accounts.lock().unwrap().get(identifier).cloned()
        }
    }

    #[async_trait]
    impl CredentialStore for RecordingStore {
        async fn by_identifier(
            &self,
            identifier: &AccountIdentifier,
        ) -> DomainResult<Option<Account>> {
            self.calls
                .lock()
                .unwrap()
                .push(StoreCall::ByIdentifier(identifier.0.clone()));
            if self.fail_lookup {
                return Err(domain_error(
                    DomainErrorKind::Repository,
                    "connection refused",
                ));
            }
            Ok(self
                .accounts
                .lock()
                .unwrap()
                .get(&identifier.0)
                .map(|(credential, updated_at)| Account {
                    identifier: identifier.clone(),
                    stored_credential: SecretString::from(credential.clone()),
                    updated_at: *updated_at,
                }))
        }

        async fn update_credential(
            &self,
            identifier: &AccountIdentifier,
            stored_credential: &StoredCredential,
            updated_at: i64,
        ) -> DomainResult<()> {
            let credential = stored_credential.0.expose_secret().to_string();
            self.calls.lock().unwrap().push(StoreCall::UpdateCredential(
                identifier.0.clone(),
                credential.clone(),
                updated_at,
            ));
            if self.fail_update {
                return Err(domain_error(
                    DomainErrorKind::Repository,
                    "permission denied for table users",
                ));
            }
            match self.accounts.lock().unwrap().get_mut(&identifier.0) {
                Some(entry) => {
                    *entry = (credential, Some(updated_at));
                    Ok(())
                }
                None => Err(domain_error(DomainErrorKind::NotFound, "vanished")),
            }
        }
    }

    /// 常に同じ資格情報を返すハッシャー
    struct FixedHasher {
        fail: bool,
    }

    impl CredentialHasher for FixedHasher {
        fn compute_stored_credential(
            &self,
            _raw_password: &RawPassword,
        ) -> DomainResult<StoredCredential> {
            if self.fail {
                return Err(domain_error(
                    DomainErrorKind::Unexpected,
                    "The password salt is not configured",
                ));
            }
            StoredCredential::new(FIXED_CREDENTIAL.to_string())
        }
    }

    fn request(identifier: &str) -> ResetRequest {
        ResetRequest::new(Some(identifier.into()), Some("NewP@ss1".into())).unwrap()
    }

    #[tokio::test]
    async fn test_reset_updates_existing_account() -> anyhow::Result<()> {
        let store = RecordingStore::with_account("admin@example.com", "old");
        let use_case = ResetCredentialUseCase::new(store, FixedHasher { fail: false });

        let identifier = use_case.reset(&request("admin@example.com"), 2_000).await?;

        assert_eq!(&*identifier, "admin@example.com");
        assert_eq!(
            use_case.credential_store.calls(),
            vec![
                StoreCall::ByIdentifier("admin@example.com".into()),
                StoreCall::UpdateCredential(
                    "admin@example.com".into(),
                    FIXED_CREDENTIAL.into(),
                    2_000
                ),
            ]
        );
        assert_eq!(
            use_case.credential_store.credential_of("admin@example.com"),
            Some((FIXED_CREDENTIAL.to_string(), Some(2_000)))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_reset_does_not_create_account() {
        let store = RecordingStore::with_account("admin@example.com", "old");
        let use_case = ResetCredentialUseCase::new(store, FixedHasher { fail: false });

        let error = use_case
            .reset(&request("ghost@example.com"), 2_000)
            .await
            .unwrap_err();

        assert_eq!(error.kind, DomainErrorKind::NotFound);
        assert_eq!(
            use_case.credential_store.calls(),
            vec![StoreCall::ByIdentifier("ghost@example.com".into())]
        );
        assert!(
            use_case
                .credential_store
                .credential_of("ghost@example.com")
                .is_none()
        );
        assert_eq!(
            use_case.credential_store.credential_of("admin@example.com"),
            Some(("old".to_string(), Some(1_000)))
        );
    }

    #[tokio::test]
    async fn test_reset_matches_identifier_case_sensitively() {
        let store = RecordingStore::with_account("admin@example.com", "old");
        let use_case = ResetCredentialUseCase::new(store, FixedHasher { fail: false });

        let error = use_case
            .reset(&request("Admin@Example.com"), 2_000)
            .await
            .unwrap_err();

        assert_eq!(error.kind, DomainErrorKind::NotFound);
        assert_eq!(use_case.credential_store.calls().len(), 1);
    }

    #[rstest::rstest]
    #[case(true, false, 1)]
    #[case(false, true, 2)]
    #[tokio::test]
    async fn test_reset_surfaces_store_errors(
        #[case] fail_lookup: bool,
        #[case] fail_update: bool,
        #[case] number_of_calls: usize,
    ) {
        let store = RecordingStore {
            fail_lookup,
            fail_update,
            ..RecordingStore::with_account("admin@example.com", "old")
        };
        let use_case = ResetCredentialUseCase::new(store, FixedHasher { fail: false });

        let error = use_case
            .reset(&request("admin@example.com"), 2_000)
            .await
            .unwrap_err();

        assert_eq!(error.kind, DomainErrorKind::Repository);
        assert_eq!(use_case.credential_store.calls().len(), number_of_calls);
        assert_eq!(
            use_case.credential_store.credential_of("admin@example.com"),
            Some(("old".to_string(), Some(1_000)))
        );
    }

    #[tokio::test]
    async fn test_reset_does_not_write_when_hashing_fails() {
        let store = RecordingStore::with_account("admin@example.com", "old");
        let use_case = ResetCredentialUseCase::new(store, FixedHasher { fail: true });

        let error = use_case
            .reset(&request("admin@example.com"), 2_000)
            .await
            .unwrap_err();

        assert_eq!(error.kind, DomainErrorKind::Unexpected);
        assert_eq!(
            use_case.credential_store.calls(),
            vec![StoreCall::ByIdentifier("admin@example.com".into())]
        );
    }

    #[tokio::test]
    async fn test_reset_twice_is_idempotent() -> anyhow::Result<()> {
        let store = RecordingStore::with_account("admin@example.com", "old");
        let use_case = ResetCredentialUseCase::new(store, FixedHasher { fail: false });

        use_case.reset(&request("admin@example.com"), 2_000).await?;
        let first = use_case.credential_store.credential_of("admin@example.com");
        use_case.reset(&request("admin@example.com"), 3_000).await?;
        let second = use_case.credential_store.credential_of("admin@example.com");

        assert_eq!(first.map(|(c, _)| c), second.clone().map(|(c, _)| c));
        assert_eq!(second.and_then(|(_, t)| t), Some(3_000));
        Ok(())
    }
}
