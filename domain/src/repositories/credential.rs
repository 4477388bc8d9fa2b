use async_trait::async_trait;

use crate::{
    DomainResult,
    models::{Account, AccountIdentifier, StoredCredential},
};

/// 資格情報ストア
///
/// アカウントを一意な識別子で扱う外部のデータストアである。
#[async_trait]
pub trait CredentialStore: Sync + Send {
    /// 識別子でアカウントを取得する。
    ///
    /// # 引数
    ///
    /// * `identifier` - アカウント識別子
    ///
    /// # 戻り値
    ///
    /// アカウント。存在しない場合は`None`
    async fn by_identifier(&self, identifier: &AccountIdentifier) -> DomainResult<Option<Account>>;

    /// アカウントの資格情報と更新日時を更新する。
    ///
    /// アカウントを新規作成してはならない。
    ///
    /// # 引数
    ///
    /// * `identifier` - アカウント識別子
    /// * `stored_credential` - 保存する資格情報
    /// * `updated_at` - 更新日時（UNIXエポックからのミリ秒）
    async fn update_credential(
        &self,
        identifier: &AccountIdentifier,
        stored_credential: &StoredCredential,
        updated_at: i64,
    ) -> DomainResult<()>;
}
