use crate::{
    DomainResult,
    models::{RawPassword, StoredCredential},
};

/// 資格情報ハッシャー
///
/// 平文のパスワードから、アカウントに保存する資格情報を導出する。
/// 実装は副作用を持たず、同じ入力に対して常に同じ資格情報を返さなければならない。
pub trait CredentialHasher: Sync + Send {
    /// 保存する資格情報を計算する。
    ///
    /// # 引数
    ///
    /// * `raw_password` - 未加工のパスワード
    ///
    /// # 戻り値
    ///
    /// 保存する資格情報。ソルトやアルゴリズムの設定が利用できない場合はエラー
    fn compute_stored_credential(
        &self,
        raw_password: &RawPassword,
    ) -> DomainResult<StoredCredential>;
}
