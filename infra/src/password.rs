use secrecy::{ExposeSecret as _, SecretString};
use sha2::{Digest as _, Sha256};

use domain::{
    DomainErrorKind, DomainResult, domain_error,
    models::{RawPassword, StoredCredential},
    password::CredentialHasher,
};
use settings::PasswordSettings;

/// 従来方式の資格情報ハッシャー
///
/// パスワードの後ろに固定のソルトを連結して、SHA-256で1回だけハッシュ化する。
/// 保存済みの資格情報との互換性のために、この方式をビット単位で再現する。
#[derive(Debug, Clone)]
pub struct LegacyCredentialHasher {
    /// ソルト
    salt: SecretString,
}

impl LegacyCredentialHasher {
    /// 従来方式の資格情報ハッシャーを作成する。
    ///
    /// # 引数
    ///
    /// * `settings` - パスワード設定
    ///
    /// # 戻り値
    ///
    /// 資格情報ハッシャー。ソルトが空の場合はエラー
    pub fn new(settings: &PasswordSettings) -> DomainResult<Self> {
        if settings.salt.expose_secret().is_empty() {
            return Err(domain_error(
                DomainErrorKind::Unexpected,
                "The password salt is not configured",
            ));
        }
        Ok(Self {
            salt: settings.salt.clone(),
        })
    }
}

impl Default for LegacyCredentialHasher {
    fn default() -> Self {
        Self {
            salt: PasswordSettings::default().salt,
        }
    }
}

impl CredentialHasher for LegacyCredentialHasher {
    fn compute_stored_credential(
        &self,
        raw_password: &RawPassword,
    ) -> DomainResult<StoredCredential> {
        // パスワード、ソルトの順にUTF-8のバイト列を連結してハッシュ化
        let mut hasher = Sha256::new();
        hasher.update(raw_password.0.expose_secret().as_bytes());
        hasher.update(self.salt.expose_secret().as_bytes());
        StoredCredential::new(hex::encode(hasher.finalize()))
    }
}
