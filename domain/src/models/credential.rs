use secrecy::{ExposeSecret as _, SecretString};

use crate::{DomainError, DomainErrorKind, DomainResult, domain_error, models::AccountIdentifier};

/// 保存する資格情報の文字数（256ビットダイジェストの16進数表現）
pub const STORED_CREDENTIAL_LENGTH: usize = 64;

/// 未加工のパスワード
///
/// オペレーターが指定した平文のパスワードで、空白を含めてそのままハッシュ化する。
#[derive(Debug, Clone)]
pub struct RawPassword(pub SecretString);

impl RawPassword {
    pub fn new(value: SecretString) -> DomainResult<Self> {
        if value.expose_secret().is_empty() {
            return Err(domain_error(
                DomainErrorKind::Validation,
                "The password must not be empty",
            ));
        }
        Ok(Self(value))
    }
}

/// 保存する資格情報
///
/// 平文のパスワードから導出した、一方向で決定的な16進数の小文字文字列である。
/// アカウントのレコード以外に保存またはキャッシュしない。
#[derive(Debug, Clone)]
pub struct StoredCredential(pub SecretString);

impl StoredCredential {
    pub fn new(value: String) -> DomainResult<Self> {
        let is_lower_hex = value
            .chars()
            .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch));
        if value.len() != STORED_CREDENTIAL_LENGTH || !is_lower_hex {
            let message = format!(
                "The stored credential must be {} lowercase hexadecimal characters",
                STORED_CREDENTIAL_LENGTH
            );
            return Err(DomainError {
                kind: DomainErrorKind::Unexpected,
                messages: vec![message.clone().into()],
                source: anyhow::anyhow!(message),
            });
        }
        Ok(Self(SecretString::from(value)))
    }
}

/// パスワードリセット要求
///
/// 構築後は変更しない。
#[derive(Debug, Clone)]
pub struct ResetRequest {
    /// リセットするアカウントの識別子
    pub identifier: AccountIdentifier,
    /// 新しいパスワード
    pub new_password: RawPassword,
}

impl ResetRequest {
    /// パスワードリセット要求を構築する。
    ///
    /// # 引数
    ///
    /// * `identifier` - アカウント識別子（`--email`の値）
    /// * `new_password` - 新しいパスワード（`--password`の値）
    ///
    /// # 戻り値
    ///
    /// パスワードリセット要求。どちらかが存在しないか空の場合は、不足しているすべての項目を
    /// メッセージに含めた検証エラー
    pub fn new(identifier: Option<String>, new_password: Option<String>) -> DomainResult<Self> {
        let identifier = identifier
            .ok_or_else(|| missing("email"))
            .and_then(|value| AccountIdentifier::new(value).map_err(|_| missing("email")));
        let new_password = new_password
            .ok_or_else(|| missing("password"))
            .and_then(|value| {
                RawPassword::new(SecretString::from(value)).map_err(|_| missing("password"))
            });
        match (identifier, new_password) {
            (Ok(identifier), Ok(new_password)) => Ok(Self {
                identifier,
                new_password,
            }),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
            (Err(mut e1), Err(e2)) => {
                e1.messages.extend(e2.messages);
                Err(e1)
            }
        }
    }
}

fn missing(flag: &'static str) -> DomainError {
    domain_error(
        DomainErrorKind::Validation,
        format!("The --{flag} flag is required and must not be empty"),
    )
}
