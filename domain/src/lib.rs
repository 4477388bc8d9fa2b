use std::borrow::Cow;

pub mod models;
pub mod password;
pub mod repositories;

/// ドメインエラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainErrorKind {
    /// 検証エラー
    Validation,
    /// エンティティが存在しない
    NotFound,
    /// リポジトリ（資格情報ストア）のエラー
    Repository,
    /// 予期しないエラー
    Unexpected,
}

/// ドメインエラー
#[derive(Debug, thiserror::Error)]
#[error("{}", .messages.join(", "))]
pub struct DomainError {
    /// エラーの種類
    pub kind: DomainErrorKind,
    /// エラーメッセージ
    pub messages: Vec<Cow<'static, str>>,
    /// 元となったエラー
    #[source]
    pub source: anyhow::Error,
}

/// ドメイン結果
pub type DomainResult<T> = Result<T, DomainError>;

/// メッセージから元となるエラーを生成して、ドメインエラーを返す。
///
/// # 引数
///
/// * `kind` - エラーの種類
/// * `message` - エラーメッセージ
pub fn domain_error(kind: DomainErrorKind, message: impl Into<Cow<'static, str>>) -> DomainError {
    let message = message.into();
    DomainError {
        kind,
        messages: vec![message.clone()],
        source: anyhow::anyhow!(message),
    }
}

/// リポジトリで発生したエラーをドメインエラーに変換する。
pub fn repository_error<E>(error: E) -> DomainError
where
    E: std::error::Error + Send + Sync + 'static,
{
    DomainError {
        kind: DomainErrorKind::Repository,
        messages: vec![error.to_string().into()],
        source: error.into(),
    }
}
