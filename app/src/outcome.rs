use std::{borrow::Cow, fmt, process::ExitCode};

use domain::{DomainError, DomainErrorKind, DomainResult, models::AccountIdentifier};

use crate::args::USAGE;

/// パスワードリセットの結果
///
/// プロセスの終了ステータスは、この結果からだけ決定する。
#[derive(Debug)]
pub enum ResetOutcome {
    /// 資格情報を更新した
    Success(AccountIdentifier),
    /// コマンドライン引数が不正
    UsageError(Vec<Cow<'static, str>>),
    /// アカウントが存在しない
    NotFound(String),
    /// 資格情報ストアでエラーが発生した
    StoreError(String),
    /// 予期しないエラーが発生した
    UnexpectedError(String),
}

impl ResetOutcome {
    /// 終了ステータスコードを返す。
    pub fn status_code(&self) -> u8 {
        match self {
            Self::Success(_) => 0,
            Self::UnexpectedError(_) => 1,
            Self::UsageError(_) => 2,
            Self::NotFound(_) => 3,
            Self::StoreError(_) => 4,
        }
    }

    /// プロセスの終了コードを返す。
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status_code())
    }

    /// 結果をオペレーターに報告する。
    ///
    /// 成功した場合は標準出力に、それ以外は標準エラー出力に出力する。
    pub fn report(&self) {
        match self {
            Self::Success(_) => println!("{self}"),
            Self::UsageError(messages) => {
                if !messages.is_empty() {
                    eprintln!("{self}");
                }
                eprintln!("{USAGE}");
            }
            _ => eprintln!("{self}"),
        }
    }
}

impl fmt::Display for ResetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(identifier) => write!(f, "✓ Password updated for {identifier}"),
            Self::UsageError(messages) => write!(f, "❌ Usage error: {}", messages.join(", ")),
            Self::NotFound(message) => write!(f, "❌ {message}"),
            Self::StoreError(message) => write!(f, "❌ Error resetting password: {message}"),
            Self::UnexpectedError(message) => write!(f, "❌ Unexpected error: {message}"),
        }
    }
}

impl From<DomainError> for ResetOutcome {
    fn from(error: DomainError) -> Self {
        match error.kind {
            DomainErrorKind::Validation => Self::UsageError(error.messages),
            DomainErrorKind::NotFound => Self::NotFound(error.to_string()),
            DomainErrorKind::Repository => Self::StoreError(error.to_string()),
            DomainErrorKind::Unexpected => Self::UnexpectedError(error.to_string()),
        }
    }
}

impl From<DomainResult<AccountIdentifier>> for ResetOutcome {
    fn from(result: DomainResult<AccountIdentifier>) -> Self {
        match result {
            Ok(identifier) => Self::Success(identifier),
            Err(e) => e.into(),
        }
    }
}
