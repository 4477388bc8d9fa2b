use std::collections::HashMap;

use domain::{DomainError, DomainErrorKind, DomainResult, models::ResetRequest};

/// 使用方法
pub const USAGE: &str = "Usage: reset_password --email user@example.com --password newPassword [--config app_settings.toml]";

/// フラグの値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// 値が続かなかったフラグ（値は`"true"`とみなすが、必須フラグの値には使用しない）
    Bare,
    /// 値が指定されたフラグ
    Value(String),
}

impl FlagValue {
    fn into_value(self) -> Option<String> {
        match self {
            Self::Bare => None,
            Self::Value(value) => Some(value),
        }
    }
}

/// コマンドライン引数
#[derive(Debug, Clone)]
pub struct Arguments {
    /// パスワードリセット要求
    pub request: ResetRequest,
    /// 設定ファイルのパス
    pub config_path: Option<String>,
}

/// トークンのリストからフラグ名とフラグの値のマップを作成する。
///
/// `--`で始まるトークンはフラグ名で、次のトークンが`--`で始まらない場合は、そのトークンを
/// フラグの値として消費する。同じフラグが複数回指定された場合は、最後の値を採用する。
/// フラグの値として消費されなかった、`--`で始まらないトークンは無視する。
pub fn parse_flags<I, S>(tokens: I) -> HashMap<String, FlagValue>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tokens = tokens.into_iter().map(Into::into).peekable();
    let mut flags = HashMap::new();
    while let Some(token) = tokens.next() {
        let Some(name) = token.strip_prefix("--") else {
            continue;
        };
        let value = match tokens.next_if(|next| !next.starts_with("--")) {
            Some(value) => FlagValue::Value(value),
            None => FlagValue::Bare,
        };
        flags.insert(name.to_string(), value);
    }
    flags
}

/// コマンドライン引数を検証して、パスワードリセット要求を作成する。
///
/// # 引数
///
/// * `tokens` - プログラム名を除いたコマンドライン引数
///
/// # 戻り値
///
/// コマンドライン引数。`--email`または`--password`が存在しないか、値が続かなかった場合は
/// 検証エラー
pub fn parse_arguments<I, S>(tokens: I) -> DomainResult<Arguments>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut flags = parse_flags(tokens);
    if flags.contains_key("help") {
        return Err(DomainError {
            kind: DomainErrorKind::Validation,
            messages: vec![],
            source: anyhow::anyhow!("help requested"),
        });
    }
    let identifier = flags.remove("email").and_then(FlagValue::into_value);
    let new_password = flags.remove("password").and_then(FlagValue::into_value);
    let request = ResetRequest::new(identifier, new_password)?;
    let config_path = flags.remove("config").and_then(FlagValue::into_value);
    Ok(Arguments {
        request,
        config_path,
    })
}
