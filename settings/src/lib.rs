use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// パスワードをハッシュ化するときの既定のソルト
///
/// 保存済みの資格情報と互換性を保つため、既定値は従来の値から変更してはならない。
pub const DEFAULT_PASSWORD_SALT: &str = "salt-change-in-production";

/// アプリケーション設定
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// アプリケーション設定
    pub application: ApplicationSettings,
    /// データベース設定
    pub database: DatabaseSettings,
    /// パスワード設定
    pub password: PasswordSettings,
}

/// アプリケーション設定
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    /// ログレベル
    pub log_level: log::Level,
}

/// データベース設定
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// ホスト名
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// ユーザー名
    pub user: String,
    /// パスワード
    pub password: SecretString,
    /// データベース名
    pub name: String,
    /// 最大接続数
    pub max_connections: u32,
    /// 接続タイムアウト（秒）
    pub connection_timeout: u64,
    /// SSL接続を要求するか
    pub require_ssl: bool,
}

/// パスワード設定
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordSettings {
    /// ソルト
    pub salt: SecretString,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            salt: SecretString::from(DEFAULT_PASSWORD_SALT.to_string()),
        }
    }
}

impl DatabaseSettings {
    /// データベース接続オプションを返す。
    pub fn connect_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.name)
            .ssl_mode(ssl_mode)
    }
}
