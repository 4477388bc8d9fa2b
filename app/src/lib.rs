pub mod args;
pub mod outcome;

use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File};
use sqlx::postgres::PgPoolOptions;
use tracing::{Subscriber, subscriber::set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt as _};

use domain::{models::ResetRequest, password::CredentialHasher, repositories::CredentialStore};
use infra::{password::LegacyCredentialHasher, postgres::repositories::PgCredentialStore};
use settings::{AppSettings, DEFAULT_PASSWORD_SALT, DatabaseSettings};
use use_case::credential::ResetCredentialUseCase;
use utils::time::now_epoch_millis;

use crate::{args::parse_arguments, outcome::ResetOutcome};

/// 既定の設定ファイル
pub const DEFAULT_SETTINGS_FILE: &str = "app_settings.toml";
/// 設定を上書きする環境変数の接頭辞
pub const ENV_PREFIX: &str = "APP";

/// アプリケーション設定を読み込む。
///
/// 既定値、設定ファイル、`APP__`で始まる環境変数の順に読み込み、後から読み込んだ値を優先する。
/// 設定ファイルは存在しなくてもよい。
pub fn load_app_settings(path: Option<&str>) -> anyhow::Result<AppSettings> {
    build_app_settings(
        path.unwrap_or(DEFAULT_SETTINGS_FILE),
        Environment::with_prefix(ENV_PREFIX).separator("__"),
    )
}

fn build_app_settings(path: &str, environment: Environment) -> anyhow::Result<AppSettings> {
    let config = Config::builder()
        .set_default("application.log_level", "INFO")?
        .set_default("database.host", "localhost")?
        .set_default("database.port", 5432_i64)?
        .set_default("database.user", "postgres")?
        .set_default("database.password", "")?
        .set_default("database.name", "postgres")?
        .set_default("database.max_connections", 1_i64)?
        .set_default("database.connection_timeout", 10_i64)?
        .set_default("database.require_ssl", false)?
        .set_default("password.salt", DEFAULT_PASSWORD_SALT)?
        .add_source(File::with_name(path).required(false))
        .add_source(environment)
        .build()
        .with_context(|| format!("Failed to read the settings from {path}"))?;
    config
        .try_deserialize()
        .with_context(|| format!("The contents of the settings from {path} is incorrect"))
}

pub async fn create_pg_pool(settings: &DatabaseSettings) -> anyhow::Result<sqlx::PgPool> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.connection_timeout))
        .connect_with(settings.connect_options())
        .await
        .context("Failed to connect to the database")
}

pub fn get_subscriber<Sink>(
    name: String,
    log_level: log::Level,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init().context("Failed to set logger")?;
    set_global_default(subscriber).context("Failed to set subscriber")
}

/// アカウントのパスワードをリセットして、その結果を返す。
///
/// 更新日時には現在日時を使用する。
pub async fn reset_password<CS, H>(
    use_case: &ResetCredentialUseCase<CS, H>,
    request: &ResetRequest,
) -> ResetOutcome
where
    CS: CredentialStore,
    H: CredentialHasher,
{
    use_case.reset(request, now_epoch_millis()).await.into()
}

/// 別のタスクで実行して、パニックした場合は予期しないエラーとして返す。
pub async fn catch_unexpected<F>(future: F) -> ResetOutcome
where
    F: Future<Output = ResetOutcome> + Send + 'static,
{
    match tokio::spawn(future).await {
        Ok(outcome) => outcome,
        Err(e) => ResetOutcome::UnexpectedError(e.to_string()),
    }
}

/// コマンドライン引数からパスワードリセットを実行して、その結果を返す。
///
/// # 引数
///
/// * `tokens` - プログラム名を除いたコマンドライン引数
pub async fn run(tokens: Vec<String>) -> ResetOutcome {
    // コマンドライン引数を検証
    let arguments = match parse_arguments(tokens) {
        Ok(arguments) => arguments,
        Err(e) => return e.into(),
    };

    // アプリケーション設定を読み込み
    let app_settings = match load_app_settings(arguments.config_path.as_deref()) {
        Ok(app_settings) => app_settings,
        Err(e) => return ResetOutcome::UnexpectedError(format!("{e:#}")),
    };
    let subscriber = get_subscriber(
        "reset_password".into(),
        app_settings.application.log_level,
        std::io::stderr,
    );
    if let Err(e) = init_subscriber(subscriber) {
        return ResetOutcome::UnexpectedError(format!("{e:#}"));
    }
    let hasher = match LegacyCredentialHasher::new(&app_settings.password) {
        Ok(hasher) => hasher,
        Err(e) => return e.into(),
    };

    // データベース接続プールを作成
    let pool = match create_pg_pool(&app_settings.database).await {
        Ok(pool) => pool,
        Err(e) => return ResetOutcome::StoreError(format!("{e:#}")),
    };
    tracing::info!(
        host = %app_settings.database.host,
        database = %app_settings.database.name,
        "connected to the credential store"
    );

    // パニックした場合も接続プールを閉じられるように、別のタスクで実行
    let use_case = ResetCredentialUseCase::new(PgCredentialStore::new(pool.clone()), hasher);
    let request = arguments.request;
    let outcome =
        catch_unexpected(async move { reset_password(&use_case, &request).await }).await;

    // 結果に関わらず接続プールを閉じる
    pool.close().await;
    outcome
}
