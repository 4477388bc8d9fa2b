mod credential;

pub use credential::*;

use std::marker::PhantomData;

use sqlx::{PgPool, Postgres, Transaction};

use domain::{DomainResult, repository_error};

/// PostgreSQLトランザクション
pub type PgTransaction<'a> = Transaction<'a, Postgres>;

/// PostgreSQLリポジトリ
pub struct PgRepository<T> {
    pub pool: PgPool,
    pub _marker: PhantomData<T>,
}

impl<T> PgRepository<T> {
    /// PostgreSQLリポジトリを作成する。
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// トランザクションを開始する。
    ///
    /// # 戻り値
    ///
    /// トランザクション
    pub async fn begin(&self) -> DomainResult<PgTransaction<'_>> {
        self.pool.begin().await.map_err(repository_error)
    }
}

impl<T> Clone for PgRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

/// トランザクションをコミットする。
///
/// # 引数
///
/// * `tx`: トランザクション
pub async fn commit(tx: PgTransaction<'_>) -> DomainResult<()> {
    tx.commit().await.map_err(repository_error)
}

/// トランザクションをロールバックする。
///
/// # 引数
///
/// * `tx`: トランザクション
pub async fn rollback(tx: PgTransaction<'_>) -> DomainResult<()> {
    tx.rollback().await.map_err(repository_error)
}
