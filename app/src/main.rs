use std::process::ExitCode;

use app::{catch_unexpected, run};

/// アプリケーションエントリーポイント
///
/// 終了ステータスは、パスワードリセットの結果からここでだけ決定する。
#[tokio::main]
async fn main() -> ExitCode {
    let tokens = std::env::args().skip(1).collect::<Vec<_>>();
    let outcome = catch_unexpected(run(tokens)).await;
    outcome.report();
    outcome.exit_code()
}
