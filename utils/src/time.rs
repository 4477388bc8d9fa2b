use time::OffsetDateTime;

/// 日時をUNIXエポックからのミリ秒に変換する。
pub fn to_epoch_millis(dt: OffsetDateTime) -> i64 {
    (dt.unix_timestamp_nanos() / 1_000_000) as i64
}

/// 現在日時をUNIXエポックからのミリ秒で返す。
pub fn now_epoch_millis() -> i64 {
    to_epoch_millis(OffsetDateTime::now_utc())
}
