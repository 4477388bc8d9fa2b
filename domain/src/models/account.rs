use secrecy::SecretString;

use crate::impl_string_primitive;

/// アカウント識別子
///
/// アカウントのEメールアドレスまたはユーザー名で、資格情報ストアの一意キーである。
/// 大文字と小文字を区別して、保存された値と完全一致で比較する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, garde::Validate)]
pub struct AccountIdentifier(#[garde(length(chars, min = 1))] pub String);
impl_string_primitive!(AccountIdentifier);

/// アカウント
///
/// 資格情報ストアが所有するレコードで、このクレートからは読み取り専用である。
/// パスワードのリセットでは、`stored_credential`と`updated_at`のみを上書きする。
#[derive(Debug, Clone)]
pub struct Account {
    /// アカウント識別子
    pub identifier: AccountIdentifier,
    /// 保存されている資格情報
    pub stored_credential: SecretString,
    /// 更新日時（UNIXエポックからのミリ秒）
    pub updated_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("admin@example.com", true)]
    #[case("Admin@Example.com", true)]
    #[case("admin", true)]
    #[case("", false)]
    fn test_account_identifier(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(AccountIdentifier::new(value.into()).is_ok(), expected);
    }

    #[test]
    fn test_long_account_identifier_is_accepted() -> anyhow::Result<()> {
        let value = "a".repeat(250) + "@example.com";
        let identifier = AccountIdentifier::new(value.clone())?;
        assert_eq!(&*identifier, value);
        Ok(())
    }

    #[test]
    fn test_account_identifier_is_case_sensitive() -> anyhow::Result<()> {
        let lower = AccountIdentifier::new("admin@example.com".into())?;
        let upper = AccountIdentifier::new("ADMIN@example.com".into())?;
        assert_ne!(lower, upper);
        Ok(())
    }
}
