use secrecy::{ExposeSecret as _, SecretString};

use domain::{models::RawPassword, password::CredentialHasher as _};
use infra::password::LegacyCredentialHasher;
use settings::PasswordSettings;

/// 従来方式で保存する資格情報を出力する。
///
/// ソルトは`APP__PASSWORD__SALT`環境変数で上書きできる。
fn main() -> anyhow::Result<()> {
    let args = std::env::args().collect::<Vec<String>>();
    if args.len() != 2 {
        anyhow::bail!("Usage: gen_legacy_credential <password>");
    }
    let settings = match std::env::var("APP__PASSWORD__SALT") {
        Ok(salt) => PasswordSettings {
            salt: SecretString::from(salt),
        },
        Err(_) => PasswordSettings::default(),
    };
    let hasher = LegacyCredentialHasher::new(&settings)?;
    let raw_password = RawPassword::new(SecretString::from(args[1].clone()))?;
    let stored_credential = hasher.compute_stored_credential(&raw_password)?;
    println!("{}", stored_credential.0.expose_secret());
    Ok(())
}
