use crate::name::Name;

/// Where a freshly started development node listens.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8888";

// Transactions stay valid this long past the referenced head block
pub const DEFAULT_EXPIRE_SECONDS: u32 = 30;

/// The privileged system account that creates all others.
pub const SYSTEM_ACCOUNT: Name = Name::from_static("eosio");

/// Where the reference token contract is usually deployed.
pub const TOKEN_ACCOUNT: Name = Name::from_static("eosio.token");

pub const OWNER_PERMISSION: Name = Name::from_static("owner");
pub const ACTIVE_PERMISSION: Name = Name::from_static("active");

/// Virtual permission a contract needs on `active` before it may execute
/// inline actions on the account's behalf.
pub const CODE_PERMISSION: Name = Name::from_static("eosio.code");

/// The stock development key every tutorial chain is bootstrapped with.
/// Unlocks the `eosio` account on a default single-producer node.
pub const DEVELOPMENT_PRIVATE_KEY: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
pub const DEVELOPMENT_PUBLIC_KEY: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

// Valid characters for generated test account names: no '.', no 13th char
pub const ACCOUNT_NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz12345";
pub const GENERATED_NAME_LENGTH: usize = 12;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SecretKey;

    #[test]
    fn test_name_constants() {
        assert_eq!(SYSTEM_ACCOUNT.to_string(), "eosio");
        assert_eq!(TOKEN_ACCOUNT.to_string(), "eosio.token");
        assert_eq!(CODE_PERMISSION.to_string(), "eosio.code");
    }

    #[test]
    fn test_development_key_pair_matches() {
        let secret = SecretKey::from_wif(DEVELOPMENT_PRIVATE_KEY).unwrap();
        assert_eq!(secret.public_key().to_string(), DEVELOPMENT_PUBLIC_KEY);
    }
}
