//! Generated test account names.

use antelope_common::{
    config::{ACCOUNT_NAME_CHARSET, GENERATED_NAME_LENGTH},
    Name,
};
use rand::Rng;

/// A random 12-character account name: lowercase letters and `1`-`5` only,
/// so it is always valid without a 13th-character restriction.
pub fn random_account_name() -> Name {
    let mut rng = rand::thread_rng();
    let raw: String = (0..GENERATED_NAME_LENGTH)
        .map(|_| ACCOUNT_NAME_CHARSET[rng.gen_range(0..ACCOUNT_NAME_CHARSET.len())] as char)
        .collect();
    // The charset can only produce valid names
    Name::new(&raw).unwrap_or_default()
}
