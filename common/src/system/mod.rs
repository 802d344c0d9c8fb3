//! Typed actions of the system contract: account creation, permission
//! updates and contract deployment.

use serde::{Deserialize, Serialize};

use crate::{
    config::{ACTIVE_PERMISSION, CODE_PERMISSION, OWNER_PERMISSION, SYSTEM_ACCOUNT},
    crypto::PublicKey,
    name::Name,
    serializer::{Reader, ReaderError, Serializer, Writer},
    transaction::{Action, PermissionLevel},
};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct KeyWeight {
    pub key: PublicKey,
    pub weight: u16,
}

impl Serializer for KeyWeight {
    fn write(&self, writer: &mut Writer) {
        self.key.write(writer);
        writer.write_u16(self.weight);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(KeyWeight {
            key: PublicKey::read(reader)?,
            weight: reader.read_u16()?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PermissionLevelWeight {
    pub permission: PermissionLevel,
    pub weight: u16,
}

impl Serializer for PermissionLevelWeight {
    fn write(&self, writer: &mut Writer) {
        self.permission.write(writer);
        writer.write_u16(self.weight);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(PermissionLevelWeight {
            permission: PermissionLevel::read(reader)?,
            weight: reader.read_u16()?,
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct WaitWeight {
    pub wait_sec: u32,
    pub weight: u16,
}

impl Serializer for WaitWeight {
    fn write(&self, writer: &mut Writer) {
        writer.write_u32(self.wait_sec);
        writer.write_u16(self.weight);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(WaitWeight {
            wait_sec: reader.read_u32()?,
            weight: reader.read_u16()?,
        })
    }
}

/// Who may act for a permission: a weighted set of keys, delegated account
/// permissions and time waits against a threshold.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Authority {
    pub threshold: u32,
    pub keys: Vec<KeyWeight>,
    pub accounts: Vec<PermissionLevelWeight>,
    pub waits: Vec<WaitWeight>,
}

impl Authority {
    /// Single key, threshold 1.
    pub fn with_key(key: PublicKey) -> Self {
        Authority {
            threshold: 1,
            keys: vec![KeyWeight { key, weight: 1 }],
            accounts: Vec::new(),
            waits: Vec::new(),
        }
    }

    /// Single key plus the account's own `eosio.code` permission, the shape
    /// an `active` permission needs before the account's contract can send
    /// inline actions.
    pub fn with_key_and_code_permission(key: PublicKey, account: Name) -> Self {
        Authority {
            threshold: 1,
            keys: vec![KeyWeight { key, weight: 1 }],
            accounts: vec![PermissionLevelWeight {
                permission: PermissionLevel::new(account, CODE_PERMISSION),
                weight: 1,
            }],
            waits: Vec::new(),
        }
    }
}

impl Serializer for Authority {
    fn write(&self, writer: &mut Writer) {
        writer.write_u32(self.threshold);
        self.keys.write(writer);
        self.accounts.write(writer);
        self.waits.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Authority {
            threshold: reader.read_u32()?,
            keys: Vec::read(reader)?,
            accounts: Vec::read(reader)?,
            waits: Vec::read(reader)?,
        })
    }
}

struct NewAccount {
    creator: Name,
    name: Name,
    owner: Authority,
    active: Authority,
}

impl Serializer for NewAccount {
    fn write(&self, writer: &mut Writer) {
        self.creator.write(writer);
        self.name.write(writer);
        self.owner.write(writer);
        self.active.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(NewAccount {
            creator: Name::read(reader)?,
            name: Name::read(reader)?,
            owner: Authority::read(reader)?,
            active: Authority::read(reader)?,
        })
    }
}

struct UpdateAuth {
    account: Name,
    permission: Name,
    parent: Name,
    auth: Authority,
}

impl Serializer for UpdateAuth {
    fn write(&self, writer: &mut Writer) {
        self.account.write(writer);
        self.permission.write(writer);
        self.parent.write(writer);
        self.auth.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(UpdateAuth {
            account: Name::read(reader)?,
            permission: Name::read(reader)?,
            parent: Name::read(reader)?,
            auth: Authority::read(reader)?,
        })
    }
}

struct SetCode {
    account: Name,
    vm_type: u8,
    vm_version: u8,
    code: Vec<u8>,
}

impl Serializer for SetCode {
    fn write(&self, writer: &mut Writer) {
        self.account.write(writer);
        writer.write_u8(self.vm_type);
        writer.write_u8(self.vm_version);
        self.code.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(SetCode {
            account: Name::read(reader)?,
            vm_type: reader.read_u8()?,
            vm_version: reader.read_u8()?,
            code: Vec::read(reader)?,
        })
    }
}

struct SetAbi {
    account: Name,
    abi: Vec<u8>,
}

impl Serializer for SetAbi {
    fn write(&self, writer: &mut Writer) {
        self.account.write(writer);
        self.abi.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(SetAbi {
            account: Name::read(reader)?,
            abi: Vec::read(reader)?,
        })
    }
}

/// `newaccount`, both permissions on the same key, authorized by
/// `creator@active`.
pub fn new_account(creator: Name, name: Name, key: PublicKey) -> Action {
    Action::new(
        SYSTEM_ACCOUNT,
        Name::from_static("newaccount"),
        vec![PermissionLevel::new(creator, ACTIVE_PERMISSION)],
        &NewAccount {
            creator,
            name,
            owner: Authority::with_key(key),
            active: Authority::with_key(key),
        },
    )
}

/// `updateauth` replacing `account@{permission}`, authorized by
/// `account@owner`.
pub fn update_auth(account: Name, permission: Name, parent: Name, auth: Authority) -> Action {
    Action::new(
        SYSTEM_ACCOUNT,
        Name::from_static("updateauth"),
        vec![PermissionLevel::new(account, OWNER_PERMISSION)],
        &UpdateAuth {
            account,
            permission,
            parent,
            auth,
        },
    )
}

/// `setcode` with the compiled wasm, authorized by `account@active`.
pub fn set_code(account: Name, wasm: Vec<u8>) -> Action {
    Action::new(
        SYSTEM_ACCOUNT,
        Name::from_static("setcode"),
        vec![PermissionLevel::new(account, ACTIVE_PERMISSION)],
        &SetCode {
            account,
            vm_type: 0,
            vm_version: 0,
            code: wasm,
        },
    )
}

/// `setabi` with the binary-packed ABI, authorized by `account@active`.
pub fn set_abi(account: Name, abi: Vec<u8>) -> Action {
    Action::new(
        SYSTEM_ACCOUNT,
        Name::from_static("setabi"),
        vec![PermissionLevel::new(account, ACTIVE_PERMISSION)],
        &SetAbi { account, abi },
    )
}
