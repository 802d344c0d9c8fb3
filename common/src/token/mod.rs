//! Actions of the reference token contract.

use crate::{
    asset::Asset,
    config::ACTIVE_PERMISSION,
    name::Name,
    serializer::{Reader, ReaderError, Serializer, Writer},
    transaction::{Action, PermissionLevel},
};

struct Create {
    issuer: Name,
    maximum_supply: Asset,
}

impl Serializer for Create {
    fn write(&self, writer: &mut Writer) {
        self.issuer.write(writer);
        self.maximum_supply.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Create {
            issuer: Name::read(reader)?,
            maximum_supply: Asset::read(reader)?,
        })
    }
}

struct Issue {
    to: Name,
    quantity: Asset,
    memo: String,
}

impl Serializer for Issue {
    fn write(&self, writer: &mut Writer) {
        self.to.write(writer);
        self.quantity.write(writer);
        self.memo.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Issue {
            to: Name::read(reader)?,
            quantity: Asset::read(reader)?,
            memo: String::read(reader)?,
        })
    }
}

struct Transfer {
    from: Name,
    to: Name,
    quantity: Asset,
    memo: String,
}

impl Serializer for Transfer {
    fn write(&self, writer: &mut Writer) {
        self.from.write(writer);
        self.to.write(writer);
        self.quantity.write(writer);
        self.memo.write(writer);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Transfer {
            from: Name::read(reader)?,
            to: Name::read(reader)?,
            quantity: Asset::read(reader)?,
            memo: String::read(reader)?,
        })
    }
}

/// `create` a token with the given issuer and cap, authorized by the
/// contract account itself.
pub fn create(contract: Name, issuer: Name, maximum_supply: Asset) -> Action {
    Action::new(
        contract,
        Name::from_static("create"),
        vec![PermissionLevel::new(contract, ACTIVE_PERMISSION)],
        &Create {
            issuer,
            maximum_supply,
        },
    )
}

/// `issue` fresh supply to `to`, authorized by the issuer.
pub fn issue(contract: Name, issuer: Name, to: Name, quantity: Asset, memo: &str) -> Action {
    Action::new(
        contract,
        Name::from_static("issue"),
        vec![PermissionLevel::new(issuer, ACTIVE_PERMISSION)],
        &Issue {
            to,
            quantity,
            memo: memo.to_string(),
        },
    )
}

/// `transfer` tokens between accounts, authorized by the sender.
pub fn transfer(contract: Name, from: Name, to: Name, quantity: Asset, memo: &str) -> Action {
    Action::new(
        contract,
        Name::from_static("transfer"),
        vec![PermissionLevel::new(from, ACTIVE_PERMISSION)],
        &Transfer {
            from,
            to,
            quantity,
            memo: memo.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_create_action() {
        let contract = Name::from_static("eosio.token");
        let issuer = Name::from_static("alice");
        let supply = Asset::from_str("1000000.0000 TEST").unwrap();

        let action = create(contract, issuer, supply);
        assert_eq!(action.account, contract);
        assert_eq!(action.name.to_string(), "create");
        assert_eq!(
            action.authorization,
            vec![PermissionLevel::new(contract, ACTIVE_PERMISSION)]
        );

        let payload = Create::from_bytes(&action.data).unwrap();
        assert_eq!(payload.issuer, issuer);
        assert_eq!(payload.maximum_supply, supply);
    }

    #[test]
    fn test_issue_action() {
        let contract = Name::from_static("eosio.token");
        let issuer = Name::from_static("alice");
        let to = Name::from_static("bob");
        let quantity = Asset::from_str("10.0000 TEST").unwrap();

        let action = issue(contract, issuer, to, quantity, "welcome");
        assert_eq!(
            action.authorization,
            vec![PermissionLevel::new(issuer, ACTIVE_PERMISSION)]
        );

        let payload = Issue::from_bytes(&action.data).unwrap();
        assert_eq!(payload.to, to);
        assert_eq!(payload.quantity, quantity);
        assert_eq!(payload.memo, "welcome");
    }

    #[test]
    fn test_transfer_action() {
        let contract = Name::from_static("eosio.token");
        let from = Name::from_static("alice");
        let to = Name::from_static("bob");
        let quantity = Asset::from_str("1.0000 TEST").unwrap();

        let action = transfer(contract, from, to, quantity, "");
        let payload = Transfer::from_bytes(&action.data).unwrap();
        assert_eq!(payload.from, from);
        assert_eq!(payload.to, to);
        assert_eq!(payload.quantity, quantity);
        assert_eq!(payload.memo, "");
    }
}
