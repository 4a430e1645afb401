use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::{Address, ContractId};

/// A contract client bound to a wallet
///
/// Both the wallet address and the contract id take part in cache and
/// mutation keys, so switching either one yields distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractHandle {
    /// Account the client signs with
    pub address: Address,
    pub contract_id: ContractId,
}

impl ContractHandle {
    pub fn new(address: Address, contract_id: ContractId) -> Self {
        Self {
            address,
            contract_id,
        }
    }
}

impl fmt::Display for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.contract_id, self.address)
    }
}
