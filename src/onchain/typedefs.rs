use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::constants::{
    MAINNET_EXPLORER_URL, MAINNET_RPC_URL, TESTNET_EXPLORER_URL, TESTNET_RPC_URL,
};

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn default_rpc_url(self) -> &'static str {
        match self {
            Self::Mainnet => MAINNET_RPC_URL,
            Self::Testnet => TESTNET_RPC_URL,
        }
    }

    pub fn explorer_tx_url(self, tx_hash: &str) -> String {
        let base = match self {
            Self::Mainnet => MAINNET_EXPLORER_URL,
            Self::Testnet => TESTNET_EXPLORER_URL,
        };
        format!("{base}{tx_hash}")
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => f.write_str("mainnet"),
            Self::Testnet => f.write_str("testnet"),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IssuedAmount {
    pub currency: String,
    pub issuer: String,
    pub value: String,
}

/// `Amount` field of a payment: a drops string for XRP, an object otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Drops(u64),
    Issued(IssuedAmount),
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Drops(drops) => serializer.collect_str(drops),
            Self::Issued(issued) => issued.serialize(serializer),
        }
    }
}

/// Unsigned `Payment` transaction handed to the signing service.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentInstruction {
    pub transaction_type: &'static str,
    pub account: String,
    pub destination: String,
    pub amount: Amount,
    /// Human readable line shown to the signer, not part of the transaction.
    #[serde(skip)]
    pub description: String,
}
