pub mod cid;
pub mod memo;
pub mod wallet_util;

pub use crate::domain::model::{MessageSignal, RunOutcome, Wallet, WriteResult};
pub use crate::domain::ports::{
    ConfigProvider, MessageReader, MutableData, P2wdbPin, P2wdbWrite, Signer, Storage, WalletApi,
};
pub use crate::utils::error::Result;
