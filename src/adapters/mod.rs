// Adapters layer: reqwest clients for the collaborator services.

pub mod http;
pub mod messages;
pub mod mutable_data;
pub mod p2wdb;
pub mod signer;
pub mod wallet_service;

pub use messages::MemoMessageReader;
pub use mutable_data::SlpMutableData;
pub use p2wdb::P2wdbClient;
pub use signer::SignerClient;
pub use wallet_service::WalletServiceClient;
