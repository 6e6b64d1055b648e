//! `msg-check`: list the message signals a wallet has received.

use crate::adapters::{MemoMessageReader, WalletServiceClient};
use crate::app::commands::{report_failure, WALLET_FLAG_MESSAGE};
use crate::config::WalletFlags;
use crate::core::wallet_util::WalletUtil;
use crate::core::{ConfigProvider, MessageReader, MessageSignal, RunOutcome, Storage};
use crate::utils::error::{CliError, Result};
use crate::utils::validation::require_flag;
use std::sync::Arc;
use tabled::settings::object::Columns;
use tabled::settings::{Modify, Style, Width};
use tabled::{Table, Tabled};

pub const NAME: &str = "msg-check";

const SUBJECT_WIDTH: usize = 25;
const TXID_WIDTH: usize = 80;

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Transaction ID")]
    txid: String,
}

pub struct MsgCheckCommand<S: Storage, C: ConfigProvider> {
    wallet_util: WalletUtil<S, C>,
    messages: Option<Arc<dyn MessageReader>>,
}

impl<S: Storage, C: ConfigProvider> MsgCheckCommand<S, C> {
    pub fn new(wallet_util: WalletUtil<S, C>) -> Self {
        Self {
            wallet_util,
            messages: None,
        }
    }

    pub fn with_message_reader(mut self, reader: Arc<dyn MessageReader>) -> Self {
        self.messages = Some(reader);
        self
    }

    pub async fn run(&self, flags: &WalletFlags) -> RunOutcome<bool> {
        let result = async {
            Self::validate_flags(flags)?;
            self.msg_check(flags.name.as_deref().unwrap_or_default()).await
        }
        .await;

        match result {
            Ok(found) => RunOutcome::Done(found),
            Err(e) => report_failure(NAME, e),
        }
    }

    /// Prints the received messages of wallet `name`. Returns `false` when
    /// there are none.
    pub async fn msg_check(&self, name: &str) -> Result<bool> {
        let result = async {
            if name.is_empty() {
                return Err(CliError::validation("filename is required."));
            }

            let wallet = self.wallet_util.instance_wallet(name).await?;
            let cash_address = wallet.cash_address();

            let messages = match &self.messages {
                Some(reader) => reader.read_msg_signal(cash_address).await?,
                None => {
                    let service = WalletServiceClient::from_config(self.wallet_util.config());
                    MemoMessageReader::new(service)
                        .read_msg_signal(cash_address)
                        .await?
                }
            };

            let received = Self::filter_messages(cash_address, messages)?;
            if received.is_empty() {
                println!("No Messages Found!");
                return Ok(false);
            }

            Self::display_table(&received);
            Ok(true)
        }
        .await;

        result.inspect_err(|e| tracing::error!("Error in msg_check(): {}", e))
    }

    /// Renders subject and TXID columns, prints the table and returns it.
    pub fn display_table(data: &[MessageSignal]) -> String {
        let rows = data.iter().map(|message| MessageRow {
            subject: message.subject.clone(),
            txid: message.txid.clone(),
        });

        let table = Table::new(rows)
            .with(Style::ascii())
            .with(Modify::new(Columns::single(0)).with(Width::wrap(SUBJECT_WIDTH)))
            .with(Modify::new(Columns::single(1)).with(Width::wrap(TXID_WIDTH)))
            .to_string();

        println!("{}", table);
        table
    }

    /// Drops messages sent by `bch_address`, keeping only received ones.
    pub fn filter_messages(
        bch_address: &str,
        messages: Vec<MessageSignal>,
    ) -> Result<Vec<MessageSignal>> {
        if bch_address.is_empty() {
            return Err(CliError::validation("bchAddress must be a string."));
        }

        Ok(messages
            .into_iter()
            .filter(|message| message.sender != bch_address)
            .collect())
    }

    pub fn validate_flags(flags: &WalletFlags) -> Result<()> {
        require_flag(&flags.name, WALLET_FLAG_MESSAGE)?;
        Ok(())
    }
}
