use crate::{
    distribution::{
        calculator::DistributionConfig,
        token::TokenConfig,
        typedefs::{FileFormat, PricedRecipient},
    },
    executor::{
        error::PreconditionError,
        typedefs::{ExecutionResult, WalletInfo},
    },
    recipients::{
        error::RecipientError,
        list::{RecipientList, SimpleValidation},
        parser::apply_individual_values,
        typedefs::{ParsedRecipients, Recipient},
    },
};

/// Everything an airdrop run needs, ready to hand to the executor.
#[derive(Debug)]
pub struct ExecutionPlan<'a> {
    pub wallet: &'a WalletInfo,
    pub token: &'a TokenConfig,
    pub recipients: &'a [PricedRecipient],
}

/// State of one interactive session. Every mutation of the recipient list or
/// of the distribution settings refreshes the preview.
#[derive(Debug, Default)]
pub struct Session {
    recipients: RecipientList,
    distribution: DistributionConfig,
    token: Option<TokenConfig>,
    wallet: Option<WalletInfo>,
    last_result: Option<ExecutionResult>,
    awaiting_values: bool,
}

impl Session {
    pub fn new(max_recipients: usize) -> Self {
        Self {
            recipients: RecipientList::new(max_recipients),
            ..Self::default()
        }
    }

    pub fn recipients(&self) -> &[Recipient] {
        self.recipients.as_slice()
    }

    pub fn distribution(&self) -> &DistributionConfig {
        &self.distribution
    }

    pub fn token(&self) -> Option<&TokenConfig> {
        self.token.as_ref()
    }

    pub fn wallet(&self) -> Option<&WalletInfo> {
        self.wallet.as_ref()
    }

    pub fn last_result(&self) -> Option<&ExecutionResult> {
        self.last_result.as_ref()
    }

    /// True after a plain address list was loaded for a method that needs a
    /// value per recipient.
    pub fn awaiting_values(&self) -> bool {
        self.awaiting_values
    }

    fn refresh(&mut self) {
        self.distribution.refresh(self.recipients.as_slice());
    }

    pub fn load_parsed(
        &mut self,
        parsed: ParsedRecipients,
        format: FileFormat,
    ) -> Result<(), RecipientError> {
        self.recipients.replace(parsed.recipients)?;
        self.awaiting_values = parsed.needs_individual_values;
        self.distribution.set_file_format(format);
        self.refresh();

        Ok(())
    }

    /// Fills in the per-recipient values of a plain list, in list order.
    pub fn apply_values(&mut self, values: &[f64]) -> Result<(), RecipientError> {
        let priced = apply_individual_values(
            self.recipients.as_slice(),
            values,
            self.distribution.method(),
        );
        self.recipients.replace(priced)?;
        self.awaiting_values = false;
        self.refresh();

        Ok(())
    }

    pub fn add_recipient(&mut self, address: &str) -> Result<(), RecipientError> {
        self.recipients.add_manual(address)?;
        self.refresh();

        Ok(())
    }

    pub fn remove_recipient(&mut self, index: usize) -> Option<Recipient> {
        let removed = self.recipients.remove(index);
        self.refresh();

        removed
    }

    pub fn clear_recipients(&mut self) {
        self.recipients.clear();
        self.awaiting_values = false;
        self.refresh();
    }

    pub fn validate_pasted(&mut self, text: &str) -> Result<SimpleValidation, RecipientError> {
        let report = self.recipients.validate_simple(text)?;
        self.awaiting_values = false;
        self.refresh();

        Ok(report)
    }

    /// Installs a validated token and adopts its amount and method.
    pub fn set_token(&mut self, token: TokenConfig) {
        self.distribution
            .set_method(token.method, self.recipients.as_slice());
        self.distribution
            .set_base_amount(token.amount, self.recipients.as_slice());
        self.token = Some(token);
    }

    pub fn connect(&mut self, wallet: WalletInfo) {
        self.wallet = Some(wallet);
    }

    pub fn disconnect(&mut self) -> Option<WalletInfo> {
        self.wallet.take()
    }

    /// Checks that everything the executor needs is present.
    pub fn execution_plan(&self) -> Result<ExecutionPlan<'_>, PreconditionError> {
        let wallet = self
            .wallet
            .as_ref()
            .ok_or(PreconditionError::WalletNotConnected)?;
        let token = self
            .token
            .as_ref()
            .ok_or(PreconditionError::TokenNotConfigured)?;

        if self.recipients.is_empty() {
            return Err(PreconditionError::NoRecipients);
        }

        let preview = self.distribution.preview();
        if preview.is_empty() || self.awaiting_values || preview.total_amount <= 0.0 {
            return Err(PreconditionError::PreviewEmpty);
        }

        Ok(ExecutionPlan {
            wallet,
            token,
            recipients: &preview.entries,
        })
    }

    /// Replaces the results of the previous run.
    pub fn record_result(&mut self, result: ExecutionResult) {
        self.last_result = Some(result);
    }

    /// Starts a new airdrop with the same wallet.
    pub fn reset(&mut self) {
        let wallet = self.wallet.take();
        let max_len = self.recipients.max_len();

        *self = Self::new(max_len);
        self.wallet = wallet;
    }
}
