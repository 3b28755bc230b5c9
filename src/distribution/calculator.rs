use crate::recipients::typedefs::Recipient;

use super::typedefs::{DistributionMethod, FileFormat, Preview, PricedRecipient};

/// Resolves the payment amount of every recipient under `method`.
///
/// Equal and proportional distribution need a positive base amount; without
/// one the preview is empty, meaning "not configured yet".
pub fn compute_preview(
    recipients: &[Recipient],
    method: DistributionMethod,
    base_amount: f64,
) -> Preview {
    let base_configured = base_amount.is_finite() && base_amount > 0.0;

    if recipients.is_empty() || (method.uses_base_amount() && !base_configured) {
        return Preview::default();
    }

    let entries: Vec<PricedRecipient> = recipients
        .iter()
        .map(|recipient| {
            let count = recipient.count.unwrap_or(1.0);
            let amount = match method {
                DistributionMethod::Equal => base_amount,
                DistributionMethod::Proportional => base_amount * count,
                DistributionMethod::Custom => recipient.amount.unwrap_or(0.0),
            };

            PricedRecipient {
                address: recipient.address.clone(),
                count,
                amount: non_negative(amount),
            }
        })
        .collect();

    Preview {
        total_count: entries.iter().map(|e| e.count).sum(),
        total_amount: entries.iter().map(|e| e.amount).sum(),
        entries,
    }
}

fn non_negative(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Distribution settings of a session. The preview is derived state: it is
/// recomputed by every setter and cannot be changed directly.
#[derive(Debug, Clone, Default)]
pub struct DistributionConfig {
    method: DistributionMethod,
    file_format: FileFormat,
    base_amount: f64,
    preview: Preview,
}

impl DistributionConfig {
    pub fn method(&self) -> DistributionMethod {
        self.method
    }

    pub fn file_format(&self) -> FileFormat {
        self.file_format
    }

    pub fn base_amount(&self) -> f64 {
        self.base_amount
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn total_amount(&self) -> f64 {
        self.preview.total_amount
    }

    pub fn set_method(&mut self, method: DistributionMethod, recipients: &[Recipient]) {
        self.method = method;
        self.refresh(recipients);
    }

    pub fn set_base_amount(&mut self, base_amount: f64, recipients: &[Recipient]) {
        self.base_amount = base_amount;
        self.refresh(recipients);
    }

    pub fn set_file_format(&mut self, file_format: FileFormat) {
        self.file_format = file_format;
    }

    pub fn refresh(&mut self, recipients: &[Recipient]) {
        self.preview = compute_preview(recipients, self.method, self.base_amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ADDR_A, ADDR_B, ADDR_C};

    fn three_recipients() -> Vec<Recipient> {
        vec![
            Recipient::new(ADDR_A),
            Recipient::with_count(ADDR_B, 3.0),
            Recipient::with_amount(ADDR_C, 7.5),
        ]
    }

    #[test]
    fn equal_gives_everyone_the_base_amount() {
        let preview = compute_preview(&three_recipients(), DistributionMethod::Equal, 10.0);

        assert_eq!(preview.entries.len(), 3);
        assert!(preview.entries.iter().all(|e| e.amount == 10.0));
        assert_eq!(preview.total_amount, 30.0);
        assert_eq!(preview.total_count, 5.0);
    }

    #[test]
    fn proportional_multiplies_by_count() {
        let recipients = vec![
            Recipient::with_count(ADDR_A, 5.0),
            Recipient::with_count(ADDR_B, 3.0),
            Recipient::bare(ADDR_C),
        ];

        let preview = compute_preview(&recipients, DistributionMethod::Proportional, 2.0);

        let amounts: Vec<f64> = preview.entries.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![10.0, 6.0, 2.0]);
        assert_eq!(preview.total_amount, 18.0);
        assert_eq!(preview.total_count, 9.0);
    }

    #[test]
    fn custom_uses_explicit_amounts_and_ignores_base() {
        let preview = compute_preview(&three_recipients(), DistributionMethod::Custom, 0.0);

        let amounts: Vec<f64> = preview.entries.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![0.0, 0.0, 7.5]);
        assert_eq!(preview.total_amount, 7.5);
    }

    #[test]
    fn unset_base_amount_yields_empty_preview() {
        for base in [0.0, -1.0, f64::NAN] {
            assert!(compute_preview(&three_recipients(), DistributionMethod::Equal, base).is_empty());
            assert!(
                compute_preview(&three_recipients(), DistributionMethod::Proportional, base)
                    .is_empty()
            );
        }
    }

    #[test]
    fn preview_is_a_pure_function_of_its_inputs() {
        let recipients = three_recipients();

        let first = compute_preview(&recipients, DistributionMethod::Proportional, 1.25);
        let second = compute_preview(&recipients, DistributionMethod::Proportional, 1.25);

        assert_eq!(first, second);
    }

    #[test]
    fn config_recomputes_preview_on_every_change() {
        let recipients = three_recipients();
        let mut config = DistributionConfig::default();

        config.set_base_amount(10.0, &recipients);
        assert_eq!(config.total_amount(), 30.0);

        config.set_method(DistributionMethod::Proportional, &recipients);
        assert_eq!(config.total_amount(), 50.0);

        config.refresh(&recipients[..1]);
        assert_eq!(config.preview().entries.len(), 1);
        assert_eq!(config.total_amount(), 10.0);
    }
}
