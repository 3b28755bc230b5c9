use std::collections::HashSet;

use super::{
    address::is_valid_address, error::RecipientError, parser::dedup_by_address,
    typedefs::Recipient,
};

pub const DEFAULT_MAX_RECIPIENTS: usize = 1000;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SimpleValidation {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

/// Recipients of the current session, unique by address.
#[derive(Debug, Clone)]
pub struct RecipientList {
    items: Vec<Recipient>,
    max_len: usize,
}

impl Default for RecipientList {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECIPIENTS)
    }
}

impl RecipientList {
    pub fn new(max_len: usize) -> Self {
        Self {
            items: vec![],
            max_len,
        }
    }

    pub fn as_slice(&self) -> &[Recipient] {
        &self.items
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.items.iter().any(|r| r.address == address)
    }

    pub fn add_manual(&mut self, address: &str) -> Result<(), RecipientError> {
        let address = address.trim();

        if !is_valid_address(address) {
            return Err(RecipientError::InvalidAddress(address.to_string()));
        }

        if self.contains(address) {
            return Err(RecipientError::Duplicate(address.to_string()));
        }

        self.check_capacity(self.items.len() + 1)?;
        self.items.push(Recipient::bare(address));

        Ok(())
    }

    /// Removes the recipient at `index`; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<Recipient> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn replace(&mut self, recipients: Vec<Recipient>) -> Result<(), RecipientError> {
        let recipients = dedup_by_address(recipients);
        self.check_capacity(recipients.len())?;
        self.items = recipients;

        Ok(())
    }

    /// Checks pasted addresses and replaces the list with the valid ones.
    pub fn validate_simple(&mut self, text: &str) -> Result<SimpleValidation, RecipientError> {
        let mut seen = HashSet::new();
        let mut report = SimpleValidation::default();

        for token in text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            if !is_valid_address(token) {
                report.invalid.push(token.to_string());
            } else if seen.insert(token) {
                report.valid.push(token.to_string());
            }
        }

        self.check_capacity(report.valid.len())?;
        self.items = report.valid.iter().map(|a| Recipient::bare(a)).collect();

        Ok(report)
    }

    fn check_capacity(&self, count: usize) -> Result<(), RecipientError> {
        if count > self.max_len {
            return Err(RecipientError::TooMany {
                count,
                limit: self.max_len,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ADDR_A, ADDR_B, ADDR_C};

    #[test]
    fn manual_add_rejects_invalid_and_duplicate_addresses() {
        let mut list = RecipientList::default();

        list.add_manual(ADDR_A).unwrap();
        assert_eq!(
            list.add_manual(&format!(" {ADDR_A} ")),
            Err(RecipientError::Duplicate(ADDR_A.to_string()))
        );
        assert_eq!(
            list.add_manual("r123"),
            Err(RecipientError::InvalidAddress("r123".to_string()))
        );

        assert_eq!(list.as_slice().len(), 1);
        assert_eq!(list.as_slice()[0], Recipient::bare(ADDR_A));
    }

    #[test]
    fn remove_ignores_out_of_range_index() {
        let mut list = RecipientList::default();
        list.add_manual(ADDR_A).unwrap();
        list.add_manual(ADDR_B).unwrap();

        assert!(list.remove(5).is_none());
        assert_eq!(list.remove(0).unwrap().address, ADDR_A);
        assert_eq!(list.as_slice()[0].address, ADDR_B);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn simple_validation_dedups_and_reports_invalid() {
        let mut list = RecipientList::default();
        list.add_manual(ADDR_C).unwrap();

        let report = list
            .validate_simple(&format!("{ADDR_A}\n{ADDR_B}, nope\n\n{ADDR_A}"))
            .unwrap();

        assert_eq!(report.valid, vec![ADDR_A, ADDR_B]);
        assert_eq!(report.invalid, vec!["nope"]);
        assert_eq!(list.as_slice().len(), 2);
        assert!(!list.contains(ADDR_C));
    }

    #[test]
    fn capacity_is_enforced() {
        let mut list = RecipientList::new(2);

        let err = list
            .replace(vec![
                Recipient::new(ADDR_A),
                Recipient::new(ADDR_B),
                Recipient::new(ADDR_C),
            ])
            .unwrap_err();
        assert_eq!(err, RecipientError::TooMany { count: 3, limit: 2 });

        list.replace(vec![Recipient::new(ADDR_A), Recipient::new(ADDR_A)])
            .unwrap();
        assert_eq!(list.as_slice().len(), 1);
    }
}
