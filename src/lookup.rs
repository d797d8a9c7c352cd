// Lookup Service - read-only view over a loaded Snapshot

use crate::loader::Snapshot;
use crate::record::ComparisonRecord;

/// Exact, case-sensitive SKU lookup
pub struct LookupService {
    snapshot: Snapshot,
}

impl LookupService {
    pub fn new(snapshot: Snapshot) -> Self {
        LookupService { snapshot }
    }

    /// First record whose SKU equals `sku` exactly, if any
    pub fn find(&self, sku: &str) -> Option<&ComparisonRecord> {
        self.snapshot.records().iter().find(|r| r.sku == sku)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Fragment, Site};
    use chrono::Utc;

    fn record(sku: &str, price: &str) -> ComparisonRecord {
        ComparisonRecord::from_fragments(
            sku,
            vec![Fragment::new(Site::Bintel, "u").with_price(Some(price.to_string()))],
        )
    }

    fn service() -> LookupService {
        LookupService::new(Snapshot::new(
            vec![record("22450", "$199"), record("AB-12", "$5"), record("22450", "$1")],
            Utc::now(),
        ))
    }

    #[test]
    fn test_find_exact() {
        let svc = service();
        let found = svc.find("AB-12").unwrap();
        assert_eq!(found.sku, "AB-12");
    }

    #[test]
    fn test_first_match_wins() {
        let svc = service();
        let found = svc.find("22450").unwrap();
        assert_eq!(found.quote(Site::Bintel).unwrap().price, "$199");
    }

    #[test]
    fn test_unknown_is_not_found() {
        let svc = service();
        for sku in ["99999", "", "2245", "224500"] {
            assert!(svc.find(sku).is_none(), "{} should not be found", sku);
        }
    }

    #[test]
    fn test_case_sensitive_no_partial() {
        let svc = service();
        assert!(svc.find("ab-12").is_none());
        assert!(svc.find("AB").is_none());
        assert!(svc.find(" AB-12").is_none());
    }
}
