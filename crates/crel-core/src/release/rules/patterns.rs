//! Common regex patterns for container release extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ISO 6346 container number: owner/category prefix + 7-digit serial
    pub static ref CONTAINER_ID: Regex = Regex::new(
        r"\b[A-Z]{4}[0-9]{7}\b"
    ).unwrap();

    // Release references, in priority order
    pub static ref PROFORMA_INVOICE_NO: Regex = Regex::new(
        r"(?i)Proforma Invoice No[:\s]+([A-Za-z0-9\-]+)"
    ).unwrap();

    pub static ref INVOICE_NO: Regex = Regex::new(
        r"(?i)Invoice No[:\s]+([A-Za-z0-9\-]+)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_id_boundaries() {
        assert!(CONTAINER_ID.is_match("TCLU1234567"));
        assert!(!CONTAINER_ID.is_match("XTCLU1234567"));
        assert!(!CONTAINER_ID.is_match("TCLU12345678"));
        assert!(!CONTAINER_ID.is_match("tclu1234567"));
    }

    #[test]
    fn test_reference_patterns() {
        let caps = PROFORMA_INVOICE_NO.captures("PROFORMA INVOICE NO: PI-7").unwrap();
        assert_eq!(&caps[1], "PI-7");

        let caps = INVOICE_NO.captures("invoice no 55A").unwrap();
        assert_eq!(&caps[1], "55A");
    }
}
