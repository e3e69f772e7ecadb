//! Regex patterns for order line extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Order number: ASCII digits only, so the capture always parses as base 10
    pub static ref ORDER_ID: Regex = Regex::new(
        r"Order #([0-9]+)"
    ).unwrap();

    // Customer: shortest text up to the first " Items:"
    pub static ref CUSTOMER: Regex = Regex::new(
        r"Customer: (.+?) Items:"
    ).unwrap();

    // Items: everything after the marker up to end of line, possibly empty
    pub static ref ITEMS: Regex = Regex::new(
        r"Items: (.*)"
    ).unwrap();
}
