//! Line parser accumulating orders from noisy input.

use tracing::{debug, trace};

use crate::error::SourceError;
use crate::models::config::ParserConfig;
use crate::models::order::Order;
use crate::source::LineSource;

use super::rules::{CustomerExtractor, FieldExtractor, ItemsExtractor, OrderIdExtractor};
use super::LineRejection;

/// Line counters collected while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines examined.
    pub lines_read: usize,
    /// Lines that produced an order.
    pub matched: usize,
    /// Lines skipped as noise.
    pub skipped: usize,
}

/// Classifies lines and collects the orders found, in input order.
///
/// Every line is handled on its own; the only state carried between lines
/// is the growing list of orders and the counters.
#[derive(Debug)]
pub struct OrdersParser {
    /// Reject orders whose customer is only whitespace.
    reject_blank_customer: bool,
    /// Count empty item tokens instead of dropping them.
    keep_empty_items: bool,
    orders: Vec<Order>,
    stats: ParseStats,
}

impl OrdersParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            reject_blank_customer: true,
            keep_empty_items: true,
            orders: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new()
            .with_blank_customer_rejection(config.reject_blank_customer)
            .with_empty_items(config.keep_empty_items)
    }

    /// Set blank customer rejection.
    pub fn with_blank_customer_rejection(mut self, reject: bool) -> Self {
        self.reject_blank_customer = reject;
        self
    }

    /// Set whether empty item tokens are counted.
    pub fn with_empty_items(mut self, keep: bool) -> Self {
        self.keep_empty_items = keep;
        self
    }

    /// Decide whether a line is an order and build it.
    ///
    /// The three fields are searched independently, so their order within
    /// the line does not matter.
    pub fn classify(&self, line: &str) -> Result<Order, LineRejection> {
        let order_id = OrderIdExtractor::new()
            .extract(line)
            .ok_or(LineRejection::MissingOrderId)?;

        let customer = CustomerExtractor::new()
            .extract(line)
            .ok_or(LineRejection::MissingCustomer)?;
        if self.reject_blank_customer && customer.trim().is_empty() {
            return Err(LineRejection::BlankCustomer);
        }

        let items = ItemsExtractor::new()
            .with_empty_items(self.keep_empty_items)
            .extract(line)
            .ok_or(LineRejection::MissingItems)?;
        if items.is_empty() {
            return Err(LineRejection::NoItems);
        }

        Ok(Order::new(order_id, customer, items))
    }

    /// Parse a single line, appending an order if it matches.
    ///
    /// Returns whether an order was appended.
    pub fn parse_line(&mut self, line: &str) -> bool {
        self.stats.lines_read += 1;
        match self.classify(line) {
            Ok(order) => {
                self.stats.matched += 1;
                self.orders.push(order);
                true
            }
            Err(reason) => {
                self.stats.skipped += 1;
                trace!(line = self.stats.lines_read, %reason, "skipping line");
                false
            }
        }
    }

    /// Parse a sequence of lines in order. Non-order lines are skipped.
    pub fn parse<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.parse_line(line.as_ref());
        }
    }

    /// Drain a line source.
    ///
    /// Stops at the first source failure and returns it unchanged; orders
    /// parsed before the failure are kept.
    pub fn parse_source<L: LineSource>(&mut self, source: &mut L) -> Result<(), SourceError> {
        let before = self.stats;
        while let Some(line) = source.next_line() {
            self.parse_line(&line?);
        }

        debug!(
            "Parsed {} lines, {} orders, {} skipped",
            self.stats.lines_read - before.lines_read,
            self.stats.matched - before.matched,
            self.stats.skipped - before.skipped
        );
        Ok(())
    }

    /// Orders found so far, in the order they were parsed.
    pub fn results(&self) -> &[Order] {
        &self.orders
    }

    /// Consume the parser and return its orders.
    pub fn into_results(self) -> Vec<Order> {
        self.orders
    }

    /// Counters for all lines parsed so far.
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Forget all orders and counters.
    pub fn clear(&mut self) {
        self.orders.clear();
        self.stats = ParseStats::default();
    }
}

impl Default for OrdersParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{ItemCounts, OrderId};
    use crate::source::IterSource;
    use pretty_assertions::assert_eq;

    fn id(n: u64) -> OrderId {
        OrderId::from(n)
    }

    fn table(entries: &[(&str, u32)]) -> ItemCounts {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_single_order_line() {
        let mut parser = OrdersParser::new();
        parser.parse(["Order #7 Customer: Alice Items: pen, pen, ruler"]);

        assert_eq!(
            parser.results(),
            &[Order::new(id(7), "Alice", table(&[("pen", 2), ("ruler", 1)]))]
        );
    }

    #[test]
    fn test_noise_line() {
        let mut parser = OrdersParser::new();
        parser.parse(["random noise with no structure"]);

        assert!(parser.results().is_empty());
        assert_eq!(
            parser.stats(),
            ParseStats { lines_read: 1, matched: 0, skipped: 1 }
        );
    }

    #[test]
    fn test_mixed_lines_keep_order() {
        let mut parser = OrdersParser::new();
        parser.parse(vec![
            "Order #1 Customer: Bob Items: x".to_string(),
            "junk".to_string(),
            "Order #2 Customer: Eve Items: y, y".to_string(),
        ]);

        assert_eq!(
            parser.results(),
            &[
                Order::new(id(1), "Bob", table(&[("x", 1)])),
                Order::new(id(2), "Eve", table(&[("y", 2)])),
            ]
        );
        assert_eq!(
            parser.stats(),
            ParseStats { lines_read: 3, matched: 2, skipped: 1 }
        );
    }

    #[test]
    fn test_order_preserved_when_ids_descend() {
        let mut parser = OrdersParser::new();
        parser.parse([
            "Order #30 Customer: C Items: c",
            "Order #20 Customer: B Items: b",
            "Order #10 Customer: A Items: a",
        ]);

        let ids: Vec<&OrderId> = parser.results().iter().map(Order::order_id).collect();
        assert_eq!(ids, vec![&id(30), &id(20), &id(10)]);
    }

    #[test]
    fn test_each_missing_segment_rejects() {
        let parser = OrdersParser::new();

        assert_eq!(
            parser.classify("Customer: Bob Items: x"),
            Err(LineRejection::MissingOrderId)
        );
        assert_eq!(
            parser.classify("Order #1 Items: x"),
            Err(LineRejection::MissingCustomer)
        );
        assert_eq!(
            parser.classify("Order #1 Customer: Bob Items:"),
            Err(LineRejection::MissingItems)
        );
    }

    #[test]
    fn test_segments_found_in_any_order() {
        let parser = OrdersParser::new();
        let order = parser
            .classify("Customer: Zed Items: a, b Order #5")
            .unwrap();

        assert_eq!(order.order_id(), &id(5));
        assert_eq!(order.customer(), "Zed");
        // The items capture runs to end of line, marker included
        assert_eq!(order.items(), &table(&[("a", 1), ("b Order #5", 1)]));
    }

    #[test]
    fn test_empty_items_segment() {
        let mut parser = OrdersParser::new();
        parser.parse(["Order #4 Customer: Dan Items: "]);

        assert_eq!(parser.results().len(), 1);
        assert_eq!(parser.results()[0].items(), &table(&[("", 1)]));
    }

    #[test]
    fn test_empty_items_rejected_when_dropping_blanks() {
        let parser = OrdersParser::new().with_empty_items(false);

        assert_eq!(
            parser.classify("Order #4 Customer: Dan Items: , ,"),
            Err(LineRejection::NoItems)
        );
        assert_eq!(
            parser.classify("Order #4 Customer: Dan Items: a,,").unwrap().items(),
            &table(&[("a", 1)])
        );
    }

    #[test]
    fn test_customer_verbatim_and_truncated() {
        let parser = OrdersParser::new();

        let order = parser.classify("Order #1 Customer:  Ann  Items: x").unwrap();
        assert_eq!(order.customer(), " Ann ");

        let order = parser
            .classify("Order #2 Customer: Big Items: Co Items: a, a")
            .unwrap();
        assert_eq!(order.customer(), "Big");
        assert_eq!(order.items(), &table(&[("Co Items: a", 1), ("a", 1)]));
    }

    #[test]
    fn test_blank_customer() {
        let line = "Order #9 Customer:    Items: x";

        assert_eq!(
            OrdersParser::new().classify(line),
            Err(LineRejection::BlankCustomer)
        );

        let order = OrdersParser::new()
            .with_blank_customer_rejection(false)
            .classify(line)
            .unwrap();
        assert_eq!(order.customer(), "  ");
    }

    #[test]
    fn test_order_id_beyond_u64_kept_exactly() {
        let mut parser = OrdersParser::new();
        parser.parse([
            "Order #18446744073709551616 Customer: Al Items: x",
            "Order #123456789012345678901234567890 Customer: Bo Items: y",
        ]);

        let ids: Vec<String> = parser
            .results()
            .iter()
            .map(|order| order.order_id().to_string())
            .collect();
        assert_eq!(ids, vec!["18446744073709551616", "123456789012345678901234567890"]);
        assert_eq!(parser.stats().skipped, 0);
    }

    #[test]
    fn test_non_ascii_digits_do_not_make_an_order() {
        // Only ASCII 0-9 form an order number
        let mut parser = OrdersParser::new();
        parser.parse(["Order #\u{0664}\u{0662} Customer: Al Items: x"]);

        assert!(parser.results().is_empty());
        assert_eq!(
            parser.classify("Order #\u{0664}\u{0662} Customer: Al Items: x"),
            Err(LineRejection::MissingOrderId)
        );
    }

    #[test]
    fn test_results_idempotent_and_empty_before_parse() {
        let mut parser = OrdersParser::new();
        assert!(parser.results().is_empty());

        parser.parse(["Order #1 Customer: Bob Items: x"]);
        let first = parser.results().to_vec();
        let second = parser.results().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_appends_across_calls() {
        let mut parser = OrdersParser::new();
        parser.parse(["Order #1 Customer: A Items: x"]);
        parser.parse(["Order #2 Customer: B Items: y"]);

        assert_eq!(parser.results().len(), 2);
        assert_eq!(parser.results()[1].order_id(), &id(2));
    }

    #[test]
    fn test_into_results_hands_over_orders() {
        let mut parser = OrdersParser::new();
        parser.parse(["Order #1 Customer: Bob Items: x", "noise"]);
        let stats = parser.stats();

        let orders = parser.into_results();
        assert_eq!(orders, vec![Order::new(id(1), "Bob", table(&[("x", 1)]))]);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_parse_source_propagates_failure() {
        let lines = vec![
            Ok("Order #1 Customer: A Items: x".to_string()),
            Err(SourceError::Read {
                line: 1,
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad bytes"),
            }),
            Ok("Order #2 Customer: B Items: y".to_string()),
        ];
        let mut source = lines.into_iter();

        let mut parser = OrdersParser::new();
        let err = parser.parse_source(&mut source).unwrap_err();

        assert!(matches!(err, SourceError::Read { line: 1, .. }));
        assert_eq!(parser.results().len(), 1);
    }

    #[test]
    fn test_parse_source_from_iter() {
        let mut source = IterSource::new(["junk", "Order #8 Customer: Kim Items: a"]);
        let mut parser = OrdersParser::new();
        parser.parse_source(&mut source).unwrap();

        assert_eq!(parser.results().len(), 1);
        assert_eq!(parser.stats().lines_read, 2);
    }

    #[test]
    fn test_from_config_and_clear() {
        let config = ParserConfig {
            reject_blank_customer: false,
            keep_empty_items: false,
        };
        let mut parser = OrdersParser::from_config(&config);
        parser.parse(["Order #1 Customer:   Items: a"]);
        assert_eq!(parser.results().len(), 1);

        parser.clear();
        assert!(parser.results().is_empty());
        assert_eq!(parser.stats(), ParseStats::default());
    }
}
