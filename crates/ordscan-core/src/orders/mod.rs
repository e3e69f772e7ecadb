//! Order line classification and aggregation.

mod parser;
pub mod rules;

pub use parser::{OrdersParser, ParseStats};

use thiserror::Error;

/// Why a line did not produce an order.
///
/// Rejections are normal control flow: the parser skips the line and moves
/// on. They exist for diagnostics only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRejection {
    #[error("no `Order #<digits>` marker")]
    MissingOrderId,

    #[error("no `Customer: <name> Items:` segment")]
    MissingCustomer,

    #[error("no `Items: ` segment")]
    MissingItems,

    #[error("customer name is blank")]
    BlankCustomer,

    #[error("item list has no non-empty items")]
    NoItems,
}
