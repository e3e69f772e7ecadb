//! Output formatting for extracted orders.

use ordscan_core::{Order, OutputFormat};

/// Output format selectable on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// One JSON object per line
    Json,
    /// One `Order #...` line per order
    Text,
    /// CSV with a header row
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// File extension used for a format in batch output.
pub fn extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "jsonl",
        OutputFormat::Text => "txt",
        OutputFormat::Csv => "csv",
    }
}

/// Render orders, one record per line (JSON and text) or row (CSV).
pub fn format_orders(orders: &[Order], format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(orders, pretty),
        OutputFormat::Text => Ok(format_text(orders)),
        OutputFormat::Csv => format_csv(orders),
    }
}

fn format_json(orders: &[Order], pretty: bool) -> anyhow::Result<String> {
    let mut output = String::new();
    for order in orders {
        let value = order.to_structured();
        let line = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}

fn format_text(orders: &[Order]) -> String {
    let mut output = String::new();
    for order in orders {
        output.push_str(&order.to_text());
        output.push('\n');
    }
    output
}

fn format_csv(orders: &[Order]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["order_no", "customer", "items"])?;

    for order in orders {
        let items = order
            .items()
            .iter()
            .map(|(name, count)| format!("{}={}", name, count))
            .collect::<Vec<_>>()
            .join(";");

        wtr.write_record([
            order.order_id().to_string().as_str(),
            order.customer(),
            items.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
