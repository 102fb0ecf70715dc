//! Delimited record encoding and decoding
//!
//! Transactions: `Date,Description,Amount,Category,Type`
//! Budget limits: `Category,MonthlyLimit`
//!
//! Readers skip the header row and any line starting with `#`, so exported
//! files (which carry `#` summary lines) load like native ones. Rows with
//! missing fields are passed through with empty strings and left for the
//! ledger to reject.

use crate::domain::ledger::{BudgetRecord, TransactionRecord};
use crate::domain::transaction::format_amount;
use crate::domain::{BudgetLimit, Ledger, Transaction};
use crate::error::{Result, SpendwiseError};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

pub const TRANSACTION_HEADER: [&str; 5] = ["Date", "Description", "Amount", "Category", "Type"];
pub const BUDGET_HEADER: [&str; 2] = ["Category", "MonthlyLimit"];

/// Extra cleanup applied to text fields while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCleanup {
    /// Fields are taken as written (native data files)
    None,
    /// Literal `"` characters are removed from text fields (spreadsheet exports)
    StripQuotes,
}

impl FieldCleanup {
    fn apply(&self, value: &str) -> String {
        match self {
            FieldCleanup::None => value.to_string(),
            FieldCleanup::StripQuotes => value.replace('"', ""),
        }
    }
}

fn read_rows(content: &str) -> Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| SpendwiseError::MalformedRecord {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn field(row: &StringRecord, index: usize) -> &str {
    row.get(index).unwrap_or("")
}

fn line_of(row: &StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}

/// Decode transaction rows
pub fn decode_transactions(content: &str, cleanup: FieldCleanup) -> Result<Vec<TransactionRecord>> {
    let rows = read_rows(content)?;

    Ok(rows
        .iter()
        .map(|row| TransactionRecord {
            line: line_of(row),
            date: cleanup.apply(field(row, 0)),
            description: cleanup.apply(field(row, 1)),
            amount: field(row, 2).to_string(),
            category: cleanup.apply(field(row, 3)),
            kind: cleanup.apply(field(row, 4)),
        })
        .collect())
}

/// Decode budget limit rows
pub fn decode_budget_limits(content: &str) -> Result<Vec<BudgetRecord>> {
    let rows = read_rows(content)?;

    Ok(rows
        .iter()
        .map(|row| BudgetRecord {
            line: line_of(row),
            category: field(row, 0).to_string(),
            monthly_limit: field(row, 1).to_string(),
        })
        .collect())
}

fn writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| SpendwiseError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| SpendwiseError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn transaction_row(transaction: &Transaction) -> [String; 5] {
    [
        transaction.date.clone(),
        transaction.description.clone(),
        format_amount(transaction.amount),
        transaction.category.clone(),
        transaction.kind.as_str().to_string(),
    ]
}

fn encode_transaction_rows(transactions: &[Transaction]) -> Result<String> {
    let mut writer = writer();
    for transaction in transactions {
        writer.write_record(transaction_row(transaction))?;
    }
    finish(writer)
}

fn header_line(header: &[&str]) -> String {
    format!("{}\n", header.join(","))
}

/// Encode the native transactions file
pub fn encode_transactions(transactions: &[Transaction]) -> Result<String> {
    let mut output = header_line(&TRANSACTION_HEADER);
    output.push_str(&encode_transaction_rows(transactions)?);
    Ok(output)
}

/// Encode the native budget limits file
pub fn encode_budget_limits<'a, I>(limits: I) -> Result<String>
where
    I: IntoIterator<Item = &'a BudgetLimit>,
{
    let mut writer = writer();
    for limit in limits {
        writer.write_record([
            limit.category.as_str(),
            format_amount(limit.monthly_limit).as_str(),
        ])?;
    }

    let mut output = header_line(&BUDGET_HEADER);
    output.push_str(&finish(writer)?);
    Ok(output)
}

/// Encode an export: header, `#` summary lines, then the transaction rows
pub fn encode_export(ledger: &Ledger, generated_on: &str) -> Result<String> {
    let totals = ledger.totals();

    let mut output = header_line(&TRANSACTION_HEADER);
    output.push_str(&format!("# Export generated on: {}\n", generated_on));
    output.push_str(&format!("# Total transactions: {}\n", ledger.len()));
    output.push_str(&format!("# Total income: ${}\n", format_amount(totals.income)));
    output.push_str(&format!(
        "# Total expenses: ${}\n",
        format_amount(totals.expenses)
    ));
    output.push_str(&format!(
        "# Net balance: ${}\n",
        format_amount(totals.net_balance())
    ));
    output.push_str(&encode_transaction_rows(ledger.transactions())?);
    Ok(output)
}
