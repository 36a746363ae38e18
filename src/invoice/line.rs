use rust_decimal::Decimal;

/// Account number that generated product lines are booked on
pub const ACCOUNT_NUMBER: u32 = 1000;

pub const HOURS_UNIT: &str = "hours";

/// Anything that can appear as a line of an invoice. Text lines are the only lines
/// that can act as markers of a generated block.
pub trait LineItem {
    /// Returns the description of a text line, or `None` for any other kind of line
    fn text_description(&self) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceLine {
    Text(TextLine),
    Product(ProductLine),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLine {
    pub description: String,
    pub account_number: u32,
    pub quantity: Decimal,
    pub unit: String,
    pub unit_amount: Decimal,
}

impl InvoiceLine {
    pub fn new_text(description: impl Into<String>) -> Self {
        Self::Text(TextLine {
            description: description.into(),
        })
    }

    /// A product line billing `hours` at `rate` per hour
    pub fn new_hours(description: impl Into<String>, hours: Decimal, rate: Decimal) -> Self {
        Self::Product(ProductLine {
            description: description.into(),
            account_number: ACCOUNT_NUMBER,
            quantity: hours,
            unit: HOURS_UNIT.to_string(),
            unit_amount: rate,
        })
    }
}

impl LineItem for InvoiceLine {
    fn text_description(&self) -> Option<&str> {
        match self {
            Self::Text(line) => Some(&line.description),
            Self::Product(_) => None,
        }
    }
}
