//! Order validation rules
//!
//! Validation never stops at the first problem: every rule runs and all
//! failures are collected into [`ValidationErrors`], item failures tagged
//! with the index of the offending item.

use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use shared::models::{OrderCreate, OrderItem, OrderStatus, RawOrderItem};

use super::money;

/// Machine-readable tag of a single validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    TableOccupied,
    InvalidTableNumber,
    InvalidStatus,
    ItemNameNotString,
    ItemPriceNotNumber,
    ItemPriceNonpositive,
    ItemPriceTooLarge,
    TotalTooLarge,
    EmptyItems,
}

impl ValidationKind {
    pub fn is_item_error(&self) -> bool {
        matches!(
            self,
            Self::ItemNameNotString
                | Self::ItemPriceNotNumber
                | Self::ItemPriceNonpositive
                | Self::ItemPriceTooLarge
                | Self::TotalTooLarge
        )
    }
}

/// One field-level failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub kind: ValidationKind,
    pub message: String,
}

/// All failures found in one candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        field: &'static str,
        index: Option<usize>,
        kind: ValidationKind,
        message: impl Into<String>,
    ) {
        self.0.push(FieldError {
            field,
            index,
            kind,
            message: message.into(),
        });
    }

    pub fn single(field: &'static str, kind: ValidationKind, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, None, kind, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn contains(&self, kind: ValidationKind) -> bool {
        self.0.iter().any(|e| e.kind == kind)
    }

    /// `Ok(value)` when nothing was collected
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A create candidate that passed every rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub table_number: i64,
    pub items: Vec<OrderItem>,
    pub total_price: Decimal,
    pub status: OrderStatus,
}

/// Validate a create candidate against the set of occupied tables
pub fn validate(
    candidate: &OrderCreate,
    occupied: &HashSet<i64>,
) -> Result<ValidatedOrder, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let table_number = check_table_number(&candidate.table_number, &mut errors);
    if let Some(table) = table_number
        && occupied.contains(&table)
    {
        errors.push(
            "table_number",
            None,
            ValidationKind::TableOccupied,
            format!("Table {table} is already occupied"),
        );
    }

    let status = match &candidate.status {
        Some(raw) => check_status(raw, &mut errors).unwrap_or_default(),
        None => OrderStatus::default(),
    };

    let items = collect_items(&candidate.items, false, &mut errors);
    let total_price = check_total(&items, &mut errors);

    errors.into_result(ValidatedOrder {
        table_number: table_number.unwrap_or_default(),
        items,
        total_price,
        status,
    })
}

/// Fields of an update that passed every rule; `None` keeps the stored value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpdate {
    pub items: Vec<OrderItem>,
    pub status: Option<OrderStatus>,
    pub table_number: Option<i64>,
}

/// Validate the fields of a customer or staff update together
///
/// The item batch may be empty. A table number is checked for positivity
/// only; `total_price` is never part of an update.
pub fn validate_update(
    raw: &[RawOrderItem],
    status: Option<&Value>,
    table_number: Option<&Value>,
) -> Result<ValidatedUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let table_number = table_number.and_then(|raw| check_table_number(raw, &mut errors));
    let status = status.and_then(|raw| check_status(raw, &mut errors));
    let items = collect_items(raw, true, &mut errors);

    errors.into_result(ValidatedUpdate {
        items,
        status,
        table_number,
    })
}

/// Validate an item batch submitted with an update
pub fn validate_items(
    raw: &[RawOrderItem],
    allow_empty: bool,
) -> Result<Vec<OrderItem>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let items = collect_items(raw, allow_empty, &mut errors);
    errors.into_result(items)
}

pub fn validate_status(raw: &str) -> Result<OrderStatus, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let status = parse_status(raw, &mut errors);
    match status {
        Some(s) => Ok(s),
        None => Err(errors),
    }
}

/// Total of a final item list; rejected when above [`money::MAX_AMOUNT`]
pub fn validate_total(items: &[OrderItem]) -> Result<Decimal, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let total = check_total(items, &mut errors);
    errors.into_result(total)
}

fn check_total(items: &[OrderItem], errors: &mut ValidationErrors) -> Decimal {
    match super::items::total_price(items) {
        Some(total) => total,
        None => {
            errors.push(
                "items",
                None,
                ValidationKind::TotalTooLarge,
                format!("Order total must not exceed {}", money::MAX_AMOUNT),
            );
            money::zero()
        }
    }
}

/// Integer table number, given as a JSON number or an integer string
fn table_number_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn check_table_number(raw: &Value, errors: &mut ValidationErrors) -> Option<i64> {
    match table_number_of(raw) {
        Some(table) if table >= 1 => Some(table),
        _ => {
            errors.push(
                "table_number",
                None,
                ValidationKind::InvalidTableNumber,
                "Table number must be an integer of at least 1",
            );
            None
        }
    }
}

fn check_status(raw: &Value, errors: &mut ValidationErrors) -> Option<OrderStatus> {
    match raw {
        Value::String(s) => parse_status(s, errors),
        other => {
            errors.push(
                "status",
                None,
                ValidationKind::InvalidStatus,
                format!("Status must be one of waiting, ready, paid (got {other})"),
            );
            None
        }
    }
}

fn parse_status(raw: &str, errors: &mut ValidationErrors) -> Option<OrderStatus> {
    match raw.parse::<OrderStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.push(
                "status",
                None,
                ValidationKind::InvalidStatus,
                format!("Status must be one of waiting, ready, paid (got '{raw}')"),
            );
            None
        }
    }
}

fn collect_items(
    raw: &[RawOrderItem],
    allow_empty: bool,
    errors: &mut ValidationErrors,
) -> Vec<OrderItem> {
    if raw.is_empty() && !allow_empty {
        errors.push(
            "items",
            None,
            ValidationKind::EmptyItems,
            "Order must contain at least one item",
        );
        return Vec::new();
    }

    raw.iter()
        .enumerate()
        .filter_map(|(index, item)| check_item(index, item, errors))
        .collect()
}

fn check_item(index: usize, raw: &RawOrderItem, errors: &mut ValidationErrors) -> Option<OrderItem> {
    let name = match &raw.name {
        Value::String(s) => Some(s.clone()),
        _ => {
            errors.push(
                "name",
                Some(index),
                ValidationKind::ItemNameNotString,
                format!("Item {index}: name must be a string"),
            );
            None
        }
    };

    let price = match money::parse_price(&raw.price) {
        Some(p) if p <= Decimal::ZERO => {
            errors.push(
                "price",
                Some(index),
                ValidationKind::ItemPriceNonpositive,
                format!("Item {index}: price must be greater than zero"),
            );
            None
        }
        Some(p) => {
            let rounded = money::round_price(p);
            if rounded > money::MAX_AMOUNT {
                errors.push(
                    "price",
                    Some(index),
                    ValidationKind::ItemPriceTooLarge,
                    format!("Item {index}: price must not exceed {}", money::MAX_AMOUNT),
                );
                None
            } else {
                Some(rounded)
            }
        }
        None => {
            errors.push(
                "price",
                Some(index),
                ValidationKind::ItemPriceNotNumber,
                format!("Item {index}: price must be a number"),
            );
            None
        }
    };

    Some(OrderItem::new(name?, price?))
}
