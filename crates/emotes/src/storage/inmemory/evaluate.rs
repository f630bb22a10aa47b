//! Filter expressions for the in-memory store.
//!
//! [`compile`] checks a [`ScanFilter`] the way DynamoDB checks a scan's
//! `FilterExpression` and its bindings, and rejects what DynamoDB rejects:
//!
//! - every condition must be `<operand> <comparator> <operand>`, conditions
//!   joined by `AND`;
//! - attribute name placeholders start with `#`, value placeholders with `:`;
//! - every placeholder used must be bound, and every binding must be used.
//!
//! Tokens are whitespace separated. Comparisons between a missing attribute
//! and anything are false.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use aws_sdk_dynamodb::types::AttributeValue;

use crate::storage::{Item, Result, ScanFilter, StoreError};

fn invalid(reason: impl AsRef<str>) -> StoreError {
    StoreError::Fault(format!("Invalid FilterExpression: {}", reason.as_ref()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparator {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "=" => Some(Comparator::Eq),
            "<>" => Some(Comparator::Ne),
            "<" => Some(Comparator::Lt),
            "<=" => Some(Comparator::Le),
            ">" => Some(Comparator::Gt),
            ">=" => Some(Comparator::Ge),
            _ => None,
        }
    }

    fn holds(self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (Comparator::Ne, None) => true,
            (_, None) => false,
            (Comparator::Eq, Some(ordering)) => ordering == Ordering::Equal,
            (Comparator::Ne, Some(ordering)) => ordering != Ordering::Equal,
            (Comparator::Lt, Some(ordering)) => ordering == Ordering::Less,
            (Comparator::Le, Some(ordering)) => ordering != Ordering::Greater,
            (Comparator::Gt, Some(ordering)) => ordering == Ordering::Greater,
            (Comparator::Ge, Some(ordering)) => ordering != Ordering::Less,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Attribute(String),
    Value(AttributeValue),
}

impl Operand {
    fn resolve<'a>(&'a self, item: &'a Item) -> Option<&'a AttributeValue> {
        match self {
            Operand::Attribute(name) => item.get(name),
            Operand::Value(value) => Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Condition {
    left: Operand,
    comparator: Comparator,
    right: Operand,
}

/// A checked filter, ready to test items against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    conditions: Vec<Condition>,
}

impl CompiledFilter {
    /// Returns whether `item` satisfies every condition.
    pub fn matches(&self, item: &Item) -> bool {
        self.conditions.iter().all(|condition| {
            match (
                condition.left.resolve(item),
                condition.right.resolve(item),
            ) {
                (Some(left), Some(right)) => condition.comparator.holds(compare(left, right)),
                _ => false,
            }
        })
    }
}

/// Orders two values of the same scalar type. `None` for mismatched or
/// non-scalar types, except that identical values compare equal.
fn compare(left: &AttributeValue, right: &AttributeValue) -> Option<Ordering> {
    match (left, right) {
        (AttributeValue::S(a), AttributeValue::S(b)) => Some(a.cmp(b)),
        (AttributeValue::N(a), AttributeValue::N(b)) => {
            let a: f64 = a.parse().ok()?;
            let b: f64 = b.parse().ok()?;
            a.partial_cmp(&b)
        }
        _ if left == right => Some(Ordering::Equal),
        _ => None,
    }
}

/// Tracks which bindings an expression uses.
struct Bindings<'a> {
    filter: &'a ScanFilter,
    names: HashSet<&'a str>,
    values: HashSet<&'a str>,
}

impl<'a> Bindings<'a> {
    fn operand(&mut self, token: &'a str) -> Result<Operand> {
        if token.starts_with('#') {
            let name = self.filter.attribute_names.get(token).ok_or_else(|| {
                invalid(format!(
                    "An expression attribute name used in the document path is not defined; attribute name: {token}"
                ))
            })?;
            self.names.insert(token);
            return Ok(Operand::Attribute(name.clone()));
        }

        if token.starts_with(':') {
            let value = self.filter.attribute_values.get(token).ok_or_else(|| {
                invalid(format!(
                    "An expression attribute value used in expression is not defined; attribute value: {token}"
                ))
            })?;
            self.values.insert(token);
            return Ok(Operand::Value(value.clone()));
        }

        if Comparator::parse(token).is_some() || token.eq_ignore_ascii_case("AND") {
            return Err(invalid(format!("Syntax error; token: \"{token}\"")));
        }

        Ok(Operand::Attribute(token.to_string()))
    }

    fn ensure_all_used(&self) -> Result<()> {
        let unused_names: BTreeSet<_> = self
            .filter
            .attribute_names
            .keys()
            .map(String::as_str)
            .filter(|key| !self.names.contains(key))
            .collect();
        if !unused_names.is_empty() {
            return Err(StoreError::Fault(format!(
                "Value provided in ExpressionAttributeNames unused in expressions: keys: {unused_names:?}"
            )));
        }

        let unused_values: BTreeSet<_> = self
            .filter
            .attribute_values
            .keys()
            .map(String::as_str)
            .filter(|key| !self.values.contains(key))
            .collect();
        if !unused_values.is_empty() {
            return Err(StoreError::Fault(format!(
                "Value provided in ExpressionAttributeValues unused in expressions: keys: {unused_values:?}"
            )));
        }

        Ok(())
    }
}

/// Checks `filter` and compiles it. An empty expression with no bindings
/// matches every item.
pub fn compile(filter: &ScanFilter) -> Result<CompiledFilter> {
    if let Some(key) = filter.attribute_names.keys().find(|key| !key.starts_with('#')) {
        return Err(StoreError::Fault(format!(
            "ExpressionAttributeNames contains invalid key: Syntax error; key: \"{key}\""
        )));
    }
    if let Some(key) = filter.attribute_values.keys().find(|key| !key.starts_with(':')) {
        return Err(StoreError::Fault(format!(
            "ExpressionAttributeValues contains invalid key: Syntax error; key: \"{key}\""
        )));
    }

    let tokens: Vec<&str> = filter.expression.split_whitespace().collect();
    let mut bindings = Bindings {
        filter,
        names: HashSet::new(),
        values: HashSet::new(),
    };

    let mut conditions = Vec::new();
    if !tokens.is_empty() {
        for clause in tokens.split(|token| token.eq_ignore_ascii_case("AND")) {
            let &[left, comparator, right] = clause else {
                return Err(invalid(format!(
                    "Syntax error; near \"{}\"",
                    clause.join(" ")
                )));
            };
            let comparator = Comparator::parse(comparator)
                .ok_or_else(|| invalid(format!("Syntax error; token: \"{comparator}\"")))?;
            conditions.push(Condition {
                left: bindings.operand(left)?,
                comparator,
                right: bindings.operand(right)?,
            });
        }
    }

    bindings.ensure_all_used()?;

    Ok(CompiledFilter { conditions })
}
