//! Declarative value formulas for dimensions and metrics.
//!
//! Every formula refers to OID map fields relative to the index currently
//! being evaluated (`$index`). The set of shapes is closed; see
//! `evaluator` for how each one is computed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::oid_map::FieldValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// `field.$index`
    Field { field: String },

    /// A constant
    Literal { value: FieldValue },

    /// First factor divided by `divisor`, then multiplied by the remaining
    /// factors left to right
    Product { factors: Vec<Expression>, divisor: f64 },

    /// `then` when `field.$index` contains `needle`, `otherwise` if not
    IfContains {
        field: String,
        needle: String,
        then: String,
        otherwise: String,
    },

    /// Number of `status_field` entries whose index belongs to `members` and
    /// whose status is not excluded. With `match_index`, only members whose
    /// value equals `$index` are counted.
    CountMatching {
        status_field: String,
        members: String,
        excluded_statuses: Vec<String>,
        match_index: bool,
    },
}

impl Expression {
    pub fn field<S: Into<String>>(field: S) -> Self {
        Expression::Field {
            field: field.into(),
        }
    }

    pub fn literal<V: Into<FieldValue>>(value: V) -> Self {
        Expression::Literal {
            value: value.into(),
        }
    }

    /// Every OID map field this expression reads
    pub fn referenced_fields(&self) -> Vec<&str> {
        match self {
            Expression::Field { field } | Expression::IfContains { field, .. } => {
                vec![field.as_str()]
            }
            Expression::Literal { .. } => vec![],
            Expression::Product { factors, .. } => factors
                .iter()
                .flat_map(Expression::referenced_fields)
                .collect(),
            Expression::CountMatching {
                status_field,
                members,
                ..
            } => vec![status_field.as_str(), members.as_str()],
        }
    }

    /// Field whose indices drive iteration, if the expression is per-index
    pub fn index_source(&self) -> Option<&str> {
        match self {
            Expression::Field { field } | Expression::IfContains { field, .. } => {
                Some(field.as_str())
            }
            Expression::Product { factors, .. } => factors.iter().find_map(Expression::index_source),
            Expression::Literal { .. } | Expression::CountMatching { .. } => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Field { field } => write!(f, "{}.$index", field),
            Expression::Literal { value } => write!(f, "{}", value),
            Expression::Product { factors, divisor } => {
                let mut rendered: Vec<String> = factors.iter().map(|e| e.to_string()).collect();
                if *divisor != 1.0 {
                    if let Some(first) = rendered.first_mut() {
                        *first = format!("{} / {:?}", first, divisor);
                    }
                }
                write!(f, "{}", rendered.join(" * "))
            }
            Expression::IfContains {
                field,
                needle,
                then,
                otherwise,
            } => write!(
                f,
                "'{}' if '{}' in {}.$index else '{}'",
                then, needle, field, otherwise
            ),
            Expression::CountMatching {
                status_field,
                members,
                excluded_statuses,
                match_index,
            } => {
                let excluded: Vec<String> =
                    excluded_statuses.iter().map(|s| format!("'{}'", s)).collect();
                write!(
                    f,
                    "len([(x,y) for (x,y) in {}.items() if x in {} and y not in [{}]",
                    status_field,
                    members,
                    excluded.join(", ")
                )?;
                if *match_index {
                    write!(f, " and {}[x] == $index", members)?;
                }
                write!(f, "])")
            }
        }
    }
}

/// Post-processing applied to a metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// `round(c * 1.8 + 32, 2)`, except that 0 stays 0 (no reading)
    CelsiusToFahrenheit,
}

impl Transform {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Transform::CelsiusToFahrenheit => {
                if value == 0.0 {
                    0.0
                } else {
                    ((value * 1.8 + 32.0) * 100.0).round() / 100.0
                }
            }
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::CelsiusToFahrenheit => {
                write!(f, "lambda x: round((x * 1.8) + 32, 2) if x != 0 else 0.0")
            }
        }
    }
}
