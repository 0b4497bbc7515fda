//! Filter expressions for table queries

/// Operator for filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to
    Eq,
}

impl FilterOperator {
    /// Convert the operator to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
        }
    }
}

/// A single `column=op.value` filter
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// The column being filtered
    pub column: String,
    /// The comparison operator
    pub operator: FilterOperator,
    /// The right-hand value, already formatted
    pub value: String,
}

impl Filter {
    /// Create a new filter
    pub fn new<T: ToString>(column: &str, operator: FilterOperator, value: T) -> Self {
        Self {
            column: column.to_string(),
            operator,
            value: value.to_string(),
        }
    }

    /// The query-string pair for this filter
    pub fn to_param(&self) -> (String, String) {
        (
            self.column.clone(),
            format!("{}.{}", self.operator.as_str(), self.value),
        )
    }
}
