/// Comparison applied to a key (or filter) attribute.
///
/// The set is closed: these are the only comparisons the underlying query
/// API accepts for a sort key condition in this system. `Contains` is
/// unusual for a sort key but kept for compatibility with existing callers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum KeyComparison {
    /// Prefix match: `begins_with(attribute, value)`.
    BeginsWith,
    /// Substring match: `contains(attribute, value)`.
    Contains,
    /// Exact match: `attribute = value`.
    #[default]
    Equals,
}

impl KeyComparison {
    /// Render one clause over already-resolved operand texts.
    pub(crate) fn render(self, name: &str, value: &str) -> String {
        match self {
            Self::BeginsWith => format!("begins_with({name}, {value})"),
            Self::Contains => format!("contains({name}, {value})"),
            Self::Equals => format!("{name} = {value}"),
        }
    }
}

/// The partition operand of a key condition. Always an equality; a read
/// request with any other partition comparison is invalid.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyOperand {
    /// Attribute-name placeholder, e.g. `#actor`.
    pub name_token: String,
    /// Value placeholder, e.g. `:pk`.
    pub value_token: String,
}

/// The optional sort clause of a key condition.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SortClause {
    /// How the sort key is compared.
    pub comparison: KeyComparison,
    /// Attribute-name placeholder, e.g. `#film`.
    pub name_token: String,
    /// Value placeholder, e.g. `:sk`.
    pub value_token: String,
}

/// A structured key condition: partition equality plus an optional sort
/// clause joined by `AND`.
///
/// Every token referenced here must have an entry in the owning descriptor's
/// attribute name/value maps; rendering and explaining both rely on that
/// closure property.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyConditionExpr {
    /// The mandatory partition equality clause.
    pub partition: KeyOperand,
    /// The optional sort clause.
    pub sort: Option<SortClause>,
}

impl KeyConditionExpr {
    /// Render the wire-format `KeyConditionExpression`.
    pub fn render(&self) -> String {
        let partition = KeyComparison::Equals.render(
            &self.partition.name_token,
            &self.partition.value_token,
        );
        match &self.sort {
            Some(sort) => {
                let clause = sort.comparison.render(&sort.name_token, &sort.value_token);
                format!("{partition} AND {clause}")
            }
            None => partition,
        }
    }
}

/// One post-key filter clause, applied by the store after the key condition.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterExpr {
    /// How the filtered attribute is compared.
    pub comparison: KeyComparison,
    /// Attribute-name placeholder.
    pub name_token: String,
    /// Value placeholder.
    pub value_token: String,
}

impl FilterExpr {
    /// Render the wire-format `FilterExpression`.
    pub fn render(&self) -> String {
        self.comparison.render(&self.name_token, &self.value_token)
    }
}
