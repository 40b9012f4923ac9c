//! Predicate identities: the closed, locale-agnostic relations each column
//! family knows how to evaluate elementwise. One enum per type family; the
//! three temporal columns share a single enum since the relations are the
//! same at every stored resolution.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberPredicate {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPredicate {
    Equal,
    /// Lowercases both sides with the locale-invariant casefold.
    EqualIgnoringCase,
    NotEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanPredicate {
    Equal,
    NotEqual,
}

/// Shared by date, date-time and time columns. Equality is at the column's
/// stored resolution: whole days for dates, milliseconds for date-times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalPredicate {
    Equal,
    Before,
    After,
    OnOrBefore,
    OnOrAfter,
}

/// A predicate identity tagged with its type family, used where the column
/// type is only known at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Number(NumberPredicate),
    Text(TextPredicate),
    Boolean(BooleanPredicate),
    Temporal(TemporalPredicate),
}

impl TemporalPredicate {
    /// Evaluates the relation over the packed integer representation the
    /// temporal columns store. Callers exclude missing sentinels first.
    pub(crate) fn holds<T: Ord>(self, left: T, right: T) -> bool {
        match self {
            TemporalPredicate::Equal => left == right,
            TemporalPredicate::Before => left < right,
            TemporalPredicate::After => left > right,
            TemporalPredicate::OnOrBefore => left <= right,
            TemporalPredicate::OnOrAfter => left >= right,
        }
    }
}

impl NumberPredicate {
    pub(crate) fn holds(self, left: f64, right: f64) -> bool {
        match self {
            NumberPredicate::Equal => left == right,
            NumberPredicate::NotEqual => left != right,
            NumberPredicate::LessThan => left < right,
            NumberPredicate::LessThanOrEqual => left <= right,
            NumberPredicate::GreaterThan => left > right,
            NumberPredicate::GreaterThanOrEqual => left >= right,
        }
    }
}
