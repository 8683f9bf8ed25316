//! Handling of missing or non-numeric values.
//!
//! Every coerced field goes through one [`MissingPolicy`]; the per-field
//! choice lives in the constants below so the whole table can be read in
//! one place.

/// What to do when a value is missing or cannot be coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Substitute the type's zero value.
    ZeroFill,
    /// Leave the field out of the record.
    Omit,
    /// Discard the whole row.
    DropRow,
}

/// Monthly section fields (calls, duration, agent count).
pub const MONTHLY_FIELD: MissingPolicy = MissingPolicy::Omit;
/// Agent presented/handled counts.
pub const AGENT_COUNT: MissingPolicy = MissingPolicy::Omit;
/// Cells of the N1 resolution table.
pub const RESOLUTION_CELL: MissingPolicy = MissingPolicy::ZeroFill;
/// Day index of a ticket row.
pub const TICKET_DAY: MissingPolicy = MissingPolicy::DropRow;
/// Month cells of a ticket row.
pub const TICKET_COUNT: MissingPolicy = MissingPolicy::Omit;

/// Result of applying a policy to a coercion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome<T> {
    Value(T),
    Omitted,
    DropRow,
}

impl<T: Default> FieldOutcome<T> {
    /// Apply `policy` to a coerced value.
    pub fn apply(value: Option<T>, policy: MissingPolicy) -> Self {
        match (value, policy) {
            (Some(v), _) => FieldOutcome::Value(v),
            (None, MissingPolicy::ZeroFill) => FieldOutcome::Value(T::default()),
            (None, MissingPolicy::Omit) => FieldOutcome::Omitted,
            (None, MissingPolicy::DropRow) => FieldOutcome::DropRow,
        }
    }
}

impl<T> FieldOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            FieldOutcome::Value(v) => Some(v),
            FieldOutcome::Omitted | FieldOutcome::DropRow => None,
        }
    }

    pub fn drops_row(&self) -> bool {
        matches!(self, FieldOutcome::DropRow)
    }
}
