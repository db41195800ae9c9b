use serde::Serialize;

/// The student columns that must be unique across the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    RollNo,
    Email,
}

impl UniqueField {
    /// Returns the column name backing this field.
    pub fn column(&self) -> &'static str {
        match self {
            UniqueField::RollNo => "roll_no",
            UniqueField::Email => "email",
        }
    }
}

/// How a user-facing message should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Danger,
}
