//! Column metadata as reported by `PRAGMA table_info`.

/// One column of a table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Declared type, verbatim (may be empty).
    pub decl_type: String,
    /// Whether the column is declared `NOT NULL`.
    pub not_null: bool,
    /// Default value expression, verbatim.
    pub default_value: Option<String>,
    /// 1-based position in the declared primary key, 0 if not part of it.
    pub pk_ordinal: u32,
}

impl Column {
    /// Create a nullable column with no default that is not part of any key.
    #[must_use]
    pub fn new(name: impl Into<String>, decl_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decl_type: decl_type.into(),
            not_null: false,
            default_value: None,
            pk_ordinal: 0,
        }
    }

    /// Mark the column `NOT NULL`.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set the column's position in the declared primary key (1-based).
    #[must_use]
    pub fn primary_key(mut self, ordinal: u32) -> Self {
        self.pk_ordinal = ordinal;
        self
    }
}
