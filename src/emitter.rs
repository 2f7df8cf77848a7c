//! Deduplication and final assembly of generated statements.

use std::io::{self, Write};

use indexmap::IndexSet;

/// Remove repeated statements, keeping the first occurrence of each.
#[must_use]
pub fn dedup_statements<I>(statements: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    statements
        .into_iter()
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Line ending for `statement`, adding the `;` it may lack.
fn terminator(statement: &str) -> &'static str {
    if statement.ends_with(';') { "\n" } else { ";\n" }
}

/// An ordered, duplicate-free list of SQL statements.
///
/// Applying the statements in order to the old snapshot reproduces the new
/// snapshot's rows, except for rows whose data changed under the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationScript {
    statements: Vec<String>,
}

impl MigrationScript {
    /// Build a script, dropping repeated statements.
    #[must_use]
    pub fn new<I>(statements: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            statements: dedup_statements(statements),
        }
    }

    /// The statements in emission order.
    #[must_use]
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether the script has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Write the script, one `;`-terminated statement per line.
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for statement in &self.statements {
            out.write_all(statement.as_bytes())?;
            out.write_all(terminator(statement).as_bytes())?;
        }
        Ok(())
    }

    /// The script as one string, as written by [`Self::write_to`].
    #[must_use]
    pub fn to_sql(&self) -> String {
        let capacity = self.statements.iter().map(|s| s.len() + 2).sum();
        let mut out = String::with_capacity(capacity);
        for statement in &self.statements {
            out.push_str(statement);
            out.push_str(terminator(statement));
        }
        out
    }
}

impl FromIterator<String> for MigrationScript {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a MigrationScript {
    type Item = &'a String;
    type IntoIter = core::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
