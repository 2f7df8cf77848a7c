//! Display implementation for Value as SQL literals.

use super::Value;

fn write_hex(f: &mut core::fmt::Formatter<'_>, bytes: &[u8]) -> core::fmt::Result {
    write!(f, "X'")?;
    for byte in bytes {
        write!(f, "{byte:02X}")?;
    }
    write!(f, "'")
}

/// TEXT that a quoted literal cannot carry: embedded NULs or invalid UTF-8.
fn write_text_cast(f: &mut core::fmt::Formatter<'_>, bytes: &[u8]) -> core::fmt::Result {
    write!(f, "CAST(")?;
    write_hex(f, bytes)?;
    write!(f, " AS TEXT)")
}

impl core::fmt::Display for Value {
    /// Format a Value as a SQL literal that reads back as the same value.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            Value::Real(v) => {
                if v.is_nan() {
                    write!(f, "NULL")
                } else if v.is_infinite() {
                    if v.is_sign_positive() {
                        write!(f, "9e999") // SQLite's way of representing +infinity
                    } else {
                        write!(f, "-9e999")
                    }
                } else {
                    // Debug keeps the fractional part, so 1.0 stays a REAL.
                    write!(f, "{v:?}")
                }
            }
            Value::Text(s) if s.contains('\0') => write_text_cast(f, s.as_bytes()),
            Value::RawText(bytes) => write_text_cast(f, bytes),
            Value::Text(s) => {
                // Escape single quotes by doubling them
                write!(f, "'")?;
                for c in s.chars() {
                    if c == '\'' {
                        write!(f, "''")?;
                    } else {
                        core::fmt::Write::write_char(f, c)?;
                    }
                }
                write!(f, "'")
            }
            Value::Blob(b) => write_hex(f, b),
            Value::Null => write!(f, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_literals_are_bare() {
        assert_eq!(Value::Integer(-12).to_string(), "-12");
        assert_eq!(Value::Real(1.0).to_string(), "1.0");
        assert_eq!(Value::Real(0.25).to_string(), "0.25");
        assert_eq!(Value::from(true).to_string(), "1");
    }

    #[test]
    fn test_non_finite_reals() {
        assert_eq!(Value::Real(f64::NAN).to_string(), "NULL");
        assert_eq!(Value::Real(f64::INFINITY).to_string(), "9e999");
        assert_eq!(Value::Real(f64::NEG_INFINITY).to_string(), "-9e999");
    }

    #[test]
    fn test_text_quotes_are_doubled() {
        assert_eq!(Value::from("O'Brien").to_string(), "'O''Brien'");
        assert_eq!(Value::from("''").to_string(), "''''''");
        assert_eq!(Value::from("").to_string(), "''");
    }

    #[test]
    fn test_blob_and_null() {
        assert_eq!(Value::Blob(vec![0x00, 0xAB, 0x1f]).to_string(), "X'00AB1F'");
        assert_eq!(Value::Null.to_string(), "NULL");
    }

    #[test]
    fn test_text_with_nul_is_cast_from_hex() {
        assert_eq!(
            Value::from("a\0b").to_string(),
            "CAST(X'610062' AS TEXT)"
        );
        assert_eq!(
            Value::RawText(vec![0xFF, b'\'']).to_string(),
            "CAST(X'FF27' AS TEXT)"
        );
    }
}
