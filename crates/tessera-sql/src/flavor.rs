use tessera_core::{Dialect, Error};

use std::borrow::Cow;

/// The SQL dialects supported out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Sqlite,
    Postgresql,
    Mysql,
}

impl Flavor {
    pub fn is_sqlite(self) -> bool {
        matches!(self, Flavor::Sqlite)
    }

    pub fn is_postgresql(self) -> bool {
        matches!(self, Flavor::Postgresql)
    }

    pub fn is_mysql(self) -> bool {
        matches!(self, Flavor::Mysql)
    }

    /// Error codes reported for unique, primary key and other key constraint
    /// violations.
    fn conflict_codes(self) -> &'static [&'static str] {
        match self {
            // SQLITE_CONSTRAINT_PRIMARYKEY, _UNIQUE, _NOTNULL, _FOREIGNKEY, _ROWID
            Flavor::Sqlite => &["1555", "2067", "1299", "787", "2579"],
            // unique_violation
            Flavor::Postgresql => &["23505"],
            // ER_DUP_ENTRY, ER_DUP_ENTRY_WITH_KEY_NAME
            Flavor::Mysql => &["1062", "1586"],
        }
    }
}

impl Dialect for Flavor {
    fn name(&self) -> &'static str {
        match self {
            Flavor::Sqlite => "sqlite",
            Flavor::Postgresql => "postgresql",
            Flavor::Mysql => "mysql",
        }
    }

    fn escape_table(&self, name: &str) -> String {
        self.escape_column(name)
    }

    fn escape_column(&self, name: &str) -> String {
        match self {
            Flavor::Mysql => format!("`{}`", name.replace('`', "``")),
            Flavor::Sqlite | Flavor::Postgresql => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }

    fn null_safe_eq_operator(&self) -> &'static str {
        match self {
            Flavor::Sqlite => "IS",
            Flavor::Postgresql => "IS NOT DISTINCT FROM",
            Flavor::Mysql => "<=>",
        }
    }

    fn method_template(&self, name: &str) -> Option<&'static str> {
        let template = match (name, self) {
            ("contains", Flavor::Postgresql) => "STRPOS(%s, %s) > 0",
            ("contains", _) => "INSTR(%s, %s) > 0",
            ("starts_with", Flavor::Postgresql) => "STRPOS(%s, %s) = 1",
            ("starts_with", _) => "INSTR(%s, %s) = 1",
            ("ends_with", Flavor::Mysql) => "%s LIKE CONCAT('%', %s)",
            ("ends_with", _) => "%s LIKE '%' || %s",
            ("lower", _) => "LOWER(%s)",
            ("upper", _) => "UPPER(%s)",
            ("length", Flavor::Sqlite) => "LENGTH(%s)",
            ("length", _) => "CHAR_LENGTH(%s)",
            ("is_null", _) => "%s IS NULL",
            ("is_not_null", _) => "%s IS NOT NULL",
            _ => return None,
        };

        Some(template)
    }

    fn is_conflict_error(&self, err: &Error) -> bool {
        err.driver_code()
            .is_some_and(|code| self.conflict_codes().contains(&code))
    }

    fn row_values_in_list(&self) -> bool {
        self.is_sqlite()
    }

    fn unbounded_limit(&self) -> Option<&'static str> {
        match self {
            Flavor::Sqlite => Some("-1"),
            Flavor::Postgresql => None,
            Flavor::Mysql => Some("18446744073709551615"),
        }
    }

    fn bind_placeholders<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        if !self.is_postgresql() || !sql.contains('?') {
            return Cow::Borrowed(sql);
        }

        let mut ret = String::with_capacity(sql.len() + 8);
        let mut n = 0;
        let mut quote = None;

        for ch in sql.chars() {
            match (quote, ch) {
                (None, '\'' | '"') => {
                    quote = Some(ch);
                    ret.push(ch);
                }
                (Some(open), _) if open == ch => {
                    quote = None;
                    ret.push(ch);
                }
                (None, '?') => {
                    n += 1;
                    ret.push('$');
                    ret.push_str(&n.to_string());
                }
                _ => ret.push(ch),
            }
        }

        Cow::Owned(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escaping() {
        assert_eq!(Flavor::Sqlite.escape_column("name"), "\"name\"");
        assert_eq!(Flavor::Postgresql.escape_table("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(
            Flavor::Mysql.escape_table_column("accounts", "id"),
            "`accounts`.`id`"
        );
    }

    #[test]
    fn postgres_rebinds_placeholders() {
        let sql = "SELECT \"a?\" FROM t WHERE x = ? AND y = '?' AND z IN (?, ?)";
        assert_eq!(
            Flavor::Postgresql.bind_placeholders(sql),
            "SELECT \"a?\" FROM t WHERE x = $1 AND y = '?' AND z IN ($2, $3)"
        );
        assert_eq!(Flavor::Sqlite.bind_placeholders(sql), sql);
        assert_eq!(Flavor::Mysql.bind_placeholders(sql), sql);
    }

    #[test]
    fn conflict_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "UNIQUE constraint failed");
        let err = Error::driver_operation_failed_with_code(io, "2067");
        assert!(Flavor::Sqlite.is_conflict_error(&err));
        assert!(!Flavor::Postgresql.is_conflict_error(&err));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "duplicate key");
        let err = Error::driver_operation_failed_with_code(io, "23505");
        assert!(Flavor::Postgresql.is_conflict_error(&err));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        assert!(!Flavor::Mysql.is_conflict_error(&Error::driver_operation_failed(io)));
    }

    #[test]
    fn templates() {
        assert_eq!(
            Flavor::Postgresql.method_template("contains"),
            Some("STRPOS(%s, %s) > 0")
        );
        assert_eq!(
            Flavor::Mysql.method_template("contains"),
            Some("INSTR(%s, %s) > 0")
        );
        assert_eq!(Flavor::Sqlite.method_template("soundex"), None);
    }
}
