use tessera_core::Dialect;

pub(crate) struct Formatter<'a> {
    pub(crate) dialect: &'a dyn Dialect,

    /// Where to write the serialized SQL
    pub(crate) dst: &'a mut String,
}

impl Formatter<'_> {
    /// Writes one fragment.
    pub(crate) fn push(&mut self, fragment: impl ToSql) -> &mut Self {
        fragment.to_sql(self);
        self
    }
}

pub(crate) trait ToSql {
    fn to_sql(self, f: &mut Formatter<'_>);
}

impl ToSql for &str {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self);
    }
}

impl ToSql for &String {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self);
    }
}

impl ToSql for usize {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use std::fmt::Write;
        let _ = write!(f.dst, "{self}");
    }
}

impl ToSql for u64 {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use std::fmt::Write;
        let _ = write!(f.dst, "{self}");
    }
}

/// An identifier, escaped by the dialect.
pub(crate) struct Ident<S>(pub(crate) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let escaped = f.dialect.escape_column(self.0.as_ref());
        f.dst.push_str(&escaped);
    }
}

/// Comma delimited
pub(crate) struct Comma<L>(pub(crate) L);

/// Delimited by an arbitrary separator
pub(crate) struct Delimited<L>(pub(crate) L, pub(crate) &'static str);

impl<L> ToSql for Comma<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.push(Delimited(self.0, ", "));
    }
}

impl<L> ToSql for Delimited<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql(self, f: &mut Formatter<'_>) {
        let mut s = "";
        for i in self.0 {
            f.push(s).push(i);
            s = self.1;
        }
    }
}
