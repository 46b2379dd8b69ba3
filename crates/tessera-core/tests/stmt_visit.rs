use tessera_core::stmt::{
    Clause, ClauseAnd, ClauseCmp, ClauseIn, ClauseNot, ClauseOr, Element, Field, Method, Value,
    Visit,
};

/// Renders a clause as an s-expression.
struct Render;

impl Render {
    fn cmp(&self, op: &str, clause: &ClauseCmp) -> String {
        format!("({op} {} {})", clause.lhs.accept(self), clause.rhs.accept(self))
    }

    fn list<'a>(&self, op: &str, clauses: impl IntoIterator<Item = &'a Clause>) -> String {
        let items: Vec<_> = clauses.into_iter().map(|c| c.accept(self)).collect();
        format!("({op} {})", items.join(" "))
    }
}

impl Visit for Render {
    type Output = String;

    fn visit_value(&self, value: &Value) -> String {
        format!("{value:?}")
    }

    fn visit_field(&self, field: &Field) -> String {
        field.path.clone()
    }

    fn visit_method(&self, method: &Method) -> String {
        let params: Vec<_> = method.params.iter().map(|p| p.accept(self)).collect();
        format!("{}({})", method.name, params.join(", "))
    }

    fn visit_eq(&self, clause: &ClauseCmp) -> String {
        self.cmp("=", clause)
    }

    fn visit_neq(&self, clause: &ClauseCmp) -> String {
        self.cmp("!=", clause)
    }

    fn visit_gt(&self, clause: &ClauseCmp) -> String {
        self.cmp(">", clause)
    }

    fn visit_gte(&self, clause: &ClauseCmp) -> String {
        self.cmp(">=", clause)
    }

    fn visit_lt(&self, clause: &ClauseCmp) -> String {
        self.cmp("<", clause)
    }

    fn visit_lte(&self, clause: &ClauseCmp) -> String {
        self.cmp("<=", clause)
    }

    fn visit_not(&self, clause: &ClauseNot) -> String {
        format!("(not {})", clause.clause.accept(self))
    }

    fn visit_and(&self, clause: &ClauseAnd) -> String {
        self.list("and", clause)
    }

    fn visit_or(&self, clause: &ClauseOr) -> String {
        self.list("or", clause)
    }

    fn visit_in(&self, clause: &ClauseIn) -> String {
        let lhs: Vec<_> = clause.lhs.iter().map(|e| e.accept(self)).collect();
        let rows: Vec<_> = clause
            .rows
            .iter()
            .map(|row| {
                let row: Vec<_> = row.iter().map(|e| e.accept(self)).collect();
                format!("[{}]", row.join(" "))
            })
            .collect();
        format!("(in [{}] {})", lhs.join(" "), rows.join(" "))
    }

    fn visit_truthy(&self, element: &Element) -> String {
        format!("(truthy {})", element.accept(self))
    }
}

#[test]
fn dispatches_every_node_kind() {
    let clause = Clause::and([
        Clause::or([
            Clause::eq(Element::field("Company"), Element::value("Acme")),
            Clause::neq(Element::field("Company"), Element::value(Value::Null)),
        ]),
        Clause::not(Clause::gt(Element::field("Rank"), Element::value(1))),
        Clause::gte(Element::field("Rank"), Element::value(2)),
        Clause::lt(Element::field("Rank"), Element::value(3)),
        Clause::lte(Element::field("Rank"), Element::value(4)),
        Clause::in_list(Element::field("ID"), [Element::value("1"), Element::value("2")]),
        Clause::truthy(Element::method(
            "contains",
            [Element::field("Company"), Element::value("Inc")],
        )),
    ]);

    assert_eq!(
        clause.accept(&Render),
        "(and \
         (or (= Company String(\"Acme\")) (!= Company Null)) \
         (not (> Rank I32(1))) \
         (>= Rank I32(2)) \
         (< Rank I32(3)) \
         (<= Rank I32(4)) \
         (in [ID] [String(\"1\")] [String(\"2\")]) \
         (truthy contains(Company, String(\"Inc\"))))"
    );
}

#[test]
fn visitors_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Clause>();
    assert_send_sync::<Element>();

    let clause = Clause::eq(Element::field("ID"), Element::value("1"));
    let rendered = std::thread::scope(|s| {
        let a = s.spawn(|| clause.accept(&Render));
        let b = s.spawn(|| clause.accept(&Render));
        (a.join().unwrap(), b.join().unwrap())
    });

    assert_eq!(rendered.0, rendered.1);
}
