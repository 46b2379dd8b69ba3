//! Signatures of the methods an [`Element::Method`] may call.
//!
//! Arguments that are fields or nested method calls are not type checked,
//! since their type is only known to the database. Literal arguments must
//! match the declared kind.
//!
//! [`Element::Method`]: tessera_core::stmt::Element::Method

use tessera_core::{
    stmt::{Element, Method, Value},
    CompileError, Result,
};

/// Kind of a method argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    /// A string
    Text,

    /// Anything, including NULL
    Any,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Signature {
    pub name: &'static str,
    pub args: &'static [Arg],
}

const SIGNATURES: &[Signature] = &[
    Signature {
        name: "contains",
        args: &[Arg::Text, Arg::Text],
    },
    Signature {
        name: "starts_with",
        args: &[Arg::Text, Arg::Text],
    },
    Signature {
        name: "ends_with",
        args: &[Arg::Text, Arg::Text],
    },
    Signature {
        name: "lower",
        args: &[Arg::Text],
    },
    Signature {
        name: "upper",
        args: &[Arg::Text],
    },
    Signature {
        name: "length",
        args: &[Arg::Text],
    },
    Signature {
        name: "is_null",
        args: &[Arg::Any],
    },
    Signature {
        name: "is_not_null",
        args: &[Arg::Any],
    },
];

pub fn signature(name: &str) -> Option<&'static Signature> {
    SIGNATURES.iter().find(|signature| signature.name == name)
}

/// Checks a call against its signature.
pub fn check(method: &Method) -> Result<&'static Signature> {
    let Some(signature) = signature(&method.name) else {
        return Err(CompileError::UnsupportedMethod {
            name: method.name.clone(),
        }
        .into());
    };

    if method.params.len() != signature.args.len() {
        return Err(CompileError::ArityMismatch {
            node: signature.name,
            expected: signature.args.len(),
            actual: method.params.len(),
        }
        .into());
    }

    for (position, (param, arg)) in method.params.iter().zip(signature.args).enumerate() {
        let Element::Value(value) = param else {
            continue;
        };

        let ok = match arg {
            Arg::Any => true,
            Arg::Text => matches!(value, Value::String(_)),
        };

        if !ok {
            return Err(CompileError::MethodArgumentType {
                method: method.name.clone(),
                position,
                expected: "String",
                actual: value.kind_name(),
            }
            .into());
        }
    }

    Ok(signature)
}

/// Substitutes each `%s` of `template` with the next argument.
pub(crate) fn expand(template: &str, args: &[String]) -> String {
    let mut ret = String::with_capacity(template.len() + args.iter().map(String::len).sum::<usize>());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find("%s") {
        ret.push_str(&rest[..pos]);
        if let Some(arg) = args.next() {
            ret.push_str(arg);
        }
        rest = &rest[pos + 2..];
    }

    ret.push_str(rest);
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_method() {
        let err = check(&Method::new("soundex", [Element::field("Name")])).unwrap_err();
        assert_eq!(
            err.as_compile_error(),
            Some(&CompileError::UnsupportedMethod {
                name: "soundex".into()
            })
        );
    }

    #[test]
    fn wrong_arity() {
        let err = check(&Method::new("contains", [Element::field("Name")])).unwrap_err();
        assert_eq!(
            err.as_compile_error(),
            Some(&CompileError::ArityMismatch {
                node: "contains",
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn wrong_literal_type() {
        let err = check(&Method::new(
            "contains",
            [Element::field("Name"), Element::value(5_i64)],
        ))
        .unwrap_err();

        assert_eq!(
            err.as_compile_error(),
            Some(&CompileError::MethodArgumentType {
                method: "contains".into(),
                position: 1,
                expected: "String",
                actual: "I64",
            })
        );
    }

    #[test]
    fn fields_are_untyped() {
        let method = Method::new("contains", [Element::field("Name"), Element::field("Nick")]);
        assert_eq!(check(&method).unwrap().name, "contains");

        let method = Method::new("is_null", [Element::value(Value::Null)]);
        assert!(check(&method).is_ok());
    }

    #[test]
    fn expand_in_order() {
        assert_eq!(
            expand("INSTR(%s, %s) > 0", &["a".into(), "?".into()]),
            "INSTR(a, ?) > 0"
        );
        assert_eq!(expand("%s LIKE '%' || %s", &["a".into(), "?".into()]), "a LIKE '%' || ?");
    }
}
