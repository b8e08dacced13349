//! Value expressions and their resolution against authentication state.

use profile_attributes_sdk::{AttributeValues, StateContainer, StateValue};

/// A configured value expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueExpression<'a> {
    /// Fixed text, written wrapped in double quotes.
    Literal(&'a str),
    /// Key path into a state container.
    Reference(&'a str),
}

impl<'a> ValueExpression<'a> {
    /// Classify a raw expression.
    ///
    /// Text wrapped in a pair of double quotes is a literal. The empty
    /// expression is the empty literal. A lone quote or an unterminated
    /// literal is a reference.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        if raw.is_empty() {
            return Self::Literal("");
        }
        match raw.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
            Some(text) => Self::Literal(text),
            None => Self::Reference(raw),
        }
    }

    /// Resolve against `state`.
    ///
    /// Literals always yield exactly one value. References yield nothing
    /// when the key is undefined.
    #[must_use]
    pub fn resolve<S>(self, state: &S) -> AttributeValues
    where
        S: StateContainer + ?Sized,
    {
        match self {
            Self::Literal(text) => AttributeValues::from([text.to_owned()]),
            Self::Reference(key_path) => state
                .get(key_path)
                .map(StateValue::into_values)
                .unwrap_or_default(),
        }
    }
}

/// Resolve a raw expression against `state`.
#[must_use]
pub fn resolve<S>(state: &S, expression: &str) -> AttributeValues
where
    S: StateContainer + ?Sized,
{
    ValueExpression::parse(expression).resolve(state)
}
