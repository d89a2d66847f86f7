use super::{EvalError, Object};
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;

/// The hashable subset of objects. Each key maps to exactly one object, so
/// two keys are equal only when their source objects are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl Display for HashKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for HashKey {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for HashKey {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for HashKey {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for HashKey {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl TryFrom<&Object> for HashKey {
    type Error = EvalError;

    fn try_from(obj: &Object) -> std::result::Result<Self, Self::Error> {
        match obj {
            Object::String(s) => Ok(Self::String(s.clone())),
            Object::Integer(n) => Ok(Self::Integer(*n)),
            Object::Boolean(b) => Ok(Self::Boolean(*b)),
            o => Err(EvalError::NotHashable {
                type_name: o.type_name(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// Pairs ordered by key, which keeps `inspect` output stable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HashValue {
    pub pairs: BTreeMap<HashKey, HashPair>,
}

impl HashValue {
    pub fn get(&self, key: &HashKey) -> Option<&Object> {
        self.pairs.get(key).map(|pair| &pair.value)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(HashKey, HashPair)> for HashValue {
    fn from_iter<I: IntoIterator<Item = (HashKey, HashPair)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl Display for HashValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let pair_names: Vec<String> = self
            .pairs
            .values()
            .map(|pair| format!("{}: {}", pair.key, pair.value))
            .collect();

        write!(f, "{{{}}}", pair_names.join(", "))
    }
}
