//! Names captured by a successful match.

use smallvec::SmallVec;

use fml_value::{Name, Value};

/// Ordered `(name, value)` captures.
///
/// Captures keep pattern order. When a name is bound twice, lookup returns
/// the later binding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings(SmallVec<[(Name, Value); 4]>);

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, name: Name, value: Value) {
        self.0.push((name, value));
    }

    /// Append every capture of `other`, keeping order.
    pub fn extend(&mut self, other: Bindings) {
        self.0.extend(other.0);
    }

    /// Most recent value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .rev()
            .find(|(n, _)| &**n == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(n, v)| (&**n, v))
    }

    /// Captured values in capture order, for passing to a handler.
    pub fn values(&self) -> Vec<Value> {
        self.0.iter().map(|(_, v)| v.clone()).collect()
    }
}

impl IntoIterator for Bindings {
    type Item = (Name, Value);
    type IntoIter = smallvec::IntoIter<[(Name, Value); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(Name, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        Bindings(iter.into_iter().collect())
    }
}
