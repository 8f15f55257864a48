use std::collections::BTreeMap;
use std::fmt;

/// A single CSS value as directives hand it over.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Text(String),
    Number(f64),
    /// Clears the property.
    Unset,
}

impl StyleValue {
    /// Unset and empty text carry no declaration.
    pub fn is_set(&self) -> bool {
        match self {
            StyleValue::Text(text) => !text.is_empty(),
            StyleValue::Number(_) => true,
            StyleValue::Unset => false,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(text) => f.write_str(text),
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Unset => Ok(()),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl<T: Into<StyleValue>> From<Option<T>> for StyleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StyleValue::Unset, Into::into)
    }
}

/// Property name to one or more values, kept in lexicographic key order.
///
/// Several values for one property are written one after another, so the
/// last one in sorted order is what the target keeps when it supports it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    entries: BTreeMap<String, Vec<StyleValue>>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: &str, value: impl Into<StyleValue>) -> Self {
        self.insert(property, value);
        self
    }

    pub fn with_values<I, V>(mut self, property: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<StyleValue>,
    {
        self.insert_values(property, values);
        self
    }

    pub fn insert(&mut self, property: &str, value: impl Into<StyleValue>) {
        self.entries
            .insert(property.to_string(), vec![value.into()]);
    }

    pub fn insert_values<I, V>(&mut self, property: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<StyleValue>,
    {
        self.entries.insert(
            property.to_string(),
            values.into_iter().map(Into::into).collect(),
        );
    }

    pub fn get(&self, property: &str) -> Option<&[StyleValue]> {
        self.entries.get(property).map(Vec::as_slice)
    }

    /// Entries in lexicographic property order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[StyleValue])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = StyleMap::new();
        for (property, value) in iter {
            map.insert(property.as_ref(), value);
        }
        map
    }
}

/// Values in the order they get applied: ascending by their CSS text.
pub fn sorted_values(values: &[StyleValue]) -> Vec<&StyleValue> {
    let mut sorted: Vec<&StyleValue> = values.iter().collect();
    sorted.sort_by_cached_key(|v| v.to_string());
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_print_like_css() {
        assert_eq!(StyleValue::from(5).to_string(), "5");
        assert_eq!(StyleValue::from(0.5).to_string(), "0.5");
        assert_eq!(StyleValue::Unset.to_string(), "");
        assert!(!StyleValue::from("").is_set());
        assert!(StyleValue::from(0).is_set());
    }

    #[test]
    fn keys_iterate_alphabetically() {
        let map: StyleMap = [("flex-direction", "row"), ("display", "flex")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["display", "flex-direction"]);
    }

    #[test]
    fn values_sort_ascending() {
        let values = vec![StyleValue::from("flex"), StyleValue::from("-webkit-flex")];
        let sorted: Vec<String> = sorted_values(&values).iter().map(|v| v.to_string()).collect();
        assert_eq!(sorted, vec!["-webkit-flex", "flex"]);
    }
}
