use crate::style::value::{StyleMap, StyleValue};

/// Properties that get a `-webkit-` twin carrying the same value.
const WEBKIT_TWINS: &[&str] = &[
    "align-items",
    "align-self",
    "align-content",
    "flex",
    "flex-basis",
    "flex-flow",
    "flex-grow",
    "flex-shrink",
    "flex-wrap",
    "justify-content",
];

/// Expands flexbox properties into their vendor-prefixed variants.
///
/// Prefixed names sort before the standard ones, and `display` gets an ordered
/// pair of values, so applying the result in order leaves the standard
/// property or value last. Entries that already carry several values are taken
/// as expanded and left alone. Other properties pass through untouched.
pub fn apply_css_prefixes(styles: &StyleMap) -> StyleMap {
    let mut target = styles.clone();
    for (key, values) in styles.iter() {
        let [value] = values else {
            continue;
        };
        match key {
            "display" => match value.to_string().as_str() {
                "flex" => target.insert_values("display", ["-webkit-flex", "flex"]),
                "inline-flex" => {
                    target.insert_values("display", ["-webkit-inline-flex", "inline-flex"])
                }
                _ => {}
            },
            "flex-direction" => {
                let direction = if value.is_set() {
                    value.clone()
                } else {
                    StyleValue::from("row")
                };
                target.insert("-webkit-flex-direction", direction.clone());
                target.insert("flex-direction", direction);
            }
            "order" => {
                let order = if is_numeric(value) {
                    value.clone()
                } else {
                    StyleValue::from("0")
                };
                target.insert("-webkit-order", order.clone());
                target.insert("order", order);
            }
            twin if WEBKIT_TWINS.contains(&twin) => {
                target.insert(&format!("-webkit-{}", twin), value.clone());
            }
            _ => {}
        }
    }
    target
}

// Blank and unset count as numeric (zero), like `isNaN` on an empty value.
fn is_numeric(value: &StyleValue) -> bool {
    match value {
        StyleValue::Number(n) => !n.is_nan(),
        StyleValue::Text(text) => {
            let trimmed = text.trim();
            trimmed.is_empty() || trimmed.parse::<f64>().is_ok()
        }
        StyleValue::Unset => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values_of(map: &StyleMap, key: &str) -> Vec<String> {
        map.get(key)
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn display_flex_gets_prefixed_value_first() {
        let prefixed = apply_css_prefixes(&StyleMap::new().with("display", "flex"));
        assert_eq!(values_of(&prefixed, "display"), vec!["-webkit-flex", "flex"]);

        let block = apply_css_prefixes(&StyleMap::new().with("display", "block"));
        assert_eq!(values_of(&block, "display"), vec!["block"]);
    }

    #[test]
    fn flex_properties_get_webkit_twins() {
        let prefixed = apply_css_prefixes(
            &StyleMap::new()
                .with("flex", "1 1 auto")
                .with("justify-content", "center")
                .with("margin-left", "4px"),
        );
        assert_eq!(values_of(&prefixed, "-webkit-flex"), vec!["1 1 auto"]);
        assert_eq!(values_of(&prefixed, "-webkit-justify-content"), vec!["center"]);
        assert!(prefixed.get("-webkit-margin-left").is_none());
        let keys: Vec<&str> = prefixed.iter().map(|(k, _)| k).collect();
        assert_eq!(keys[0], "-webkit-flex");
    }

    #[test]
    fn flex_direction_defaults_to_row() {
        let prefixed = apply_css_prefixes(&StyleMap::new().with("flex-direction", StyleValue::Unset));
        assert_eq!(values_of(&prefixed, "flex-direction"), vec!["row"]);
        assert_eq!(values_of(&prefixed, "-webkit-flex-direction"), vec!["row"]);
    }

    #[test]
    fn order_falls_back_to_zero() {
        let prefixed = apply_css_prefixes(&StyleMap::new().with("order", "first"));
        assert_eq!(values_of(&prefixed, "order"), vec!["0"]);
        let numeric = apply_css_prefixes(&StyleMap::new().with("order", 3));
        assert_eq!(values_of(&numeric, "-webkit-order"), vec!["3"]);
    }
}
