//! Reading and writing the `style="..."` attribute of an element.

use crate::dom::dom_tree::ElementNode;

/// One declaration of a style attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub property: String,
    pub value: String,
}

/// Splits a style attribute into declarations.
///
/// Items without a colon, or with an empty name or value, are skipped.
pub fn parse_style_attribute(input: &str) -> Vec<Declaration> {
    split_declarations(input)
        .into_iter()
        .filter_map(|item| {
            let (property, value) = item.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some(Declaration {
                property: property.to_ascii_lowercase(),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Splits on `;` outside of parentheses and quoted strings, so values such
/// as `url(data:image/png;base64,...)` stay whole.
fn split_declarations(input: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    for (index, ch) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (_, '\\') => escaped = true,
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                items.push(&input[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    items.push(&input[start..]);
    items
}

/// Writes declarations back in the form browsers use (`a: b; c: d;`).
pub fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|decl| format!("{}: {};", decl.property, decl.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inline value of `property`, or the empty string. The last declaration wins.
pub fn get_inline_style(element: &ElementNode, property: &str) -> String {
    let Some(style) = element.get_attribute("style") else {
        return String::new();
    };
    let property = property.to_ascii_lowercase();
    parse_style_attribute(style)
        .into_iter()
        .filter(|decl| decl.property == property)
        .last()
        .map(|decl| decl.value)
        .unwrap_or_default()
}

/// Sets or, with `None`, removes one inline declaration.
///
/// An existing declaration keeps its position; duplicates collapse into it.
pub fn set_inline_style(element: &mut ElementNode, property: &str, value: Option<&str>) {
    let property = property.to_ascii_lowercase();
    let mut declarations =
        parse_style_attribute(element.get_attribute("style").unwrap_or_default());

    let value = value.map(str::trim).filter(|v| !v.is_empty());
    match declarations.iter().position(|decl| decl.property == property) {
        Some(index) => {
            declarations.retain({
                let mut seen = 0usize;
                move |decl| {
                    let keep = decl.property != property || seen == index;
                    seen += 1;
                    keep
                }
            });
            match value {
                Some(value) => declarations[index].value = value.to_string(),
                None => {
                    declarations.remove(index);
                }
            }
        }
        None => {
            if let Some(value) = value {
                declarations.push(Declaration {
                    property,
                    value: value.to_string(),
                });
            }
        }
    }

    if declarations.is_empty() {
        element.remove_attribute("style");
    } else {
        element.set_attribute("style", &serialize_declarations(&declarations));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::dom_tree::create_element;

    #[test]
    fn parses_and_skips_invalid_items() {
        let decls = parse_style_attribute(" Display : flex ;color:;bogus; order: 2");
        assert_eq!(
            decls,
            vec![
                Declaration {
                    property: "display".into(),
                    value: "flex".into()
                },
                Declaration {
                    property: "order".into(),
                    value: "2".into()
                },
            ]
        );
    }

    #[test]
    fn semicolons_inside_values_do_not_split() {
        let decls = parse_style_attribute(
            "background: url(data:image/png;base64,AAAA); content: 'a;b'; order: 1",
        );
        let pairs: Vec<(&str, &str)> = decls
            .iter()
            .map(|d| (d.property.as_str(), d.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("background", "url(data:image/png;base64,AAAA)"),
                ("content", "'a;b'"),
                ("order", "1"),
            ]
        );

        let div = create_element("div");
        let mut node = div.borrow_mut();
        let elem = node.as_element_mut().unwrap();
        set_inline_style(elem, "background", Some("url(\"x;y.png\")"));
        set_inline_style(elem, "display", Some("flex"));
        assert_eq!(get_inline_style(elem, "background"), "url(\"x;y.png\")");
        assert_eq!(
            elem.get_attribute("style"),
            Some("background: url(\"x;y.png\"); display: flex;")
        );
    }

    #[test]
    fn set_updates_in_place_and_removes() {
        let div = create_element("div");
        let mut node = div.borrow_mut();
        let elem = node.as_element_mut().unwrap();
        elem.set_attribute("style", "display: block; color: red; display: grid");

        assert_eq!(get_inline_style(elem, "display"), "grid");

        set_inline_style(elem, "display", Some("flex"));
        assert_eq!(elem.get_attribute("style"), Some("display: flex; color: red;"));

        set_inline_style(elem, "order", Some("1"));
        set_inline_style(elem, "color", None);
        assert_eq!(elem.get_attribute("style"), Some("display: flex; order: 1;"));

        set_inline_style(elem, "display", None);
        set_inline_style(elem, "order", Some(""));
        assert_eq!(elem.get_attribute("style"), None);
    }
}
