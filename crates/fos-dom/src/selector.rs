//! CSS Selector Matching
//!
//! Supports type, universal, `#id`, `.class` and attribute selectors,
//! compounds of those, descendant (` `) and child (`>`) combinators and
//! comma-separated groups. Pseudo-classes are not supported; a selector
//! using one fails to parse.

use crate::{DomTree, NodeId};

/// Comma-separated list of selectors; matches if any member matches
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

/// Compounds joined by combinators, stored left to right.
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Components that must all match the same element
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// A component of a selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check an attribute value (`None` when the attribute is absent)
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(val)) = (&self.matcher, value) else {
            return self.matcher.is_none() && value.is_some();
        };

        let fold = |s: &str| if self.case_insensitive { s.to_lowercase() } else { s.to_string() };
        let val = fold(val);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            // Empty operands never match for the substring family
            AttributeMatcher::Prefix(expected) => !expected.is_empty() && val.starts_with(&fold(expected)),
            AttributeMatcher::Suffix(expected) => !expected.is_empty() && val.ends_with(&fold(expected)),
            AttributeMatcher::Substring(expected) => !expected.is_empty() && val.contains(&fold(expected)),
        }
    }
}

impl SelectorList {
    /// Parse a selector list. Returns `None` if any group is invalid.
    pub fn parse(input: &str) -> Option<Self> {
        let selectors = split_top_level(input, ',')
            .into_iter()
            .map(ComplexSelector::parse)
            .collect::<Option<Vec<_>>>()?;

        if selectors.is_empty() {
            return None;
        }
        Some(Self { selectors })
    }

    /// Check whether `element` matches. Combinators only look at ancestors
    /// up to and including `scope`; `NodeId::NONE` means no boundary.
    pub fn matches(&self, tree: &DomTree, element: NodeId, scope: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, element, scope))
    }
}

impl ComplexSelector {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut compounds = Vec::new();
        let mut combinators = Vec::new();
        let mut pending: Option<Combinator> = None;
        let mut current = String::new();
        let mut in_brackets = false;
        let mut quote: Option<char> = None;

        let flush = |current: &mut String, pending: &mut Option<Combinator>,
                         compounds: &mut Vec<CompoundSelector>,
                         combinators: &mut Vec<Combinator>| -> Option<()> {
            if current.is_empty() {
                return Some(());
            }
            if !compounds.is_empty() {
                combinators.push(pending.take().unwrap_or(Combinator::Descendant));
            } else if pending.is_some() {
                // Leading combinator
                return None;
            }
            compounds.push(CompoundSelector::parse(current)?);
            current.clear();
            Some(())
        };

        for c in input.chars() {
            if let Some(q) = quote {
                current.push(c);
                if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '"' | '\'' if in_brackets => {
                    quote = Some(c);
                    current.push(c);
                }
                '[' => {
                    in_brackets = true;
                    current.push(c);
                }
                ']' => {
                    in_brackets = false;
                    current.push(c);
                }
                c if in_brackets => current.push(c),
                c if c.is_whitespace() => {
                    flush(&mut current, &mut pending, &mut compounds, &mut combinators)?;
                }
                '>' => {
                    flush(&mut current, &mut pending, &mut compounds, &mut combinators)?;
                    if pending == Some(Combinator::Child) {
                        return None;
                    }
                    pending = Some(Combinator::Child);
                }
                c => current.push(c),
            }
        }

        if in_brackets || quote.is_some() {
            return None;
        }
        flush(&mut current, &mut pending, &mut compounds, &mut combinators)?;
        // Trailing combinator
        if pending.is_some() || compounds.is_empty() {
            return None;
        }

        Some(Self { compounds, combinators })
    }

    fn matches(&self, tree: &DomTree, element: NodeId, scope: NodeId) -> bool {
        self.matches_at(self.compounds.len() - 1, tree, element, scope)
    }

    fn matches_at(&self, idx: usize, tree: &DomTree, element: NodeId, scope: NodeId) -> bool {
        if !self.compounds[idx].matches(tree, element) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        match self.combinators[idx - 1] {
            Combinator::Child => parent_within(tree, element, scope)
                .is_some_and(|parent| self.matches_at(idx - 1, tree, parent, scope)),
            Combinator::Descendant => {
                let mut cursor = parent_within(tree, element, scope);
                while let Some(ancestor) = cursor {
                    if self.matches_at(idx - 1, tree, ancestor, scope) {
                        return true;
                    }
                    cursor = parent_within(tree, ancestor, scope);
                }
                false
            }
        }
    }
}

impl CompoundSelector {
    fn parse(input: &str) -> Option<Self> {
        let mut components = Vec::new();
        let mut rest = input;

        while let Some(c) = rest.chars().next() {
            match c {
                '*' => {
                    components.push(SelectorComponent::Universal);
                    rest = &rest[1..];
                }
                '#' | '.' => {
                    let (ident, tail) = take_ident(&rest[1..]);
                    if !is_valid_ident(ident) {
                        return None;
                    }
                    components.push(if c == '#' {
                        SelectorComponent::Id(ident.to_string())
                    } else {
                        SelectorComponent::Class(ident.to_string())
                    });
                    rest = tail;
                }
                '[' => {
                    let end = find_unquoted(rest, ']')?;
                    components.push(parse_attribute_selector(&rest[1..end])?);
                    rest = &rest[end + 1..];
                }
                _ => {
                    // A type selector may only lead the compound
                    if !components.is_empty() {
                        return None;
                    }
                    let (ident, tail) = take_ident(rest);
                    if !is_valid_ident(ident) {
                        return None;
                    }
                    components.push(SelectorComponent::Type(ident.to_ascii_lowercase()));
                    rest = tail;
                }
            }
        }

        if components.is_empty() {
            return None;
        }
        Some(Self { components })
    }

    fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        let Some(elem) = tree.get(element).and_then(|node| node.as_element()) else {
            return false;
        };
        let tag = tree.resolve(elem.name.local);

        self.components.iter().all(|component| match component {
            SelectorComponent::Universal => true,
            SelectorComponent::Type(name) => tag.eq_ignore_ascii_case(name),
            SelectorComponent::Id(id) => tree.interner().lookup(id)
                .is_some_and(|id| elem.id == Some(id)),
            SelectorComponent::Class(class) => tree.interner().lookup(class)
                .is_some_and(|class| elem.has_class(class)),
            SelectorComponent::Attribute(attr) => attr.matches(tree.attr(element, &attr.name)),
        })
    }
}

/// Parent of `id`, unless `id` is the scope boundary itself
fn parent_within(tree: &DomTree, id: NodeId, scope: NodeId) -> Option<NodeId> {
    if id == scope {
        return None;
    }
    let parent = tree.get(id)?.parent;
    parent.is_valid().then_some(parent)
}

/// Split on `sep` outside of brackets and quotes
fn split_top_level(input: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, c) if c == sep && depth == 0 => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Check if string is a valid CSS identifier
fn is_valid_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Parse an attribute selector content (without brackets)
fn parse_attribute_selector(content: &str) -> Option<SelectorComponent> {
    let content = content.trim();

    let (content, case_insensitive) = match content.strip_suffix(" i").or_else(|| content.strip_suffix(" I")) {
        Some(stripped) => (stripped.trim_end(), true),
        None => (content, false),
    };

    if let Some(eq) = find_unquoted(content, '=') {
        let (name_end, matcher_fn): (usize, fn(String) -> AttributeMatcher) =
            match content[..eq].chars().next_back() {
                Some('~') => (eq - 1, AttributeMatcher::Contains),
                Some('|') => (eq - 1, AttributeMatcher::DashMatch),
                Some('^') => (eq - 1, AttributeMatcher::Prefix),
                Some('$') => (eq - 1, AttributeMatcher::Suffix),
                Some('*') => (eq - 1, AttributeMatcher::Substring),
                _ => (eq, AttributeMatcher::Exact),
            };

        let name = content[..name_end].trim();
        if !is_valid_ident(name) {
            return None;
        }
        let value = unquote(content[eq + 1..].trim());

        return Some(SelectorComponent::Attribute(AttributeSelector {
            name: name.to_ascii_lowercase(),
            matcher: Some(matcher_fn(value.to_string())),
            case_insensitive,
        }));
    }

    if !is_valid_ident(content) {
        return None;
    }
    Some(SelectorComponent::Attribute(AttributeSelector {
        name: content.to_ascii_lowercase(),
        matcher: None,
        case_insensitive,
    }))
}

/// Byte offset of the first `target` outside single or double quotes
fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == target => return Some(i),
            None => {}
        }
    }
    None
}

fn unquote(s: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(q).and_then(|v| v.strip_suffix(q)) {
            return inner;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_tree() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        let fieldset = tree.create_element("fieldset");
        let text = tree.create_element("input");
        let submit = tree.create_element("input");
        tree.set_attribute(text, "type", "text");
        tree.set_attribute(text, "name", "q");
        tree.set_attribute(text, "class", "wide search");
        tree.set_attribute(submit, "type", "submit");
        tree.append_child(tree.root(), form);
        tree.append_child(form, fieldset);
        tree.append_child(fieldset, text);
        tree.append_child(form, submit);
        (tree, form, text, submit)
    }

    #[test]
    fn test_parse_groups() {
        let list = SelectorList::parse("input, button").unwrap();
        assert_eq!(list.selectors.len(), 2);
        assert_eq!(
            list.selectors[1].compounds[0].components,
            vec![SelectorComponent::Type("button".to_string())]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SelectorList::parse("").is_none());
        assert!(SelectorList::parse("input,").is_none());
        assert!(SelectorList::parse("> input").is_none());
        assert!(SelectorList::parse("input >").is_none());
        assert!(SelectorList::parse("[name").is_none());
        assert!(SelectorList::parse("input:hover").is_none());
    }

    #[test]
    fn test_attribute_selector_exact() {
        let sel = AttributeSelector {
            name: "type".to_string(),
            matcher: Some(AttributeMatcher::Exact("text".to_string())),
            case_insensitive: false,
        };

        assert!(sel.matches(Some("text")));
        assert!(!sel.matches(Some("TEXT")));
        assert!(!sel.matches(None));
    }

    #[test]
    fn test_attribute_selector_case_insensitive() {
        let list = SelectorList::parse("[type=SUBMIT i]").unwrap();
        let (tree, form, _, submit) = form_tree();
        assert!(list.matches(&tree, submit, form));
    }

    #[test]
    fn test_compound_and_attribute() {
        let (tree, form, text, submit) = form_tree();
        let list = SelectorList::parse("input[name='q'].search").unwrap();
        assert!(list.matches(&tree, text, form));
        assert!(!list.matches(&tree, submit, form));
    }

    #[test]
    fn test_quoted_attribute_values() {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        let bracket = tree.create_element("input");
        let operator = tree.create_element("input");
        tree.set_attribute(bracket, "name", "a]b");
        tree.set_attribute(operator, "name", "x*=y");
        tree.append_child(tree.root(), form);
        tree.append_child(form, bracket);
        tree.append_child(form, operator);

        let list = SelectorList::parse(r#"input[name="a]b"]"#).unwrap();
        assert!(list.matches(&tree, bracket, form));
        assert!(!list.matches(&tree, operator, form));

        let list = SelectorList::parse(r#"input[name='x*=y']"#).unwrap();
        assert!(list.matches(&tree, operator, form));
        assert!(!list.matches(&tree, bracket, form));
    }

    #[test]
    fn test_operator_detection() {
        let parsed = |input: &str| match SelectorList::parse(input).unwrap().selectors[0].compounds[0].components[0].clone() {
            SelectorComponent::Attribute(attr) => attr.matcher,
            other => panic!("unexpected component {other:?}"),
        };
        assert_eq!(parsed("[a~=b]"), Some(AttributeMatcher::Contains("b".into())));
        assert_eq!(parsed("[a |= b]"), Some(AttributeMatcher::DashMatch("b".into())));
        assert_eq!(parsed("[a^='b=c']"), Some(AttributeMatcher::Prefix("b=c".into())));
        assert_eq!(parsed("[a]"), None);
        assert!(SelectorList::parse("[=b]").is_none());
    }

    #[test]
    fn test_id_and_class_use_cached_values() {
        let (tree, form, text, submit) = form_tree();
        let list = SelectorList::parse(".search").unwrap();
        assert!(list.matches(&tree, text, form));
        assert!(!list.matches(&tree, submit, form));
        // Never interned, so nothing can carry it
        assert!(!SelectorList::parse(".missing-class").unwrap().matches(&tree, text, form));
        assert!(!SelectorList::parse("#nobody").unwrap().matches(&tree, text, form));
    }

    #[test]
    fn test_combinators() {
        let (tree, form, text, submit) = form_tree();
        let child = SelectorList::parse("form > input").unwrap();
        assert!(child.matches(&tree, submit, form));
        assert!(!child.matches(&tree, text, form));

        let descendant = SelectorList::parse("form input").unwrap();
        assert!(descendant.matches(&tree, text, form));
    }

    #[test]
    fn test_scope_limits_ancestors() {
        let (tree, form, text, _) = form_tree();
        let fieldset = tree.get(text).unwrap().parent;
        let list = SelectorList::parse("form input").unwrap();
        // `form` sits above the fieldset scope, so it cannot satisfy the combinator
        assert!(!list.matches(&tree, text, fieldset));
        assert!(list.matches(&tree, text, form));
    }
}
