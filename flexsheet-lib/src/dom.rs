use html5ever::{namespace_url, ns, LocalName, QualName};
use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

pub mod dom_tree {
    use super::*;

    /// Shared handle to a node. Element identity is the identity of this `Rc`.
    pub type NodeRef = Rc<RefCell<Node>>;

    #[derive(Debug)]
    pub enum Node {
        DocumentRoot(DocumentRootNode),
        Element(ElementNode),
        Text(String),
    }

    #[derive(Debug, Default)]
    pub struct DocumentRootNode {
        pub children: Vec<NodeRef>,
    }

    #[derive(Debug)]
    pub struct ElementNode {
        pub tag: String,
        pub qual_name: QualName,
        pub attributes: Vec<(String, String)>,
        pub children: Vec<NodeRef>,
        pub parent: Option<Weak<RefCell<Node>>>,
    }

    #[derive(Debug)]
    pub struct Document {
        pub root: NodeRef,
        pub doctype: RefCell<Option<Doctype>>,
    }

    #[derive(Debug)]
    pub struct Doctype {
        pub name: String,
        pub public_id: String,
        pub system_id: String,
    }

    /// Hashable wrapper comparing nodes by pointer identity.
    #[derive(Debug, Clone)]
    pub struct NodeKey(pub NodeRef);

    impl PartialEq for NodeKey {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }
    }

    impl Eq for NodeKey {}

    impl Hash for NodeKey {
        fn hash<H: Hasher>(&self, state: &mut H) {
            Rc::as_ptr(&self.0).hash(state);
        }
    }

    impl Node {
        pub fn as_element(&self) -> Option<&ElementNode> {
            match self {
                Node::Element(elem) => Some(elem),
                _ => None,
            }
        }

        pub fn as_element_mut(&mut self) -> Option<&mut ElementNode> {
            match self {
                Node::Element(elem) => Some(elem),
                _ => None,
            }
        }

        pub fn children(&self) -> &[NodeRef] {
            match self {
                Node::DocumentRoot(root) => &root.children,
                Node::Element(elem) => &elem.children,
                Node::Text(_) => &[],
            }
        }

        pub fn children_mut(&mut self) -> Option<&mut Vec<NodeRef>> {
            match self {
                Node::DocumentRoot(root) => Some(&mut root.children),
                Node::Element(elem) => Some(&mut elem.children),
                Node::Text(_) => None,
            }
        }
    }

    impl DocumentRootNode {
        pub fn new() -> Self {
            DocumentRootNode {
                children: Vec::new(),
            }
        }
    }

    impl ElementNode {
        pub fn new(tag: String, qual_name: QualName) -> Self {
            ElementNode {
                tag,
                qual_name,
                attributes: Vec::new(),
                children: Vec::new(),
                parent: None,
            }
        }

        pub fn get_attribute(&self, name: &str) -> Option<&str> {
            self.attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }

        /// Sets an attribute, keeping its original position when it already exists.
        pub fn set_attribute(&mut self, name: &str, value: &str) {
            match self
                .attributes
                .iter_mut()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
            {
                Some((_, v)) => *v = value.to_string(),
                None => self.attributes.push((name.to_string(), value.to_string())),
            }
        }

        pub fn remove_attribute(&mut self, name: &str) {
            self.attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        }

        pub fn classes(&self) -> impl Iterator<Item = &str> {
            self.get_attribute("class")
                .unwrap_or_default()
                .split_whitespace()
        }

        pub fn has_class(&self, class_name: &str) -> bool {
            self.classes().any(|c| c == class_name)
        }

        pub fn add_class(&mut self, class_name: &str) {
            if self.has_class(class_name) {
                return;
            }
            let mut classes: Vec<&str> = self.classes().collect();
            classes.push(class_name);
            let joined = classes.join(" ");
            self.set_attribute("class", &joined);
        }

        pub fn remove_class(&mut self, class_name: &str) {
            self.retain_classes(|c| c != class_name);
        }

        /// Keeps only the classes accepted by `keep`. An emptied list drops the attribute.
        pub fn retain_classes(&mut self, mut keep: impl FnMut(&str) -> bool) {
            if self.get_attribute("class").is_none() {
                return;
            }
            let kept: Vec<String> = self
                .classes()
                .filter(|c| keep(c))
                .map(str::to_string)
                .collect();
            if kept.is_empty() {
                self.remove_attribute("class");
            } else {
                self.set_attribute("class", &kept.join(" "));
            }
        }
    }

    impl Document {
        pub fn head(&self) -> Option<NodeRef> {
            self.find_first("head")
        }

        pub fn body(&self) -> Option<NodeRef> {
            self.find_first("body")
        }

        /// First element with the given tag, in document order.
        pub fn find_first(&self, tag: &str) -> Option<NodeRef> {
            self.elements().into_iter().find(|node| {
                node.borrow()
                    .as_element()
                    .is_some_and(|elem| elem.tag.eq_ignore_ascii_case(tag))
            })
        }

        pub fn element_by_id(&self, id: &str) -> Option<NodeRef> {
            self.elements().into_iter().find(|node| {
                node.borrow()
                    .as_element()
                    .is_some_and(|elem| elem.get_attribute("id") == Some(id))
            })
        }

        /// All elements in document order.
        pub fn elements(&self) -> Vec<NodeRef> {
            let mut out = Vec::new();
            collect_elements(&self.root, &mut out);
            out
        }

        /// Elements whose raw `class` attribute contains `needle` (`[class*=needle]`).
        pub fn elements_with_class_containing(&self, needle: &str) -> Vec<NodeRef> {
            self.elements()
                .into_iter()
                .filter(|node| {
                    node.borrow()
                        .as_element()
                        .and_then(|elem| elem.get_attribute("class"))
                        .is_some_and(|class| class.contains(needle))
                })
                .collect()
        }
    }

    fn collect_elements(node: &NodeRef, out: &mut Vec<NodeRef>) {
        let children = node.borrow().children().to_vec();
        if node.borrow().as_element().is_some() {
            out.push(Rc::clone(node));
        }
        for child in &children {
            collect_elements(child, out);
        }
    }

    pub fn new_document() -> Document {
        Document {
            root: Rc::new(RefCell::new(Node::DocumentRoot(DocumentRootNode::new()))),
            doctype: RefCell::new(None),
        }
    }

    /// Creates a detached HTML element.
    pub fn create_element(tag: &str) -> NodeRef {
        let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
        Rc::new(RefCell::new(Node::Element(ElementNode::new(
            tag.to_string(),
            qual_name,
        ))))
    }

    pub fn create_text(text: &str) -> NodeRef {
        Rc::new(RefCell::new(Node::Text(text.to_string())))
    }

    pub fn parent_of(node: &NodeRef) -> Option<NodeRef> {
        node.borrow()
            .as_element()
            .and_then(|elem| elem.parent.as_ref())
            .and_then(Weak::upgrade)
    }

    /// Appends `child` to `parent`, detaching it from any previous parent first.
    pub fn append_child(parent: &NodeRef, child: &NodeRef) {
        detach(child);
        if let Some(elem) = child.borrow_mut().as_element_mut() {
            elem.parent = Some(Rc::downgrade(parent));
        }
        if let Some(children) = parent.borrow_mut().children_mut() {
            children.push(Rc::clone(child));
        }
    }

    /// Removes `child` from `parent`. Does nothing if it is not a child of `parent`.
    pub fn remove_child(parent: &NodeRef, child: &NodeRef) {
        let removed = match parent.borrow_mut().children_mut() {
            Some(children) => {
                let before = children.len();
                children.retain(|c| !Rc::ptr_eq(c, child));
                before != children.len()
            }
            None => false,
        };
        if removed {
            if let Some(elem) = child.borrow_mut().as_element_mut() {
                elem.parent = None;
            }
        }
    }

    pub fn detach(node: &NodeRef) {
        if let Some(parent) = parent_of(node) {
            remove_child(&parent, node);
        }
    }

    pub fn text_content(node: &NodeRef) -> String {
        match &*node.borrow() {
            Node::Text(text) => text.clone(),
            other => other.children().iter().map(text_content).collect(),
        }
    }

    /// Replaces all children of `node` with a single text node.
    pub fn set_text_content(node: &NodeRef, text: &str) {
        if let Some(children) = node.borrow_mut().children_mut() {
            children.clear();
            children.push(create_text(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::dom_tree::*;

    #[test]
    fn class_helpers_keep_unrelated_classes() {
        let div = create_element("div");
        {
            let mut node = div.borrow_mut();
            let elem = node.as_element_mut().unwrap();
            elem.set_attribute("class", "card  wide");
            elem.add_class("flex-layout-3");
            elem.add_class("flex-layout-3");
            assert_eq!(elem.get_attribute("class"), Some("card wide flex-layout-3"));
            elem.remove_class("wide");
            assert_eq!(elem.get_attribute("class"), Some("card flex-layout-3"));
            elem.retain_classes(|_| false);
            assert_eq!(elem.get_attribute("class"), None);
        }
    }

    #[test]
    fn append_and_remove_maintain_parent_links() {
        let document = new_document();
        let html = create_element("html");
        let head = create_element("head");
        append_child(&document.root, &html);
        append_child(&html, &head);
        assert!(document.head().is_some());
        assert!(std::rc::Rc::ptr_eq(&parent_of(&head).unwrap(), &html));

        remove_child(&html, &head);
        assert!(parent_of(&head).is_none());
        assert!(document.head().is_none());
    }

    #[test]
    fn set_text_content_replaces_children() {
        let style = create_element("style");
        append_child(&style, &create_element("b"));
        set_text_content(&style, ".a { color: red; }");
        assert_eq!(text_content(&style), ".a { color: red; }");
        assert_eq!(style.borrow().children().len(), 1);
    }
}
