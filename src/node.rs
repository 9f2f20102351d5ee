use crate::error::{Error, Result};

/// Element attributes in the order they were attached.
///
/// Rendering follows insertion order; equality ignores it.
#[derive(Debug, Clone, Default, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing an earlier value in place so its position is kept.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(n, v)| other.get(n) == Some(v))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

/// A node of the HTML document tree.
///
/// Each node owns its children outright. Trees are built bottom-up in one
/// pass and handed to [`crate::render`] without further mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Terminal node. With no tag the value is emitted verbatim.
    Leaf {
        tag: Option<String>,
        value: String,
        attributes: Attributes,
    },
    /// Element wrapping an ordered, non-empty list of children.
    Container {
        tag: String,
        children: Vec<Node>,
        attributes: Attributes,
    },
}

impl Node {
    /// Untagged leaf: raw inline text with no wrapping element.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: None,
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    /// Build a container, rejecting an empty child list up front.
    pub fn container(tag: impl Into<String>, children: Vec<Node>) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::MalformedNode {
                reason: "container has no children",
            });
        }
        Ok(Node::Container {
            tag: tag.into(),
            children,
            attributes: Attributes::new(),
        })
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Node::Leaf { attributes, .. } | Node::Container { attributes, .. } => {
                attributes.insert(name, value)
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf { tag, .. } => tag.as_deref(),
            Node::Container { tag, .. } => Some(tag),
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Leaf { value, .. } => Some(value),
            Node::Container { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Container { children, .. } => children,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Node::Leaf { attributes, .. } | Node::Container { attributes, .. } => attributes,
        }
    }
}
