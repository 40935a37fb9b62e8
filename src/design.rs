//! High-level design trees.
//!
//! A design is an ordered list of top-level factors. Each factor is a tree
//! whose leaves are the levels; inner groups only structure the levels and do
//! not get variables of their own.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DesignNode {
    Leaf(String),
    Group { name: String, children: Vec<DesignNode> },
}

impl DesignNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        DesignNode::Leaf(name.into())
    }

    pub fn group(name: impl Into<String>, children: Vec<DesignNode>) -> Self {
        DesignNode::Group {
            name: name.into(),
            children,
        }
    }

    /// A factor with flat levels.
    pub fn factor<S: Into<String>>(name: impl Into<String>, levels: impl IntoIterator<Item = S>) -> Self {
        DesignNode::group(name, levels.into_iter().map(DesignNode::leaf).collect())
    }

    pub fn name(&self) -> &str {
        match self {
            DesignNode::Leaf(name) => name,
            DesignNode::Group { name, .. } => name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, DesignNode::Leaf(_))
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            DesignNode::Leaf(_) => 1,
            DesignNode::Group { children, .. } => children.iter().map(DesignNode::leaf_count).sum(),
        }
    }

    /// Leaf names in left-to-right order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.leaf_count());
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            DesignNode::Leaf(name) => out.push(name),
            DesignNode::Group { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl fmt::Display for DesignNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignNode::Leaf(name) => write!(f, "{}", name),
            DesignNode::Group { name, children } => {
                write!(f, "{}(", name)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Number of trials needed to realize every combination of the given factors once.
pub fn fully_cross_size<'a>(factors: impl IntoIterator<Item = &'a DesignNode>) -> usize {
    factors.into_iter().map(DesignNode::leaf_count).product()
}
