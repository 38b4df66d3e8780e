//! The tree itself plus its step records.

use std::fmt;

use algostep_core::{Cancelled, Control, Tracer};

/// Depth-first traversal orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Traversal {
    InOrder,
    PreOrder,
    PostOrder,
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Traversal::InOrder => "Inorder",
            Traversal::PreOrder => "Preorder",
            Traversal::PostOrder => "Postorder",
        })
    }
}

/// What happened at one point of a tree operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TreeStepKind {
    /// `value` was compared against the key at the current node.
    Comparing { at: i32, value: i32 },
    /// `value` was attached below `parent` (`None` for the root).
    Inserted { value: i32, parent: Option<i32> },
    /// `value` is already present; nothing was attached.
    Duplicate { value: i32 },
    /// The search passed through the node holding `at`; `path` lists the
    /// keys from the root down to it.
    Searching { at: i32, value: i32, path: Vec<i32> },
    /// The search reached the node holding `value`.
    Found { value: i32, path: Vec<i32> },
    /// The search fell off the tree without finding `value`.
    NotFound { value: i32, path: Vec<i32> },
    /// A traversal visited the node holding `value`; `result` is the
    /// output sequence so far, `value` included.
    Visit {
        value: i32,
        order: Traversal,
        result: Vec<i32>,
    },
}

/// One step of a tree operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeStep {
    pub kind: TreeStepKind,
    pub message: String,
}

struct Node {
    value: i32,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(value: i32) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }
}

/// An unbalanced binary search tree over `i32` keys, duplicates rejected.
#[derive(Default)]
pub struct Bst {
    root: Option<Box<Node>>,
    len: usize,
}

impl Bst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Non-traced membership check.
    pub fn contains(&self, value: i32) -> bool {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            if value == n.value {
                return true;
            }
            node = if value < n.value {
                n.left.as_deref()
            } else {
                n.right.as_deref()
            };
        }
        false
    }

    /// Insert `value`, emitting one step per comparison on the way down.
    ///
    /// Returns `Ok(true)` if a node was attached, `Ok(false)` if the value
    /// was already present (a `Duplicate` step is emitted instead).
    pub fn insert(
        &mut self,
        value: i32,
        sink: impl FnMut(TreeStep, usize) -> Control,
    ) -> Result<bool, Cancelled> {
        let mut tracer = Tracer::new(sink);
        let inserted = insert_at(&mut self.root, value, None, &mut tracer)?;
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    /// Search for `value`, emitting one step per node on the way down plus
    /// a terminal `Found` or `NotFound` step.
    pub fn search(
        &self,
        value: i32,
        sink: impl FnMut(TreeStep, usize) -> Control,
    ) -> Result<bool, Cancelled> {
        let mut tracer = Tracer::new(sink);
        let mut path = Vec::new();
        let mut node = self.root.as_deref();
        loop {
            let Some(n) = node else {
                tracer.emit(TreeStep {
                    kind: TreeStepKind::NotFound {
                        value,
                        path: path.clone(),
                    },
                    message: format!("Value {value} not found in the tree"),
                })?;
                return Ok(false);
            };
            path.push(n.value);
            tracer.emit(TreeStep {
                kind: TreeStepKind::Searching {
                    at: n.value,
                    value,
                    path: path.clone(),
                },
                message: format!("Searching for {value}, currently at {}", n.value),
            })?;
            if value == n.value {
                tracer.emit(TreeStep {
                    kind: TreeStepKind::Found {
                        value,
                        path: path.clone(),
                    },
                    message: format!("Found {value}!"),
                })?;
                return Ok(true);
            }
            node = if value < n.value {
                n.left.as_deref()
            } else {
                n.right.as_deref()
            };
        }
    }

    /// Walk the tree in the given order, emitting a `Visit` step as each
    /// node produces its key. Returns the full output sequence.
    pub fn traverse(
        &self,
        order: Traversal,
        sink: impl FnMut(TreeStep, usize) -> Control,
    ) -> Result<Vec<i32>, Cancelled> {
        let mut tracer = Tracer::new(sink);
        let mut result = Vec::with_capacity(self.len);
        visit(self.root.as_deref(), order, &mut result, &mut tracer)?;
        Ok(result)
    }
}

fn insert_at(
    link: &mut Option<Box<Node>>,
    value: i32,
    parent: Option<i32>,
    tracer: &mut Tracer<'_, TreeStep>,
) -> Result<bool, Cancelled> {
    let Some(node) = link else {
        *link = Some(Node::new(value));
        let message = match parent {
            None => format!("Inserted {value} as root node"),
            Some(p) if value < p => format!("Inserted {value} as left child of {p}"),
            Some(p) => format!("Inserted {value} as right child of {p}"),
        };
        tracer.emit(TreeStep {
            kind: TreeStepKind::Inserted { value, parent },
            message,
        })?;
        return Ok(true);
    };

    tracer.emit(TreeStep {
        kind: TreeStepKind::Comparing {
            at: node.value,
            value,
        },
        message: format!("Comparing {value} with {}", node.value),
    })?;

    if value < node.value {
        insert_at(&mut node.left, value, Some(node.value), tracer)
    } else if value > node.value {
        insert_at(&mut node.right, value, Some(node.value), tracer)
    } else {
        tracer.emit(TreeStep {
            kind: TreeStepKind::Duplicate { value },
            message: format!("Value {value} already exists in the tree"),
        })?;
        Ok(false)
    }
}

fn visit(
    node: Option<&Node>,
    order: Traversal,
    result: &mut Vec<i32>,
    tracer: &mut Tracer<'_, TreeStep>,
) -> Result<(), Cancelled> {
    let Some(node) = node else {
        return Ok(());
    };
    let mut produce = |result: &mut Vec<i32>, tracer: &mut Tracer<'_, TreeStep>| {
        result.push(node.value);
        tracer.emit(TreeStep {
            kind: TreeStepKind::Visit {
                value: node.value,
                order,
                result: result.clone(),
            },
            message: format!("Visiting node {} ({order})", node.value),
        })
    };
    match order {
        Traversal::InOrder => {
            visit(node.left.as_deref(), order, result, tracer)?;
            produce(result, tracer)?;
            visit(node.right.as_deref(), order, result, tracer)?;
        }
        Traversal::PreOrder => {
            produce(result, tracer)?;
            visit(node.left.as_deref(), order, result, tracer)?;
            visit(node.right.as_deref(), order, result, tracer)?;
        }
        Traversal::PostOrder => {
            visit(node.left.as_deref(), order, result, tracer)?;
            visit(node.right.as_deref(), order, result, tracer)?;
            produce(result, tracer)?;
        }
    }
    Ok(())
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use algostep_core::collector;

    #[test]
    fn tree_step_round_trip() {
        let mut tree = Bst::new();
        let mut steps = Vec::new();
        tree.insert(5, collector(&mut steps)).unwrap();
        let json = serde_json::to_string(&steps[0]).unwrap();
        assert!(json.contains("\"kind\":\"inserted\""));
        let back: TreeStep = serde_json::from_str(&json).unwrap();
        assert_eq!(steps[0], back);
    }
}
