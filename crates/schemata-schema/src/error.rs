use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Route-aware accumulator for validation failures. Messages recorded on a
/// node apply to that node; child trees are keyed by route segment
/// (`app/Type`, then member name) so every failure renders with its path.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message on this node.
    pub fn add(&mut self, message: impl ToString) {
        self.messages.push(message.to_string());
    }

    /// Record a message under a child route.
    pub fn add_for(&mut self, route: impl Into<String>, message: impl ToString) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    /// Attach every message from `other` under a child route.
    pub fn merge_for(&mut self, route: impl Into<String>, other: Self) {
        if other.is_empty() {
            return;
        }

        let child = self.children.entry(route.into()).or_default();
        child.merge(other);
    }

    /// Fold `other` into this node.
    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
        for (route, child) in other.children {
            self.merge_for(route, child);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Total number of messages in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// `Ok` when nothing was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Every message paired with its dotted route, depth first.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);

        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for message in &self.messages {
            out.push((prefix.to_string(), message.clone()));
        }
        for (route, child) in &self.children {
            let path = if prefix.is_empty() {
                route.clone()
            } else {
                format!("{prefix}.{route}")
            };
            child.flatten_into(&path, out);
        }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (route, message)) in self.flatten().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            if route.is_empty() {
                write!(f, "{message}")?;
            } else {
                write!(f, "{route}: {message}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

impl From<String> for ErrorTree {
    fn from(message: String) -> Self {
        let mut errs = Self::new();
        errs.add(message);
        errs
    }
}

/// Record a formatted message on an `ErrorTree`.
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        let mut errs = ErrorTree::new();
        errs.merge_for("sys/Customer", ErrorTree::new());

        assert!(errs.is_empty());
        assert_eq!(errs.result(), Ok(()));
    }

    #[test]
    fn routes_render_as_dotted_paths() {
        let mut member = ErrorTree::new();
        err!(member, "since {} precedes type since {}", 10, 20);

        let mut ty = ErrorTree::new();
        ty.add("missing _id");
        ty.merge_for("approvalStatus", member);

        let mut root = ErrorTree::new();
        root.merge_for("sys/Customer", ty);

        assert_eq!(root.len(), 2);
        assert_eq!(
            root.flatten(),
            vec![
                ("sys/Customer".to_string(), "missing _id".to_string()),
                (
                    "sys/Customer.approvalStatus".to_string(),
                    "since 10 precedes type since 20".to_string()
                ),
            ]
        );
        assert_eq!(
            root.to_string(),
            "sys/Customer: missing _id\nsys/Customer.approvalStatus: since 10 precedes type since 20"
        );
    }
}
