use std::fmt::Display;

// Connectors drawn in front of a node, and the prefix its children inherit
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUE: &str = "│   ";
const BLANK: &str = "    ";

/// One step of a derivation. Parents own their children.
#[derive(Debug, PartialEq, Clone)]
pub enum ParseTree {
    // A literal character of the input
    Terminal(char),
    // A -> a, the child is always a Terminal
    Unary(String, Box<ParseTree>),
    // A -> BC
    Binary(String, Box<ParseTree>, Box<ParseTree>),
}

impl ParseTree {
    pub fn unary(symbol: &str, terminal: char) -> Self {
        ParseTree::Unary(symbol.to_string(), Box::new(ParseTree::Terminal(terminal)))
    }

    pub fn binary(symbol: &str, left: ParseTree, right: ParseTree) -> Self {
        ParseTree::Binary(symbol.to_string(), Box::new(left), Box::new(right))
    }

    /// The nonterminal at this node, `None` for terminals.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            ParseTree::Terminal(_) => None,
            ParseTree::Unary(symbol, _) | ParseTree::Binary(symbol, _, _) => Some(symbol),
        }
    }

    pub fn children(&self) -> Vec<&ParseTree> {
        match self {
            ParseTree::Terminal(_) => vec![],
            ParseTree::Unary(_, child) => vec![child.as_ref()],
            ParseTree::Binary(_, left, right) => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// Terminal characters from left to right.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// The string this tree derives.
    pub fn yield_string(&self) -> String {
        self.leaves().collect()
    }

    /// Rendered lines, produced one at a time in pre-order.
    pub fn lines(&self) -> Lines<'_> {
        Lines { stack: vec![(self, String::new(), true)] }
    }

    fn label(&self) -> String {
        match self {
            ParseTree::Terminal(c) => c.to_string(),
            ParseTree::Unary(symbol, _) | ParseTree::Binary(symbol, _, _) => symbol.clone(),
        }
    }
}

pub struct Leaves<'a> {
    stack: Vec<&'a ParseTree>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        while let Some(node) = self.stack.pop() {
            match node {
                ParseTree::Terminal(c) => return Some(*c),
                ParseTree::Unary(_, child) => self.stack.push(child),
                ParseTree::Binary(_, left, right) => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

pub struct Lines<'a> {
    // (node, prefix inherited from the parent, is last child)
    stack: Vec<(&'a ParseTree, String, bool)>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (node, prefix, is_last) = self.stack.pop()?;
        let (connector, continuation) = if is_last {
            (LAST_BRANCH, BLANK)
        } else {
            (BRANCH, CONTINUE)
        };

        let line = format!("{}{}{}", prefix, connector, node.label());
        let child_prefix = format!("{}{}", prefix, continuation);

        // Pushed in reverse so the leftmost child comes out first
        let children = node.children();
        let last = children.len().saturating_sub(1);
        for (index, child) in children.into_iter().enumerate().rev() {
            self.stack.push((child, child_prefix.clone(), index == last));
        }

        Some(line)
    }
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab_tree() -> ParseTree {
        ParseTree::binary("S", ParseTree::unary("A", 'a'), ParseTree::unary("B", 'b'))
    }

    #[test]
    fn symbols_and_children() {
        let tree = ab_tree();
        assert_eq!(tree.symbol(), Some("S"));
        assert_eq!(
            tree.children().iter().map(|c| c.symbol()).collect::<Vec<_>>(),
            vec![Some("A"), Some("B")]
        );
        assert_eq!(ParseTree::Terminal('a').symbol(), None);
        assert!(ParseTree::Terminal('a').children().is_empty());
    }

    #[test]
    fn leaves_left_to_right() {
        let tree = ParseTree::binary(
            "S",
            ParseTree::binary("S", ParseTree::unary("A", 'x'), ParseTree::unary("A", 'y')),
            ParseTree::unary("B", 'z')
        );
        assert_eq!(tree.leaves().collect::<Vec<_>>(), vec!['x', 'y', 'z']);
        assert_eq!(tree.yield_string(), "xyz");
    }

    #[test]
    fn render_tree() {
        let rendered = ab_tree().to_string();
        let answer = [
            "└── S",
            "    ├── A",
            "    │   └── a",
            "    └── B",
            "        └── b",
        ];
        assert_eq!(rendered.lines().collect::<Vec<_>>(), answer);
    }

    #[test]
    fn render_is_lazy() {
        let tree = ab_tree();
        let mut lines = tree.lines();
        assert_eq!(lines.next().as_deref(), Some("└── S"));
        assert_eq!(lines.next().as_deref(), Some("    ├── A"));
    }

    #[test]
    fn render_single_terminal() {
        assert_eq!(ParseTree::Terminal('q').to_string(), "└── q\n");
    }
}
