use crate::ordered_tree::{Link, Node, OrderedTree};
use std::fmt;
use std::io;

const INDENT: &str = "      ";

/// In-order listing: every record followed by a space, then a newline.
impl<T: Ord + fmt::Display> fmt::Display for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{} ", value)?;
        }
        writeln!(f)
    }
}

/// The tree rotated a quarter turn counter-clockwise: right subtree above,
/// left subtree below, one row per record indented by depth.
pub struct Sideways<'a, T: Ord> {
    tree: &'a OrderedTree<T>,
}

impl<T: Ord + fmt::Display> OrderedTree<T> {
    pub fn sideways(&self) -> Sideways<'_, T> {
        Sideways { tree: self }
    }

    pub fn display_sideways<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.sideways())
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Sideways<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sideways(f, &self.tree.root, 0)
    }
}

// Reverse in-order walk: right subtree, node, left subtree.
fn write_sideways<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    link: &Link<T>,
    mut depth: usize,
) -> fmt::Result {
    let mut stack: Vec<(&Node<T>, usize)> = Vec::new();
    let mut cur = link.as_deref();
    loop {
        while let Some(node) = cur {
            stack.push((node, depth));
            cur = node.right.as_deref();
            depth += 1;
        }
        let Some((node, level)) = stack.pop() else {
            return Ok(());
        };
        for _ in 0..level + 2 {
            f.write_str(INDENT)?;
        }
        writeln!(f, "{}", node.value)?;
        cur = node.left.as_deref();
        depth = level + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> OrderedTree<i32> {
        keys.iter().copied().collect()
    }

    #[test]
    fn in_order_listing() {
        let tree = tree_of(&[50, 30, 70, 20, 40]);
        assert_eq!(tree.to_string(), "20 30 40 50 70 \n");
    }

    #[test]
    fn empty_listing_is_bare_newline() {
        assert_eq!(OrderedTree::<i32>::new().to_string(), "\n");
    }

    #[test]
    fn sideways_rows() {
        let tree = tree_of(&[2, 1, 3]);
        let pad = |levels: usize| INDENT.repeat(levels);
        let expected = format!("{}3\n{}2\n{}1\n", pad(3), pad(2), pad(3));
        assert_eq!(tree.sideways().to_string(), expected);
    }

    #[test]
    fn sideways_empty_writes_nothing() {
        let mut out = Vec::new();
        OrderedTree::<i32>::new().display_sideways(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn sideways_to_writer() {
        let tree = tree_of(&[1, 2]);
        let mut out = Vec::new();
        tree.display_sideways(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<String> = text.lines().map(String::from).collect();
        assert_eq!(
            rows,
            vec![
                format!("{}2", INDENT.repeat(3)),
                format!("{}1", INDENT.repeat(2)),
            ]
        );
    }
}
