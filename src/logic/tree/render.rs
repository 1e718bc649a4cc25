//! Text view of a tree (box-drawing, one node per line)

use std::fmt::Write;

use super::node::Node;

/// Render `node` using `names` for feature labels (falls back to `f{index}`)
pub fn render_tree(node: &Node, names: &[&str]) -> String {
    let mut out = String::new();
    render_into(&mut out, node, names, "", false);
    out
}

fn render_into(out: &mut String, node: &Node, names: &[&str], prefix: &str, is_left: bool) {
    let connector = if is_left { "├──" } else { "└──" };

    match node {
        Node::Leaf { prediction } => {
            let label = if *prediction { "Attack" } else { "Normal" };
            let _ = writeln!(out, "{}{} [Leaf: {}]", prefix, connector, label);
        }
        Node::Internal { feature, threshold, left, right } => {
            let name = names
                .get(*feature)
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("f{}", feature));
            let _ = writeln!(out, "{}{} [{} <= {}]", prefix, connector, name, threshold);

            let child_prefix = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
            render_into(out, left, names, &child_prefix, true);
            render_into(out, right, names, &child_prefix, false);
        }
    }
}
