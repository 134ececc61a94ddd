use std::fmt::{self, Write};

use bitflags::bitflags;

use crate::node::{Node, NodeKind};

// Reference: https://developer.mozilla.org/en-US/docs/Glossary/Void_element
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct Mode: u8 {
        /// One node per line, children indented by two spaces.
        const PRETTY = 0b01;
        /// Self-closing void elements and explicit values on empty attributes.
        const XHTML = 0b10;
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::PRETTY
    }
}

pub fn render_to_string(mode: Mode, node: &Node) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = render(&mut out, mode, node);
    out
}

pub fn render<W: Write>(w: &mut W, mode: Mode, node: &Node) -> fmt::Result {
    render_node(w, mode, node, 0)
}

fn render_node<W: Write>(w: &mut W, mode: Mode, node: &Node, depth: usize) -> fmt::Result {
    let pretty = mode.contains(Mode::PRETTY);
    let indent = |w: &mut W, depth: usize| {
        if pretty {
            write!(w, "{:width$}", "", width = depth * 2)
        } else {
            Ok(())
        }
    };

    match node.kind() {
        NodeKind::Text(content) => {
            indent(w, depth)?;
            w.write_str(&escape(&content.borrow()))?;
        }
        NodeKind::Element { name, attrs } => {
            let attr_str = attrs
                .borrow()
                .iter()
                .map(|(key, value)| {
                    if value.is_empty() && !mode.contains(Mode::XHTML) {
                        format!(" {key}")
                    } else {
                        format!(" {key}=\"{}\"", escape(value))
                    }
                })
                .collect::<String>();

            indent(w, depth)?;

            let children = node.children_ref();
            if children.is_empty() && VOID.contains(&name.as_str()) {
                if mode.contains(Mode::XHTML) {
                    write!(w, "<{name}{attr_str} />")?;
                } else {
                    write!(w, "<{name}{attr_str}>")?;
                }
            } else if children.is_empty() {
                write!(w, "<{name}{attr_str}></{name}>")?;
            } else {
                write!(w, "<{name}{attr_str}>")?;
                for child in children.iter() {
                    if pretty {
                        writeln!(w)?;
                    }
                    render_node(w, mode, child, depth + 1)?;
                }
                if pretty {
                    writeln!(w)?;
                    indent(w, depth)?;
                }
                write!(w, "</{name}>")?;
            }
        }
    }

    Ok(())
}

// Reference: https://cheatsheetseries.owasp.org/cheatsheets/Cross_Site_Scripting_Prevention_Cheat_Sheet.html#output-encoding-for-html-contexts
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let list = Node::element("ul");
        list.set_attr("class", "news");
        let item = Node::element("li");
        item.append(&Node::text("Tom & Jerry <3"));
        list.append(&item);
        let input = Node::element("input");
        input.set_attr("disabled", "");
        list.append(&input);
        list
    }

    #[test]
    fn compact_output() {
        assert_eq!(
            render_to_string(Mode::empty(), &sample()),
            r#"<ul class="news"><li>Tom &amp; Jerry &lt;3</li><input disabled></ul>"#
        );
    }

    #[test]
    fn pretty_output() {
        let expected = [
            r#"<ul class="news">"#,
            "  <li>",
            "    Tom &amp; Jerry &lt;3",
            "  </li>",
            "  <input disabled>",
            "</ul>",
        ]
        .join("\n");

        assert_eq!(render_to_string(Mode::PRETTY, &sample()), expected);
    }

    #[test]
    fn xhtml_output() {
        let out = render_to_string(Mode::XHTML, &sample());
        assert!(out.ends_with(r#"<input disabled="" /></ul>"#));
    }

    #[test]
    fn display_is_compact() {
        let node = Node::element("p");
        node.append(&Node::text("hi"));
        assert_eq!(node.to_string(), "<p>hi</p>");
    }
}
