//! Tree-shaped text renderings of a map.
//!
//! Two formats are produced, both walking entries in insertion order and
//! recursing into values which are maps themselves:
//!
//! * nested tags: `<key>value</key>` per entry, each followed by a line
//!   break, with nested maps rendered inline between their parent's tags.
//!   Nothing is escaped; this is plain text which happens to look like
//!   markup, not a validated document.
//! * indented: `key: value` per entry, or `key:` followed by the nested
//!   entries two spaces further in.

use std::fmt;

use crate::ordered_map::OrderedMap;

/// How a value presents itself to the renderers.
pub enum Shape<'a> {
    /// A plain value, already in text form.
    Leaf(String),

    /// A nested map, as key text and child pairs in order.
    Branch(Vec<(String, &'a dyn Node)>),
}

/// Anything that can appear as a value in a rendered tree.
pub trait Node {
    fn shape(&self) -> Shape<'_>;
}

macro_rules! leaf_node {
    ($($t:ty),*) => {
        $(
            impl Node for $t {
                fn shape(&self) -> Shape<'_> {
                    Shape::Leaf(self.to_string())
                }
            }
        )*
    };
}

leaf_node!(
    str, String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32,
    u64, u128, usize, f32, f64
);

impl<T> Node for &T
where
    T: Node + ?Sized,
{
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<K, V> Node for OrderedMap<K, V>
where
    K: fmt::Display,
    V: Node,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Branch(
            self.iter()
                .map(|(k, v)| (k.to_string(), v as &dyn Node))
                .collect(),
        )
    }
}

fn write_tag(out: &mut String, key: &str, node: &dyn Node) {
    out.push('<');
    out.push_str(key);
    out.push('>');

    match node.shape() {
        Shape::Leaf(text) => out.push_str(&text),
        Shape::Branch(children) => {
            for (child_key, child) in children {
                write_tag(out, &child_key, child);
            }
        }
    }

    out.push_str("</");
    out.push_str(key);
    out.push_str(">\n");
}

fn write_indented(out: &mut String, key: &str, node: &dyn Node, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(key);
    out.push(':');

    match node.shape() {
        Shape::Leaf(text) => {
            out.push(' ');
            out.push_str(&text);
            out.push('\n');
        }
        Shape::Branch(children) => {
            out.push('\n');
            for (child_key, child) in children {
                write_indented(out, &child_key, child, depth + 1);
            }
        }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: fmt::Display,
    V: Node,
{
    /// Renders the map as nested tags, one `<key>value</key>` per entry.
    pub fn to_nested_text(&self) -> String {
        let mut out = String::new();
        for (k, v) in self.iter() {
            write_tag(&mut out, &k.to_string(), v);
        }
        out
    }

    /// Renders the map as indented `key: value` lines, two spaces per level
    /// of nesting.
    pub fn to_indented_text(&self) -> String {
        let mut out = String::new();
        for (k, v) in self.iter() {
            write_indented(&mut out, &k.to_string(), v, 0);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{OrderedMap, Value};

    fn code_sample() -> OrderedMap<Value, Value> {
        let mut code = OrderedMap::new();
        code.set(Value::from("color"), Value::from("0x0454"));
        code.set(Value::from("size"), Value::from(24));

        let mut root = OrderedMap::new();
        root.set(Value::from("code"), Value::from(code));
        root
    }

    #[test]
    fn nested_tags() {
        assert_eq!(
            "<code><color>0x0454</color>\n<size>24</size>\n</code>\n",
            code_sample().to_nested_text()
        );
    }

    #[test]
    fn indented_lines() {
        assert_eq!(
            "code:\n  color: 0x0454\n  size: 24\n",
            code_sample().to_indented_text()
        );
    }

    #[test]
    fn indentation_follows_depth() {
        let mut mode = OrderedMap::new();
        mode.set(Value::from("present"), Value::from("Love"));
        mode.set(Value::from("to"), Value::from("Rose Mary"));

        let mut root = code_sample();
        if let Some(Value::Map(code)) = root.get_mut(&Value::from("code")) {
            code.set(Value::from("letter"), Value::from("Arial"));
            code.set(Value::from("mode"), Value::from(mode));
        }
        root.set(Value::sym("version"), Value::from(2));

        assert_eq!(
            "code:\n  color: 0x0454\n  size: 24\n  letter: Arial\n  mode:\n    present: Love\n    to: Rose Mary\nversion: 2\n",
            root.to_indented_text()
        );
        assert_eq!(
            "<code><color>0x0454</color>\n<size>24</size>\n<letter>Arial</letter>\n<mode><present>Love</present>\n<to>Rose Mary</to>\n</mode>\n</code>\n<version>2</version>\n",
            root.to_nested_text()
        );
    }

    #[test]
    fn nothing_is_escaped() {
        let mut map: OrderedMap<&str, &str> = OrderedMap::new();
        map.set("a&b", "<x>");

        assert_eq!("<a&b><x></a&b>\n", map.to_nested_text());
        assert_eq!("a&b: <x>\n", map.to_indented_text());
    }

    #[test]
    fn typed_nested_maps_render_too() {
        let mut inner: OrderedMap<&str, u64> = OrderedMap::new();
        inner.set("x", 1);

        let mut outer: OrderedMap<String, OrderedMap<&str, u64>> =
            OrderedMap::new();
        outer.set("point".to_owned(), inner);

        assert_eq!("point:\n  x: 1\n", outer.to_indented_text());
        assert_eq!("<point><x>1</x>\n</point>\n", outer.to_nested_text());
    }

    #[test]
    fn empty_maps_render_empty() {
        let map: OrderedMap<&str, u64> = OrderedMap::new();
        assert_eq!("", map.to_nested_text());
        assert_eq!("", map.to_indented_text());
    }
}
