//! An insertion-ordered map over a plain list of entries.
//!
//! [`OrderedMap`] keeps its pairs in the order keys were first assigned and
//! finds them by linear scan, so keys only need [`PartialEq`]. On top of the
//! usual map operations it offers a default-value policy for misses, stable
//! sorting by the keys' text, order-independent equality, diff and merge
//! against anything [`Associative`], and two tree-shaped text renderings.
//! [`Value`] lets a single map mix keys and values of different kinds and
//! nest maps inside maps.
//!
//! ```
//! use ordered_map::{OrderedMap, Value};
//!
//! let mut code = OrderedMap::new();
//! code.set(Value::from("color"), Value::from("0x0454"));
//! code.set(Value::from("size"), Value::from(24));
//!
//! let mut root = OrderedMap::new();
//! root.set(Value::from("code"), Value::from(code));
//!
//! assert_eq!("code:\n  color: 0x0454\n  size: 24\n", root.to_indented_text());
//! ```

pub mod associative;
pub mod default_policy;
pub mod errors;
pub mod ordered_map;
pub mod render;
#[cfg(feature = "shared_map")]
pub mod shared_map;
pub mod value;

pub use associative::Associative;
pub use default_policy::DefaultPolicy;
pub use errors::MapError;
pub use ordered_map::{Diff, OrderedMap};
pub use render::{Node, Shape};
#[cfg(feature = "shared_map")]
pub use shared_map::SharedOrderedMap;
pub use value::Value;

/// Result type for fallible map operations.
pub type Result<T> = std::result::Result<T, MapError>;
