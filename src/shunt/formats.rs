//! Output formats for expression trees
//!
//! Every format implements [Formatter] and is looked up by name in a [FormatRegistry]:
//! - `expr`: infix with minimal parentheses
//! - `rpn`: postfix tokens separated by spaces
//! - `sexpr`: nested prefix lists
//! - `treeviz`: one line per node, indented by depth
//! - `dot`: Graphviz digraph
//! - `json` and `yaml`: the serialized tree

pub mod registry;
pub mod structured;
pub mod text;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use text::{DotFormatter, ExprFormatter, RpnFormatter, SexprFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
