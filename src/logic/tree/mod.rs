//! Tree Module - Decision Tree Induction & Inference
//!
//! - `node`: tagged tree node + prediction
//! - `entropy`: binary entropy / information gain
//! - `builder`: recursive entropy-gain induction
//! - `evaluate`: accuracy + confusion matrix
//! - `render`: text view of a tree

pub mod node;
pub mod entropy;
pub mod builder;
pub mod evaluate;
pub mod render;


pub use node::{predict, Node};
pub use entropy::{binary_entropy, information_gain, partition_entropy};
pub use builder::{build_tree, find_best_split, Split, TreeBuilder};
pub use evaluate::{accuracy, ConfusionMatrix};
pub use render::render_tree;
