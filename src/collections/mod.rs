//! Ordered and bounded collections.

pub mod heap;
pub mod profiling;
pub mod skip_list;
pub mod top_k;

pub use heap::Heap;
pub use skip_list::Coin;
pub use skip_list::Node;
pub use skip_list::SkipList;
pub use top_k::TopK;
