mod alias_count;
mod depth;

pub use alias_count::AliasCountCalculate;
pub use depth::DepthCalculate;
