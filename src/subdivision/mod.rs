mod animate;
mod curve;
mod node;
mod refine;

pub use animate::*;
pub use curve::*;
pub use node::*;
pub use refine::*;
