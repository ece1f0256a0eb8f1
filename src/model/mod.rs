pub mod node;
pub mod template;
pub mod workflow;

pub use node::*;
pub use template::*;
pub use workflow::*;
