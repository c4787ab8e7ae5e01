mod catalog;
pub mod definition;
pub mod operation;
pub mod resource;
pub mod table;

pub use definition::*;
pub use operation::*;
pub use resource::*;
pub use table::*;
