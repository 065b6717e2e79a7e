pub mod document_store;
pub mod memory;
pub mod traits;
pub mod types;

pub use document_store::DocumentStoreConnector;
pub use memory::MemoryConnector;
pub use traits::SourceConnector;
pub use types::{Constraint, Predicate};
