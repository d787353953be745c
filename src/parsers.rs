pub mod driver;
pub mod items;
pub mod table;

pub use driver::{parse, ParseStep, Trace};
pub use table::{Conflict, Mode, ParseTable, TableEntry};
