pub mod args;
pub mod collection;
pub mod export;
pub mod first;
pub mod follow;
pub mod parse;
pub mod productions;
pub mod symbols;
pub mod table;
