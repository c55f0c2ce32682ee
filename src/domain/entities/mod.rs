pub mod edit;
pub mod row;
pub mod search;
pub mod table;
