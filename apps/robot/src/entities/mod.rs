pub mod tables;

pub use tables::Entity as Tables;
pub use tables::Model as TableRow;
