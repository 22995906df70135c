pub mod data_table;
pub mod header;
pub mod notice;
pub mod pagination;
pub mod toolbar;
pub mod upload_area;
