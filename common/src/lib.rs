//! Book CSV Common Library
//!
//! CLIとWeb(WASM)で共有されるCSVコーデック・レコードストア・ビュー導出

pub mod types;
pub mod error;
pub mod codec;
pub mod store;
pub mod view;
pub mod session;

pub use types::{BookRecord, Field, FieldValue, Record, RecordId, SortDirection, GENRES};
pub use error::{Error, ParseError, Result};
pub use codec::{export_file_name, parse, serialize, ParsedCsv, RowSkipped};
pub use store::RecordStore;
pub use view::{derive, Filter, PageView, ViewParams, DEFAULT_PAGE_SIZE};
pub use session::{Session, SessionStats};
