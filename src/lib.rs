pub mod coerce;
pub mod error;
pub mod extract;
pub mod schema;
pub mod value;

pub(crate) mod json_check;

pub use coerce::coerce;
pub use error::{CoercionError, ExtractError, ParseError};
pub use extract::{extract_json, extract_typed};
pub use schema::TypeSchema;
pub use value::{parse_value, Value};
