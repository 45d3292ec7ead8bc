//! Process-wide, thread-safe in-memory key-value store.
//!
//! ```
//! use kvcache::{get_instance, CacheError};
//!
//! let kv = get_instance();
//! kv.set("a", 1);
//! assert_eq!(kv.get_as::<i64>("a"), Ok(Some(1)));
//! assert_eq!(kv.get_as::<String>("a"), Err(CacheError::ConversionType));
//! ```

pub mod env;
pub mod error;
pub mod kv_store;
pub mod logger;

pub use error::{CacheError, Result};
pub use kv_store::{get_instance, KVStore};
pub use serde_json::Value;
