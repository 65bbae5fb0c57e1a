//! Credential file reading contract and built-in readers.
//!
//! The resolver only needs one capability: read a named credential file from a directory and
//! hand back its JSON object. [`FileCredentialReader`] reads from disk;
//! [`MemoryCredentialReader`] keeps files in-process for tests and embedding.

pub mod file;
pub mod memory;

pub use file::FileCredentialReader;
pub use memory::MemoryCredentialReader;

// self
use crate::{_prelude::*, error::CredentialSourceError};

/// Key/value content of a credential file.
pub type CredentialMap = JsonMap<String, JsonValue>;

/// Boxed future returned by [`CredentialReader`] implementations.
pub type ReaderFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, CredentialSourceError>> + 'a + Send>>;

/// Reads named credential files.
pub trait CredentialReader
where
	Self: Send + Sync,
{
	/// Reads `file_name` inside `dir` as a JSON object.
	///
	/// Fails with [`CredentialSourceError::NotFound`] when the file does not exist and with
	/// [`CredentialSourceError::Parse`] when it is not a JSON object.
	fn read<'a>(&'a self, dir: &'a Path, file_name: &'a str) -> ReaderFuture<'a, CredentialMap>;
}
