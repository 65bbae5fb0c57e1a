//! Thread-safe in-memory [`CredentialReader`] for tests and embedding.

// std
use std::sync::atomic::{AtomicUsize, Ordering};
// self
use crate::{
	_prelude::*,
	error::CredentialSourceError,
	reader::{CredentialMap, CredentialReader, ReaderFuture},
};

type FileMap = Arc<RwLock<HashMap<PathBuf, JsonValue>>>;

/// Keeps credential files in-process, keyed by their full path.
#[derive(Clone, Debug, Default)]
pub struct MemoryCredentialReader {
	files: FileMap,
	reads: Arc<AtomicUsize>,
}
impl MemoryCredentialReader {
	/// Stores (or replaces) the content of `file_name` inside `dir`.
	pub fn insert(&self, dir: impl AsRef<Path>, file_name: &str, content: JsonValue) {
		self.files.write().insert(dir.as_ref().join(file_name), content);
	}

	/// Builder-style variant of [`insert`](Self::insert).
	pub fn with_file(self, dir: impl AsRef<Path>, file_name: &str, content: JsonValue) -> Self {
		self.insert(dir, file_name, content);

		self
	}

	/// Removes a stored file, returning its previous content.
	pub fn remove(&self, dir: impl AsRef<Path>, file_name: &str) -> Option<JsonValue> {
		self.files.write().remove(&dir.as_ref().join(file_name))
	}

	/// Number of read attempts served so far.
	pub fn read_count(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	fn read_now(files: &FileMap, path: PathBuf) -> Result<CredentialMap, CredentialSourceError> {
		let content = files
			.read()
			.get(&path)
			.cloned()
			.ok_or_else(|| CredentialSourceError::NotFound { path: path.clone() })?;

		serde_path_to_error::deserialize(content)
			.map_err(|source| CredentialSourceError::Parse { path, source })
	}
}
impl CredentialReader for MemoryCredentialReader {
	fn read<'a>(&'a self, dir: &'a Path, file_name: &'a str) -> ReaderFuture<'a, CredentialMap> {
		Box::pin(async move {
			self.reads.fetch_add(1, Ordering::SeqCst);

			Self::read_now(&self.files, dir.join(file_name))
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[tokio::test]
	async fn serves_inserted_files_and_counts_reads() {
		let reader = MemoryCredentialReader::default().with_file(
			"/secrets",
			"client.json",
			json!({ "client_id": "svc", "client_secret": "s3cret" }),
		);
		let map = reader
			.read(Path::new("/secrets"), "client.json")
			.await
			.expect("Stored file should be readable.");

		assert_eq!(map.get("client_id"), Some(&json!("svc")));
		assert_eq!(reader.read_count(), 1);

		reader.remove("/secrets", "client.json");

		let err = reader
			.read(Path::new("/secrets"), "client.json")
			.await
			.expect_err("Removed files must be reported as missing.");

		assert!(matches!(err, CredentialSourceError::NotFound { .. }));
		assert_eq!(reader.read_count(), 2);
	}

	#[tokio::test]
	async fn non_object_content_is_parse_error() {
		let reader =
			MemoryCredentialReader::default().with_file("/secrets", "user.json", json!("robot"));
		let err = reader
			.read(Path::new("/secrets"), "user.json")
			.await
			.expect_err("Strings are not credential objects.");

		assert!(matches!(err, CredentialSourceError::Parse { .. }));
	}
}
