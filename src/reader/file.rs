//! Filesystem-backed [`CredentialReader`].

// std
use std::{fs, io::ErrorKind};
// self
use crate::{
	_prelude::*,
	error::CredentialSourceError,
	reader::{CredentialMap, CredentialReader, ReaderFuture},
};

/// Reads credential files as JSON objects from the local filesystem.
///
/// Files are read with blocking `std::fs` calls inside the returned future, so two reads joined
/// by the resolver complete one after the other. Credential files are small; readers that need
/// overlapping I/O can implement [`CredentialReader`] on top of an async filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileCredentialReader;
impl FileCredentialReader {
	fn read_now(path: &Path) -> Result<CredentialMap, CredentialSourceError> {
		let bytes = fs::read(path).map_err(|e| match e.kind() {
			ErrorKind::NotFound => CredentialSourceError::NotFound { path: path.to_path_buf() },
			_ => CredentialSourceError::Io { path: path.to_path_buf(), source: e },
		})?;
		let mut de = serde_json::Deserializer::from_slice(&bytes);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| CredentialSourceError::Parse { path: path.to_path_buf(), source })
	}
}
impl CredentialReader for FileCredentialReader {
	fn read<'a>(&'a self, dir: &'a Path, file_name: &'a str) -> ReaderFuture<'a, CredentialMap> {
		Box::pin(async move { Self::read_now(&dir.join(file_name)) })
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;

	struct TempDir(PathBuf);
	impl TempDir {
		fn new(label: &str) -> Self {
			static COUNTER: AtomicUsize = AtomicUsize::new(0);

			let path = std::env::temp_dir().join(format!(
				"oauth2-grant-{label}-{}-{}",
				std::process::id(),
				COUNTER.fetch_add(1, Ordering::Relaxed)
			));

			fs::create_dir_all(&path).expect("Failed to create temporary credentials directory.");

			Self(path)
		}

		fn write(&self, name: &str, contents: &str) {
			fs::write(self.0.join(name), contents).expect("Failed to write credential fixture.");
		}
	}
	impl Drop for TempDir {
		fn drop(&mut self) {
			let _ = fs::remove_dir_all(&self.0);
		}
	}

	#[tokio::test]
	async fn reads_json_object() {
		let dir = TempDir::new("read");

		dir.write("client.json", r#"{"client_id":"svc","client_secret":"s3cret"}"#);

		let map = FileCredentialReader
			.read(&dir.0, "client.json")
			.await
			.expect("Credential file should be readable.");

		assert_eq!(map.get("client_id").and_then(JsonValue::as_str), Some("svc"));
		assert_eq!(map.get("client_secret").and_then(JsonValue::as_str), Some("s3cret"));
	}

	#[tokio::test]
	async fn missing_file_is_not_found() {
		let dir = TempDir::new("missing");
		let err = FileCredentialReader
			.read(&dir.0, "user.json")
			.await
			.expect_err("Missing files must fail.");

		assert!(matches!(err, CredentialSourceError::NotFound { ref path } if path.ends_with("user.json")));
	}

	#[tokio::test]
	async fn non_object_is_parse_error() {
		let dir = TempDir::new("parse");

		dir.write("client.json", "[\"svc\"]");

		let err = FileCredentialReader
			.read(&dir.0, "client.json")
			.await
			.expect_err("Arrays are not credential objects.");

		assert!(matches!(err, CredentialSourceError::Parse { .. }));
	}
}
