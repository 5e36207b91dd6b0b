//! goctl plugin payload.
//!
//! `goctl api plugin -plugin typings="typings typings" -api user.api -dir web`
//! runs this binary and writes a JSON description of the invocation to its
//! stdin. Only the fields needed to locate the input and output are read.

use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

/// Invocation context goctl pipes to a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginPayload {
    /// Path of the `.api` file goctl was given.
    pub api_file_path: PathBuf,
    /// `-dir` argument of the goctl invocation.
    #[serde(default)]
    pub dir: PathBuf,
}

impl PluginPayload {
    /// Reads a payload from `reader`.
    ///
    /// # Errors
    /// Returns `serde_json::Error` if the input is not a valid payload.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Returns the output directory, `.` when goctl passed none.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        if self.dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            self.dir.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_ignores_parsed_api() {
        let json = r#"{
            "Api": {"Info": {"Properties": {"version": "1.0"}}, "Types": []},
            "ApiFilePath": "/srv/user.api",
            "Style": "gozero",
            "Dir": "web/src"
        }"#;
        let payload = PluginPayload::from_reader(json.as_bytes()).expect("payload");
        assert_eq!(payload.api_file_path, PathBuf::from("/srv/user.api"));
        assert_eq!(payload.output_dir(), PathBuf::from("web/src"));
    }

    #[test]
    fn test_payload_without_dir() {
        let payload =
            PluginPayload::from_reader(r#"{"ApiFilePath": "user.api"}"#.as_bytes()).expect("payload");
        assert_eq!(payload.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_payload_requires_api_path() {
        assert!(PluginPayload::from_reader(r#"{"Dir": "."}"#.as_bytes()).is_err());
    }
}
