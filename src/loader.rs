/// Definition file loading
///
/// Reads the URN alias and webfinger definition YAML files and hands the
/// raw maps to the index builder. A missing file is tolerated only at its
/// default path; an explicitly configured missing path is a startup error.
use crate::{
    config::ServerConfig,
    error::FingerResult,
    webfingers::{RawResources, UrnAliases, WebFingers},
};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FingerLoader {
    urn_path: PathBuf,
    urn_path_is_default: bool,
    finger_path: PathBuf,
    finger_path_is_default: bool,
}

impl FingerLoader {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            urn_path: config.urn_path.clone(),
            urn_path_is_default: config.is_default_urn_path(),
            finger_path: config.finger_path.clone(),
            finger_path_is_default: config.is_default_finger_path(),
        }
    }

    /// Read both definition files and build the webfinger index
    pub fn load(&self) -> FingerResult<WebFingers> {
        let urns_raw = read_optional(&self.urn_path, self.urn_path_is_default)?;
        let fingers_raw = read_optional(&self.finger_path, self.finger_path_is_default)?;

        let aliases: UrnAliases = parse_yaml_map(&urns_raw)?;
        debug!(count = aliases.len(), "URN alias file parsed");

        let resources: RawResources = parse_yaml_map(&fingers_raw)?;
        debug!(count = resources.len(), "finger definition file parsed");

        let webfingers = WebFingers::build(resources, Some(aliases))?;
        debug!(count = webfingers.len(), "webfinger index built");

        Ok(webfingers)
    }
}

/// Read a definition file, treating a missing default-path file as empty
fn read_optional(path: &Path, is_default: bool) -> FingerResult<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(err) if err.kind() == ErrorKind::NotFound && is_default => Ok(String::new()),
        Err(err) => Err(err.into()),
    }
}

/// Deserialize a YAML map, treating blank input as an empty map
fn parse_yaml_map<T: DeserializeOwned + Default>(raw: &str) -> FingerResult<T> {
    if raw.trim().is_empty() {
        return Ok(T::default());
    }

    Ok(serde_yaml::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FingerError;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn loader(urn_path: PathBuf, finger_path: PathBuf) -> FingerLoader {
        let config = ServerConfig {
            urn_path,
            finger_path,
            ..ServerConfig::default()
        };
        FingerLoader::new(&config)
    }

    #[test]
    fn test_loads_definitions_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let urns = write_file(
            dir.path(),
            "urns.yml",
            "avatar: http://webfinger.net/rel/avatar\n",
        );
        let fingers = write_file(
            dir.path(),
            "fingers.yml",
            "alice@example.com:\n  avatar: https://example.com/pic\n  name: Alice Doe\n",
        );

        let webfingers = loader(urns, fingers).load().unwrap();

        let finger = webfingers.get("acct:alice@example.com").unwrap();
        assert_eq!(finger.links.len(), 1);
        assert_eq!(finger.links[0].rel, "http://webfinger.net/rel/avatar");
        assert_eq!(finger.links[0].href, "https://example.com/pic");
        assert_eq!(finger.properties.get("name").unwrap(), "Alice Doe");
    }

    #[test]
    fn test_missing_configured_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let fingers = write_file(dir.path(), "fingers.yml", "");

        let result = loader(dir.path().join("missing-urns.yml"), fingers).load();

        match result {
            Err(FingerError::Io(err)) => assert_eq!(err.kind(), ErrorKind::NotFound),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_default_files_yield_empty_index() {
        // Default relative paths, resolved against a cwd with no such files.
        let config = ServerConfig::default();
        let webfingers = FingerLoader::new(&config).load().unwrap();

        assert!(webfingers.is_empty());
    }

    #[test]
    fn test_empty_files_yield_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let urns = write_file(dir.path(), "urns.yml", "");
        let fingers = write_file(dir.path(), "fingers.yml", "");

        let webfingers = loader(urns, fingers).load().unwrap();
        assert!(webfingers.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let urns = write_file(dir.path(), "urns.yml", "");
        let fingers = write_file(dir.path(), "fingers.yml", "alice@example.com: [not, a, map]\n");

        let result = loader(urns, fingers).load();
        assert!(matches!(result, Err(FingerError::Yaml(_))));
    }

    #[test]
    fn test_invalid_subject_in_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let urns = write_file(dir.path(), "urns.yml", "");
        let fingers = write_file(dir.path(), "fingers.yml", "not a subject:\n  name: Nobody\n");

        let result = loader(urns, fingers).load();
        assert!(matches!(result, Err(FingerError::InvalidSubject(_))));
    }
}
