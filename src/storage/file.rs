// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use log::warn;
use serde_json::{Map, Value};
use url::Url;

use crate::{error::Result, metadata};

use super::{IsPersistent, Storage};

/// A JSON object on disk, one per API origin.
pub(crate) struct File {
    path: PathBuf,
}

impl File {
    pub(crate) fn new(url: &Url) -> Option<Self> {
        metadata::PROJECT_DIRS.as_ref().map(|dirs| {
            Self::at(
                dirs.data_dir()
                    .join("storage")
                    .join(format!("{}.json", origin_file_stem(url))),
            )
        })
    }

    pub(crate) fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// The stored entries. A file that is not a JSON object reads as empty and
    /// is replaced on the next write.
    fn read(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                warn!(
                    "The storage file {} does not hold a JSON object, so we are ignoring it",
                    self.path.display()
                );
                Ok(Map::new())
            }
            Err(e) => {
                warn!(
                    "We could not parse the storage file {}, so we are ignoring it: {}",
                    self.path.display(),
                    e
                );
                Ok(Map::new())
            }
        }
    }

    /// Writes a sibling file readable only by the owner and moves it over
    /// the old one, so readers never see a partial file.
    fn write(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        // The mode only applies to newly created files.
        match fs::remove_file(&staging) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
            Ok(()) | Err(_) => {}
        }

        let mut options = fs::OpenOptions::new();
        let _ = options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt as _;
            let _ = options.mode(0o600);
        }

        let mut file = options.open(&staging)?;
        serde_json::to_writer(&mut file, map)?;
        file.sync_all()?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl IsPersistent for File {
    fn is_persistent(&self) -> bool {
        true
    }
}

#[async_trait]
impl Storage for File {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.get(key).and_then(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                Some(value.to_string())
            }
        }))
    }

    async fn set(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let mut map = self.read()?;
        for (key, value) in entries {
            let _ = map.insert((*key).to_owned(), Value::String((*value).to_owned()));
        }
        self.write(&map)
    }

    async fn remove(&mut self, keys: &[&str]) -> Result<()> {
        let mut map = self.read()?;
        let before = map.len();
        for key in keys {
            let _ = map.remove(*key);
        }
        if map.len() != before {
            self.write(&map)?;
        }
        Ok(())
    }
}

/// Storage is scoped per origin, so the scheme, host and port all matter.
fn origin_file_stem(url: &Url) -> String {
    url.origin()
        .ascii_serialization()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
