// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::Result;

pub(crate) use file::File;
pub(crate) use memory::Memory;

pub(crate) trait IsPersistent {
    fn is_persistent(&self) -> bool;
}

impl<T: IsPersistent + ?Sized> IsPersistent for Box<T> {
    fn is_persistent(&self) -> bool {
        (**self).is_persistent()
    }
}

/// A string key-value store. Writes take several entries at once so that
/// related keys land in the store together.
#[async_trait]
pub(crate) trait Storage: Send + Sync + IsPersistent {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&mut self, entries: &[(&str, &str)]) -> Result<()>;
    async fn remove(&mut self, keys: &[&str]) -> Result<()>;
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Box<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        (**self).set(entries).await
    }

    async fn remove(&mut self, keys: &[&str]) -> Result<()> {
        (**self).remove(keys).await
    }
}
