// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod terminal;

use async_trait::async_trait;

use crate::{document::Document, error::Result};

pub(crate) use terminal::Terminal;

/// The surface the user sees: blocking notices, yes/no questions, and the
/// current document.
#[async_trait]
pub(crate) trait Ui: Send + Sync {
    async fn alert(&self, message: &str);
    async fn confirm(&self, message: &str) -> Result<bool>;
    fn render(&self, document: &Document);
}
