// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod turma;
pub(crate) mod usuario;

use serde::Deserialize;

pub(crate) use turma::{NewTurma, Turma, TurmaId};
pub(crate) use usuario::{Aluno, Credentials, LoginResponse, Registration, Usuario};

/// Failure payload. Most endpoints fill `error`; the enrollment endpoints
/// fill `message`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) error: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn summary(&self) -> &str {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("no details")
    }
}

/// Success payload of the enrollment endpoints.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub(crate) struct Message {
    #[serde(default)]
    pub(crate) message: String,
}
