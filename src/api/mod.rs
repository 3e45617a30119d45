// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod http;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::{
    error::Result,
    model::{
        Aluno, Credentials, LoginResponse, Message, NewTurma, Registration, Turma, TurmaId,
    },
};

pub(crate) use http::HttpApi;

/// The remote enrollment API. Every call settles into either a decoded
/// payload, [`crate::error::Error::Api`] for a non-success status, or
/// [`crate::error::Error::Network`] when no response arrived.
#[async_trait]
pub(crate) trait Api: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<()>;
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;
    async fn list_turmas(&self, token: &SecretString) -> Result<Vec<Turma>>;
    async fn create_turma(&self, token: &SecretString, turma: &NewTurma) -> Result<()>;
    async fn delete_turma(&self, token: &SecretString, id: TurmaId) -> Result<()>;
    async fn list_alunos(&self, token: &SecretString, id: TurmaId) -> Result<Vec<Aluno>>;
    async fn enroll(&self, token: &SecretString, id: TurmaId) -> Result<Message>;
    async fn unenroll(&self, token: &SecretString, id: TurmaId) -> Result<Message>;
}

