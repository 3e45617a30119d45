// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret as _, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    error::{self, Error, Result},
    metadata,
    model::{
        Aluno, Credentials, ErrorBody, LoginResponse, Message, NewTurma, Registration, Turma,
        TurmaId,
    },
};

use super::Api;

pub(crate) struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    pub(crate) fn new(mut base: Url) -> Result<Self> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(metadata::USER_AGENT.as_str())
            .build()
            .map_err(Error::network)?;
        Ok(Self { client, base })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(Error::network)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&SecretString>,
    ) -> Result<RequestBuilder> {
        let mut request = self.client.request(method, self.url(path)?);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>)> {
        let response = request.send().await.map_err(Error::network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(Error::network)?;
        debug!("Received {} ({} bytes)", status, body.len());
        Ok((status, body.to_vec()))
    }

    async fn fetch<Res: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Res> {
        let (status, body) = self.send(request).await?;
        decode(status, &body)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<()> {
        let (status, body) = self.send(request).await?;
        check(status, &body)
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn register(&self, registration: &Registration) -> Result<()> {
        let request = self.request(Method::POST, "api/usuarios/cadastro", None)?;
        self.execute(request.json(registration)).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let request = self.request(Method::POST, "api/login", None)?;
        self.fetch(request.json(credentials)).await
    }

    async fn list_turmas(&self, token: &SecretString) -> Result<Vec<Turma>> {
        self.fetch(self.request(Method::GET, "api/turmas", Some(token))?)
            .await
    }

    async fn create_turma(&self, token: &SecretString, turma: &NewTurma) -> Result<()> {
        let request = self.request(Method::POST, "api/turmas", Some(token))?;
        self.execute(request.json(turma)).await
    }

    async fn delete_turma(&self, token: &SecretString, id: TurmaId) -> Result<()> {
        self.execute(self.request(Method::DELETE, &format!("api/turmas/{id}"), Some(token))?)
            .await
    }

    async fn list_alunos(&self, token: &SecretString, id: TurmaId) -> Result<Vec<Aluno>> {
        self.fetch(self.request(Method::GET, &format!("api/turmas/{id}/alunos"), Some(token))?)
            .await
    }

    async fn enroll(&self, token: &SecretString, id: TurmaId) -> Result<Message> {
        self.fetch(self.request(Method::POST, &format!("api/matriculas/{id}"), Some(token))?)
            .await
    }

    async fn unenroll(&self, token: &SecretString, id: TurmaId) -> Result<Message> {
        self.fetch(self.request(Method::DELETE, &format!("api/matriculas/{id}"), Some(token))?)
            .await
    }
}

fn failure(status: StatusCode, body: &[u8]) -> Error {
    let body = serde_json::from_slice::<ErrorBody>(body).unwrap_or_default();
    error::Api::new(status, body).into()
}

fn decode<Res: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<Res> {
    if status.is_success() {
        Ok(serde_json::from_slice(body)?)
    } else {
        Err(failure(status, body))
    }
}

fn check(status: StatusCode, body: &[u8]) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(failure(status, body))
    }
}
