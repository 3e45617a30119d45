// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Scripted stand-ins for the API and the user.

use std::{
    collections::{HashMap, VecDeque},
    io,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret as _, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    api::Api,
    controller::Controller,
    document::Document,
    error::{self, Error, Result},
    model::{
        Aluno, Credentials, LoginResponse, Message, NewTurma, Registration, Turma, TurmaId,
    },
    storage::{Memory, Storage as _},
    ui::Ui,
};

pub(crate) const TOKEN: &str = "token-ana";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Route {
    Register,
    Login,
    ListTurmas,
    CreateTurma,
    DeleteTurma,
    ListAlunos,
    Enroll,
    Unenroll,
}

impl Route {
    fn default_reply(self) -> Reply {
        match self {
            Self::ListTurmas | Self::ListAlunos => Reply::Json(json!([])),
            Self::Enroll | Self::Unenroll => Reply::Json(json!({ "message": "" })),
            Self::Login => Reply::Status(401, json!({ "error": "Credenciais inválidas" })),
            Self::Register | Self::CreateTurma | Self::DeleteTurma => Reply::Json(Value::Null),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Reply {
    Json(Value),
    Status(u16, Value),
    Offline,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Call {
    pub(crate) route: Route,
    pub(crate) token: Option<String>,
    pub(crate) id: Option<TurmaId>,
    pub(crate) body: Option<Value>,
}

impl Call {
    fn new(route: Route) -> Self {
        Self {
            route,
            token: None,
            id: None,
            body: None,
        }
    }

    fn with_token(mut self, token: &SecretString) -> Self {
        self.token = Some(token.expose_secret().clone());
        self
    }

    fn with_id(mut self, id: TurmaId) -> Self {
        self.id = Some(id);
        self
    }

    fn with_body<T: serde::Serialize>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body).unwrap());
        self
    }
}

#[derive(Default)]
struct Script {
    calls: Vec<Call>,
    replies: HashMap<Route, VecDeque<Reply>>,
}

/// Answers each route from a queue of replies, falling back to a harmless
/// default, and records every call.
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    script: Arc<Mutex<Script>>,
}

impl FakeApi {
    pub(crate) fn reply(&self, route: Route, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .replies
            .entry(route)
            .or_default()
            .push_back(reply);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    pub(crate) fn routes(&self) -> Vec<Route> {
        self.calls().into_iter().map(|c| c.route).collect()
    }

    fn answer<T: DeserializeOwned>(&self, call: Call) -> Result<T> {
        let route = call.route;
        let reply = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(call);
            script
                .replies
                .get_mut(&route)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| route.default_reply())
        };

        match reply {
            Reply::Json(value) => Ok(serde_json::from_value(value)?),
            Reply::Status(status, body) => Err(error::Api::new(
                StatusCode::from_u16(status).unwrap(),
                serde_json::from_value(body).unwrap_or_default(),
            )
            .into()),
            Reply::Offline => Err(Error::network(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

#[async_trait]
impl Api for FakeApi {
    async fn register(&self, registration: &Registration) -> Result<()> {
        self.answer(Call::new(Route::Register).with_body(registration))
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.answer(Call::new(Route::Login).with_body(credentials))
    }

    async fn list_turmas(&self, token: &SecretString) -> Result<Vec<Turma>> {
        self.answer(Call::new(Route::ListTurmas).with_token(token))
    }

    async fn create_turma(&self, token: &SecretString, turma: &NewTurma) -> Result<()> {
        self.answer(Call::new(Route::CreateTurma).with_token(token).with_body(turma))
    }

    async fn delete_turma(&self, token: &SecretString, id: TurmaId) -> Result<()> {
        self.answer(Call::new(Route::DeleteTurma).with_token(token).with_id(id))
    }

    async fn list_alunos(&self, token: &SecretString, id: TurmaId) -> Result<Vec<Aluno>> {
        self.answer(Call::new(Route::ListAlunos).with_token(token).with_id(id))
    }

    async fn enroll(&self, token: &SecretString, id: TurmaId) -> Result<Message> {
        self.answer(Call::new(Route::Enroll).with_token(token).with_id(id))
    }

    async fn unenroll(&self, token: &SecretString, id: TurmaId) -> Result<Message> {
        self.answer(Call::new(Route::Unenroll).with_token(token).with_id(id))
    }
}

#[derive(Default)]
struct Transcript {
    alerts: Vec<String>,
    questions: Vec<String>,
    answer: Option<bool>,
}

/// Records alerts and questions. Questions are answered yes unless told
/// otherwise.
#[derive(Clone, Default)]
pub(crate) struct RecordingUi {
    transcript: Arc<Mutex<Transcript>>,
}

impl RecordingUi {
    pub(crate) fn answer(&self, yes: bool) {
        self.transcript.lock().unwrap().answer = Some(yes);
    }

    pub(crate) fn alerts(&self) -> Vec<String> {
        self.transcript.lock().unwrap().alerts.clone()
    }

    pub(crate) fn questions(&self) -> Vec<String> {
        self.transcript.lock().unwrap().questions.clone()
    }
}

#[async_trait]
impl Ui for RecordingUi {
    async fn alert(&self, message: &str) {
        self.transcript
            .lock()
            .unwrap()
            .alerts
            .push(message.to_owned());
    }

    async fn confirm(&self, message: &str) -> Result<bool> {
        let mut transcript = self.transcript.lock().unwrap();
        transcript.questions.push(message.to_owned());
        Ok(transcript.answer.unwrap_or(true))
    }

    fn render(&self, _document: &Document) {}
}

pub(crate) type TestController = Controller<FakeApi, Memory, RecordingUi>;

pub(crate) fn ana_json() -> Value {
    json!({ "id": 1, "nome": "Ana", "email": "ana@example.com" })
}

pub(crate) fn turma_json(id: TurmaId, creator: i64, enrolled: bool) -> Value {
    json!({
        "id": id,
        "nome": format!("Turma {id}"),
        "nivel": "A1",
        "professor": "Carla",
        "horario": "Seg 19h",
        "usuario_criador_id": creator,
        "esta_matriculado": enrolled,
    })
}

async fn start(storage: Memory) -> (TestController, FakeApi, RecordingUi, Memory) {
    let api = FakeApi::default();
    let ui = RecordingUi::default();
    let mut controller = Controller::new(api.clone(), storage.clone(), ui.clone());
    controller.init().await.unwrap();
    (controller, api, ui, storage)
}

/// A controller initialized against an empty store.
pub(crate) async fn signed_out() -> (TestController, FakeApi, RecordingUi, Memory) {
    start(Memory::new()).await
}

/// A controller initialized with Ana's session already stored.
pub(crate) async fn signed_in() -> (TestController, FakeApi, RecordingUi, Memory) {
    let mut storage = Memory::new();
    storage
        .set(&[("token", TOKEN), ("usuario", &ana_json().to_string())])
        .await
        .unwrap();
    start(storage).await
}
