// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod auth;
mod turmas;

use log::{debug, error, warn};
use secrecy::SecretString;

use crate::{
    api::Api,
    document::{Action, Document, ElementId, Event, EventKind},
    error::{self, Error, Result},
    session,
    storage::Storage,
    ui::Ui,
    view::ViewId,
};

/// Whether a failed call carried the session token. Only those can revoke
/// the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Endpoint {
    Public,
    Authenticated,
}

pub(crate) struct Controller<A, S, U> {
    api: A,
    session: session::Manager<S>,
    ui: U,
    document: Document,
}

impl<A: Api, S: Storage, U: Ui> Controller<A, S, U> {
    pub(crate) fn new(api: A, storage: S, ui: U) -> Self {
        Self {
            api,
            session: session::Manager::new(storage),
            ui,
            document: Document::new(),
        }
    }

    pub(crate) const fn document(&self) -> &Document {
        &self.document
    }

    /// Direct access for filling in form fields before a submit.
    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub(crate) fn render(&self) {
        self.ui.render(&self.document);
    }

    /// Wires the static handlers and restores any persisted session.
    pub(crate) async fn init(&mut self) -> Result<()> {
        let bindings = &mut self.document.bindings;
        bindings.bind(
            EventKind::Click,
            ElementId::Brand,
            Action::Navigate(ViewId::Home),
        );
        bindings.bind(
            EventKind::Click,
            ElementId::AccessLogin,
            Action::Navigate(ViewId::Auth),
        );
        bindings.bind(
            EventKind::Click,
            ElementId::BackHome,
            Action::Navigate(ViewId::Home),
        );
        bindings.bind(EventKind::Submit, ElementId::LoginForm, Action::Login);
        bindings.bind(EventKind::Submit, ElementId::RegisterForm, Action::Register);
        bindings.bind(EventKind::Click, ElementId::Logout, Action::Logout);
        bindings.bind(
            EventKind::Click,
            ElementId::NewTurma,
            Action::Show(ViewId::Form),
        );
        bindings.bind(EventKind::Submit, ElementId::TurmaForm, Action::SaveTurma);
        bindings.bind(
            EventKind::Click,
            ElementId::CancelTurma,
            Action::Show(ViewId::List),
        );
        bindings.bind(EventKind::Click, ElementId::ModalClose, Action::CloseModal);
        bindings.bind(EventKind::Click, ElementId::Modal, Action::CloseModal);

        self.check_auth().await
    }

    /// Runs the handler bound to the event's target. Returns whether one ran.
    pub(crate) async fn dispatch(&mut self, event: Event) -> Result<bool> {
        let Some(action) = self.document.resolve(&event) else {
            debug!("Nothing handles {:?} right now", event);
            return Ok(false);
        };

        debug!("Handling {:?} with {:?}", event, action);
        match action {
            Action::Navigate(view) => self.navigate_to(view).await?,
            Action::Show(view) => self.show_view(view),
            Action::Login => self.login().await?,
            Action::Register => self.register().await?,
            Action::Logout => self.logout().await?,
            Action::SaveTurma => self.create_turma().await?,
            Action::DeleteTurma(id) => self.delete_turma(id).await?,
            Action::Enroll(id) => self.enroll(id).await?,
            Action::Unenroll(id) => self.unenroll(id).await?,
            Action::ViewStudents(id, nome) => self.view_students(id, &nome).await?,
            Action::CloseModal => self.close_modal(),
        }
        Ok(true)
    }

    pub(crate) fn show_view(&mut self, view: ViewId) {
        self.document.router.show(view);
    }

    /// Home doubles as the dashboard entry point: with a session it lands on
    /// the turma list instead.
    pub(crate) async fn navigate_to(&mut self, view: ViewId) -> Result<()> {
        if view == ViewId::Home {
            return self.check_auth().await;
        }
        self.show_view(view);
        Ok(())
    }

    /// The token for an authenticated call. Without one the user is sent home
    /// and no request goes out.
    async fn require_token(&mut self) -> Result<Option<SecretString>> {
        let token = self.session.token().await?;
        if token.is_none() {
            warn!("There is no session, so we are returning to the home view");
            self.session.clear().await?;
            self.document.welcome.clear();
            self.show_view(ViewId::Home);
        }
        Ok(token)
    }

    /// Presents a failed call to the user. Server rejections show `describe`,
    /// transport failures show `offline`, and a rejected session is torn down
    /// afterwards.
    async fn fail(
        &mut self,
        err: Error,
        endpoint: Endpoint,
        describe: impl FnOnce(&error::Api) -> String,
        offline: &str,
    ) -> Result<()> {
        match err {
            Error::Api(e) => {
                warn!("The server refused the request: {}", e);
                self.ui.alert(&describe(&e)).await;
                if endpoint == Endpoint::Authenticated && e.is_unauthorized() {
                    self.logout().await?;
                }
                Ok(())
            }
            Error::Network(_) | Error::Json(_) => {
                error!("We could not complete the request: {}", err);
                self.ui.alert(offline).await;
                Ok(())
            }
            Error::Io(_) | Error::Cancelled => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, Reply, Route};

    #[tokio::test]
    async fn home_redirects_to_list_with_a_session() {
        let (mut controller, api, _ui, _storage) = testing::signed_in().await;
        controller.show_view(ViewId::Auth);

        controller.navigate_to(ViewId::Home).await.unwrap();

        assert_eq!(controller.document().router.current(), ViewId::List);
        assert_eq!(api.routes(), vec![Route::ListTurmas, Route::ListTurmas]);
    }

    #[tokio::test]
    async fn home_stays_home_without_a_session() {
        let (mut controller, api, _ui, _storage) = testing::signed_out().await;
        controller.show_view(ViewId::Auth);

        controller.navigate_to(ViewId::Home).await.unwrap();

        assert_eq!(controller.document().router.current(), ViewId::Home);
        assert!(api.routes().is_empty());
    }

    #[tokio::test]
    async fn access_and_back_buttons_move_between_home_and_auth() {
        let (mut controller, _api, _ui, _storage) = testing::signed_out().await;

        assert!(controller
            .dispatch(Event::click(ElementId::AccessLogin))
            .await
            .unwrap());
        assert_eq!(controller.document().router.current(), ViewId::Auth);
        assert!(controller.document().router.header_visible());
        assert!(!controller.document().router.controls_visible());

        assert!(controller
            .dispatch(Event::click(ElementId::BackHome))
            .await
            .unwrap());
        assert_eq!(controller.document().router.current(), ViewId::Home);
    }

    #[tokio::test]
    async fn brand_returns_to_the_list_when_signed_in() {
        let (mut controller, api, _ui, _storage) = testing::signed_in().await;
        let _ = controller
            .dispatch(Event::click(ElementId::NewTurma))
            .await
            .unwrap();

        assert!(controller
            .dispatch(Event::click(ElementId::Brand))
            .await
            .unwrap());

        assert_eq!(controller.document().router.current(), ViewId::List);
        assert_eq!(api.routes(), vec![Route::ListTurmas, Route::ListTurmas]);
    }

    #[tokio::test]
    async fn hidden_elements_are_ignored() {
        let (mut controller, api, _ui, _storage) = testing::signed_out().await;

        assert!(!controller
            .dispatch(Event::click(ElementId::NewTurma))
            .await
            .unwrap());
        assert!(!controller
            .dispatch(Event::click(ElementId::Logout))
            .await
            .unwrap());
        assert_eq!(controller.document().router.current(), ViewId::Home);
        assert!(api.routes().is_empty());
    }

    #[tokio::test]
    async fn form_view_opens_and_cancels() {
        let (mut controller, _api, _ui, _storage) = testing::signed_in().await;

        let _ = controller
            .dispatch(Event::click(ElementId::NewTurma))
            .await
            .unwrap();
        assert_eq!(controller.document().router.current(), ViewId::Form);
        assert!(controller.document().router.controls_visible());

        let _ = controller
            .dispatch(Event::click(ElementId::CancelTurma))
            .await
            .unwrap();
        assert_eq!(controller.document().router.current(), ViewId::List);
    }

    #[tokio::test]
    async fn network_failure_is_reported_separately_from_api_failure() {
        let (mut controller, api, ui, _storage) = testing::signed_in().await;

        api.reply(Route::Enroll, Reply::Offline);
        controller.enroll(1).await.unwrap();
        api.reply(
            Route::Enroll,
            Reply::Status(400, serde_json::json!({ "error": "Turma lotada" })),
        );
        controller.enroll(1).await.unwrap();

        assert_eq!(
            ui.alerts(),
            vec![
                "Erro de conexão ao tentar matricular.".to_owned(),
                "Erro ao matricular: Turma lotada".to_owned(),
            ]
        );
    }
}
