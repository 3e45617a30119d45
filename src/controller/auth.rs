// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::info;
use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    api::Api,
    document::RegisterForm,
    error::Result,
    model::{Credentials, Registration},
    storage::Storage,
    ui::Ui,
    view::ViewId,
};

use super::{Controller, Endpoint};

const OFFLINE: &str = "Erro de conexão com a API. Verifique se o servidor está rodando.";

impl<A: Api, S: Storage, U: Ui> Controller<A, S, U> {
    /// Derives the signed-in state from the store and shows the matching view.
    pub(crate) async fn check_auth(&mut self) -> Result<()> {
        match self.session.load().await? {
            Some(session) => {
                self.document.welcome = format!("Olá, {}!", session.user.nome);
                self.show_view(ViewId::List);
                self.list_turmas().await
            }
            None => {
                self.document.welcome.clear();
                self.show_view(ViewId::Home);
                Ok(())
            }
        }
    }

    pub(crate) async fn login(&mut self) -> Result<()> {
        let form = &mut self.document.forms.login;
        let credentials = Credentials {
            email: form.email.clone(),
            senha: SecretString::new(form.senha.expose_secret().clone()),
        };
        form.senha = SecretString::new(String::new());

        match self.api.login(&credentials).await {
            Ok(response) => {
                self.session
                    .save(&response.token, &response.usuario)
                    .await?;
                info!("Signed in as {}", response.usuario.email);
                self.ui.alert("Login bem-sucedido!").await;
                self.check_auth().await
            }
            Err(e) => {
                self.fail(
                    e,
                    Endpoint::Public,
                    |e| format!("Erro no login: {}", e.error()),
                    OFFLINE,
                )
                .await
            }
        }
    }

    pub(crate) async fn register(&mut self) -> Result<()> {
        let form = &self.document.forms.register;
        let registration = Registration {
            nome: form.nome.clone(),
            email: form.email.clone(),
            senha: SecretString::new(form.senha.expose_secret().clone()),
        };

        match self.api.register(&registration).await {
            Ok(()) => {
                self.ui
                    .alert("Cadastro realizado com sucesso! Faça login.")
                    .await;
                self.document.forms.register = RegisterForm::default();
                self.document.forms.login.email = registration.email;
                Ok(())
            }
            Err(e) => {
                self.fail(
                    e,
                    Endpoint::Public,
                    |e| format!("Erro ao cadastrar: {}", e.error()),
                    OFFLINE,
                )
                .await
            }
        }
    }

    pub(crate) async fn logout(&mut self) -> Result<()> {
        self.session.clear().await?;
        self.document.welcome.clear();
        self.document.clear_turmas();
        self.document.modal.open = false;
        self.ui.alert("Você foi desconectado.").await;
        self.show_view(ViewId::Home);
        Ok(())
    }
}
