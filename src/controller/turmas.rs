// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::{error, info};

use crate::{
    api::Api,
    error::{Error, Result},
    model::{NewTurma, TurmaId},
    render,
    storage::Storage,
    ui::Ui,
    view::ViewId,
};

use super::{Controller, Endpoint};

impl<A: Api, S: Storage, U: Ui> Controller<A, S, U> {
    /// Refreshes the turma table. Server-side failures are only logged; the
    /// table keeps whatever it showed before.
    pub(crate) async fn list_turmas(&mut self) -> Result<()> {
        let Some(token) = self.require_token().await? else {
            return Ok(());
        };

        match self.api.list_turmas(&token).await {
            Ok(turmas) => {
                render::turmas(&mut self.document, &turmas, self.session.current_user());
                Ok(())
            }
            Err(Error::Api(e)) => {
                error!("We could not load the turma list: {}", e);
                if e.is_unauthorized() {
                    self.logout().await?;
                }
                Ok(())
            }
            Err(e) => {
                self.fail(
                    e,
                    Endpoint::Authenticated,
                    |e| format!("Erro ao carregar turmas: {}", e.error()),
                    "Não foi possível conectar-se ao servidor. Verifique se o Back-end está rodando.",
                )
                .await
            }
        }
    }

    pub(crate) async fn create_turma(&mut self) -> Result<()> {
        let Some(token) = self.require_token().await? else {
            return Ok(());
        };
        let turma = self.document.forms.turma.clone();

        match self.api.create_turma(&token, &turma).await {
            Ok(()) => {
                info!("Created turma {}", turma.nome);
                self.ui.alert("Turma salva com sucesso!").await;
                self.document.forms.turma = NewTurma::default();
                self.show_view(ViewId::List);
                self.list_turmas().await
            }
            Err(e) => {
                self.fail(
                    e,
                    Endpoint::Authenticated,
                    |e| format!("Erro ao salvar: {}", e.error()),
                    "Erro de conexão ao tentar salvar a turma.",
                )
                .await
            }
        }
    }

    pub(crate) async fn delete_turma(&mut self, id: TurmaId) -> Result<()> {
        if !self
            .ui
            .confirm("Confirma a exclusão desta turma? Esta ação é permanente.")
            .await?
        {
            return Ok(());
        }
        let Some(token) = self.require_token().await? else {
            return Ok(());
        };

        match self.api.delete_turma(&token, id).await {
            Ok(()) => {
                info!("Deleted turma {}", id);
                self.ui.alert("Turma excluída com sucesso.").await;
                self.list_turmas().await
            }
            Err(e) => {
                self.fail(
                    e,
                    Endpoint::Authenticated,
                    |e| format!("Erro ao excluir: {}", e.error()),
                    "Erro de conexão ao tentar excluir a turma.",
                )
                .await
            }
        }
    }

    /// A 409 means the user is already enrolled, which is reported like a
    /// success.
    pub(crate) async fn enroll(&mut self, id: TurmaId) -> Result<()> {
        let Some(token) = self.require_token().await? else {
            return Ok(());
        };

        match self.api.enroll(&token, id).await {
            Ok(reply) => {
                self.ui.alert(&reply.message).await;
                self.list_turmas().await
            }
            Err(Error::Api(e)) if e.is_conflict() => {
                self.ui.alert(e.message()).await;
                self.list_turmas().await
            }
            Err(e) => {
                self.fail(
                    e,
                    Endpoint::Authenticated,
                    |e| format!("Erro ao matricular: {}", e.message()),
                    "Erro de conexão ao tentar matricular.",
                )
                .await
            }
        }
    }

    pub(crate) async fn unenroll(&mut self, id: TurmaId) -> Result<()> {
        if !self
            .ui
            .confirm("Tem certeza que deseja desmatricular desta turma?")
            .await?
        {
            return Ok(());
        }
        let Some(token) = self.require_token().await? else {
            return Ok(());
        };

        match self.api.unenroll(&token, id).await {
            Ok(reply) => {
                self.ui.alert(&reply.message).await;
                self.list_turmas().await
            }
            Err(e) => {
                self.fail(
                    e,
                    Endpoint::Authenticated,
                    |e| format!("Erro ao desmatricular: {}", e.message()),
                    "Erro de conexão ao tentar desmatricular.",
                )
                .await
            }
        }
    }

    pub(crate) async fn view_students(&mut self, id: TurmaId, turma_nome: &str) -> Result<()> {
        let Some(token) = self.require_token().await? else {
            return Ok(());
        };

        match self.api.list_alunos(&token, id).await {
            Ok(alunos) => {
                render::alunos(&mut self.document, turma_nome, &alunos);
                Ok(())
            }
            Err(e) => {
                self.fail(
                    e,
                    Endpoint::Authenticated,
                    |e| format!("Erro ao carregar alunos: {}", e.error()),
                    "Erro de conexão ao buscar alunos.",
                )
                .await
            }
        }
    }

    pub(crate) fn close_modal(&mut self) {
        self.document.modal.open = false;
    }
}
