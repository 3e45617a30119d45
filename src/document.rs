// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use secrecy::SecretString;

use crate::{
    model::{NewTurma, Turma, TurmaId},
    view::{Router, ViewId},
};

/// Every element a user can act on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ElementId {
    /// The application name in the header.
    Brand,
    AccessLogin,
    BackHome,
    LoginForm,
    RegisterForm,
    Logout,
    NewTurma,
    TurmaForm,
    CancelTurma,
    ModalClose,
    /// The modal root, which covers the page behind the content box.
    Modal,
    ModalContent,
    Enrollment(TurmaId),
    DeleteTurma(TurmaId),
    ViewStudents(TurmaId),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Scope {
    View(ViewId),
    Header,
    HeaderControls,
    Modal,
}

impl ElementId {
    pub(crate) const fn scope(self) -> Scope {
        match self {
            Self::AccessLogin => Scope::View(ViewId::Home),
            Self::BackHome | Self::LoginForm | Self::RegisterForm => Scope::View(ViewId::Auth),
            Self::NewTurma | Self::Enrollment(_) | Self::DeleteTurma(_) | Self::ViewStudents(_) => {
                Scope::View(ViewId::List)
            }
            Self::TurmaForm | Self::CancelTurma => Scope::View(ViewId::Form),
            Self::Brand => Scope::Header,
            Self::Logout => Scope::HeaderControls,
            Self::ModalClose | Self::Modal | Self::ModalContent => Scope::Modal,
        }
    }

    const fn is_row(self) -> bool {
        matches!(
            self,
            Self::Enrollment(_) | Self::DeleteTurma(_) | Self::ViewStudents(_)
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum EventKind {
    Click,
    Submit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Event {
    pub(crate) kind: EventKind,
    pub(crate) target: ElementId,
}

impl Event {
    pub(crate) const fn click(target: ElementId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
        }
    }

    pub(crate) const fn submit(target: ElementId) -> Self {
        Self {
            kind: EventKind::Submit,
            target,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Navigate(ViewId),
    Show(ViewId),
    Login,
    Register,
    Logout,
    SaveTurma,
    DeleteTurma(TurmaId),
    Enroll(TurmaId),
    Unenroll(TurmaId),
    ViewStudents(TurmaId, String),
    CloseModal,
}

/// Handlers registered per (event kind, element).
#[derive(Debug, Default)]
pub(crate) struct Bindings {
    handlers: HashMap<(EventKind, ElementId), Action>,
}

impl Bindings {
    pub(crate) fn bind(&mut self, kind: EventKind, target: ElementId, action: Action) {
        let _ = self.handlers.insert((kind, target), action);
    }

    pub(crate) fn unbind_rows(&mut self) {
        self.handlers.retain(|(_, target), _| !target.is_row());
    }

    pub(crate) fn lookup(&self, event: &Event) -> Option<&Action> {
        self.handlers.get(&(event.kind, event.target))
    }
}

#[derive(Debug)]
pub(crate) struct LoginForm {
    pub(crate) email: String,
    pub(crate) senha: SecretString,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            senha: SecretString::new(String::new()),
        }
    }
}

#[derive(Debug)]
pub(crate) struct RegisterForm {
    pub(crate) nome: String,
    pub(crate) email: String,
    pub(crate) senha: SecretString,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            nome: String::new(),
            email: String::new(),
            senha: SecretString::new(String::new()),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Forms {
    pub(crate) login: LoginForm,
    pub(crate) register: RegisterForm,
    pub(crate) turma: NewTurma,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Button {
    pub(crate) id: ElementId,
    pub(crate) label: &'static str,
    pub(crate) enabled: bool,
    pub(crate) title: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TurmaRow {
    pub(crate) turma: Turma,
    pub(crate) enrollment: Button,
    pub(crate) delete: Button,
    pub(crate) students: Button,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct TurmaTable {
    pub(crate) rows: Vec<TurmaRow>,
    pub(crate) placeholder_visible: bool,
}

impl TurmaTable {
    pub(crate) fn row(&self, id: TurmaId) -> Option<&TurmaRow> {
        self.rows.iter().find(|row| row.turma.id == id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StudentsModal {
    pub(crate) open: bool,
    pub(crate) turma_nome: String,
    pub(crate) items: Vec<String>,
}

/// Everything that is on screen, plus the handlers wired to it.
#[derive(Debug, Default)]
pub(crate) struct Document {
    pub(crate) router: Router,
    pub(crate) welcome: String,
    pub(crate) forms: Forms,
    pub(crate) turmas: TurmaTable,
    pub(crate) modal: StudentsModal,
    pub(crate) bindings: Bindings,
}

impl Document {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the element is displayed and not covered by the modal.
    pub(crate) fn is_interactive(&self, target: ElementId) -> bool {
        match target.scope() {
            Scope::Modal => self.modal.open,
            Scope::View(view) => !self.modal.open && self.router.is_visible(view),
            Scope::Header => !self.modal.open && self.router.header_visible(),
            Scope::HeaderControls => {
                !self.modal.open && self.router.header_visible() && self.router.controls_visible()
            }
        }
    }

    pub(crate) fn clear_turmas(&mut self) {
        self.bindings.unbind_rows();
        self.turmas = TurmaTable::default();
    }

    pub(crate) fn resolve(&self, event: &Event) -> Option<Action> {
        if !self.is_interactive(event.target) {
            return None;
        }
        self.bindings.lookup(event).cloned()
    }
}
