// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use crate::{
    document::{Action, Button, Document, ElementId, EventKind, TurmaRow},
    model::{Aluno, Turma, Usuario},
};

pub(crate) const NO_ALUNOS: &str = "Nenhum aluno matriculado ainda.";

pub(crate) fn is_creator(turma: &Turma, viewer: Option<&Usuario>) -> bool {
    viewer.map_or(false, |user| user.id == turma.usuario_criador_id)
}

pub(crate) fn turma_row(turma: &Turma, viewer: Option<&Usuario>) -> TurmaRow {
    let can_delete = is_creator(turma, viewer);

    TurmaRow {
        turma: turma.clone(),
        enrollment: Button {
            id: ElementId::Enrollment(turma.id),
            label: if turma.esta_matriculado {
                "Desmatricular"
            } else {
                "Matricular"
            },
            enabled: true,
            title: None,
        },
        delete: Button {
            id: ElementId::DeleteTurma(turma.id),
            label: "Excluir",
            enabled: can_delete,
            title: (!can_delete).then_some("Apenas o criador pode excluir"),
        },
        students: Button {
            id: ElementId::ViewStudents(turma.id),
            label: "Ver Alunos",
            enabled: true,
            title: None,
        },
    }
}

fn row_actions(row: &TurmaRow) -> Vec<(ElementId, Action)> {
    let turma = &row.turma;
    let mut actions = vec![
        (
            row.enrollment.id,
            if turma.esta_matriculado {
                Action::Unenroll(turma.id)
            } else {
                Action::Enroll(turma.id)
            },
        ),
        (
            row.students.id,
            Action::ViewStudents(turma.id, turma.nome.clone()),
        ),
    ];
    if row.delete.enabled {
        actions.push((row.delete.id, Action::DeleteTurma(turma.id)));
    }
    actions
}

/// Replaces the table contents and the row handlers.
pub(crate) fn turmas(document: &mut Document, turmas: &[Turma], viewer: Option<&Usuario>) {
    document.bindings.unbind_rows();
    document.turmas.rows = turmas.iter().map(|t| turma_row(t, viewer)).collect();
    document.turmas.placeholder_visible = turmas.is_empty();

    for row in &document.turmas.rows {
        for (id, action) in row_actions(row) {
            document.bindings.bind(EventKind::Click, id, action);
        }
    }
}

pub(crate) fn alunos(document: &mut Document, turma_nome: &str, alunos: &[Aluno]) {
    let modal = &mut document.modal;
    modal.turma_nome = turma_nome.to_owned();
    modal.items = if alunos.is_empty() {
        vec![NO_ALUNOS.to_owned()]
    } else {
        alunos.iter().map(ToString::to_string).collect()
    };
    modal.open = true;
}
