// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write as _};

use async_trait::async_trait;
use secrecy::SecretString;
use tabled::{
    settings::{object::Segment, Alignment, Modify, Style},
    Table, Tabled,
};
use tokio::task;

use crate::{
    document::{Button, Document, TurmaRow},
    error::{Error, Result},
    metadata,
    model::TurmaId,
    view::ViewId,
};

use super::Ui;

const NO_TURMAS: &str = "Nenhuma turma cadastrada ainda.";

#[derive(Tabled)]
struct TurmaLine<'row> {
    #[tabled(rename = "ID")]
    id: TurmaId,
    #[tabled(rename = "Nome")]
    nome: &'row str,
    #[tabled(rename = "Nível")]
    nivel: &'row str,
    #[tabled(rename = "Professor")]
    professor: &'row str,
    #[tabled(rename = "Horário")]
    horario: &'row str,
    #[tabled(rename = "Matrícula")]
    matricula: String,
    #[tabled(rename = "Gerenciar")]
    gerenciar: String,
}

impl<'row> From<&'row TurmaRow> for TurmaLine<'row> {
    fn from(row: &'row TurmaRow) -> Self {
        Self {
            id: row.turma.id,
            nome: &row.turma.nome,
            nivel: &row.turma.nivel,
            professor: &row.turma.professor,
            horario: &row.turma.horario,
            matricula: format_button(&row.enrollment),
            gerenciar: format!(
                "{} {}",
                format_button(&row.delete),
                format_button(&row.students)
            ),
        }
    }
}

fn format_button(button: &Button) -> String {
    match (button.enabled, button.title) {
        (true, _) => format!("[{}]", button.label),
        (false, Some(title)) => format!("({}: {})", button.label, title),
        (false, None) => format!("({})", button.label),
    }
}

/// Line-oriented terminal front end.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Terminal;

impl Terminal {
    async fn read_line() -> Result<Option<String>> {
        task::spawn_blocking(|| -> Result<Option<String>> {
            let mut line = String::new();
            match io::stdin().read_line(&mut line)? {
                0 => Ok(None),
                _ => Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned())),
            }
        })
        .await?
    }

    /// Reads one input line after showing `label`. An empty answer keeps
    /// `current`.
    pub(crate) async fn prompt(&self, label: &str, current: &str) -> Result<String> {
        if current.is_empty() {
            print!("{label}: ");
        } else {
            print!("{label} [{current}]: ");
        }
        io::stdout().flush()?;

        match Self::read_line().await? {
            Some(line) if line.is_empty() => Ok(current.to_owned()),
            Some(line) => Ok(line),
            None => Err(Error::Cancelled),
        }
    }

    pub(crate) async fn prompt_password(&self, label: &str) -> Result<SecretString> {
        let label = format!("{label}: ");
        Ok(task::spawn_blocking(move || {
            rpassword::prompt_password(label).map(SecretString::new)
        })
        .await??)
    }

    /// Reads the next shell command line; `None` once input is exhausted.
    pub(crate) async fn next_command(&self) -> Result<Option<String>> {
        print!("{}> ", *metadata::CLIENT_TYPE_ID);
        io::stdout().flush()?;
        Self::read_line().await
    }

    fn draw_header(document: &Document) {
        if !document.router.header_visible() {
            return;
        }
        let mut header = format!("[{}] (home)", *metadata::CLIENT_DISPLAY_NAME);
        if document.router.controls_visible() {
            if !document.welcome.is_empty() {
                header = format!("{header} | {}", document.welcome);
            }
            header = format!("{header} | [Sair] (logout)");
        }
        println!("{header}");
    }

    fn draw_view(document: &Document) {
        match document.router.current() {
            ViewId::Home => {
                println!("Bem-vindo! Gerencie turmas e matrículas em um só lugar.");
                println!("[Acessar] (access)");
            }
            ViewId::Auth => {
                let login = &document.forms.login;
                println!("Login: e-mail [{}] (login)", login.email);
                println!("Cadastro: nome, e-mail e senha (register)");
                println!("[Voltar] (back)");
            }
            ViewId::List => {
                if document.turmas.placeholder_visible {
                    println!("{NO_TURMAS}");
                } else if !document.turmas.rows.is_empty() {
                    println!(
                        "{}",
                        Table::new(document.turmas.rows.iter().map(TurmaLine::from))
                            .with(Style::rounded())
                            .with(Modify::new(Segment::new(1.., 1..=4)).with(Alignment::left()))
                    );
                }
                println!("[Nova Turma] (new)");
            }
            ViewId::Form => {
                let turma = &document.forms.turma;
                println!("Nome: {}", turma.nome);
                println!("Nível: {}", turma.nivel);
                println!("Professor: {}", turma.professor);
                println!("Horário: {}", turma.horario);
                println!("[Salvar] (save)  [Cancelar] (cancel)");
            }
        }
    }

    fn draw_modal(document: &Document) {
        let modal = &document.modal;
        if !modal.open {
            return;
        }
        println!("Alunos matriculados em {}", modal.turma_nome);
        for item in &modal.items {
            println!("  - {item}");
        }
        println!("[×] (close)");
    }
}

#[async_trait]
impl Ui for Terminal {
    async fn alert(&self, message: &str) {
        println!("! {message}");
    }

    async fn confirm(&self, message: &str) -> Result<bool> {
        print!("{message} [s/N] ");
        io::stdout().flush()?;
        Ok(Self::read_line().await?.map_or(false, |answer| {
            matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
        }))
    }

    fn render(&self, document: &Document) {
        println!();
        Self::draw_header(document);
        Self::draw_view(document);
        Self::draw_modal(document);
    }
}
