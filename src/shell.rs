// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, Subcommand};
use log::debug;

use crate::{
    api::Api,
    controller::Controller,
    document::{ElementId, Event},
    error::{Error, Result},
    model::TurmaId,
    storage::Storage,
    ui::Terminal,
};

#[derive(Debug, Parser)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

/// One user interaction per line.
#[derive(Debug, Subcommand)]
enum Command {
    /// Go to the start page, or the turma list when signed in.
    #[command(alias = "list")]
    Home,
    /// Open the sign-in page.
    Access,
    /// Leave the sign-in page.
    Back,
    /// Fill in and submit the registration form.
    Register,
    /// Fill in and submit the login form.
    Login,
    Logout,
    /// Redraw the screen.
    Show,
    /// Open the new turma form.
    New,
    /// Fill in and submit the turma form.
    Save,
    /// Leave the turma form.
    Cancel,
    /// Toggle enrollment in a turma.
    Enroll { id: TurmaId },
    /// Delete a turma you created.
    Delete { id: TurmaId },
    /// List the students enrolled in a turma.
    Students { id: TurmaId },
    /// Close the students window.
    Close,
    /// Click outside the students window.
    Backdrop,
    #[command(alias = "exit")]
    Quit,
}

/// Reads commands until the user quits or input runs out, including in the
/// middle of filling in a form.
pub(crate) async fn run<A: Api, S: Storage>(
    controller: &mut Controller<A, S, Terminal>,
    terminal: Terminal,
) -> Result<()> {
    controller.render();

    while let Some(input) = terminal.next_command().await? {
        let words = input.split_whitespace().collect::<Vec<_>>();
        if words.is_empty() {
            continue;
        }

        let command = match Line::try_parse_from(words) {
            Ok(line) => line.command,
            Err(e) => {
                e.print()?;
                continue;
            }
        };
        debug!("Read {:?}", command);

        let event = match command {
            Command::Quit => break,
            Command::Show => {
                controller.render();
                continue;
            }
            Command::Home => Event::click(ElementId::Brand),
            Command::Access => Event::click(ElementId::AccessLogin),
            Command::Back => Event::click(ElementId::BackHome),
            Command::Register => {
                if !controller.document().is_interactive(ElementId::RegisterForm) {
                    not_available();
                    continue;
                }
                match fill_register(controller, terminal).await {
                    Err(Error::Cancelled) => break,
                    result => result?,
                }
                Event::submit(ElementId::RegisterForm)
            }
            Command::Login => {
                if !controller.document().is_interactive(ElementId::LoginForm) {
                    not_available();
                    continue;
                }
                match fill_login(controller, terminal).await {
                    Err(Error::Cancelled) => break,
                    result => result?,
                }
                Event::submit(ElementId::LoginForm)
            }
            Command::Logout => Event::click(ElementId::Logout),
            Command::New => Event::click(ElementId::NewTurma),
            Command::Save => {
                if !controller.document().is_interactive(ElementId::TurmaForm) {
                    not_available();
                    continue;
                }
                match fill_turma(controller, terminal).await {
                    Err(Error::Cancelled) => break,
                    result => result?,
                }
                Event::submit(ElementId::TurmaForm)
            }
            Command::Cancel => Event::click(ElementId::CancelTurma),
            Command::Enroll { id } => Event::click(ElementId::Enrollment(id)),
            Command::Delete { id } => Event::click(ElementId::DeleteTurma(id)),
            Command::Students { id } => Event::click(ElementId::ViewStudents(id)),
            Command::Close => Event::click(ElementId::ModalClose),
            Command::Backdrop => Event::click(ElementId::Modal),
        };

        if let ElementId::Enrollment(id) | ElementId::DeleteTurma(id) | ElementId::ViewStudents(id) =
            event.target
        {
            if controller.document().turmas.row(id).is_none() {
                println!("Não há turma {id} na lista.");
                continue;
            }
        }

        if controller.dispatch(event).await? {
            controller.render();
        } else {
            not_available();
        }
    }

    Ok(())
}

fn not_available() {
    println!("Essa ação não está disponível agora.");
}

async fn fill_login<A: Api, S: Storage>(
    controller: &mut Controller<A, S, Terminal>,
    terminal: Terminal,
) -> Result<()> {
    let current = controller.document().forms.login.email.clone();
    let email = terminal.prompt("E-mail", &current).await?;
    let senha = terminal.prompt_password("Senha").await?;

    let form = &mut controller.document_mut().forms.login;
    form.email = email;
    form.senha = senha;
    Ok(())
}

async fn fill_register<A: Api, S: Storage>(
    controller: &mut Controller<A, S, Terminal>,
    terminal: Terminal,
) -> Result<()> {
    let form = &controller.document().forms.register;
    let (nome, email) = (form.nome.clone(), form.email.clone());
    let nome = terminal.prompt("Nome", &nome).await?;
    let email = terminal.prompt("E-mail", &email).await?;
    let senha = terminal.prompt_password("Senha").await?;

    let form = &mut controller.document_mut().forms.register;
    form.nome = nome;
    form.email = email;
    form.senha = senha;
    Ok(())
}

async fn fill_turma<A: Api, S: Storage>(
    controller: &mut Controller<A, S, Terminal>,
    terminal: Terminal,
) -> Result<()> {
    let mut turma = controller.document().forms.turma.clone();
    turma.nome = terminal.prompt("Nome", &turma.nome).await?;
    turma.nivel = terminal.prompt("Nível", &turma.nivel).await?;
    turma.professor = terminal.prompt("Professor", &turma.professor).await?;
    turma.horario = terminal.prompt("Horário", &turma.horario).await?;

    controller.document_mut().forms.turma = turma;
    Ok(())
}
