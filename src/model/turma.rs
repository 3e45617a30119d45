// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer, Serialize};

use super::usuario::UsuarioId;

pub(crate) type TurmaId = i64;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct Turma {
    pub(crate) id: TurmaId,
    pub(crate) nome: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub(crate) nivel: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub(crate) professor: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub(crate) horario: String,
    pub(crate) usuario_criador_id: UsuarioId,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub(crate) esta_matriculado: bool,
}

/// The four fields a user fills in to create a turma.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub(crate) struct NewTurma {
    pub(crate) nome: String,
    pub(crate) nivel: String,
    pub(crate) professor: String,
    pub(crate) horario: String,
}

// Optional columns come back as null.
fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// SQL backends hand booleans back as 0/1.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Null(()),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
        Flag::Null(()) => false,
    })
}
