// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use secrecy::{ExposeSecret as _, SecretString};
use serde::{ser::SerializeStruct as _, Deserialize, Serialize, Serializer};

pub(crate) type UsuarioId = i64;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub(crate) struct Usuario {
    pub(crate) id: UsuarioId,
    pub(crate) nome: String,
    pub(crate) email: String,
}

/// A student enrolled in a turma, as listed in the roster.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct Aluno {
    pub(crate) nome: String,
    pub(crate) email: String,
}

impl std::fmt::Display for Aluno {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.nome, self.email)
    }
}

#[derive(Debug)]
pub(crate) struct Credentials {
    pub(crate) email: String,
    pub(crate) senha: SecretString,
}

impl Serialize for Credentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Credentials", 2)?;
        s.serialize_field("email", &self.email)?;
        s.serialize_field("senha", self.senha.expose_secret())?;
        s.end()
    }
}

#[derive(Debug)]
pub(crate) struct Registration {
    pub(crate) nome: String,
    pub(crate) email: String,
    pub(crate) senha: SecretString,
}

impl Serialize for Registration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Registration", 3)?;
        s.serialize_field("nome", &self.nome)?;
        s.serialize_field("email", &self.email)?;
        s.serialize_field("senha", self.senha.expose_secret())?;
        s.end()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub(crate) token: SecretString,
    pub(crate) usuario: Usuario,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_ser_tokens, assert_tokens, Token};

    #[test]
    fn usuario() {
        assert_tokens(
            &Usuario {
                id: 7,
                nome: "Ana".to_owned(),
                email: "ana@example.com".to_owned(),
            },
            &[
                Token::Struct {
                    name: "Usuario",
                    len: 3,
                },
                Token::Str("id"),
                Token::I64(7),
                Token::Str("nome"),
                Token::Str("Ana"),
                Token::Str("email"),
                Token::Str("ana@example.com"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn credentials_expose_password_on_the_wire_only() {
        let credentials = Credentials {
            email: "ana@example.com".to_owned(),
            senha: SecretString::new("hunter2".to_owned()),
        };

        assert!(!format!("{credentials:?}").contains("hunter2"));
        assert_ser_tokens(
            &credentials,
            &[
                Token::Struct {
                    name: "Credentials",
                    len: 2,
                },
                Token::Str("email"),
                Token::Str("ana@example.com"),
                Token::Str("senha"),
                Token::Str("hunter2"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn aluno_display() {
        let aluno = Aluno {
            nome: "Bruno".to_owned(),
            email: "bruno@example.com".to_owned(),
        };
        assert_eq!(aluno.to_string(), "Bruno (bruno@example.com)");
    }
}
