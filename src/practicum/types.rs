//! Tipos de dados para as respostas da API de status de homeworks.
//!
//! A resposta validada é [`Validated`]; cada registro de homework é lido
//! como [`WorkItemStatus`], cujo status pertence ao conjunto fechado
//! [`StatusCode`].

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::ShapeError;

/// Status de revisão de uma homework, conforme reportado pela API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Approved,
    Reviewing,
    Rejected,
}

impl StatusCode {
    /// Veredito legível enviado ao usuário para este status.
    pub fn verdict(self) -> &'static str {
        match self {
            StatusCode::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            StatusCode::Reviewing => "Работа взята на проверку ревьюером.",
            StatusCode::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Approved => "approved",
            StatusCode::Reviewing => "reviewing",
            StatusCode::Rejected => "rejected",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusCode {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(StatusCode::Approved),
            "reviewing" => Ok(StatusCode::Reviewing),
            "rejected" => Ok(StatusCode::Rejected),
            other => Err(ShapeError::UnknownStatus(other.to_string())),
        }
    }
}

/// Uma homework com seu status atual de revisão.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemStatus {
    /// Nome da homework (`homework_name` no JSON).
    pub name: String,
    /// Status de revisão já mapeado.
    pub status: StatusCode,
}

impl WorkItemStatus {
    /// Lê um registro de homework do JSON retornado pela API.
    ///
    /// Exige um objeto com `homework_name` e `status` como strings; outros
    /// campos são ignorados.
    pub fn from_value(value: &Value) -> Result<Self, ShapeError> {
        let obj = value
            .as_object()
            .ok_or(ShapeError::NotAnObject { what: "homework" })?;
        let name = obj
            .get("homework_name")
            .ok_or(ShapeError::MissingField("homework_name"))?
            .as_str()
            .ok_or(ShapeError::WrongType("homework_name"))?;
        let status = obj
            .get("status")
            .ok_or(ShapeError::MissingField("status"))?
            .as_str()
            .ok_or(ShapeError::WrongType("status"))?
            .parse::<StatusCode>()?;

        Ok(Self {
            name: name.to_string(),
            status,
        })
    }

    /// Mensagem enviada quando o status desta homework muda.
    pub fn change_message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Resposta da API após a validação estrutural.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    /// Registros de homework na ordem da API (o mais recente primeiro).
    pub homeworks: Vec<Value>,
    /// Timestamp do servidor, usado como próximo `from_date`.
    pub current_date: i64,
}
