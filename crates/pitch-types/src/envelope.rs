//! Uniform success envelope shared by every entity kind.
//!
//! Detail strings are the ones existing clients match on and must stay
//! verbatim.

use serde::{Deserialize, Serialize};

use crate::models::EntityKind;

pub const SUCCESS_CODE: &str = "200";
pub const SUCCESS_MESSAGE: &str = "OK";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Select,
    Update,
    Delete,
}

impl Operation {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Select => "Select",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }

    pub fn detail(self) -> &'static str {
        match self {
            Self::Create => "Registro Creado",
            Self::Select => "Registro Seleccionado",
            Self::Update => "Registro Actualizado",
            Self::Delete => "Registro Eliminado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub internal_code: String,
    pub message: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    pub details: Vec<Detail>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub result: ResultInfo,
}

impl<T> Envelope<T> {
    pub fn success(op: Operation, kind: EntityKind, data: Option<T>) -> Self {
        Self {
            data,
            result: ResultInfo {
                details: vec![Detail {
                    internal_code: SUCCESS_CODE.to_string(),
                    message: SUCCESS_MESSAGE.to_string(),
                    detail: op.detail().to_string(),
                }],
                source: format!("{} {}", op.verb(), kind.label()),
            },
        }
    }

    pub fn created(kind: EntityKind, data: T) -> Self {
        Self::success(Operation::Create, kind, Some(data))
    }

    pub fn selected(kind: EntityKind, data: T) -> Self {
        Self::success(Operation::Select, kind, Some(data))
    }

    pub fn updated(kind: EntityKind, data: T) -> Self {
        Self::success(Operation::Update, kind, Some(data))
    }
}

impl Envelope<()> {
    pub fn deleted(kind: EntityKind) -> Self {
        Self::success(Operation::Delete, kind, None)
    }
}
