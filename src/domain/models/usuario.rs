use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Account role. Only `emprendedor` accounts may own an emprendedor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    #[default]
    Cliente,
    Emprendedor,
}

#[derive(Debug, Error)]
#[error("unknown rol: {0}")]
pub struct UnknownRol(pub String);

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Cliente => "cliente",
            Rol::Emprendedor => "emprendedor",
        }
    }
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rol {
    type Err = UnknownRol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cliente" => Ok(Rol::Cliente),
            "emprendedor" => Ok(Rol::Emprendedor),
            other => Err(UnknownRol(other.to_string())),
        }
    }
}

impl TryFrom<String> for Rol {
    type Error = UnknownRol;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Usuario {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[sqlx(try_from = "String")]
    pub rol: Rol,
}

pub struct NewUsuario {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub rol: Rol,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rol_round_trips_through_text() {
        for rol in [Rol::Cliente, Rol::Emprendedor] {
            assert_eq!(rol.as_str().parse::<Rol>().unwrap(), rol);
        }
        assert!("admin".parse::<Rol>().is_err());
        assert_eq!(Rol::default(), Rol::Cliente);
    }

    #[test]
    fn test_rol_json_is_lowercase() {
        assert_eq!(serde_json::to_string(&Rol::Emprendedor).unwrap(), "\"emprendedor\"");
        assert!(serde_json::from_str::<Rol>("\"Emprendedor\"").is_err());
    }

    #[test]
    fn test_password_is_never_serialized() {
        let usuario = Usuario {
            id: 1,
            email: "ana@example.com".into(),
            username: "ana".into(),
            password: "$argon2id$secret".into(),
            rol: Rol::Cliente,
        };
        let value = serde_json::to_value(&usuario).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["rol"], "cliente");
    }
}
