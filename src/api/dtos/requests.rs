use crate::domain::models::usuario::Rol;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

/// Tells an absent field (`None`) apart from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of both `POST /usuarios/registro` and `POST /usuarios`.
#[derive(Deserialize)]
pub struct CreateUsuarioRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub rol: Rol,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
pub struct UpdateUsuarioRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub rol: Option<Rol>,
}

#[derive(Deserialize)]
pub struct CreateEmprendedorRequest {
    pub usuario_id: i64,
    pub nombre: String,
    pub apellido: String,
    pub negocio: String,
    pub descripcion: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateEmprendedorRequest {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub negocio: Option<String>,
    /// An empty string clears the description.
    pub descripcion: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateServicioRequest {
    pub emprendedor_id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateServicioRequest {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateTurnoRequest {
    pub servicio_id: i64,
    pub fecha_hora_inicio: NaiveDateTime,
    pub duracion_minutos: i32,
    pub capacidad: i32,
    pub precio: Option<f64>,
}

#[derive(Deserialize, Default)]
pub struct UpdateTurnoRequest {
    pub fecha_hora_inicio: Option<NaiveDateTime>,
    pub duracion_minutos: Option<i32>,
    pub capacidad: Option<i32>,
    /// `null` clears the price.
    #[serde(default, deserialize_with = "nullable")]
    pub precio: Option<Option<f64>>,
}

#[derive(Deserialize)]
pub struct CreateReservaRequest {
    pub turno_id: i64,
    pub usuario_id: i64,
}

#[derive(Deserialize, Default)]
pub struct UpdateReservaRequest {
    pub turno_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turno_patch_tells_absent_precio_from_null() {
        let absent: UpdateTurnoRequest = serde_json::from_str(r#"{"capacidad": 4}"#).unwrap();
        assert_eq!(absent.precio, None);
        assert_eq!(absent.capacidad, Some(4));

        let cleared: UpdateTurnoRequest = serde_json::from_str(r#"{"precio": null}"#).unwrap();
        assert_eq!(cleared.precio, Some(None));

        let set: UpdateTurnoRequest = serde_json::from_str(r#"{"precio": 1200.5}"#).unwrap();
        assert_eq!(set.precio, Some(Some(1200.5)));
    }

    #[test]
    fn test_registration_rol_defaults_to_cliente_and_rejects_unknown() {
        let body: CreateUsuarioRequest =
            serde_json::from_str(r#"{"email": "a@b.c", "username": "a", "password": "p"}"#).unwrap();
        assert_eq!(body.rol, Rol::Cliente);

        let unknown = serde_json::from_str::<CreateUsuarioRequest>(
            r#"{"email": "a@b.c", "username": "a", "password": "p", "rol": "admin"}"#,
        );
        assert!(unknown.is_err());
    }
}
