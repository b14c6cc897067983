use serde::Serialize;
use sqlx::FromRow;
use time::Date;
use uuid::Uuid;

use crate::date_format::{self, DateFormatError};

/// One row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub cedula_identidad: Option<String>,
    pub nombre: Option<String>,
    pub primer_apellido: Option<String>,
    pub segundo_apellido: Option<String>,
    pub fecha_nacimiento: Option<Date>,
}

/// Wire form of a [`User`]; the birth date is rendered `DD/MM/YYYY`.
#[derive(Debug, Serialize)]
pub struct UserJson {
    pub id: String,
    pub cedula_identidad: Option<String>,
    pub nombre: Option<String>,
    pub primer_apellido: Option<String>,
    pub segundo_apellido: Option<String>,
    pub fecha_nacimiento: String,
}

impl User {
    /// A record carrying only its key, enough for a delete.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            cedula_identidad: None,
            nombre: None,
            primer_apellido: None,
            segundo_apellido: None,
            fecha_nacimiento: None,
        }
    }

    pub fn to_json(&self) -> Result<UserJson, DateFormatError> {
        Ok(UserJson {
            id: self.id.to_string(),
            cedula_identidad: self.cedula_identidad.clone(),
            nombre: self.nombre.clone(),
            primer_apellido: self.primer_apellido.clone(),
            segundo_apellido: self.segundo_apellido.clone(),
            fecha_nacimiento: date_format::format_optional(self.fecha_nacimiento)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn serializes_with_display_date() {
        let id = Uuid::new_v4();
        let user = User {
            id,
            cedula_identidad: Some("123".into()),
            nombre: Some("Ana".into()),
            primer_apellido: Some("Diaz".into()),
            segundo_apellido: Some("Lopez".into()),
            fecha_nacimiento: Some(date!(2000 - 01 - 01)),
        };
        let value = serde_json::to_value(user.to_json().unwrap()).unwrap();
        assert_eq!(value["id"], id.to_string());
        assert_eq!(value["cedula_identidad"], "123");
        assert_eq!(value["fecha_nacimiento"], "01/01/2000");
    }

    #[test]
    fn key_only_record_cannot_be_serialized() {
        let user = User::new(Uuid::new_v4());
        assert!(matches!(user.to_json(), Err(DateFormatError::Missing)));
    }
}
