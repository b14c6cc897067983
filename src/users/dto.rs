use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_format::{self, DateFormatError};
use crate::users::repo_types::User;

/// Body of POST and PUT. Every field is required; an `id` in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub cedula_identidad: String,
    pub nombre: String,
    pub primer_apellido: String,
    pub segundo_apellido: String,
    /// `YYYY-MM-DD`
    pub fecha_nacimiento: String,
}

impl UserPayload {
    pub fn into_user(self, id: Uuid) -> Result<User, DateFormatError> {
        let fecha_nacimiento = date_format::parse_iso(&self.fecha_nacimiento)?;
        Ok(User {
            id,
            cedula_identidad: Some(self.cedula_identidad),
            nombre: Some(self.nombre),
            primer_apellido: Some(self.primer_apellido),
            segundo_apellido: Some(self.segundo_apellido),
            fecha_nacimiento: Some(fecha_nacimiento),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct AverageAgeResponse {
    pub promedio_edad: Option<f64>,
}
