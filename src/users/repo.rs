use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::db::Database;
use crate::error::RepoError;
use crate::users::repo_types::User;

/// Storage seam for user records. Every call runs exactly one statement.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by `cedula_identidad` ascending.
    async fn list_all(&self) -> Result<Vec<User>, RepoError>;
    async fn find(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    /// Mean age in whole years; `None` when the table is empty.
    async fn average_age(&self) -> Result<Option<f64>, RepoError>;
    /// The write operations return the affected row count.
    async fn insert(&self, user: &User) -> Result<u64, RepoError>;
    async fn update(&self, user: &User) -> Result<u64, RepoError>;
    async fn delete(&self, user: &User) -> Result<u64, RepoError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: Database,
}

impl PgUserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, RepoError> {
        let mut conn = self.db.get_connection().await?;
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, cedula_identidad, nombre, primer_apellido, segundo_apellido, fecha_nacimiento
            FROM users
            ORDER BY cedula_identidad ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let mut conn = self.db.get_connection().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, cedula_identidad, nombre, primer_apellido, segundo_apellido, fecha_nacimiento
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(user)
    }

    async fn average_age(&self) -> Result<Option<f64>, RepoError> {
        let mut conn = self.db.get_connection().await?;
        let avg = sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT AVG(EXTRACT(YEAR FROM AGE(NOW(), fecha_nacimiento)))::float8 AS promedio_edad
            FROM users
            "#,
        )
        .fetch_one(&mut *conn)
        .await?;
        Ok(avg)
    }

    async fn insert(&self, user: &User) -> Result<u64, RepoError> {
        let mut conn = self.db.get_connection().await?;
        let res = sqlx::query(
            r#"
            INSERT INTO users
                (id, cedula_identidad, nombre, primer_apellido, segundo_apellido, fecha_nacimiento)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.cedula_identidad)
        .bind(&user.nombre)
        .bind(&user.primer_apellido)
        .bind(&user.segundo_apellido)
        .bind(user.fecha_nacimiento)
        .execute(&mut *conn)
        .await?;
        Ok(res.rows_affected())
    }

    async fn update(&self, user: &User) -> Result<u64, RepoError> {
        let mut conn = self.db.get_connection().await?;
        let res = sqlx::query(
            r#"
            UPDATE users
               SET cedula_identidad = $1,
                   nombre = $2,
                   primer_apellido = $3,
                   segundo_apellido = $4,
                   fecha_nacimiento = $5
             WHERE id = $6
            "#,
        )
        .bind(&user.cedula_identidad)
        .bind(&user.nombre)
        .bind(&user.primer_apellido)
        .bind(&user.segundo_apellido)
        .bind(user.fecha_nacimiento)
        .bind(user.id)
        .execute(&mut *conn)
        .await?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, user: &User) -> Result<u64, RepoError> {
        let mut conn = self.db.get_connection().await?;
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&mut *conn)
            .await?;
        Ok(res.rows_affected())
    }
}
