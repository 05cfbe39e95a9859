// src/db/rbac_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::rbac::{
    CreatePermissionPayload, Permission, Role, RoleType, UpdatePermissionPayload,
};

const ROLE_COLUMNS: &str = "id, name, role_type, created_at, updated_at";
const PERMISSION_COLUMNS: &str =
    r#"id, role_id, form_name, view, "insert", "update", "delete", created_at, updated_at"#;

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // CARGOS
    // ---

    pub async fn create_role<'e, E>(
        &self,
        executor: E,
        name: &str,
        role_type: RoleType,
    ) -> Result<Role, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO roles (name, role_type) VALUES ($1, $2) RETURNING {ROLE_COLUMNS}"
        );
        let role = sqlx::query_as::<_, Role>(&sql)
            .bind(name)
            .bind(role_type)
            .fetch_one(executor)
            .await?;

        Ok(role)
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        let sql = format!("SELECT {ROLE_COLUMNS} FROM roles ORDER BY created_at");
        let roles = sqlx::query_as::<_, Role>(&sql).fetch_all(&self.pool).await?;

        Ok(roles)
    }

    pub async fn find_role(&self, role_id: Uuid) -> Result<Option<Role>, AppError> {
        let sql = format!("SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1");
        let role = sqlx::query_as::<_, Role>(&sql)
            .bind(role_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role)
    }

    pub async fn delete_role<'e, E>(&self, executor: E, role_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(role_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ---
    // PERMISSÕES
    // ---

    pub async fn create_permission<'e, E>(
        &self,
        executor: E,
        payload: &CreatePermissionPayload,
    ) -> Result<Permission, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO permissions (role_id, form_name, view, "insert", "update", "delete")
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PERMISSION_COLUMNS}
            "#
        );
        let permission = sqlx::query_as::<_, Permission>(&sql)
            .bind(payload.role_id)
            .bind(payload.form_name.as_str())
            .bind(payload.view)
            .bind(payload.insert)
            .bind(payload.update)
            .bind(payload.delete)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::Conflict(
                            "Já existe uma permissão para este cargo e formulário.".into(),
                        );
                    }
                }
                e.into()
            })?;

        Ok(permission)
    }

    /// Todas as linhas de permissão de um cargo, em ordem estável de criação.
    /// O motor de autorização percorre esta lista e para na primeira linha
    /// cujo form_name bate com o recurso pedido.
    pub async fn permissions_for_role(&self, role_id: Uuid) -> Result<Vec<Permission>, AppError> {
        let sql = format!(
            "SELECT {PERMISSION_COLUMNS} FROM permissions WHERE role_id = $1 ORDER BY created_at"
        );
        let permissions = sqlx::query_as::<_, Permission>(&sql)
            .bind(role_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(permissions)
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let sql = format!(
            "SELECT {PERMISSION_COLUMNS} FROM permissions ORDER BY role_id, form_name"
        );
        let permissions = sqlx::query_as::<_, Permission>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(permissions)
    }

    pub async fn find_permission(&self, permission_id: Uuid) -> Result<Option<Permission>, AppError> {
        let sql = format!("SELECT {PERMISSION_COLUMNS} FROM permissions WHERE id = $1");
        let permission = sqlx::query_as::<_, Permission>(&sql)
            .bind(permission_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(permission)
    }

    pub async fn update_permission<'e, E>(
        &self,
        executor: E,
        permission_id: Uuid,
        payload: &UpdatePermissionPayload,
    ) -> Result<Option<Permission>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE permissions SET
                view     = COALESCE($2, view),
                "insert" = COALESCE($3, "insert"),
                "update" = COALESCE($4, "update"),
                "delete" = COALESCE($5, "delete"),
                updated_at = now()
            WHERE id = $1
            RETURNING {PERMISSION_COLUMNS}
            "#
        );
        let permission = sqlx::query_as::<_, Permission>(&sql)
            .bind(permission_id)
            .bind(payload.view)
            .bind(payload.insert)
            .bind(payload.update)
            .bind(payload.delete)
            .fetch_optional(executor)
            .await?;

        Ok(permission)
    }

    pub async fn delete_permission<'e, E>(
        &self,
        executor: E,
        permission_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(permission_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
