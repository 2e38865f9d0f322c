// ============================================================================
// Sales Infrastructure - PostgreSQL Group Repository
// File: crates/sales-infrastructure/src/database/postgres/group_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use sales_core::domain::{Group, Member};
use sales_core::error::DomainError;
use sales_core::repositories::GroupRepository;

use super::member_repo_impl::MemberRow;
use super::{db_error, expect_affected, map_db_error};

pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GroupRow {
    id: Uuid,
    tenant_id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            id: row.id,
            tenant_id: row.tenant_id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<Group>, DomainError> {
        let rows: Vec<GroupRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, description, created_at, updated_at
            FROM groups
            WHERE tenant_id = $1
            ORDER BY name
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing groups"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, name, description, created_at, updated_at
            FROM groups
            WHERE id = $1 AND tenant_id = $2
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding group"))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, group: &Group) -> Result<Group, DomainError> {
        let row: GroupRow = sqlx::query_as(
            r#"
            INSERT INTO groups (id, tenant_id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, tenant_id, name, description, created_at, updated_at
            "#,
        )
        .bind(group.id)
        .bind(group.tenant_id)
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.created_at)
        .bind(group.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("creating group", "duplicate group name"))?;

        Ok(row.into())
    }

    async fn update(&self, group: &Group) -> Result<Group, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(
            r#"
            UPDATE groups
            SET name = $3, description = $4, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING id, tenant_id, name, description, created_at, updated_at
            "#,
        )
        .bind(group.id)
        .bind(group.tenant_id)
        .bind(&group.name)
        .bind(&group.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("updating group", "duplicate group name"))?;

        row.map(Into::into).ok_or_else(|| DomainError::not_found("Group"))
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting group"))?;

        expect_affected(result.rows_affected(), "Group")
    }

    async fn member_ids(&self, tenant_id: Uuid, group_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT gm.member_id
            FROM group_members gm
            JOIN groups g ON g.id = gm.group_id
            JOIN members m ON m.id = gm.member_id
            WHERE g.tenant_id = $1 AND gm.group_id = $2
            ORDER BY m.display_order, m.name
            "#,
        )
        .bind(tenant_id)
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing group member ids"))?;

        Ok(ids)
    }

    async fn members(&self, tenant_id: Uuid, group_id: Uuid) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT m.id, m.tenant_id, m.name, m.email, m.department_id, m.image_url,
                   m.is_active, m.display_order, m.created_at, m.updated_at
            FROM members m
            JOIN group_members gm ON gm.member_id = m.id
            WHERE m.tenant_id = $1 AND gm.group_id = $2
            ORDER BY m.display_order, m.name
            "#,
        )
        .bind(tenant_id)
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing group members"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn memberships(&self, tenant_id: Uuid) -> Result<Vec<(Uuid, Uuid)>, DomainError> {
        let pairs: Vec<(Uuid, Uuid)> = sqlx::query_as(
            r#"
            SELECT gm.group_id, gm.member_id
            FROM group_members gm
            JOIN groups g ON g.id = gm.group_id
            WHERE g.tenant_id = $1
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing group memberships"))?;

        Ok(pairs)
    }

    async fn replace_members(
        &self,
        tenant_id: Uuid,
        group_id: Uuid,
        member_ids: &[Uuid],
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting transaction"))?;

        // Guard against a group id from another tenant.
        let owned: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM groups WHERE id = $1 AND tenant_id = $2)")
            .bind(group_id)
            .bind(tenant_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("checking group ownership"))?;
        if !owned {
            return Err(DomainError::not_found("Group"));
        }

        sqlx::query("DELETE FROM group_members WHERE group_id = $1")
            .bind(group_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("clearing group members"))?;

        if !member_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO group_members (group_id, member_id)
                SELECT $1, m.id FROM members m
                WHERE m.tenant_id = $2 AND m.id = ANY($3)
                "#,
            )
            .bind(group_id)
            .bind(tenant_id)
            .bind(member_ids)
            .execute(&mut *tx)
            .await
            .map_err(db_error("inserting group members"))?;
        }

        tx.commit().await.map_err(db_error("committing group members"))?;
        debug!("Replaced membership rows of group {}", group_id);
        Ok(())
    }
}
