use chrono::{DateTime, Utc};
use sea_orm::{
    entity::*, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::active_models::{prelude::*, *};
use entity::prelude::*;

#[derive(Clone, Debug)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<user::Model> for UserEntity {
    fn from(value: user::Model) -> Self {
        UserEntity {
            id: value.id,
            username: value.username,
            email: value.email,
            sub: value.sub,
            is_superuser: value.is_superuser,
            created_at: value.created_at.and_utc(),
            updated_at: value.updated_at.and_utc(),
        }
    }
}

impl From<UserEntity> for user::ActiveModel {
    fn from(value: UserEntity) -> Self {
        Self {
            id: {
                if value.id == i32::default() {
                    ActiveValue::not_set()
                } else {
                    ActiveValue::Set(value.id)
                }
            },
            username: ActiveValue::Set(value.username),
            email: ActiveValue::Set(value.email),
            sub: ActiveValue::Set(value.sub),
            is_superuser: ActiveValue::Set(value.is_superuser),
            created_at: if value.created_at == DateTime::<Utc>::default() {
                ActiveValue::Set(Utc::now().naive_utc())
            } else {
                ActiveValue::Set(value.created_at.naive_utc())
            },
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
        }
    }
}

impl UserRepository {
    pub async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserEntity>> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(user.map(UserEntity::from))
    }

    pub async fn find_by_sub(&self, sub: &str) -> anyhow::Result<Option<UserEntity>> {
        let user = User::find()
            .filter(user::Column::Sub.eq(sub))
            .one(&self.db)
            .await?;

        Ok(user.map(UserEntity::from))
    }

    pub async fn find_superuser(&self) -> anyhow::Result<Option<UserEntity>> {
        let user = User::find()
            .filter(user::Column::IsSuperuser.eq(true))
            .order_by_asc(user::Column::Id)
            .one(&self.db)
            .await?;

        Ok(user.map(UserEntity::from))
    }

    pub async fn save(&self, user: UserEntity) -> anyhow::Result<i32> {
        let user = user::ActiveModel::from(user).save(&self.db).await?;

        Ok(user.id.unwrap())
    }
}
