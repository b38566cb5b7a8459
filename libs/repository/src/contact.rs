use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::active_models::{prelude::*, *};
use entity::prelude::*;

#[derive(Clone, Debug)]
pub struct ContactRepository {
    db: DatabaseConnection,
}

impl ContactRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<contact::Model> for ContactEntity {
    fn from(value: contact::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
            created_at: value.created_at.and_utc(),
        }
    }
}

impl ContactRepository {
    /// Insert a contact submission. Contacts are write-once; no update or
    /// delete is provided.
    pub async fn save(&self, contact: NewContact) -> anyhow::Result<ContactEntity> {
        let model = contact::ActiveModel {
            id: ActiveValue::not_set(),
            name: ActiveValue::set(contact.name),
            email: ActiveValue::set(contact.email),
            subject: ActiveValue::set(contact.subject),
            message: ActiveValue::set(contact.message),
            created_at: ActiveValue::set(Utc::now().naive_utc()),
        };

        let inserted = Contact::insert(model).exec_with_returning(&self.db).await?;

        Ok(ContactEntity::from(inserted))
    }
}
