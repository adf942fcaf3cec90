//! Fixture models
//!
//! [`Contact`] is the model used throughout the test suite and the demo
//! server: an integer key assigned by the session, a required name, and
//! an optional email validated by the `validator` derive.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use validator::Validate;

use crate::forms::{InputType, ValidationErrors};
use crate::model::{AdminModel, FieldSpec, ModelId};
use crate::session::SqlxRecord;

/// Address-book record.
#[derive(Debug, Clone, Default, Validate)]
pub struct Contact {
    /// Assigned by the session on insert
    pub id: Option<i64>,
    /// Display name
    pub name: String,
    /// Optional email address
    #[validate(email)]
    pub email: Option<String>,
}

impl AdminModel for Contact {
    fn model_name() -> &'static str {
        "Contact"
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("id", InputType::Number).readonly(),
            FieldSpec::new("name", InputType::Text).label("Name").required(),
            FieldSpec::new("email", InputType::Email).label("Email"),
        ]
    }

    fn pk(&self) -> Option<ModelId> {
        self.id.map(Into::into)
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.map_or(Value::Null, Value::from)),
            "name" => Some(Value::from(self.name.clone())),
            "email" => Some(self.email.clone().map_or(Value::Null, Value::from)),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, raw: &str) -> Result<(), String> {
        match field {
            "id" => {
                self.id = Some(raw.parse().map_err(|_| format!("not a valid id: {raw}"))?);
                Ok(())
            }
            "name" => {
                self.name = raw.to_string();
                Ok(())
            }
            "email" => {
                self.email = if raw.trim().is_empty() {
                    None
                } else {
                    Some(raw.to_string())
                };
                Ok(())
            }
            other => Err(format!("unknown field: {other}")),
        }
    }

    fn display(&self) -> Option<String> {
        (!self.name.is_empty()).then(|| self.name.clone())
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        Validate::validate(self).map_err(Into::into)
    }
}

#[async_trait]
impl SqlxRecord for Contact {
    fn table() -> &'static str {
        "contacts"
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
        })
    }

    async fn insert(&mut self, pool: &PgPool) -> Result<(), sqlx::Error> {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO contacts (name, email) VALUES ($1, $2) RETURNING id")
                .bind(&self.name)
                .bind(&self.email)
                .fetch_one(pool)
                .await?;
        self.id = Some(id);
        Ok(())
    }

    async fn update(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE contacts SET name = $1, email = $2 WHERE id = $3")
            .bind(&self.name)
            .bind(&self.email)
            .bind(self.id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_field_access() {
        let mut contact = Contact::default();
        contact.set("name", "Alice").unwrap();
        contact.set("email", "alice@example.com").unwrap();
        assert_eq!(contact.get("name"), Some(Value::from("Alice")));
        assert_eq!(contact.get("email"), Some(Value::from("alice@example.com")));
        assert!(contact.get("bogus").is_none());
    }

    #[test]
    fn test_contact_blank_email_is_none() {
        let mut contact = Contact::default();
        contact.set("email", "  ").unwrap();
        assert!(contact.email.is_none());
        assert_eq!(contact.get("email"), Some(Value::Null));
    }

    #[test]
    fn test_contact_email_validation() {
        let contact = Contact {
            id: None,
            name: "Alice".into(),
            email: Some("not-an-email".into()),
        };
        let errors = AdminModel::validate(&contact).unwrap_err();
        assert!(!errors.field("email").is_empty());
    }

    #[test]
    fn test_contact_display_falls_back_to_none() {
        assert!(Contact::default().display().is_none());
        let contact = Contact {
            id: Some(1),
            name: "Alice".into(),
            email: None,
        };
        assert_eq!(contact.display().as_deref(), Some("Alice"));
    }
}
