//! services/api/src/adapters/memory.rs
//!
//! A process-local `CompanyStore`. Records live in insertion order behind a
//! `tokio` lock and identifiers are freshly generated ObjectIds, so callers see
//! the same identifier format as with MongoDB.

use async_trait::async_trait;
use company_directory_core::domain::{Company, CompanyData, CompanyPatch};
use company_directory_core::ports::{CompanyStore, PortError, PortResult};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryAdapter {
    companies: RwLock<Vec<Company>>,
}

impl InMemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(key: &str) -> PortError {
    PortError::NotFound(format!("Company {} not found", key))
}

#[async_trait]
impl CompanyStore for InMemoryAdapter {
    async fn list_companies(&self) -> PortResult<Vec<Company>> {
        Ok(self.companies.read().await.clone())
    }

    async fn get_company_by_email(&self, email: &str) -> PortResult<Company> {
        self.companies
            .read()
            .await
            .iter()
            .find(|c| c.data.email == email)
            .cloned()
            .ok_or_else(|| not_found(email))
    }

    async fn email_exists(&self, email: &str) -> PortResult<bool> {
        Ok(self
            .companies
            .read()
            .await
            .iter()
            .any(|c| c.data.email == email))
    }

    async fn insert_company(&self, data: CompanyData) -> PortResult<String> {
        let id = ObjectId::new().to_hex();
        self.companies.write().await.push(Company {
            id: id.clone(),
            data,
        });
        Ok(id)
    }

    async fn patch_company(&self, email: &str, patch: CompanyPatch) -> PortResult<()> {
        let mut companies = self.companies.write().await;
        if let Some(new_email) = patch.email.as_deref() {
            if new_email != email && companies.iter().any(|c| c.data.email == new_email) {
                return Err(PortError::Conflict(format!(
                    "Company {} already registered",
                    new_email
                )));
            }
        }
        let company = companies
            .iter_mut()
            .find(|c| c.data.email == email)
            .ok_or_else(|| not_found(email))?;
        company.data.apply(patch);
        Ok(())
    }

    async fn delete_company(&self, email: &str) -> PortResult<()> {
        let mut companies = self.companies.write().await;
        let index = companies
            .iter()
            .position(|c| c.data.email == email)
            .ok_or_else(|| not_found(email))?;
        companies.remove(index);
        Ok(())
    }

    async fn set_password(&self, id: &str, password: &str) -> PortResult<()> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| PortError::InvalidIdentifier(id.to_string()))?;
        let id = object_id.to_hex();

        let mut companies = self.companies.write().await;
        let company = companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(&id))?;
        company.data.password = password.to_string();
        Ok(())
    }

    async fn find_by_credentials(&self, email: &str, password: &str) -> PortResult<Company> {
        self.companies
            .read()
            .await
            .iter()
            .find(|c| c.data.email == email && c.data.password == password)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("No company matches {}", email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delete_keeps_remaining_order() {
        let store = InMemoryAdapter::new();
        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            store
                .insert_company(CompanyData::new("X", email, "p", "1", "basic"))
                .await
                .unwrap();
        }

        store.delete_company("b@x.com").await.unwrap();

        let emails: Vec<String> = store
            .list_companies()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.data.email)
            .collect();
        assert_eq!(emails, vec!["a@x.com", "c@x.com"]);
    }

    #[tokio::test]
    async fn patch_refuses_an_email_held_by_another_record() {
        let store = InMemoryAdapter::new();
        for email in ["a@x.com", "b@x.com"] {
            store
                .insert_company(CompanyData::new("X", email, "p", "1", "basic"))
                .await
                .unwrap();
        }

        let taken = CompanyPatch {
            email: Some("b@x.com".to_string()),
            ..Default::default()
        };
        let result = store.patch_company("a@x.com", taken).await;
        assert!(matches!(result, Err(PortError::Conflict(_))));
        assert!(store.email_exists("a@x.com").await.unwrap());

        let same = CompanyPatch {
            email: Some("a@x.com".to_string()),
            plan: Some("pro".to_string()),
            ..Default::default()
        };
        store.patch_company("a@x.com", same).await.unwrap();
        let company = store.get_company_by_email("a@x.com").await.unwrap();
        assert_eq!(company.data.plan, "pro");
    }

    #[tokio::test]
    async fn set_password_distinguishes_malformed_and_unknown_ids() {
        let store = InMemoryAdapter::new();

        let malformed = store.set_password("xyz", "secret").await;
        assert!(matches!(malformed, Err(PortError::InvalidIdentifier(_))));

        let unknown = store
            .set_password(&ObjectId::new().to_hex(), "secret")
            .await;
        assert!(matches!(unknown, Err(PortError::NotFound(_))));
    }
}
