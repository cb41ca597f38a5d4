//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `CompanyStore` port from the `core` crate. It handles all interactions
//! with the MongoDB `empresas` collection using the `mongodb` driver.

use async_trait::async_trait;
use company_directory_core::domain::{
    BusinessHour, Company, CompanyData, CompanyPatch, DEFAULT_RESPONSE_TIME,
};
use company_directory_core::ports::{CompanyStore, PortError, PortResult};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};

const DATABASE_NAME: &str = "alunia";
const COLLECTION_NAME: &str = "empresas";

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `CompanyStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    collection: Collection<CompanyRecord>,
}

impl DbAdapter {
    /// Creates a new `DbAdapter` on top of an already configured client.
    pub fn new(client: &Client) -> Self {
        Self {
            collection: client.database(DATABASE_NAME).collection(COLLECTION_NAME),
        }
    }

    /// Creates the unique index on `email` at startup.
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(Debug, Serialize, Deserialize)]
struct BusinessHourRecord {
    dia: String,
    inicio: String,
    fim: String,
    ativo: bool,
}

impl BusinessHourRecord {
    fn from_domain(hour: BusinessHour) -> Self {
        Self {
            dia: hour.day,
            inicio: hour.start,
            fim: hour.end,
            ativo: hour.active,
        }
    }

    fn to_domain(self) -> BusinessHour {
        BusinessHour {
            day: self.dia,
            start: self.inicio,
            end: self.fim,
            active: self.ativo,
        }
    }
}

/// Optional attributes are `Option` so that documents written before they
/// existed (or holding explicit nulls) still load.
#[derive(Debug, Serialize, Deserialize)]
struct CompanyRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    nome: String,
    email: String,
    senha: String,
    numero: String,
    plano: String,
    #[serde(default)]
    mensagem_inicial: Option<String>,
    #[serde(default)]
    mensagem_fora_horario: Option<String>,
    #[serde(default)]
    tempo_resposta: Option<String>,
    #[serde(default)]
    tempo_resposta_ativo: Option<bool>,
    #[serde(default)]
    opcoes_resposta_rapida: Option<Vec<String>>,
    #[serde(default)]
    links_externos: Option<Vec<String>>,
    #[serde(default)]
    horario_funcionamento: Option<Vec<BusinessHourRecord>>,
}

impl CompanyRecord {
    fn from_domain(data: CompanyData) -> Self {
        Self {
            id: None,
            nome: data.name,
            email: data.email,
            senha: data.password,
            numero: data.phone,
            plano: data.plan,
            mensagem_inicial: Some(data.initial_message),
            mensagem_fora_horario: Some(data.after_hours_message),
            tempo_resposta: Some(data.response_time),
            tempo_resposta_ativo: Some(data.response_time_enabled),
            opcoes_resposta_rapida: Some(data.quick_replies),
            links_externos: Some(data.external_links),
            horario_funcionamento: Some(
                data.business_hours
                    .into_iter()
                    .map(BusinessHourRecord::from_domain)
                    .collect(),
            ),
        }
    }

    fn to_domain(self) -> PortResult<Company> {
        let id = self
            .id
            .ok_or_else(|| PortError::Unexpected("Stored company has no _id".to_string()))?;
        Ok(Company {
            id: id.to_hex(),
            data: CompanyData {
                name: self.nome,
                email: self.email,
                password: self.senha,
                phone: self.numero,
                plan: self.plano,
                initial_message: self.mensagem_inicial.unwrap_or_default(),
                after_hours_message: self.mensagem_fora_horario.unwrap_or_default(),
                response_time: self
                    .tempo_resposta
                    .unwrap_or_else(|| DEFAULT_RESPONSE_TIME.to_string()),
                response_time_enabled: self.tempo_resposta_ativo.unwrap_or(true),
                quick_replies: self.opcoes_resposta_rapida.unwrap_or_default(),
                external_links: self.links_externos.unwrap_or_default(),
                business_hours: self
                    .horario_funcionamento
                    .unwrap_or_default()
                    .into_iter()
                    .map(BusinessHourRecord::to_domain)
                    .collect(),
            },
        })
    }
}

//=========================================================================================
// Helpers
//=========================================================================================

fn parse_object_id(id: &str) -> PortResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| PortError::InvalidIdentifier(id.to_string()))
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY_CODE
    )
}

/// Write failures caused by the unique email index surface as `Conflict`.
fn map_write_error(e: mongodb::error::Error, email: &str) -> PortError {
    if is_duplicate_key(&e) {
        PortError::Conflict(format!("Company {} already registered", email))
    } else {
        PortError::Unexpected(e.to_string())
    }
}

/// Builds the body of a `$set` holding only the attributes present in `patch`.
fn patch_to_set_document(patch: CompanyPatch) -> PortResult<Document> {
    let mut set = Document::new();
    if let Some(name) = patch.name {
        set.insert("nome", name);
    }
    if let Some(email) = patch.email {
        set.insert("email", email);
    }
    if let Some(password) = patch.password {
        set.insert("senha", password);
    }
    if let Some(phone) = patch.phone {
        set.insert("numero", phone);
    }
    if let Some(plan) = patch.plan {
        set.insert("plano", plan);
    }
    if let Some(message) = patch.initial_message {
        set.insert("mensagem_inicial", message);
    }
    if let Some(message) = patch.after_hours_message {
        set.insert("mensagem_fora_horario", message);
    }
    if let Some(response_time) = patch.response_time {
        set.insert("tempo_resposta", response_time);
    }
    if let Some(enabled) = patch.response_time_enabled {
        set.insert("tempo_resposta_ativo", enabled);
    }
    if let Some(replies) = patch.quick_replies {
        set.insert("opcoes_resposta_rapida", replies);
    }
    if let Some(links) = patch.external_links {
        set.insert("links_externos", links);
    }
    if let Some(hours) = patch.business_hours {
        let records: Vec<BusinessHourRecord> = hours
            .into_iter()
            .map(BusinessHourRecord::from_domain)
            .collect();
        let hours = to_bson(&records).map_err(|e| PortError::Unexpected(e.to_string()))?;
        set.insert("horario_funcionamento", hours);
    }
    Ok(set)
}

//=========================================================================================
// `CompanyStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompanyStore for DbAdapter {
    async fn list_companies(&self) -> PortResult<Vec<Company>> {
        let records: Vec<CompanyRecord> = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        records.into_iter().map(CompanyRecord::to_domain).collect()
    }

    async fn get_company_by_email(&self, email: &str) -> PortResult<Company> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .ok_or_else(|| PortError::NotFound(format!("Company {} not found", email)))?
            .to_domain()
    }

    async fn email_exists(&self, email: &str) -> PortResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .limit(1)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(count > 0)
    }

    async fn insert_company(&self, data: CompanyData) -> PortResult<String> {
        let email = data.email.clone();
        let result = self
            .collection
            .insert_one(CompanyRecord::from_domain(data))
            .await
            .map_err(|e| map_write_error(e, &email))?;

        result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .ok_or_else(|| PortError::Unexpected("Inserted id is not an ObjectId".to_string()))
    }

    async fn patch_company(&self, email: &str, patch: CompanyPatch) -> PortResult<()> {
        let set = patch_to_set_document(patch)?;
        if set.is_empty() {
            return Ok(());
        }
        let result = self
            .collection
            .update_one(doc! { "email": email }, doc! { "$set": set })
            .await
            .map_err(|e| map_write_error(e, email))?;

        if result.matched_count == 0 {
            return Err(PortError::NotFound(format!("Company {} not found", email)));
        }
        Ok(())
    }

    async fn delete_company(&self, email: &str) -> PortResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "email": email })
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(PortError::NotFound(format!("Company {} not found", email)));
        }
        Ok(())
    }

    async fn set_password(&self, id: &str, password: &str) -> PortResult<()> {
        let object_id = parse_object_id(id)?;
        let result = self
            .collection
            .update_one(
                doc! { "_id": object_id },
                doc! { "$set": { "senha": password } },
            )
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(PortError::NotFound(format!("Company {} not found", id)));
        }
        Ok(())
    }

    async fn find_by_credentials(&self, email: &str, password: &str) -> PortResult<Company> {
        self.collection
            .find_one(doc! { "email": email, "senha": password })
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .ok_or_else(|| PortError::NotFound(format!("No company matches {}", email)))?
            .to_domain()
    }
}
