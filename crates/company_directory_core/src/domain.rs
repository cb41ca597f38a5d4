//! crates/company_directory_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

/// Response time assigned to records that never set one.
pub const DEFAULT_RESPONSE_TIME: &str = "2 horas";

/// Literal written by the reset-password operation.
pub const DEFAULT_RESET_PASSWORD: &str = "123456";

/// One opening window of a company. Embedded in [`CompanyData`], never
/// addressed on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessHour {
    pub day: String,
    pub start: String,
    pub end: String,
    pub active: bool,
}

/// Every attribute of a company record except its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub plan: String,
    pub initial_message: String,
    pub after_hours_message: String,
    pub response_time: String,
    pub response_time_enabled: bool,
    pub quick_replies: Vec<String>,
    pub external_links: Vec<String>,
    pub business_hours: Vec<BusinessHour>,
}

impl CompanyData {
    /// Builds a record from the required attributes, with every optional
    /// attribute at its default.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        phone: impl Into<String>,
        plan: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            phone: phone.into(),
            plan: plan.into(),
            initial_message: String::new(),
            after_hours_message: String::new(),
            response_time: DEFAULT_RESPONSE_TIME.to_string(),
            response_time_enabled: true,
            quick_replies: Vec::new(),
            external_links: Vec::new(),
            business_hours: Vec::new(),
        }
    }

    /// Overwrites the attributes present in `patch` and leaves the rest as they are.
    pub fn apply(&mut self, patch: CompanyPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(plan) = patch.plan {
            self.plan = plan;
        }
        if let Some(message) = patch.initial_message {
            self.initial_message = message;
        }
        if let Some(message) = patch.after_hours_message {
            self.after_hours_message = message;
        }
        if let Some(response_time) = patch.response_time {
            self.response_time = response_time;
        }
        if let Some(enabled) = patch.response_time_enabled {
            self.response_time_enabled = enabled;
        }
        if let Some(replies) = patch.quick_replies {
            self.quick_replies = replies;
        }
        if let Some(links) = patch.external_links {
            self.external_links = links;
        }
        if let Some(hours) = patch.business_hours {
            self.business_hours = hours;
        }
    }
}

/// A persisted company record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// Opaque identifier assigned by the store.
    pub id: String,
    pub data: CompanyData,
}

/// A closed set of company attributes to overwrite. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub plan: Option<String>,
    pub initial_message: Option<String>,
    pub after_hours_message: Option<String>,
    pub response_time: Option<String>,
    pub response_time_enabled: Option<bool>,
    pub quick_replies: Option<Vec<String>>,
    pub external_links: Option<Vec<String>>,
    pub business_hours: Option<Vec<BusinessHour>>,
}

impl CompanyPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompanyData {
        CompanyData::new("X", "a@x.com", "p1", "1", "basic")
    }

    #[test]
    fn new_company_uses_defaults() {
        let data = sample();
        assert_eq!(data.response_time, DEFAULT_RESPONSE_TIME);
        assert!(data.response_time_enabled);
        assert!(data.initial_message.is_empty());
        assert!(data.business_hours.is_empty());
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut data = sample();
        data.initial_message = "Olá".to_string();

        data.apply(CompanyPatch {
            plan: Some("pro".to_string()),
            response_time_enabled: Some(false),
            ..Default::default()
        });

        assert_eq!(data.plan, "pro");
        assert!(!data.response_time_enabled);
        assert_eq!(data.name, "X");
        assert_eq!(data.initial_message, "Olá");
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(CompanyPatch::default().is_empty());
        let patch = CompanyPatch {
            quick_replies: Some(vec![]),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
