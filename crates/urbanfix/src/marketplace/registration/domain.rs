use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::marketplace::catalog::PriceType;

use super::RegistrationError;

/// Step-one form data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

impl BasicInfo {
    /// Field validation as the signup form enforces it.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let invalid = |message: &str| Err(RegistrationError::Validation(message.to_string()));

        if self.user_name.trim().len() < 3 {
            return invalid("name must be at least 3 characters");
        }
        if self.user_name.chars().any(|c| c.is_ascii_digit()) {
            return invalid("name cannot contain numbers");
        }
        if !is_plausible_email(&self.email) {
            return invalid("please enter a valid email address");
        }
        if self.phone_number.len() != 10
            || !self.phone_number.chars().all(|c| c.is_ascii_digit())
        {
            return invalid("phone number must be exactly 10 digits");
        }
        if self.password.len() < 8 {
            return invalid("password must be at least 8 characters");
        }
        if self.password != self.confirm_password {
            return invalid("passwords do not match");
        }
        Ok(())
    }
}

/// local@domain.tld shape without whitespace; not an RFC parse.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    matches!(domain.rsplit_once('.'), Some((host, tld)) if !host.is_empty() && !tld.is_empty())
}

/// A service captured during the wizard, before it has an id or owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price_type: PriceType,
    pub price: f64,
    /// Minutes for hourly pricing, days for daily.
    pub duration: u32,
    #[serde(default)]
    pub has_offer: bool,
    #[serde(default)]
    pub offer_title: String,
    #[serde(default)]
    pub offer_discount: f64,
}

/// The whole wizard snapshot, persisted between page loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationState {
    /// 1..=3.
    pub current_step: u8,
    pub basic_info: Option<BasicInfo>,
    /// Deduplicated, insertion order preserved.
    pub selected_category_ids: Vec<String>,
    pub services_by_category: BTreeMap<String, Vec<ServiceDraft>>,
}

impl Default for RegistrationState {
    fn default() -> Self {
        Self {
            current_step: 1,
            basic_info: None,
            selected_category_ids: Vec::new(),
            services_by_category: BTreeMap::new(),
        }
    }
}
