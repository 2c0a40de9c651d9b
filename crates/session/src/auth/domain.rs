use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Roles the identity service is known to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Client,
    Driver,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Driver => "DRIVER",
            Role::Admin => "ADMIN",
        }
    }
}

/// Structured postal address. The identity service sometimes returns a
/// bare string here; deserialization folds it into `street`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// The authenticated user as reported by the identity service.
///
/// `role` stays a raw string: servers have been observed to send values
/// outside the known set and those must not break deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: String,
    pub role: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_confirmed: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "de_address")]
    pub address: Option<Address>,
}

// Some deployments send numeric ids, others strings.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

fn de_address<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Structured(Address),
    }
    Ok(Option::<Repr>::deserialize(deserializer)?.map(|repr| match repr {
        Repr::Text(street) => Address { street: Some(street), ..Address::default() },
        Repr::Structured(address) => address,
    }))
}

/// Login payload sent to the identity service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// Caller-supplied registration details before request assembly.
#[derive(Debug, Clone, Default)]
pub struct RegistrationProfile {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub plate_number: Option<String>,
    pub car_make: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<String>,
    pub car_color: Option<String>,
    pub license_document_url: Option<String>,
    pub registration_document_url: Option<String>,
    pub driver_photo_url: Option<String>,
    pub driver_documents: Option<HashMap<String, String>>,
    pub temp_registration_id: Option<String>,
}

/// Driver-only fields, flattened into the registration payload.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DriverBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_document_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_document_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_photo_url: Option<String>,
    // Legacy mapping the backend still reads; always present for drivers.
    pub driver_documents: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_registration_id: Option<String>,
}

/// Registration payload sent to the identity service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
    #[serde(flatten)]
    pub driver: Option<DriverBundle>,
}

impl RegistrationRequest {
    /// Assemble the outgoing payload from an already-normalized phone.
    ///
    /// The display name prefers an explicit `name`, then `first last`,
    /// then falls back to the phone number itself. The driver bundle is
    /// attached only when the role is DRIVER.
    pub fn new(phone: String, password: String, profile: RegistrationProfile) -> Self {
        let name = profile
            .name
            .clone()
            .or_else(|| match (&profile.first_name, &profile.last_name) {
                (Some(first), Some(last)) => Some(format!("{first} {last}")),
                _ => None,
            })
            .unwrap_or_else(|| phone.clone());

        let role = profile.role.unwrap_or_default();
        let driver = (role == Role::Driver).then(|| DriverBundle {
            plate_number: profile.plate_number,
            car_make: profile.car_make,
            car_model: profile.car_model,
            car_year: profile.car_year,
            car_color: profile.car_color,
            license_document_url: profile.license_document_url,
            registration_document_url: profile.registration_document_url,
            driver_photo_url: profile.driver_photo_url,
            driver_documents: profile.driver_documents.unwrap_or_default(),
            temp_registration_id: profile.temp_registration_id,
        });

        Self { name, phone, password, role, driver }
    }
}

/// Outcome of a registration call.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl RegisterResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Lifecycle of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Initializing,
    Idle,
    Authenticating,
    Error,
}
