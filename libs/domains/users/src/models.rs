use br_validators::{
    ValidationFailure, digits_only, normalize_email, password_failures, validate_cpf,
    validate_email, validate_name, validate_phone, validate_postal_code, validate_state,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Stored address. Owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: i32,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Stored user with its addresses, ordered by address id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub addresses: Vec<Address>,
}

/// Address as returned by the API (no owner back-reference).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddressResponse {
    pub id: i32,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            street: address.street,
            number: address.number,
            complement: address.complement,
            neighborhood: address.neighborhood,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
        }
    }
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "enderecos")]
    pub addresses: Vec<AddressResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            cpf: user.cpf,
            email: user.email,
            phone: user.phone,
            addresses: user.addresses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Projection sent back on login: no phone, no password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    pub email: String,
    #[serde(rename = "enderecos")]
    pub addresses: Vec<AddressResponse>,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            cpf: user.cpf,
            email: user.email,
            addresses: user.addresses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Address part of a register or update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddressInput {
    #[serde(rename = "logradouro")]
    #[validate(length(min = 1, max = 200, message = "Logradouro é obrigatório"))]
    pub street: String,
    #[serde(rename = "numero")]
    #[validate(length(min = 1, max = 20, message = "Número é obrigatório"))]
    pub number: String,
    #[serde(rename = "complemento", default, deserialize_with = "null_as_empty")]
    #[validate(length(max = 100, message = "Complemento deve ter no máximo 100 caracteres"))]
    pub complement: String,
    #[serde(rename = "bairro")]
    #[validate(length(min = 1, max = 100, message = "Bairro é obrigatório"))]
    pub neighborhood: String,
    #[serde(rename = "cidade")]
    #[validate(length(min = 1, max = 100, message = "Cidade é obrigatória"))]
    pub city: String,
    #[serde(rename = "estado")]
    #[validate(
        length(min = 1, message = "Estado é obrigatório"),
        custom(function = "check_state")
    )]
    pub state: String,
    #[serde(rename = "cep")]
    #[validate(
        length(min = 1, message = "CEP é obrigatório"),
        custom(function = "check_postal_code")
    )]
    pub postal_code: String,
}

/// DTO for registering a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[serde(rename = "nome")]
    #[validate(
        length(min = 4, max = 100, message = "Nome deve ter entre 4 e 100 caracteres"),
        custom(function = "check_name")
    )]
    pub name: String,
    #[validate(
        length(min = 1, message = "CPF é obrigatório"),
        custom(function = "check_cpf")
    )]
    pub cpf: String,
    #[validate(
        length(min = 1, max = 255, message = "Email é obrigatório"),
        custom(function = "check_email")
    )]
    pub email: String,
    #[serde(rename = "telefone")]
    #[validate(
        length(min = 1, message = "Telefone é obrigatório"),
        custom(function = "check_phone")
    )]
    pub phone: String,
    #[serde(rename = "senha")]
    #[validate(
        length(min = 6, max = 100, message = "Senha deve ter entre 6 e 100 caracteres"),
        custom(function = "check_password")
    )]
    pub password: String,
    #[serde(rename = "enderecos", default)]
    #[validate(
        length(min = 1, message = "Pelo menos um endereço é obrigatório"),
        nested
    )]
    pub addresses: Vec<AddressInput>,
}

/// DTO for updating an existing user. Same shape as [`RegisterUser`], with an
/// optional password that keeps the stored hash when absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[serde(rename = "nome")]
    #[validate(
        length(min = 4, max = 100, message = "Nome deve ter entre 4 e 100 caracteres"),
        custom(function = "check_name")
    )]
    pub name: String,
    #[validate(
        length(min = 1, message = "CPF é obrigatório"),
        custom(function = "check_cpf")
    )]
    pub cpf: String,
    #[validate(
        length(min = 1, max = 255, message = "Email é obrigatório"),
        custom(function = "check_email")
    )]
    pub email: String,
    #[serde(rename = "telefone")]
    #[validate(
        length(min = 1, message = "Telefone é obrigatório"),
        custom(function = "check_phone")
    )]
    pub phone: String,
    #[serde(rename = "senha", default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "check_optional_password"))]
    pub password: Option<String>,
    #[serde(rename = "enderecos", default)]
    #[validate(
        length(min = 1, message = "Pelo menos um endereço é obrigatório"),
        nested
    )]
    pub addresses: Vec<AddressInput>,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email é obrigatório"),
        custom(function = "check_login_email")
    )]
    pub email: String,
    #[serde(rename = "senha", default)]
    #[validate(length(min = 6, message = "Senha deve ter pelo menos 6 caracteres"))]
    pub password: String,
}

/// Response after a successful login
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub sucesso: bool,
    pub token: String,
    pub refresh_token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub usuario: SessionUser,
    pub mensagem: String,
}

/// Token validation request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TokenRequest {
    #[serde(default)]
    pub token: String,
}

/// Token validation verdict
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenValidationResponse {
    pub sucesso: bool,
    pub valido: bool,
    pub mensagem: String,
}

/// Failure body shared by the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthFailure {
    pub sucesso: bool,
    pub mensagem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erros: Option<Vec<String>>,
}

impl AuthFailure {
    pub fn new(mensagem: impl Into<String>) -> Self {
        Self {
            sucesso: false,
            mensagem: mensagem.into(),
            erros: None,
        }
    }

    pub fn with_errors(mut self, erros: Vec<String>) -> Self {
        self.erros = Some(erros);
        self
    }
}

/// Normalized user ready for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub addresses: Vec<NewAddress>,
}

/// Normalized address ready for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl NewAddress {
    pub fn into_address(self, id: i32) -> Address {
        Address {
            id,
            street: self.street,
            number: self.number,
            complement: self.complement,
            neighborhood: self.neighborhood,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
        }
    }
}

/// The comparable fields of an address, in a fixed order.
pub(crate) type AddressKey<'a> = [&'a str; 7];

impl Address {
    pub(crate) fn key(&self) -> AddressKey<'_> {
        [
            &self.street,
            &self.number,
            &self.complement,
            &self.neighborhood,
            &self.city,
            &self.state,
            &self.postal_code,
        ]
    }
}

impl NewAddress {
    pub(crate) fn key(&self) -> AddressKey<'_> {
        [
            &self.street,
            &self.number,
            &self.complement,
            &self.neighborhood,
            &self.city,
            &self.state,
            &self.postal_code,
        ]
    }
}

impl User {
    /// Same scalar fields and the same addresses in any order.
    pub fn is_same_submission(&self, candidate: &NewUser) -> bool {
        if self.name != candidate.name
            || self.cpf != candidate.cpf
            || self.email != candidate.email
            || self.phone != candidate.phone
            || self.addresses.len() != candidate.addresses.len()
        {
            return false;
        }

        let mut stored: Vec<AddressKey<'_>> = self.addresses.iter().map(Address::key).collect();
        let mut submitted: Vec<AddressKey<'_>> =
            candidate.addresses.iter().map(NewAddress::key).collect();
        stored.sort_unstable();
        submitted.sort_unstable();
        stored == submitted
    }
}

// Normalization

/// Accept `null` for optional text and store it as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AddressInput {
    /// Trim every field and uppercase the state.
    pub fn normalized(&self) -> Self {
        Self {
            street: self.street.trim().to_string(),
            number: self.number.trim().to_string(),
            complement: self.complement.trim().to_string(),
            neighborhood: self.neighborhood.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_uppercase(),
            postal_code: self.postal_code.trim().to_string(),
        }
    }

    pub fn into_new_address(self) -> NewAddress {
        NewAddress {
            street: self.street,
            number: self.number,
            complement: self.complement,
            neighborhood: self.neighborhood,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
        }
    }
}

impl RegisterUser {
    /// CPF and phone reduced to digits, email lowercased, the rest trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            cpf: digits_only(&self.cpf),
            email: normalize_email(&self.email),
            phone: digits_only(&self.phone),
            password: self.password.clone(),
            addresses: self.addresses.iter().map(AddressInput::normalized).collect(),
        }
    }
}

impl UpdateUser {
    /// CPF and phone reduced to digits, email lowercased, the rest trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            cpf: digits_only(&self.cpf),
            email: normalize_email(&self.email),
            phone: digits_only(&self.phone),
            password: self.password.clone(),
            addresses: self.addresses.iter().map(AddressInput::normalized).collect(),
        }
    }

    /// The replacement password, if one was actually supplied.
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

// Field rules backed by br_validators

fn to_validation_error(failure: ValidationFailure) -> ValidationError {
    ValidationError::new(failure.code()).with_message(failure.to_string().into())
}

fn check_cpf(value: &str) -> Result<(), ValidationError> {
    validate_cpf(value).map_err(to_validation_error)
}

fn check_phone(value: &str) -> Result<(), ValidationError> {
    validate_phone(value).map_err(to_validation_error)
}

fn check_email(value: &str) -> Result<(), ValidationError> {
    validate_email(value).map_err(to_validation_error)
}

fn check_login_email(value: &str) -> Result<(), ValidationError> {
    validate_email(value).map_err(|failure| {
        ValidationError::new(failure.code()).with_message("Email inválido".into())
    })
}

fn check_name(value: &str) -> Result<(), ValidationError> {
    validate_name(value).map_err(to_validation_error)
}

fn check_state(value: &str) -> Result<(), ValidationError> {
    validate_state(value.trim()).map_err(to_validation_error)
}

fn check_postal_code(value: &str) -> Result<(), ValidationError> {
    validate_postal_code(value.trim()).map_err(to_validation_error)
}

/// Reports every missing character class in one message.
fn check_password(value: &str) -> Result<(), ValidationError> {
    let failures = password_failures(value);
    let Some(first) = failures.first() else {
        return Ok(());
    };

    let message = failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");

    Err(ValidationError::new(first.code()).with_message(message.into()))
}

fn check_optional_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.chars().count() < 6 || value.chars().count() > 100 {
        return Err(ValidationError::new("length")
            .with_message("Senha deve ter entre 6 e 100 caracteres".into()));
    }
    check_password(value)
}
