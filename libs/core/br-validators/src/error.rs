use thiserror::Error;

/// Why a value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationFailure {
    #[error("CPF inválido")]
    InvalidCpf,

    #[error("Telefone deve ter um formato válido com DDD")]
    InvalidPhone,

    #[error("DDD inválido")]
    InvalidDdd,

    #[error("Email deve ter um formato válido")]
    InvalidEmail,

    #[error("Senha deve conter pelo menos uma letra minúscula")]
    NoLowerCase,

    #[error("Senha deve conter pelo menos uma letra maiúscula")]
    NoUpperCase,

    #[error("Senha deve conter pelo menos um caractere especial")]
    NoSpecialChar,

    #[error("Nome não pode conter números")]
    HasNumbers,

    #[error("CEP deve ter exatamente 8 dígitos")]
    InvalidPostalCode,

    #[error("Estado deve ser a sigla de 2 letras")]
    InvalidState,
}

impl ValidationFailure {
    /// Stable machine-readable code, shared with the web client.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::InvalidCpf => "invalidCpf",
            ValidationFailure::InvalidPhone => "invalidPhone",
            ValidationFailure::InvalidDdd => "invalidDDD",
            ValidationFailure::InvalidEmail => "invalidEmail",
            ValidationFailure::NoLowerCase => "noLowerCase",
            ValidationFailure::NoUpperCase => "noUpperCase",
            ValidationFailure::NoSpecialChar => "noSpecialChar",
            ValidationFailure::HasNumbers => "hasNumbers",
            ValidationFailure::InvalidPostalCode => "invalidPostalCode",
            ValidationFailure::InvalidState => "invalidState",
        }
    }
}
