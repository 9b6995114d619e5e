//! Audit trail for user records.
//!
//! Creation emits a single `user.create` record. Updates are diffed against
//! the pre-update snapshot and emit one `user.update` record per change:
//!
//! ```text
//! Email: 'maria@old.com' -> 'maria@new.com'
//! Quantidade de Endereços: 2 -> 1
//! Endereço 1 - CEP: '01310100' -> '01310200'
//! Endereço 2 REMOVIDO: Rua B, 20, , Centro, Santos/SP, CEP: 11010000
//! ```
//!
//! Nothing here can fail from the caller's point of view.

use axum_helpers::{AuditEvent, AuditOutcome};
use serde::Serialize;
use serde_json::json;
use std::fmt;

use crate::models::{Address, User};

/// One difference between two snapshots of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditChange {
    Field {
        field: &'static str,
        before: String,
        after: String,
    },
    AddressCount {
        before: usize,
        after: usize,
    },
    AddressField {
        /// 1-based position after sorting by id
        position: usize,
        field: &'static str,
        before: String,
        after: String,
    },
    AddressAdded {
        position: usize,
        address: String,
    },
    AddressRemoved {
        position: usize,
        address: String,
    },
}

impl fmt::Display for AuditChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditChange::Field {
                field,
                before,
                after,
            } => write!(f, "{field}: '{before}' -> '{after}'"),
            AuditChange::AddressCount { before, after } => {
                write!(f, "Quantidade de Endereços: {before} -> {after}")
            }
            AuditChange::AddressField {
                position,
                field,
                before,
                after,
            } => write!(f, "Endereço {position} - {field}: '{before}' -> '{after}'"),
            AuditChange::AddressAdded { position, address } => {
                write!(f, "Endereço {position} ADICIONADO: {address}")
            }
            AuditChange::AddressRemoved { position, address } => {
                write!(f, "Endereço {position} REMOVIDO: {address}")
            }
        }
    }
}

fn format_address(address: &Address) -> String {
    format!(
        "{}, {}, {}, {}, {}/{}, CEP: {}",
        address.street,
        address.number,
        address.complement,
        address.neighborhood,
        address.city,
        address.state,
        address.postal_code
    )
}

fn push_if_changed(changes: &mut Vec<AuditChange>, field: &'static str, before: &str, after: &str) {
    if before != after {
        changes.push(AuditChange::Field {
            field,
            before: before.to_string(),
            after: after.to_string(),
        });
    }
}

fn address_changes(position: usize, before: &Address, after: &Address) -> Vec<AuditChange> {
    let pairs: [(&'static str, &str, &str); 7] = [
        ("Logradouro", &before.street, &after.street),
        ("Número", &before.number, &after.number),
        ("Complemento", &before.complement, &after.complement),
        ("Bairro", &before.neighborhood, &after.neighborhood),
        ("Cidade", &before.city, &after.city),
        ("Estado", &before.state, &after.state),
        ("CEP", &before.postal_code, &after.postal_code),
    ];

    pairs
        .into_iter()
        .filter(|(_, old, new)| old != new)
        .map(|(field, old, new)| AuditChange::AddressField {
            position,
            field,
            before: old.to_string(),
            after: new.to_string(),
        })
        .collect()
}

/// Field-level differences between two snapshots of the same user.
///
/// The password is not compared. Addresses are aligned by position after
/// sorting each side by id.
pub fn diff_users(before: &User, after: &User) -> Vec<AuditChange> {
    let mut changes = Vec::new();

    push_if_changed(&mut changes, "Nome", &before.name, &after.name);
    push_if_changed(&mut changes, "CPF", &before.cpf, &after.cpf);
    push_if_changed(&mut changes, "Email", &before.email, &after.email);
    push_if_changed(&mut changes, "Telefone", &before.phone, &after.phone);

    if before.addresses.len() != after.addresses.len() {
        changes.push(AuditChange::AddressCount {
            before: before.addresses.len(),
            after: after.addresses.len(),
        });
    }

    let mut old: Vec<&Address> = before.addresses.iter().collect();
    let mut new: Vec<&Address> = after.addresses.iter().collect();
    old.sort_by_key(|a| a.id);
    new.sort_by_key(|a| a.id);

    for index in 0..old.len().max(new.len()) {
        let position = index + 1;
        match (old.get(index), new.get(index)) {
            (None, Some(added)) => changes.push(AuditChange::AddressAdded {
                position,
                address: format_address(added),
            }),
            (Some(removed), None) => changes.push(AuditChange::AddressRemoved {
                position,
                address: format_address(removed),
            }),
            (Some(prev), Some(next)) => changes.extend(address_changes(position, prev, next)),
            (None, None) => {}
        }
    }

    changes
}

fn resource(user: &User) -> Option<String> {
    Some(format!("user:{}", user.id))
}

/// Record a newly registered user.
pub fn log_creation(user: &User) {
    AuditEvent::new(
        Some(user.id.to_string()),
        "user.create",
        resource(user),
        AuditOutcome::Success,
    )
    .with_summary(format!(
        "Novo usuário cadastrado - ID: {} | Nome: {} | CPF: {} | Email: {} | Telefone: {} | Endereços: {}",
        user.id,
        user.name,
        user.cpf,
        user.email,
        user.phone,
        user.addresses.len()
    ))
    .with_details(json!({
        "id": user.id,
        "name": user.name,
        "cpf": user.cpf,
        "email": user.email,
        "phone": user.phone,
        "address_count": user.addresses.len(),
    }))
    .log();
}

/// Record every change between `before` and `after`, or a single
/// "no changes" record.
pub fn log_update(before: &User, after: &User) {
    let changes = diff_users(before, after);

    if changes.is_empty() {
        AuditEvent::new(
            Some(after.id.to_string()),
            "user.update",
            resource(after),
            AuditOutcome::Success,
        )
        .with_summary("Nenhuma alteração detectada")
        .log();
        return;
    }

    tracing::debug!(user_id = after.id, changes = changes.len(), "Auditing user update");
    for change in changes {
        AuditEvent::new(
            Some(after.id.to_string()),
            "user.update",
            resource(after),
            AuditOutcome::Success,
        )
        .with_summary(change.to_string())
        .with_details(&change)
        .log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: i32, street: &str) -> Address {
        Address {
            id,
            street: street.to_string(),
            number: "10".to_string(),
            complement: String::new(),
            neighborhood: "Centro".to_string(),
            city: "Santos".to_string(),
            state: "SP".to_string(),
            postal_code: "11010000".to_string(),
        }
    }

    fn user(addresses: Vec<Address>) -> User {
        User {
            id: 7,
            name: "Maria Silva".to_string(),
            cpf: "11144477735".to_string(),
            email: "maria@example.com".to_string(),
            phone: "11987654321".to_string(),
            password_hash: "hash".to_string(),
            addresses,
        }
    }

    #[test]
    fn test_no_changes() {
        let before = user(vec![address(1, "Rua A")]);
        assert!(diff_users(&before, &before.clone()).is_empty());
    }

    #[test]
    fn test_password_hash_is_ignored() {
        let before = user(vec![address(1, "Rua A")]);
        let mut after = before.clone();
        after.password_hash = "rehashed".to_string();
        assert!(diff_users(&before, &after).is_empty());
    }

    #[test]
    fn test_scalar_changes() {
        let before = user(vec![address(1, "Rua A")]);
        let mut after = before.clone();
        after.email = "maria@new.com".to_string();
        after.phone = "1137654321".to_string();

        let lines: Vec<String> = diff_users(&before, &after)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            lines,
            vec![
                "Email: 'maria@example.com' -> 'maria@new.com'",
                "Telefone: '11987654321' -> '1137654321'",
            ]
        );
    }

    #[test]
    fn test_address_replaced_with_new_ids() {
        let before = user(vec![address(1, "Rua A"), address(2, "Rua B")]);
        let after = user(vec![address(3, "Rua A")]);

        let changes = diff_users(&before, &after);
        assert_eq!(
            changes[0],
            AuditChange::AddressCount {
                before: 2,
                after: 1
            }
        );
        assert_eq!(
            changes[1].to_string(),
            "Endereço 2 REMOVIDO: Rua B, 10, , Centro, Santos/SP, CEP: 11010000"
        );
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_address_field_change_and_addition() {
        let before = user(vec![address(1, "Rua A")]);
        let mut first = address(5, "Rua A");
        first.postal_code = "11010001".to_string();
        let after = user(vec![address(6, "Rua C"), first]);

        let lines: Vec<String> = diff_users(&before, &after)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(lines[0], "Quantidade de Endereços: 1 -> 2");
        assert_eq!(lines[1], "Endereço 1 - CEP: '11010000' -> '11010001'");
        assert!(lines[2].starts_with("Endereço 2 ADICIONADO: Rua C"));
    }

    #[test]
    fn test_changes_serialize_with_kind_tag() {
        let change = AuditChange::Field {
            field: "Nome",
            before: "Ana".to_string(),
            after: "Ana Maria".to_string(),
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["kind"], "field");
        assert_eq!(json["after"], "Ana Maria");
    }

    #[test]
    fn test_logging_never_panics() {
        let before = user(vec![address(1, "Rua A")]);
        let after = user(vec![]);
        log_creation(&before);
        log_update(&before, &after);
        log_update(&before, &before);
    }
}
