// src/services/authorization.rs

use crate::{
    common::error::AppError,
    db::RbacRepository,
    models::{
        auth::User,
        rbac::{FormName, Permission, PermissionAction},
    },
};

#[derive(Clone)]
pub struct AuthorizationService {
    rbac_repo: RbacRepository,
}

impl AuthorizationService {
    pub fn new(rbac_repo: RbacRepository) -> Self {
        Self { rbac_repo }
    }

    /// Decide se o principal pode executar `action` sobre `form`.
    ///
    /// Falha fechada: usuário sem cargo, cargo sem linha para o formulário e
    /// flag desligado produzem exatamente a mesma negação — o chamador nunca
    /// descobre qual dos três aconteceu.
    pub async fn check(
        &self,
        user: &User,
        form: FormName,
        action: PermissionAction,
    ) -> Result<(), AppError> {
        let Some(role_id) = user.role_id else {
            return Err(AppError::Forbidden { form, action });
        };

        let permissions = self.rbac_repo.permissions_for_role(role_id).await?;

        if evaluate(&permissions, form, action) {
            Ok(())
        } else {
            Err(AppError::Forbidden { form, action })
        }
    }
}

/// Núcleo puro da decisão: percorre as linhas do cargo e para na PRIMEIRA
/// cujo form_name é igual ao recurso pedido (igualdade exata de string, sem
/// hierarquia nem normalização). Linhas duplicadas para o mesmo par são um
/// problema de integridade de dados; aqui apenas as toleramos.
pub(crate) fn evaluate(
    permissions: &[Permission],
    form: FormName,
    action: PermissionAction,
) -> bool {
    for permission in permissions {
        if permission.form_name == form.as_str() {
            return match action {
                PermissionAction::View => permission.view,
                PermissionAction::Insert => permission.insert,
                PermissionAction::Update => permission.update,
                PermissionAction::Delete => permission.delete,
            };
        }
    }

    // Nenhuma linha para este formulário: negado.
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_permission(
        form_name: &str,
        view: bool,
        insert: bool,
        update: bool,
        delete: bool,
    ) -> Permission {
        Permission {
            id: Uuid::new_v4(),
            role_id: Uuid::new_v4(),
            form_name: form_name.to_string(),
            view,
            insert,
            update,
            delete,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    const ALL_ACTIONS: [PermissionAction; 4] = [
        PermissionAction::View,
        PermissionAction::Insert,
        PermissionAction::Update,
        PermissionAction::Delete,
    ];

    #[test]
    fn denies_every_action_when_role_has_no_rows() {
        for action in ALL_ACTIONS {
            assert!(!evaluate(&[], FormName::Order, action));
        }
    }

    #[test]
    fn denies_when_no_row_matches_the_form() {
        let permissions = vec![make_permission("Drug", true, true, true, true)];

        for action in ALL_ACTIONS {
            assert!(!evaluate(&permissions, FormName::Order, action));
        }
    }

    #[test]
    fn each_flag_controls_exactly_one_action() {
        let base = [false, false, false, false];

        for (i, granted) in ALL_ACTIONS.iter().enumerate() {
            let mut flags = base;
            flags[i] = true;
            let permissions = vec![make_permission(
                "Order", flags[0], flags[1], flags[2], flags[3],
            )];

            for action in ALL_ACTIONS {
                let expected = action == *granted;
                assert_eq!(
                    evaluate(&permissions, FormName::Order, action),
                    expected,
                    "flag {granted} / ação {action}"
                );
            }
        }
    }

    #[test]
    fn matching_is_exact_string_equality() {
        // Caixa diferente não casa: "order" não é "Order".
        let permissions = vec![make_permission("order", true, true, true, true)];

        assert!(!evaluate(&permissions, FormName::Order, PermissionAction::View));
    }

    #[test]
    fn first_matching_row_wins_on_duplicates() {
        // Duas linhas para o mesmo formulário (violação de integridade):
        // só a primeira conta.
        let permissions = vec![
            make_permission("Order", false, false, false, false),
            make_permission("Order", true, true, true, true),
        ];

        for action in ALL_ACTIONS {
            assert!(!evaluate(&permissions, FormName::Order, action));
        }
    }

    #[test]
    fn rows_for_other_forms_do_not_interfere() {
        let permissions = vec![
            make_permission("Drug", true, true, true, true),
            make_permission("Order", true, false, false, false),
            make_permission("Patient", true, true, true, true),
        ];

        assert!(evaluate(&permissions, FormName::Order, PermissionAction::View));
        assert!(!evaluate(&permissions, FormName::Order, PermissionAction::Insert));
        assert!(evaluate(&permissions, FormName::Drug, PermissionAction::Delete));
    }
}
