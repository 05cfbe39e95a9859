// src/services/order_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        DrugRepository, NewOrderItem, OrderRepository, PatientRepository, PaymentRepository,
        UserRepository,
    },
    models::order::{Order, OrderItemRequest, OrderWithDetails, UpdateOrderPayload},
};

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    drug_repo: DrugRepository,
    patient_repo: PatientRepository,
    user_repo: UserRepository,
    payment_repo: PaymentRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        drug_repo: DrugRepository,
        patient_repo: PatientRepository,
        user_repo: UserRepository,
        payment_repo: PaymentRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            order_repo,
            drug_repo,
            patient_repo,
            user_repo,
            payment_repo,
            pool,
        }
    }

    /// Cria um pedido com itens precificados pelo catálogo corrente.
    ///
    /// IDs de medicamento que não existem no catálogo são simplesmente
    /// omitidos do pedido — o pedido nasce com os itens que resolveram.
    /// (No update o mesmo caso é erro duro; a assimetria é comportamento
    /// observável do sistema.)
    pub async fn create_order(
        &self,
        patient_id: Uuid,
        user_id: Uuid,
        requested: Vec<OrderItemRequest>,
    ) -> Result<OrderWithDetails, AppError> {
        // 1. Valida as referências antes de criar qualquer coisa
        self.patient_repo
            .find_by_id(patient_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "Paciente",
                id: patient_id,
            })?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "Usuário",
                id: user_id,
            })?;

        // 2. Cabeçalho + itens em uma única transação
        let mut tx = self.pool.begin().await?;

        let order = self
            .order_repo
            .insert_order(&mut *tx, patient_id, user_id)
            .await?;

        // 3. Resolve todos os medicamentos em um único lote
        let drug_ids: Vec<Uuid> = requested.iter().map(|r| r.drug_id).collect();
        let prices = self.drug_repo.prices_by_ids(&mut *tx, &drug_ids).await?;

        // 4. Congela o preço corrente em cada item que resolveu
        let new_items = snapshot_items(&requested, &prices);

        let items = if new_items.is_empty() {
            Vec::new()
        } else {
            self.order_repo
                .insert_items(&mut *tx, order.id, &new_items)
                .await?
        };

        tx.commit().await?;

        Ok(OrderWithDetails {
            order,
            items,
            payments: Vec::new(),
        })
    }

    /// Update abrangente: muda o status e/ou substitui a lista inteira de
    /// itens, tudo ou nada.
    ///
    /// Diferente da criação, aqui QUALQUER drug_id não resolvido aborta a
    /// operação inteira antes de tocar nos itens gravados. Os preços dos
    /// itens novos vêm do catálogo no momento do update, não dos itens
    /// substituídos.
    pub async fn update_order(
        &self,
        order_id: Uuid,
        payload: UpdateOrderPayload,
    ) -> Result<OrderWithDetails, AppError> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "Pedido",
                id: order_id,
            })?;

        // Nada a fazer: no-op que devolve o pedido como está, sem escrita.
        if payload.status.is_none() && payload.items.is_none() {
            return self.assemble_details(order).await;
        }

        // Resolve o lote ANTES de abrir a transação: se alguma referência é
        // inválida, os itens gravados permanecem intactos.
        let replacement = match &payload.items {
            Some(requested) => {
                let drug_ids: Vec<Uuid> = requested.iter().map(|r| r.drug_id).collect();
                let prices = self.drug_repo.prices_by_ids(&self.pool, &drug_ids).await?;
                Some(replacement_items(requested, &prices)?)
            }
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        // O cabeçalho sempre é reescrito (guardado pela versão lida), mesmo
        // que só os itens mudem: é isso que incrementa a versão.
        let updated = self
            .order_repo
            .update_header(&mut *tx, order.id, payload.status, order.version)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(
                    "O pedido foi modificado por outra operação. Recarregue e tente novamente."
                        .into(),
                )
            })?;

        if let Some(new_items) = replacement {
            // Apaga tudo primeiro; a lista nova substitui, nunca acumula.
            self.order_repo.delete_items(&mut *tx, order.id).await?;

            if !new_items.is_empty() {
                self.order_repo
                    .insert_items(&mut *tx, order.id, &new_items)
                    .await?;
            }
        }

        tx.commit().await?;

        // Relê o estado persistido final em vez de devolver relações em
        // memória que acabaram de ser substituídas.
        self.assemble_details(updated).await
    }

    pub async fn get_order_details(&self, order_id: Uuid) -> Result<OrderWithDetails, AppError> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "Pedido",
                id: order_id,
            })?;

        self.assemble_details(order).await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        self.order_repo.list_orders().await
    }

    pub async fn delete_order(&self, order_id: Uuid) -> Result<(), AppError> {
        let deleted = self.order_repo.delete_order(&self.pool, order_id).await?;
        if !deleted {
            return Err(AppError::NotFound {
                entity: "Pedido",
                id: order_id,
            });
        }

        Ok(())
    }

    async fn assemble_details(&self, order: Order) -> Result<OrderWithDetails, AppError> {
        let items = self.order_repo.items_for_order(order.id).await?;
        let payments = self.payment_repo.payments_for_order(order.id).await?;

        Ok(OrderWithDetails {
            order,
            items,
            payments,
        })
    }
}

const DEFAULT_QTY: i32 = 1;

/// Caminho da criação: itens cujo drug_id não está no mapa de preços são
/// descartados em silêncio; os demais congelam o preço corrente.
pub(crate) fn snapshot_items(
    requested: &[OrderItemRequest],
    prices: &HashMap<Uuid, Decimal>,
) -> Vec<NewOrderItem> {
    requested
        .iter()
        .filter_map(|req| {
            prices.get(&req.drug_id).map(|price| NewOrderItem {
                drug_id: req.drug_id,
                qty: req.qty.unwrap_or(DEFAULT_QTY),
                price: *price,
            })
        })
        .collect()
}

/// Caminho do update: se QUALQUER drug_id não resolver, a substituição
/// inteira falha, informando quais IDs são inválidos.
pub(crate) fn replacement_items(
    requested: &[OrderItemRequest],
    prices: &HashMap<Uuid, Decimal>,
) -> Result<Vec<NewOrderItem>, AppError> {
    let mut invalid: Vec<Uuid> = Vec::new();
    for req in requested {
        if !prices.contains_key(&req.drug_id) && !invalid.contains(&req.drug_id) {
            invalid.push(req.drug_id);
        }
    }

    if !invalid.is_empty() {
        return Err(AppError::InvalidReference { drug_ids: invalid });
    }

    Ok(requested
        .iter()
        .map(|req| NewOrderItem {
            drug_id: req.drug_id,
            qty: req.qty.unwrap_or(DEFAULT_QTY),
            price: prices[&req.drug_id],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn req(drug_id: Uuid, qty: Option<i32>) -> OrderItemRequest {
        OrderItemRequest { drug_id, qty }
    }

    fn price_map(entries: &[(Uuid, i64)]) -> HashMap<Uuid, Decimal> {
        entries
            .iter()
            .map(|(id, price)| (*id, Decimal::from(*price)))
            .collect()
    }

    #[test]
    fn creation_silently_drops_unknown_drugs() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let x = Uuid::new_v4(); // não existe no catálogo

        let prices = price_map(&[(a, 1000), (b, 2500)]);
        let items = snapshot_items(&[req(a, Some(2)), req(b, None), req(x, Some(5))], &prices);

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.drug_id != x));
    }

    #[test]
    fn creation_defaults_quantity_to_one() {
        let a = Uuid::new_v4();
        let prices = price_map(&[(a, 700)]);

        let items = snapshot_items(&[req(a, None)], &prices);

        assert_eq!(items[0].qty, 1);
    }

    #[test]
    fn creation_freezes_current_catalog_price() {
        let a = Uuid::new_v4();
        let prices = price_map(&[(a, 1234)]);

        let items = snapshot_items(&[req(a, Some(3))], &prices);

        assert_eq!(items[0].price, Decimal::from(1234));
        assert_eq!(items[0].qty, 3);
    }

    #[test]
    fn replacement_fails_hard_on_any_unknown_drug() {
        let a = Uuid::new_v4();
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();

        let prices = price_map(&[(a, 1000)]);
        let result = replacement_items(&[req(a, Some(1)), req(x, Some(1)), req(y, Some(2))], &prices);

        match result {
            Err(AppError::InvalidReference { drug_ids }) => {
                assert_eq!(drug_ids, vec![x, y]);
            }
            other => panic!("esperava InvalidReference, veio {other:?}"),
        }
    }

    #[test]
    fn replacement_does_not_repeat_duplicated_invalid_ids() {
        let x = Uuid::new_v4();

        let prices = price_map(&[]);
        let result = replacement_items(&[req(x, Some(1)), req(x, Some(2))], &prices);

        match result {
            Err(AppError::InvalidReference { drug_ids }) => assert_eq!(drug_ids, vec![x]),
            other => panic!("esperava InvalidReference, veio {other:?}"),
        }
    }

    #[test]
    fn replacement_uses_update_time_prices() {
        // O preço gravado no item substituído não importa: o que vale é o
        // catálogo no momento do update.
        let a = Uuid::new_v4();
        let prices = price_map(&[(a, 9900)]); // preço novo do catálogo

        let items = replacement_items(&[req(a, Some(2))], &prices).unwrap();

        assert_eq!(items[0].price, Decimal::from(9900));
    }

    #[test]
    fn empty_replacement_list_is_valid_and_empty() {
        let prices = price_map(&[]);

        let items = replacement_items(&[], &prices).unwrap();

        assert!(items.is_empty());
    }
}
