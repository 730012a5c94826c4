//! Default gate definitions seeded at workspace onboarding.
//!
//! Every new workspace gets the wave-1 marketplaces (Mercado Livre and
//! Shopee), each with the four-gate sequence seller_account →
//! brand_registry → catalog_ready → publish_gate. Gate #1 of each
//! sequence starts `in_progress`, the rest `locked`.

use serde_json::json;

use launchos_core::gate::GateCheckItem;
use launchos_core::marketplace::{MARKETPLACE_MERCADOLIVRE, MARKETPLACE_SHOPEE};

use launchos_db::models::gate::CreateGateDef;

pub const GATE_SELLER_ACCOUNT: &str = "seller_account";
pub const GATE_BRAND_REGISTRY: &str = "brand_registry";
pub const GATE_CATALOG_READY: &str = "catalog_ready";
pub const GATE_PUBLISH: &str = "publish_gate";

fn checklist(labels: &[&str]) -> serde_json::Value {
    let items: Vec<GateCheckItem> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| GateCheckItem {
            key: format!("item-{i}"),
            label: (*label).to_string(),
            required: true,
        })
        .collect();
    serde_json::to_value(items).unwrap_or_else(|_| json!([]))
}

fn def(
    marketplace_key: &str,
    gate_key: &str,
    gate_order: i32,
    title: &str,
    items: &[&str],
    evidence_types: &[&str],
) -> CreateGateDef {
    CreateGateDef {
        marketplace_key: marketplace_key.to_string(),
        gate_key: gate_key.to_string(),
        gate_order,
        title: title.to_string(),
        requires_auditor: true,
        checklist: checklist(items),
        evidence_types: json!(evidence_types),
    }
}

/// The gate definitions a fresh workspace starts with.
pub fn default_gate_defs() -> Vec<CreateGateDef> {
    vec![
        def(
            MARKETPLACE_MERCADOLIVRE,
            GATE_SELLER_ACCOUNT,
            1,
            "Conta de Vendedor",
            &[
                "Criar conta no ML",
                "Verificar email",
                "Adicionar dados bancários",
            ],
            &[],
        ),
        def(
            MARKETPLACE_MERCADOLIVRE,
            GATE_BRAND_REGISTRY,
            2,
            "Registro de Marca",
            &["Enviar documentação", "Aguardar aprovação"],
            &["document"],
        ),
        def(
            MARKETPLACE_MERCADOLIVRE,
            GATE_CATALOG_READY,
            3,
            "Catálogo Pronto",
            &[
                "Mínimo 10 produtos",
                "Fotos aprovadas",
                "Descrições completas",
            ],
            &[],
        ),
        def(
            MARKETPLACE_MERCADOLIVRE,
            GATE_PUBLISH,
            4,
            "Gate de Publicação",
            &["Revisar anúncios", "Configurar frete", "Definir preços"],
            &[],
        ),
        def(
            MARKETPLACE_SHOPEE,
            GATE_SELLER_ACCOUNT,
            1,
            "Conta de Vendedor",
            &[
                "Criar conta na Shopee",
                "Verificar celular",
                "Adicionar dados bancários",
            ],
            &[],
        ),
        def(
            MARKETPLACE_SHOPEE,
            GATE_BRAND_REGISTRY,
            2,
            "Registro de Marca",
            &["Enviar documentação", "Aguardar aprovação"],
            &["document"],
        ),
        def(
            MARKETPLACE_SHOPEE,
            GATE_CATALOG_READY,
            3,
            "Catálogo Pronto",
            &["Mínimo 5 produtos", "Fotos aprovadas"],
            &[],
        ),
        def(
            MARKETPLACE_SHOPEE,
            GATE_PUBLISH,
            4,
            "Gate de Publicação",
            &["Revisar anúncios", "Configurar frete"],
            &[],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchos_core::gate::{initial_status, GateStatus};

    #[test]
    fn two_marketplaces_four_gates_each() {
        let defs = default_gate_defs();
        assert_eq!(defs.len(), 8);
        assert_eq!(
            defs.iter()
                .filter(|d| d.marketplace_key == MARKETPLACE_MERCADOLIVRE)
                .count(),
            4
        );
        assert_eq!(
            defs.iter()
                .filter(|d| d.marketplace_key == MARKETPLACE_SHOPEE)
                .count(),
            4
        );
    }

    #[test]
    fn orders_run_one_through_four() {
        let defs = default_gate_defs();
        for marketplace in [MARKETPLACE_MERCADOLIVRE, MARKETPLACE_SHOPEE] {
            let mut orders: Vec<i32> = defs
                .iter()
                .filter(|d| d.marketplace_key == marketplace)
                .map(|d| d.gate_order)
                .collect();
            orders.sort();
            assert_eq!(orders, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn only_first_gate_starts_in_progress() {
        let defs = default_gate_defs();
        for d in defs {
            let expected = if d.gate_order == 1 {
                GateStatus::InProgress
            } else {
                GateStatus::Locked
            };
            assert_eq!(initial_status(d.gate_order), expected);
        }
    }

    #[test]
    fn brand_registry_requires_document_evidence() {
        let defs = default_gate_defs();
        for d in defs.iter().filter(|d| d.gate_key == GATE_BRAND_REGISTRY) {
            assert_eq!(d.evidence_types, serde_json::json!(["document"]));
        }
    }

    #[test]
    fn checklists_are_well_formed() {
        for d in default_gate_defs() {
            let items: Vec<GateCheckItem> =
                serde_json::from_value(d.checklist.clone()).expect("checklist must deserialize");
            assert!(!items.is_empty());
            assert!(items.iter().all(|i| i.required));
        }
    }
}
