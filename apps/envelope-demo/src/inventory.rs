//! A small inventory API standing in for the host framework: its views
//! and the errors they raise.

use resolver_core::{ApiException, ErrorDetails, ExceptionAttribute, ExceptionKind, RequestContext, ResolutionContext, View};

use models::{FieldValue, Model, standard};

use serde_json::{Value, json};
use thiserror::Error;

pub const ORDERS_VIEW: &str = "orders";
pub const STOCK_VIEW: &str = "stock";

/// Errors raised by the inventory views.
///
/// Not registered anywhere: they expose attributes named like the
/// `RestfulError` fields and are picked up by the attribute scrape.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("{sku} is out of stock ({available} left)")]
    OutOfStock { sku: String, available: i64 },

    #[error("warehouse {warehouse} is offline")]
    WarehouseOffline { warehouse: String },
}

impl ApiException for InventoryError {
    fn kind(&self) -> ExceptionKind {
        match self {
            Self::OutOfStock { .. } => ExceptionKind::from("OutOfStock"),
            Self::WarehouseOffline { .. } => ExceptionKind::from("WarehouseOffline"),
        }
    }

    fn attribute(&self, name: &str) -> Option<ExceptionAttribute<'_>> {
        match (self, name) {
            (_, "message") => Some(ExceptionAttribute::Value(FieldValue::from(self.to_string()))),
            (Self::OutOfStock { sku, available }, "error") => {
                Some(ExceptionAttribute::Value(FieldValue::from(json!({
                    "code": "out_of_stock",
                    "details": {"sku": sku, "available": available},
                }))))
            }
            (_, "this") => Some(ExceptionAttribute::Getter(Box::new(
                |context: &ResolutionContext<'_>, _: &ErrorDetails| {
                    FieldValue::from(context.request.path())
                },
            ))),
            _ => None,
        }
    }
}

/// Order endpoints. Wraps successful payloads in `RestfulResponse`.
#[derive(Debug, Default)]
pub struct OrdersView;

impl View for OrdersView {
    fn name(&self) -> &str {
        ORDERS_VIEW
    }

    fn on_success(&self, request: &RequestContext, data: &Value) -> Option<Model> {
        let schema = standard::restful_response().ok()?;
        let mut model = Model::new(&schema);
        model.set("data", data.as_object().cloned().unwrap_or_default()).ok()?;
        model.set("this", request.path()).ok()?;
        Some(model)
    }
}

/// Stock endpoints. Answers warehouse outages itself.
#[derive(Debug, Default)]
pub struct StockView;

impl View for StockView {
    fn name(&self) -> &str {
        STOCK_VIEW
    }

    fn on_error(&self, context: &ResolutionContext<'_>) -> Option<Model> {
        if context.exception.kind() != ExceptionKind::from("WarehouseOffline") {
            return None;
        }
        context
            .error_model
            .construct([
                ("message", FieldValue::from("Stock levels are temporarily unavailable")),
                ("this", FieldValue::from(context.request.path())),
            ])
            .ok()
    }
}
