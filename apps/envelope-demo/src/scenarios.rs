//! Sample requests run by the demo binary.

use crate::app::EnvelopeApp;
use crate::error::DemoError;
use crate::inventory::{InventoryError, OrdersView, StockView};

use resolver_core::{ApiException, ExceptionKind, RequestContext, StandardException, View};

use models::Envelope;

use log::warn;
use serde_json::json;

const API_BASE: &str = "https://api.example.com";

struct Sample<'a> {
    label: &'static str,
    exception: Box<dyn ApiException>,
    view: Option<&'a dyn View>,
    request: RequestContext,
}

/// One sample and the envelope it produced.
#[derive(Debug)]
pub struct Outcome {
    pub label: &'static str,
    pub envelope: Envelope,
}

#[track_caller]
fn request(method: &str, path: &str) -> Result<RequestContext, DemoError> {
    RequestContext::parse(method, &format!("{API_BASE}{path}")).map_err(DemoError::core)
}

/// Run every sample through `app`.
pub fn run(app: &EnvelopeApp) -> Result<Vec<Outcome>, DemoError> {
    let orders = OrdersView;
    let stock = StockView;

    let failures = vec![
        Sample {
            label: "expired token",
            exception: Box::new(StandardException::new(ExceptionKind::InvalidToken, "Token expired.")),
            view: Some(&orders),
            request: request("GET", "/v1/orders")?,
        },
        Sample {
            label: "missing order",
            exception: Box::new(StandardException::new(ExceptionKind::NotFound, "Order 7 not found.")),
            view: Some(&orders),
            request: request("GET", "/v1/orders/7")?,
        },
        Sample {
            label: "unknown route",
            exception: Box::new(StandardException::new(ExceptionKind::Http404, "No route for /v2.")),
            view: None,
            request: request("GET", "/v2")?,
        },
        Sample {
            label: "declined payment",
            exception: Box::new(
                StandardException::new("PaymentDeclined", "Card expired.")
                    .with_outcome("Payment failed"),
            ),
            view: Some(&orders),
            request: request("POST", "/v1/orders/7/pay")?.with_body(json!({"card": "****4242"})),
        },
        Sample {
            label: "out of stock",
            exception: Box::new(InventoryError::OutOfStock {
                sku: "BOOK-1".to_string(),
                available: 0,
            }),
            view: Some(&stock),
            request: request("POST", "/v1/stock/reserve")?.with_body(json!({"sku": "BOOK-1"})),
        },
        Sample {
            label: "warehouse offline",
            exception: Box::new(InventoryError::WarehouseOffline {
                warehouse: "east".to_string(),
            }),
            view: Some(&stock),
            request: request("GET", "/v1/stock/BOOK-1")?,
        },
        Sample {
            label: "unhandled failure",
            exception: Box::new(StandardException::new(ExceptionKind::Unknown, "division by zero")),
            view: None,
            request: request("GET", "/v1/reports")?,
        },
    ];

    let mut outcomes = Vec::with_capacity(failures.len() + 1);
    for sample in &failures {
        match app.fail(sample.exception.as_ref(), sample.view, &sample.request) {
            Ok(envelope) => outcomes.push(Outcome {
                label: sample.label,
                envelope,
            }),
            // Debug mode surfaces unresolvable failures instead of answering them
            Err(e) if app.resolver().is_debug() => warn!("{}: {e}", sample.label),
            Err(e) => return Err(e),
        }
    }

    outcomes.push(Outcome {
        label: "order listing",
        envelope: app.succeed(
            Some(&orders),
            &request("GET", "/v1/orders")?,
            json!({"orders": [{"id": 7, "total": 1999}]}),
        )?,
    });

    Ok(outcomes)
}
