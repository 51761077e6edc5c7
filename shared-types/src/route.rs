use serde::{Deserialize, Serialize};

use crate::lenient::or_none;

/// Lenient view of one element of `GET /rotas/ativas`.
///
/// Only used for diagnostics; the listing is counted from the raw array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteSummary {
    #[serde(rename = "_id", default, deserialize_with = "or_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub nome_rota: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub turno: Option<String>,
}

impl RouteSummary {
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
