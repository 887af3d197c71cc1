//! Query parameter types for API handlers.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::Uri;
use bodyfit_core::appointment::AppointmentOrder;

/// Sorting parameters for the appointment list (`?sort_by=&direction=`).
///
/// Extraction never fails: a repeated parameter keeps its first value and an
/// unparseable query string reads as empty. Unknown values are resolved by
/// [`AppointmentOrder::from_params`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AppointmentListParams {
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

impl AppointmentListParams {
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        };

        Self {
            sort_by: first("sort_by"),
            direction: first("direction"),
        }
    }

    pub fn order(&self) -> AppointmentOrder {
        AppointmentOrder::from_params(self.sort_by.as_deref(), self.direction.as_deref())
    }
}

impl<S> FromRequestParts<S> for AppointmentListParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}

#[cfg(test)]
mod tests {
    use bodyfit_core::appointment::{AppointmentSortField, SortDirection};

    use super::*;

    fn params(uri: &str) -> AppointmentListParams {
        AppointmentListParams::from_uri(&uri.parse().unwrap())
    }

    #[test]
    fn reads_both_parameters() {
        let p = params("/appointments?sort_by=phone&direction=desc&api_key=k");
        assert_eq!(p.sort_by.as_deref(), Some("phone"));
        assert_eq!(p.direction.as_deref(), Some("desc"));
    }

    #[test]
    fn repeated_parameter_keeps_first_value() {
        let order = params("/appointments?sort_by=id&sort_by=phone").order();
        assert_eq!(order.field, AppointmentSortField::Id);
        assert_eq!(order.direction, SortDirection::Asc);
    }

    #[test]
    fn missing_query_is_default_order() {
        assert_eq!(params("/appointments"), AppointmentListParams::default());
        assert_eq!(params("/appointments").order(), AppointmentOrder::default());
    }
}
