//! Resource ownership.
//!
//! # Responsibilities
//! - Validate the `{ "data": { "accountIds" | "servicePointIds": [...] } }`
//!   body of POST requests
//! - Collect the identifiers a request addresses (path placeholders and body)
//! - Answer 404 when the caller does not own one of them
//!
//! # Design Decisions
//! - The sector (banking or energy) comes from the endpoint's path template
//! - Identifiers are checked in request order; the first unowned one is reported
//! - Requests that resolved to no endpoint are left to the existence guard

use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::errors::{ErrorKind, ErrorList};
use crate::http::request::RequestView;
use crate::http::response::Rejection;
use crate::identity::ResourceDomain;
use crate::routing::RouteMatch;
use crate::validation::{Stage, StageContext, Verdict};

pub const ACCOUNT_IDS: &str = "accountIds";
pub const SERVICE_POINT_IDS: &str = "servicePointIds";

/// Service area an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    Banking,
    Energy,
    Common,
}

impl Sector {
    pub fn of(template: &str) -> Self {
        let first = template.trim_start_matches('/').split('/').next();
        match first {
            Some("banking") => Sector::Banking,
            Some("energy") => Sector::Energy,
            _ => Sector::Common,
        }
    }

    fn account_domain(self) -> Option<ResourceDomain> {
        match self {
            Sector::Banking => Some(ResourceDomain::BankingAccount),
            Sector::Energy => Some(ResourceDomain::EnergyAccount),
            Sector::Common => None,
        }
    }

    fn not_owned(self) -> ErrorKind {
        match self {
            Sector::Banking => ErrorKind::InvalidBankAccount,
            Sector::Energy => ErrorKind::InvalidEnergyAccount,
            Sector::Common => ErrorKind::ResourceNotFound,
        }
    }
}

/// Look up `key`, treating JSON `null` as absent.
fn field<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    value.get(key).filter(|v| !v.is_null())
}

/// Check the shape of a POST body carrying identifier arrays.
pub fn validate_body(body: Option<&Value>) -> Result<(), ErrorList> {
    let Some(data) = body.and_then(|b| field(b, "data")) else {
        return Err(ErrorList::single(ErrorKind::MissingRequiredField, "data"));
    };
    let Some(data) = data.as_object() else {
        return Err(ErrorList::single(ErrorKind::InvalidField, "data"));
    };

    let mut present = false;
    let mut errors = ErrorList::default();
    for key in [ACCOUNT_IDS, SERVICE_POINT_IDS] {
        if let Some(ids) = data.get(key).filter(|v| !v.is_null()) {
            present = true;
            let strings = ids
                .as_array()
                .is_some_and(|ids| ids.iter().all(Value::is_string));
            if !strings {
                errors.push(ErrorKind::InvalidField, format!("data.{key}"));
            }
        }
    }

    if !present {
        return Err(ErrorList::single(ErrorKind::MissingRequiredField, "data"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Identifiers addressed by the request, tagged with their domain.
pub fn addressed_identifiers<'r>(
    route: &'r RouteMatch<'_>,
    request: &'r RequestView,
) -> Vec<(ResourceDomain, &'r str)> {
    let sector = Sector::of(route.endpoint.path.as_str());
    let mut ids = Vec::new();

    for param in &route.params {
        let domain = match param.name.as_str() {
            "accountId" => sector.account_domain(),
            "servicePointId" => Some(ResourceDomain::EnergyServicePoint),
            "payeeId" => Some(ResourceDomain::BankingPayee),
            _ => None,
        };
        if let Some(domain) = domain {
            ids.push((domain, param.value.as_str()));
        }
    }

    if request.method() == Method::POST {
        let data = request.body().and_then(|b| b.get("data"));
        let bodies = [
            (ACCOUNT_IDS, sector.account_domain()),
            (SERVICE_POINT_IDS, Some(ResourceDomain::EnergyServicePoint)),
        ];
        for (key, domain) in bodies {
            let (Some(domain), Some(values)) = (domain, data.and_then(|d| d.get(key)).and_then(Value::as_array)) else {
                continue;
            };
            ids.extend(values.iter().filter_map(Value::as_str).map(|id| (domain, id)));
        }
    }

    ids
}

pub struct ResourceStage;

impl Stage for ResourceStage {
    fn name(&self) -> &'static str {
        "resource"
    }

    fn evaluate(&self, request: &RequestView, ctx: &mut StageContext<'_>) -> Verdict {
        let Some(route) = &ctx.route else {
            return Verdict::Continue;
        };

        if request.method() == Method::POST {
            if let Err(errors) = validate_body(request.body()) {
                tracing::info!(path = %route.endpoint.path, "Malformed request body");
                return Verdict::Reject(Rejection::new(StatusCode::BAD_REQUEST, errors));
            }
        }

        let sector = Sector::of(route.endpoint.path.as_str());
        for (domain, id) in addressed_identifiers(route, request) {
            let owned = ctx.caller.as_ref().is_some_and(|c| c.owns(domain, id));
            if !owned {
                tracing::info!(?domain, id, "Identifier not owned by caller");
                return Verdict::Reject(Rejection::single(StatusCode::NOT_FOUND, sector.not_owned(), id));
            }
        }

        Verdict::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::CallerIdentity;
    use crate::routing::catalog;
    use axum::http::Uri;
    use serde_json::json;

    fn caller() -> CallerIdentity {
        CallerIdentity::default()
            .with_owned(ResourceDomain::BankingAccount, ["1234567", "786545"])
            .with_owned(ResourceDomain::EnergyAccount, ["e-1"])
            .with_owned(ResourceDomain::EnergyServicePoint, ["sp-1"])
    }

    fn evaluate(request: &RequestView) -> Verdict {
        let standard = catalog::standard_resolver(None);
        let route = standard.resolve(request.method().as_str(), request.path_and_query());
        let mut ctx = StageContext::new(route).with_caller(caller());
        ResourceStage.evaluate(request, &mut ctx)
    }

    fn get(path: &'static str) -> RequestView {
        RequestView::new(Method::GET, Uri::from_static(path))
    }

    fn post(path: &'static str, body: Value) -> RequestView {
        RequestView::new(Method::POST, Uri::from_static(path)).with_body(body)
    }

    fn rejection(verdict: Verdict) -> Rejection {
        match verdict {
            Verdict::Reject(rejection) => rejection,
            Verdict::Continue => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_sector_from_template() {
        assert_eq!(Sector::of("/banking/accounts"), Sector::Banking);
        assert_eq!(Sector::of("/energy/plans"), Sector::Energy);
        assert_eq!(Sector::of("/common/customer"), Sector::Common);
    }

    #[test]
    fn test_owned_account_passes() {
        assert!(evaluate(&get("/cds-au/v1/banking/accounts/1234567")).is_continue());
        assert!(evaluate(&get("/cds-au/v1/banking/accounts")).is_continue());
    }

    #[test]
    fn test_unowned_account_rejected() {
        let rejection = rejection(evaluate(&get("/cds-au/v1/banking/accounts/999999")));
        assert_eq!(rejection.status, StatusCode::NOT_FOUND);
        let errors = rejection.errors.unwrap();
        assert_eq!(errors.errors[0].code, ErrorKind::InvalidBankAccount.code());
        assert_eq!(errors.errors[0].detail, "999999");
    }

    #[test]
    fn test_energy_account_domain() {
        assert!(evaluate(&get("/cds-au/v1/energy/accounts/e-1/balance")).is_continue());
        // A banking account id is not an energy account.
        let rejection = rejection(evaluate(&get("/cds-au/v1/energy/accounts/1234567/balance")));
        assert_eq!(rejection.codes(), vec![ErrorKind::InvalidEnergyAccount.code()]);
    }

    #[test]
    fn test_post_body_ids() {
        let ok = post(
            "/cds-au/v1/banking/accounts/balances",
            json!({ "data": { "accountIds": ["1234567", "786545"] } }),
        );
        assert!(evaluate(&ok).is_continue());

        let unowned = post(
            "/cds-au/v1/banking/accounts/balances",
            json!({ "data": { "accountIds": ["1234567", "42"] } }),
        );
        let errors = rejection(evaluate(&unowned)).errors.unwrap();
        assert_eq!(errors.errors[0].detail, "42");

        let points = post(
            "/cds-au/v1/energy/electricity/servicepoints/usage",
            json!({ "data": { "servicePointIds": ["sp-1"] } }),
        );
        assert!(evaluate(&points).is_continue());
    }

    #[test]
    fn test_body_shape() {
        let detail = |body: Option<Value>| {
            let errors = validate_body(body.as_ref()).unwrap_err();
            (errors.errors[0].code.clone(), errors.errors[0].detail.clone())
        };

        assert_eq!(detail(None), (ErrorKind::MissingRequiredField.code().into(), "data".into()));
        assert_eq!(
            detail(Some(json!({ "data": [] }))),
            (ErrorKind::InvalidField.code().into(), "data".into())
        );
        assert_eq!(
            detail(Some(json!({ "data": {} }))),
            (ErrorKind::MissingRequiredField.code().into(), "data".into())
        );
        // Explicit nulls count as missing.
        assert_eq!(
            detail(Some(json!({ "data": null }))),
            (ErrorKind::MissingRequiredField.code().into(), "data".into())
        );
        assert_eq!(
            detail(Some(json!({ "data": { "accountIds": null } }))),
            (ErrorKind::MissingRequiredField.code().into(), "data".into())
        );
        assert_eq!(
            detail(Some(json!({ "data": { "accountIds": null, "servicePointIds": "x" } }))),
            (ErrorKind::InvalidField.code().into(), "data.servicePointIds".into())
        );
        assert_eq!(
            detail(Some(json!({ "data": { "accountIds": "1" } }))),
            (ErrorKind::InvalidField.code().into(), "data.accountIds".into())
        );
        assert_eq!(
            detail(Some(json!({ "data": { "servicePointIds": [1] } }))),
            (ErrorKind::InvalidField.code().into(), "data.servicePointIds".into())
        );
        assert!(validate_body(Some(&json!({ "data": { "accountIds": [] } }))).is_ok());
    }

    #[test]
    fn test_post_without_body_is_bad_request() {
        let request = RequestView::new(Method::POST, Uri::from_static("/cds-au/v1/banking/accounts/balances"));
        let rejection = rejection(evaluate(&request));
        assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
        assert_eq!(rejection.codes(), vec![ErrorKind::MissingRequiredField.code()]);
    }
}
