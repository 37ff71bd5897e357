use serde::Serialize;

/// A postal-code area the deployment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceArea {
    pub code: &'static str,
    pub name: &'static str,
}

pub const DEFAULT_SERVICE_AREAS: &[ServiceArea] = &[
    ServiceArea { code: "90046", name: "Hollywood" },
    ServiceArea { code: "90068", name: "Hollywood Hills" },
    ServiceArea { code: "90069", name: "West Hollywood" },
];

/// Display name for a postal code, if it is one of the known areas.
pub fn area_name(code: &str) -> Option<&'static str> {
    DEFAULT_SERVICE_AREAS
        .iter()
        .find(|a| a.code == code)
        .map(|a| a.name)
}

/// Five ASCII digits, the form used for area prefixes.
pub fn is_zip5(code: &str) -> bool {
    code.len() == 5 && code.bytes().all(|b| b.is_ascii_digit())
}
