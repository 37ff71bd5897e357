use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Label used by list and detail surfaces when a record has no industry description.
pub const INDUSTRY_FALLBACK_LABEL: &str = "General Business";

/// Placeholder for absent scalar attributes on display surfaces.
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator the registry uses between multiple DBA names.
pub const ALIAS_DELIMITER: char = '|';

// --- Geo Types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Coordinates exactly as the registry sent them. Either half may be
/// missing or non-numeric; see [`BusinessRecord::coordinates`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCoordinates {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

// --- Wire shape ---

/// One row of the business-license dataset as it arrives over the wire.
/// Every field is optional; numbers are accepted where strings are expected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBusinessRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub location_account: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub business_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dba_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub street_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub zip_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub primary_naics_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub naics: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub council_district: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location_start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_location")]
    pub location: Option<RawCoordinates>,
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string))
}

fn lenient_location<'de, D>(deserializer: D) -> Result<Option<RawCoordinates>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(mut map)) = value else {
        return Ok(None);
    };
    Ok(Some(RawCoordinates {
        latitude: map.remove("latitude").and_then(value_to_string),
        longitude: map.remove("longitude").and_then(value_to_string),
    }))
}

// --- Normalized record ---

/// A licensed business location. Textual fields are normalized once at
/// ingest: absent values become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BusinessRecord {
    /// Unique key within a fetched collection.
    pub location_account: String,
    pub business_name: String,
    /// Raw DBA field; may hold several names joined by `|`.
    pub dba_name: String,
    pub street_address: String,
    pub city: String,
    pub zip_code: String,
    pub location_description: String,
    pub primary_naics_description: String,
    pub naics: String,
    pub council_district: String,
    pub location_start_date: String,
    pub location: Option<RawCoordinates>,
}

impl From<RawBusinessRecord> for BusinessRecord {
    fn from(raw: RawBusinessRecord) -> Self {
        Self {
            location_account: raw.location_account.unwrap_or_default(),
            business_name: raw.business_name.unwrap_or_default(),
            dba_name: raw.dba_name.unwrap_or_default(),
            street_address: raw.street_address.unwrap_or_default(),
            city: raw.city.unwrap_or_default(),
            zip_code: raw.zip_code.unwrap_or_default(),
            location_description: raw.location_description.unwrap_or_default(),
            primary_naics_description: raw.primary_naics_description.unwrap_or_default(),
            naics: raw.naics.unwrap_or_default(),
            council_district: raw.council_district.unwrap_or_default(),
            location_start_date: raw.location_start_date.unwrap_or_default(),
            location: raw.location,
        }
    }
}

impl BusinessRecord {
    /// Parsed map position. `None` when either half is absent, non-numeric,
    /// or not finite; such records are still searchable, just not placeable.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        let raw = self.location.as_ref()?;
        let lat = parse_degrees(raw.latitude.as_deref()?)?;
        let lng = parse_degrees(raw.longitude.as_deref()?)?;
        Some(GeoPoint { lat, lng })
    }

    /// Individual DBA names, in registry order.
    pub fn aliases(&self) -> Vec<&str> {
        self.dba_name
            .split(ALIAS_DELIMITER)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect()
    }

    pub fn alias_display(&self) -> String {
        self.aliases().join(", ")
    }

    pub fn industry_label(&self) -> &str {
        if self.primary_naics_description.is_empty() {
            INDUSTRY_FALLBACK_LABEL
        } else {
            &self.primary_naics_description
        }
    }

    /// License start date. The registry sends floating timestamps like
    /// `2023-04-01T00:00:00.000`; only the date part is kept.
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_start_date(&self.location_start_date)
    }
}

fn parse_degrees(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_start_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date = s.get(..10)?;
    let rest = &s[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
