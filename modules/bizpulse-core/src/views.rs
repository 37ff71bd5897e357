//! Serializable views handed to the rendering collaborators (map, list,
//! stats, detail, filter bar). Built fresh from the filtered collection on
//! every call; none of them carries state of its own.

use bizpulse_common::{area_name, BusinessRecord, GeoPoint, INDUSTRY_FALLBACK_LABEL, NOT_AVAILABLE};
use serde::Serialize;

use crate::aggregate::{aggregate_by_field, totals, AggregateBucket, GroupField, Totals, TOP_INDUSTRIES};
use crate::filter::{FilterPredicate, ALL_ZIPS};
use crate::selection::Surface;
use crate::session::LoadStatus;

/// Initial map viewport over the covered areas.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat: 34.0928,
    lng: -118.3617,
};
pub const DEFAULT_ZOOM: u8 = 13;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";
const STATE_CODE: &str = "CA";
const START_DATE_FORMAT: &str = "%b %-d, %Y";

// --- List ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub location_account: String,
    pub business_name: String,
    pub street_address: String,
    pub zip_code: String,
    pub industry: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub status: LoadStatus,
    pub surface: Surface,
    pub result_count: usize,
    /// Loaded, but nothing matches the current predicate.
    pub empty: bool,
    pub rows: Vec<ListRow>,
}

pub fn list_view(
    filtered: &[&BusinessRecord],
    selected: Option<&str>,
    status: LoadStatus,
    surface: Surface,
) -> ListView {
    let rows = filtered
        .iter()
        .map(|r| ListRow {
            location_account: r.location_account.clone(),
            business_name: r.business_name.clone(),
            street_address: r.street_address.clone(),
            zip_code: r.zip_code.clone(),
            industry: r.industry_label().to_string(),
            selected: selected == Some(r.location_account.as_str()),
        })
        .collect::<Vec<_>>();

    ListView {
        status,
        surface,
        result_count: rows.len(),
        empty: status != LoadStatus::Loading && rows.is_empty(),
        rows,
    }
}

// --- Map ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPopup {
    pub business_name: String,
    pub address_line: String,
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub location_account: String,
    pub position: GeoPoint,
    pub selected: bool,
    pub popup: MarkerPopup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub viewport: Viewport,
    pub markers: Vec<MapMarker>,
    /// Position to pan to: the selected record's marker, if it has one.
    pub focus: Option<GeoPoint>,
    /// Filtered records left off the map for lack of usable coordinates.
    pub skipped: usize,
}

pub fn map_view(filtered: &[&BusinessRecord], selected: Option<&str>) -> MapView {
    let mut markers = Vec::with_capacity(filtered.len());
    let mut focus = None;
    let mut skipped = 0;

    for record in filtered {
        let Some(position) = record.coordinates() else {
            skipped += 1;
            continue;
        };
        let is_selected = selected == Some(record.location_account.as_str());
        if is_selected {
            focus = Some(position);
        }
        let industry = if record.primary_naics_description.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            record.primary_naics_description.clone()
        };
        markers.push(MapMarker {
            location_account: record.location_account.clone(),
            position,
            selected: is_selected,
            popup: MarkerPopup {
                business_name: record.business_name.clone(),
                address_line: format!("{}, {}", record.street_address, record.zip_code),
                industry,
            },
        });
    }

    MapView {
        viewport: Viewport {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        },
        markers,
        focus,
        skipped,
    }
}

// --- Stats ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub totals: Totals,
    pub top_industries: Vec<AggregateBucket>,
    pub zip_distribution: Vec<AggregateBucket>,
}

pub fn stats_view(filtered: &[&BusinessRecord]) -> StatsView {
    let records = || filtered.iter().copied();
    StatsView {
        totals: totals(records()),
        top_industries: aggregate_by_field(records(), GroupField::Industry, Some(TOP_INDUSTRIES)),
        zip_distribution: aggregate_by_field(records(), GroupField::PostalCode, None),
    }
}

// --- Detail ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub location_account: String,
    pub business_name: String,
    /// DBA names joined with ", "; `None` when the record has none.
    pub aliases: Option<String>,
    pub street_address: String,
    pub locality: String,
    pub industry: String,
    pub classification_code: String,
    pub council_district: String,
    pub active_since: String,
    pub position: Option<GeoPoint>,
    pub maps_url: String,
}

pub fn detail_view(record: &BusinessRecord) -> DetailView {
    let aliases = record.alias_display();
    DetailView {
        location_account: record.location_account.clone(),
        business_name: record.business_name.clone(),
        aliases: (!aliases.is_empty()).then_some(aliases),
        street_address: record.street_address.clone(),
        locality: format!("{}, {STATE_CODE} {}", record.city, record.zip_code),
        industry: record.industry_label().to_string(),
        classification_code: record.naics.clone(),
        council_district: or_not_available(&record.council_district),
        active_since: record
            .start_date()
            .map(|d| d.format(START_DATE_FORMAT).to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        position: record.coordinates(),
        maps_url: maps_url(record),
    }
}

/// External map search link for a record's name and address.
pub fn maps_url(record: &BusinessRecord) -> String {
    let query = format!(
        "{} {} {}",
        record.business_name, record.street_address, record.zip_code
    );
    format!("{MAPS_SEARCH_URL}{}", urlencoding::encode(&query))
}

fn or_not_available(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

// --- Filter bar ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub options: Vec<FilterOption>,
    pub current: FilterPredicate,
}

pub fn filter_options(zip_codes: &[String], current: &FilterPredicate) -> FilterOptions {
    let mut options = vec![FilterOption {
        value: ALL_ZIPS.to_string(),
        label: "All Area Codes".to_string(),
    }];
    options.extend(zip_codes.iter().map(|code| FilterOption {
        value: code.clone(),
        label: match area_name(code) {
            Some(name) => format!("{code} ({name})"),
            None => code.clone(),
        },
    }));
    FilterOptions {
        options,
        current: current.clone(),
    }
}
