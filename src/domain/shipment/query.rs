//! Closed filter, sort and pagination types for shipment listings.
//!
//! Transports hand over loosely typed strings; everything here is validated
//! before a repository ever sees it.

use std::str::FromStr;

use super::{Shipment, ShipmentStatus};
use crate::domain::foundation::ValidationError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Filter over the shipment collection.
///
/// Present fields are AND'd together. `search` is a single term matched as a
/// substring against tracking number, customer name, origin and destination,
/// OR'd across those four columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipmentFilter {
    pub status: Option<ShipmentStatus>,
    pub carrier: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub search: Option<String>,
}

impl ShipmentFilter {
    /// Drops blank text criteria so they match everything.
    pub fn normalized(self) -> Self {
        fn clean(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            status: self.status,
            carrier: clean(self.carrier),
            origin: clean(self.origin),
            destination: clean(self.destination),
            search: clean(self.search),
        }
    }

    /// Evaluates the filter against one record.
    ///
    /// Used by the in-memory repository; the Postgres adapter compiles the
    /// same rules to SQL.
    pub fn matches(&self, shipment: &Shipment) -> bool {
        fn contains(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        if let Some(status) = self.status {
            if shipment.status != status {
                return false;
            }
        }
        if let Some(carrier) = &self.carrier {
            if !contains(&shipment.carrier, carrier) {
                return false;
            }
        }
        if let Some(origin) = &self.origin {
            if !contains(&shipment.origin, origin) {
                return false;
            }
        }
        if let Some(destination) = &self.destination {
            if !contains(&shipment.destination, destination) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let hit = contains(&shipment.tracking_number, term)
                || contains(&shipment.customer_name, term)
                || contains(&shipment.origin, term)
                || contains(&shipment.destination, term);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Sortable shipment columns, named as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    TrackingNumber,
    Origin,
    Destination,
    Status,
    Carrier,
    Weight,
    EstimatedDelivery,
    ActualDelivery,
    CustomerName,
    CustomerEmail,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Backing column name.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::TrackingNumber => "tracking_number",
            SortField::Origin => "origin",
            SortField::Destination => "destination",
            SortField::Status => "status",
            SortField::Carrier => "carrier",
            SortField::Weight => "weight",
            SortField::EstimatedDelivery => "estimated_delivery",
            SortField::ActualDelivery => "actual_delivery",
            SortField::CustomerName => "customer_name",
            SortField::CustomerEmail => "customer_email",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim() {
            "id" => SortField::Id,
            "trackingNumber" => SortField::TrackingNumber,
            "origin" => SortField::Origin,
            "destination" => SortField::Destination,
            "status" => SortField::Status,
            "carrier" => SortField::Carrier,
            "weight" => SortField::Weight,
            "estimatedDelivery" => SortField::EstimatedDelivery,
            "actualDelivery" => SortField::ActualDelivery,
            "customerName" => SortField::CustomerName,
            "customerEmail" => SortField::CustomerEmail,
            "createdAt" => SortField::CreatedAt,
            "updatedAt" => SortField::UpdatedAt,
            other => {
                return Err(ValidationError::invalid_format(
                    "sort.field",
                    format!("cannot sort by '{}'", other),
                ))
            }
        };
        Ok(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(ValidationError::invalid_format(
                "sort.order",
                "must be ASC or DESC",
            )),
        }
    }
}

/// Ordering for a listing. Ties always break on `id` in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipmentSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ShipmentSort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parses the transport pair; both halves must be given together.
    pub fn parse(field: Option<&str>, order: Option<&str>) -> Result<Self, ValidationError> {
        match (field, order) {
            (None, None) => Ok(Self::default()),
            (Some(field), Some(order)) => Ok(Self::new(field.parse()?, order.parse()?)),
            (Some(field), None) => Ok(Self::new(field.parse()?, SortDirection::Desc)),
            (None, Some(_)) => Err(ValidationError::empty_field("sort.field")),
        }
    }

    /// Compares two records the way the store orders them.
    pub fn compare(&self, a: &Shipment, b: &Shipment) -> std::cmp::Ordering {
        let primary = match self.field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::TrackingNumber => a.tracking_number.cmp(&b.tracking_number),
            SortField::Origin => a.origin.cmp(&b.origin),
            SortField::Destination => a.destination.cmp(&b.destination),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::Carrier => a.carrier.cmp(&b.carrier),
            SortField::Weight => a.weight.cmp(&b.weight),
            SortField::EstimatedDelivery => a.estimated_delivery.cmp(&b.estimated_delivery),
            // NULLs sort last ascending and first descending, as in Postgres.
            SortField::ActualDelivery => match (a.actual_delivery, b.actual_delivery) {
                (Some(x), Some(y)) => x.cmp(&y),
                (None, None) => std::cmp::Ordering::Equal,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (Some(_), None) => std::cmp::Ordering::Less,
            },
            SortField::CustomerName => a.customer_name.cmp(&b.customer_name),
            SortField::CustomerEmail => a.customer_email.cmp(&b.customer_email),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        let ordering = primary.then_with(|| a.id.cmp(&b.id));
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl Default for ShipmentSort {
    fn default() -> Self {
        Self::new(SortField::CreatedAt, SortDirection::Desc)
    }
}

/// 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Result<Self, ValidationError> {
        if page < 1 {
            return Err(ValidationError::out_of_range("page", 1, i64::from(u32::MAX), page));
        }
        if !(1..=i64::from(MAX_LIMIT)).contains(&limit) {
            return Err(ValidationError::out_of_range(
                "limit",
                1,
                i64::from(MAX_LIMIT),
                limit,
            ));
        }
        let page = u32::try_from(page)
            .map_err(|_| ValidationError::out_of_range("page", 1, i64::from(u32::MAX), page))?;
        Ok(Self {
            page,
            limit: limit as u32,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Navigation data derived from the filtered count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageInfo {
    pub fn compute(request: PageRequest, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(u64::from(request.limit));
        Self {
            current_page: request.page,
            total_pages,
            has_next_page: u64::from(request.page) < total_pages,
            has_previous_page: request.page > 1,
        }
    }
}

/// One page of a listing plus the count of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentPage {
    pub shipments: Vec<Shipment>,
    pub total_count: u64,
    pub page_info: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ShipmentId, Timestamp};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn shipment(id: i64, tracking: &str, customer: &str, origin: &str, dest: &str) -> Shipment {
        let now = Timestamp::from_unix_secs(1_700_000_000 + id);
        Shipment {
            id: ShipmentId::new(id),
            tracking_number: tracking.into(),
            origin: origin.into(),
            destination: dest.into(),
            status: ShipmentStatus::Pending,
            carrier: "FedEx Ground".into(),
            weight: Decimal::new(150, 2),
            dimensions: "10x10x10".into(),
            estimated_delivery: now,
            actual_delivery: None,
            customer_name: customer.into(),
            customer_email: "c@example.com".into(),
            creator_email: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let s = shipment(1, "TN1", "Ann", "Berlin", "Paris");
        assert!(ShipmentFilter::default().matches(&s));
    }

    #[test]
    fn carrier_filter_is_case_insensitive_substring() {
        let s = shipment(1, "TN1", "Ann", "Berlin", "Paris");
        let filter = ShipmentFilter {
            carrier: Some("fedex".into()),
            ..Default::default()
        };
        assert!(filter.matches(&s));
    }

    #[test]
    fn search_is_ored_across_four_fields_and_anded_with_others() {
        let s = shipment(1, "TN-ALPHA", "Ann", "Berlin", "Paris");

        for term in ["alpha", "ann", "berl", "PAR"] {
            let f = ShipmentFilter {
                search: Some(term.into()),
                ..Default::default()
            };
            assert!(f.matches(&s), "{term}");
        }

        let f = ShipmentFilter {
            search: Some("alpha".into()),
            status: Some(ShipmentStatus::Delivered),
            ..Default::default()
        };
        assert!(!f.matches(&s));
    }

    #[test]
    fn pattern_characters_match_literally() {
        let plain = shipment(1, "TN1", "Nora", "Rotterdam", "Lyon");
        let marked = shipment(2, "TN_2", "Otto", "Paris", "Berlin");

        for term in ["_", "%", "\\"] {
            let f = ShipmentFilter {
                search: Some(term.into()),
                ..Default::default()
            };
            assert!(!f.matches(&plain), "{term}");
        }

        let underscore = ShipmentFilter {
            search: Some("_".into()),
            ..Default::default()
        };
        assert!(underscore.matches(&marked));

        let carrier = ShipmentFilter {
            carrier: Some("%".into()),
            ..Default::default()
        };
        assert!(!carrier.matches(&plain));
    }

    #[test]
    fn blank_criteria_are_dropped() {
        let f = ShipmentFilter {
            carrier: Some("   ".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(f, ShipmentFilter::default());
    }

    #[test]
    fn sort_defaults_to_created_at_descending() {
        assert_eq!(
            ShipmentSort::parse(None, None).unwrap(),
            ShipmentSort::new(SortField::CreatedAt, SortDirection::Desc)
        );
    }

    #[test]
    fn sort_order_is_case_insensitive() {
        let sort = ShipmentSort::parse(Some("weight"), Some("asc")).unwrap();
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(sort.field.column(), "weight");
    }

    #[test]
    fn sort_rejects_unknown_field_and_order() {
        assert!(ShipmentSort::parse(Some("password"), Some("ASC")).is_err());
        assert!(ShipmentSort::parse(Some("origin"), Some("sideways")).is_err());
        assert!(ShipmentSort::parse(None, Some("ASC")).is_err());
    }

    #[test]
    fn sort_breaks_ties_on_id() {
        let a = shipment(1, "TN1", "Same", "X", "Y");
        let b = shipment(2, "TN2", "Same", "X", "Y");
        let sort = ShipmentSort::new(SortField::CustomerName, SortDirection::Desc);
        assert_eq!(sort.compare(&a, &b), std::cmp::Ordering::Greater);
    }

    #[test]
    fn page_request_bounds() {
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, 101).is_err());
        assert_eq!(PageRequest::new(3, 20).unwrap().offset(), 40);
    }

    #[test]
    fn page_info_for_empty_set() {
        let info = PageInfo::compute(PageRequest::default(), 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next_page);
        assert!(!info.has_previous_page);
    }

    proptest! {
        #[test]
        fn total_pages_is_ceiling_of_count_over_limit(count in 0u64..10_000, limit in 1i64..=100) {
            let req = PageRequest::new(1, limit).unwrap();
            let info = PageInfo::compute(req, count);
            let expected = (count + limit as u64 - 1) / limit as u64;
            prop_assert_eq!(info.total_pages, expected);
        }

        #[test]
        fn next_and_previous_flags_follow_page_position(
            count in 0u64..2_000,
            limit in 1i64..=100,
            page in 1i64..50,
        ) {
            let req = PageRequest::new(page, limit).unwrap();
            let info = PageInfo::compute(req, count);
            prop_assert_eq!(info.has_next_page, (page as u64) < info.total_pages);
            prop_assert_eq!(info.has_previous_page, page > 1);
        }
    }
}
