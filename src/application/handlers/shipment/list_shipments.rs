//! ListShipmentsHandler - filtered, sorted, paginated listing.

use std::sync::Arc;

use crate::application::OperationError;
use crate::domain::foundation::{authorize, Action, Principal};
use crate::domain::shipment::{
    PageInfo, PageRequest, ShipmentFilter, ShipmentPage, ShipmentSort,
};
use crate::ports::ShipmentRepository;

/// Query for one page of shipments. Filter and sort are already validated.
#[derive(Debug, Clone, Default)]
pub struct ListShipmentsQuery {
    pub page: PageRequest,
    pub filter: ShipmentFilter,
    pub sort: ShipmentSort,
}

pub struct ListShipmentsHandler {
    shipments: Arc<dyn ShipmentRepository>,
}

impl ListShipmentsHandler {
    pub fn new(shipments: Arc<dyn ShipmentRepository>) -> Self {
        Self { shipments }
    }

    /// Any signed-in user may list; there is no role gate.
    pub async fn handle(
        &self,
        principal: Option<&Principal>,
        query: ListShipmentsQuery,
    ) -> Result<ShipmentPage, OperationError> {
        authorize(principal, &Action::ReadShipments)?;

        let filter = query.filter.normalized();
        let total_count = self.shipments.count(&filter).await?;
        let page_info = PageInfo::compute(query.page, total_count);

        let shipments = if query.page.offset() >= total_count {
            Vec::new()
        } else {
            self.shipments.list(&filter, &query.sort, &query.page).await?
        };

        Ok(ShipmentPage {
            shipments,
            total_count,
            page_info,
        })
    }
}
