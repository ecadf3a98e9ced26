//! Seed data.
//!
//! JSON-shaped construction input for a board: tours with their
//! operations, plus pool templates. Field names follow the camelCase wire
//! shape the planning front end exchanges.
//!
//! ```
//! use u_tourboard::seed::BoardSeed;
//!
//! let seed: BoardSeed = serde_json::from_str(r#"{
//!     "tours": [{
//!         "tourId": 1,
//!         "beginDateTime": "2024-04-19T00:00:00",
//!         "endDateTime": "2024-04-19T23:59:59",
//!         "tourOperations": [{
//!             "tourOperationId": 1,
//!             "operationType": "LOCAL",
//!             "operationBeginDate": "2024-04-19T08:00:00",
//!             "operationEndDate": "2024-04-19T12:00:00",
//!             "carrierType": "4t"
//!         }]
//!     }],
//!     "templates": [{ "templateId": 100, "operationType": "REST" }]
//! }"#).unwrap();
//! assert_eq!(seed.tours[0].tour_operations.len(), 1);
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{CarrierType, Location, OperationKind, ServiceType, WorkDetail};

/// Operation type on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    /// Local work.
    Local,
    /// Main line work.
    MainLine,
    /// Rest.
    Rest,
}

/// One operation inside a tour seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSeed {
    /// Operation id.
    pub tour_operation_id: u64,
    /// Work or rest.
    pub operation_type: OperationType,
    /// Linked transport operation (work only).
    #[serde(default)]
    pub transport_operation: Option<u64>,
    /// Start instant.
    pub operation_begin_date: NaiveDateTime,
    /// End instant.
    pub operation_end_date: NaiveDateTime,
    /// Start location.
    #[serde(default)]
    pub start_location: Option<Location>,
    /// Goal location.
    #[serde(default)]
    pub goal_location: Option<Location>,
    /// Vehicle class (work only).
    #[serde(default)]
    pub carrier_type: Option<CarrierType>,
}

/// One tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSeed {
    /// Tour id.
    pub tour_id: u64,
    /// Window start; origin of the tour's timeline.
    pub begin_date_time: NaiveDateTime,
    /// Window end.
    pub end_date_time: NaiveDateTime,
    /// Operations in list order.
    #[serde(default)]
    pub tour_operations: Vec<OperationSeed>,
}

/// One pool template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSeed {
    /// Template id.
    pub template_id: u64,
    /// Kind of operation the template materializes into.
    pub operation_type: OperationType,
}

/// Full board seed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSeed {
    /// Tours in board order.
    pub tours: Vec<TourSeed>,
    /// Pool templates.
    #[serde(default)]
    pub templates: Vec<TemplateSeed>,
}

impl OperationType {
    /// Domain kind, with optional work details.
    pub fn to_kind(
        self,
        carrier_type: Option<CarrierType>,
        transport_operation: Option<u64>,
    ) -> OperationKind {
        let service = match self {
            OperationType::Local => ServiceType::Local,
            OperationType::MainLine => ServiceType::MainLine,
            OperationType::Rest => return OperationKind::Rest,
        };
        OperationKind::Work(WorkDetail {
            service,
            carrier_type,
            transport_operation,
        })
    }
}

impl OperationSeed {
    /// Domain kind of this operation.
    pub fn kind(&self) -> OperationKind {
        self.operation_type
            .to_kind(self.carrier_type, self.transport_operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_seed_kinds() {
        let json = r#"{
            "tourOperationId": 7,
            "operationType": "MAIN_LINE",
            "transportOperation": 31,
            "operationBeginDate": "2024-04-20T09:00:00",
            "operationEndDate": "2024-04-20T13:00:00",
            "startLocation": { "name": "Tokyo" },
            "carrierType": "10t"
        }"#;
        let seed: OperationSeed = serde_json::from_str(json).unwrap();
        assert_eq!(
            seed.kind(),
            OperationKind::Work(WorkDetail {
                service: ServiceType::MainLine,
                carrier_type: Some(CarrierType::TenTon),
                transport_operation: Some(31),
            })
        );
        assert_eq!(seed.start_location.unwrap().name, "Tokyo");
        assert!(seed.goal_location.is_none());
    }

    #[test]
    fn test_rest_ignores_work_details() {
        assert_eq!(
            OperationType::Rest.to_kind(Some(CarrierType::FourTon), Some(3)),
            OperationKind::Rest
        );
    }

    #[test]
    fn test_unknown_operation_type_rejected() {
        let json = r#"{
            "tourOperationId": 1,
            "operationType": "DRIVE",
            "operationBeginDate": "2024-04-19T08:00:00",
            "operationEndDate": "2024-04-19T12:00:00"
        }"#;
        assert!(serde_json::from_str::<OperationSeed>(json).is_err());
    }
}
