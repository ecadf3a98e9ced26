//! Operation model.
//!
//! An operation is a time-bounded block of work or rest sitting on exactly
//! one tour. It does not own its tour; the store records the owner and
//! moves it atomically on reassignment.
//!
//! # Kinds
//!
//! | Kind | Meaning |
//! |------|---------|
//! | `Work(Local)` | Local delivery leg |
//! | `Work(MainLine)` | Trunk line leg |
//! | `Rest` | Driver rest block |

use serde::{Deserialize, Serialize};

use super::{OperationId, TimeInterval, TourId};

/// An operation placed on a tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation identifier.
    pub id: OperationId,
    /// Scheduled window.
    pub interval: TimeInterval,
    /// Work or rest.
    pub kind: OperationKind,
    /// Owning tour. Maintained by the store; do not edit directly.
    pub tour: TourId,
    /// Where the leg starts.
    pub start_location: Option<Location>,
    /// Where the leg ends.
    pub goal_location: Option<Location>,
}

/// Discriminates work blocks from rest blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    /// Transport work.
    Work(WorkDetail),
    /// Rest break.
    Rest,
}

/// Details of a work operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDetail {
    /// Service class.
    pub service: ServiceType,
    /// Vehicle class, when known.
    pub carrier_type: Option<CarrierType>,
    /// Linked transport operation number.
    pub transport_operation: Option<u64>,
}

/// Work service class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    /// Local (short-haul) operation.
    Local,
    /// Main line (trunk) operation.
    MainLine,
}

/// Vehicle class used for a work operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarrierType {
    /// 4-tonne truck.
    #[serde(rename = "4t")]
    FourTon,
    /// 10-tonne truck.
    #[serde(rename = "10t")]
    TenTon,
}

/// A named place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Display name.
    pub name: String,
}

/// Operation fields before the store assigns an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDraft {
    /// Identity to insert under.
    pub id: OperationId,
    /// Scheduled window.
    pub interval: TimeInterval,
    /// Work or rest.
    pub kind: OperationKind,
    /// Where the leg starts.
    pub start_location: Option<Location>,
    /// Where the leg ends.
    pub goal_location: Option<Location>,
}

impl OperationKind {
    /// Local work with a carrier type.
    pub fn local(carrier_type: CarrierType) -> Self {
        OperationKind::Work(WorkDetail {
            service: ServiceType::Local,
            carrier_type: Some(carrier_type),
            transport_operation: None,
        })
    }

    /// Main line work with a carrier type.
    pub fn main_line(carrier_type: CarrierType) -> Self {
        OperationKind::Work(WorkDetail {
            service: ServiceType::MainLine,
            carrier_type: Some(carrier_type),
            transport_operation: None,
        })
    }

    /// Whether this is a rest block.
    pub fn is_rest(&self) -> bool {
        matches!(self, OperationKind::Rest)
    }

    /// Carrier type of a work operation.
    pub fn carrier_type(&self) -> Option<CarrierType> {
        match self {
            OperationKind::Work(detail) => detail.carrier_type,
            OperationKind::Rest => None,
        }
    }
}

impl OperationDraft {
    /// Creates a draft with no locations.
    pub fn new(id: impl Into<OperationId>, interval: TimeInterval, kind: OperationKind) -> Self {
        Self {
            id: id.into(),
            interval,
            kind,
            start_location: None,
            goal_location: None,
        }
    }

    /// Sets the start location.
    pub fn with_start_location(mut self, name: impl Into<String>) -> Self {
        self.start_location = Some(Location { name: name.into() });
        self
    }

    /// Sets the goal location.
    pub fn with_goal_location(mut self, name: impl Into<String>) -> Self {
        self.goal_location = Some(Location { name: name.into() });
        self
    }

    pub(crate) fn into_operation(self, tour: TourId) -> Operation {
        Operation {
            id: self.id,
            interval: self.interval,
            kind: self.kind,
            tour,
            start_location: self.start_location,
            goal_location: self.goal_location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn interval() -> TimeInterval {
        let day = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap();
        TimeInterval::new(
            day.and_hms_opt(8, 0, 0).unwrap(),
            day.and_hms_opt(12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_kind_helpers() {
        let k = OperationKind::local(CarrierType::FourTon);
        assert!(!k.is_rest());
        assert_eq!(k.carrier_type(), Some(CarrierType::FourTon));
        assert_eq!(OperationKind::Rest.carrier_type(), None);
        assert!(OperationKind::Rest.is_rest());
    }

    #[test]
    fn test_draft_into_operation() {
        let op = OperationDraft::new(1, interval(), OperationKind::main_line(CarrierType::TenTon))
            .with_start_location("Depot")
            .with_goal_location("Hub")
            .into_operation(TourId(4));
        assert_eq!(op.id, OperationId(1));
        assert_eq!(op.tour, TourId(4));
        assert_eq!(op.start_location.unwrap().name, "Depot");
        assert_eq!(op.goal_location.unwrap().name, "Hub");
    }

    #[test]
    fn test_carrier_serde_names() {
        assert_eq!(serde_json::to_string(&CarrierType::FourTon).unwrap(), "\"4t\"");
        assert_eq!(
            serde_json::from_str::<CarrierType>("\"10t\"").unwrap(),
            CarrierType::TenTon
        );
        assert_eq!(
            serde_json::to_string(&ServiceType::MainLine).unwrap(),
            "\"MAIN_LINE\""
        );
    }
}
