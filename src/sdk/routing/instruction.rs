use serde::{Deserialize, Serialize};

use super::error::RoutingError;
use super::feature::{EdgeProperties, PointRoles};
use super::geometry::LatLng;
use super::turn::{classify, TurnType};

pub const FINISH_TEXT: &str = "Finish!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionType {
    Straight,
    SlightRight,
    Right,
    SharpRight,
    TurnAround,
    SlightLeft,
    Left,
    SharpLeft,
    DestinationReached,
}

impl From<TurnType> for InstructionType {
    fn from(turn: TurnType) -> Self {
        match turn {
            TurnType::Straight => InstructionType::Straight,
            TurnType::SlightRight => InstructionType::SlightRight,
            TurnType::Right => InstructionType::Right,
            TurnType::SharpRight => InstructionType::SharpRight,
            TurnType::TurnAround => InstructionType::TurnAround,
            TurnType::SlightLeft => InstructionType::SlightLeft,
            TurnType::Left => InstructionType::Left,
            TurnType::SharpLeft => InstructionType::SharpLeft,
        }
    }
}

/// One turn-by-turn step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(rename = "type")]
    pub instruction_type: InstructionType,
    pub text: String,
    pub distance: f64,
    /// Seconds.
    pub time: f64,
    /// Index into the route coordinates where the step applies.
    pub index: usize,
}

/// Instructions contributed by one edge.
///
/// `route_before` is the route geometry accumulated before this edge and
/// `edge_geometry` the edge's own points. An edge starting at a waypoint is
/// the start of the route and gets a plain `Straight` step at index 0; any
/// other edge is classified against the approach of the previous one. An
/// edge ending at the destination also gets a `DestinationReached` step.
pub fn instructions_for(
    properties: &EdgeProperties,
    roles: PointRoles,
    route_before: &[LatLng],
    edge_geometry: &[LatLng],
) -> Result<Vec<Instruction>, RoutingError> {
    if edge_geometry.is_empty() {
        return Err(RoutingError::DegenerateGeometry {
            index: route_before.len(),
        });
    }
    let text = properties.name.clone().unwrap_or_default();

    let (instruction_type, index) = if roles.is_origin {
        (InstructionType::Straight, 0)
    } else {
        let index = route_before.len();
        let turn = match (
            route_before.len().checked_sub(2).map(|i| &route_before[i..]),
            edge_geometry.get(1),
        ) {
            (Some([p1, p2]), Some(p3)) => classify(p1, p2, p3, index)?,
            _ => return Err(RoutingError::DegenerateGeometry { index }),
        };
        (turn.into(), index)
    };

    let mut instructions = vec![Instruction {
        instruction_type,
        text,
        distance: properties.distance,
        time: properties.time_seconds(),
        index,
    }];

    if roles.is_destination {
        instructions.push(Instruction {
            instruction_type: InstructionType::DestinationReached,
            text: FINISH_TEXT.to_string(),
            distance: 0.0,
            time: 0.0,
            index: route_before.len() + edge_geometry.len() - 1,
        });
    }

    Ok(instructions)
}
