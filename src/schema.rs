//! Flat record contract consumed by the persistence layer.
//!
//! This is the validation boundary: everything crossing it gets checked here,
//! and nothing inside the core checks anything.

use geometry::Point;
use name::Name;
use network::Network;
use node::{ComputerType, Properties};
use serde_json;

use std::error::Error;
use std::fmt;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ComputerRecord {
    pub name: String,
    pub computer_type: String,
    pub workload_threshold: u32,
    pub request_threshold: usize,
    pub process_coefficient: u32,
    pub position_x: f64,
    pub position_y: f64,
}

/// One undirected edge as a pair of indices into the computer array.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub first_index: usize,
    pub second_index: usize,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    pub computers: Vec<ComputerRecord>,
    pub connections: Vec<ConnectionRecord>,
}

#[derive(Clone, PartialEq, Debug)]
pub enum SchemaError {
    UnknownComputerType(String),
    /// Request thresholds must be positive, percentages at most 100.
    InvalidThreshold(String),
    /// A connection index outside the computer array, or a self-edge.
    BadConnection(usize, usize),
    Json(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SchemaError::UnknownComputerType(ref value) => {
                write!(f, "unknown computer type: {}", value)
            }
            SchemaError::InvalidThreshold(ref what) => write!(f, "invalid threshold: {}", what),
            SchemaError::BadConnection(first, second) => {
                write!(f, "bad connection: {} -- {}", first, second)
            }
            SchemaError::Json(ref message) => write!(f, "malformed network JSON: {}", message),
        }
    }
}

impl Error for SchemaError {
    fn description(&self) -> &str {
        "network schema error"
    }
}

/// Serialize the network into the flat record form. Each edge appears once,
/// lower index first.
pub fn snapshot(network: &Network) -> NetworkRecord {
    let names = network.names();

    let computers = names
        .iter()
        .map(|name| {
            let computer = &network.computers()[name];
            let properties = computer.properties();
            let position = computer.position();
            ComputerRecord {
                name: properties.name.clone(),
                computer_type: properties.computer_type.to_string(),
                workload_threshold: properties.workload_threshold,
                request_threshold: properties.request_threshold,
                process_coefficient: properties.process_coefficient,
                position_x: position.x,
                position_y: position.y,
            }
        })
        .collect();

    let index_of = |name: Name| names.iter().position(|n| *n == name);
    let mut connections = vec![];
    for (first_index, name) in names.iter().enumerate() {
        for neighbour in network.computers()[name].neighbours() {
            if let Some(second_index) = index_of(*neighbour) {
                if first_index < second_index {
                    connections.push(ConnectionRecord { first_index, second_index });
                }
            }
        }
    }

    NetworkRecord { computers, connections }
}

fn validate(record: &ComputerRecord) -> Result<ComputerType, SchemaError> {
    let computer_type = ComputerType::from_name(&record.computer_type)
        .ok_or_else(|| SchemaError::UnknownComputerType(record.computer_type.clone()))?;
    if record.request_threshold == 0 {
        return Err(SchemaError::InvalidThreshold("requestThreshold must be positive".to_string()));
    }
    if record.workload_threshold > 100 {
        return Err(SchemaError::InvalidThreshold("workloadThreshold above 100".to_string()));
    }
    if record.process_coefficient > 100 {
        return Err(SchemaError::InvalidThreshold("processCoefficient above 100".to_string()));
    }
    Ok(computer_type)
}

/// Rebuild a network from its record form, replaying every connection in both
/// directions.
pub fn restore(record: &NetworkRecord) -> Result<Network, SchemaError> {
    let mut network = Network::new();
    let mut names = Vec::with_capacity(record.computers.len());

    for computer_record in &record.computers {
        let computer_type = validate(computer_record)?;
        let position = Point::new(computer_record.position_x, computer_record.position_y);
        let name = network.add_computer(computer_type, position);
        let properties = Properties {
            name: computer_record.name.clone(),
            computer_type,
            workload_threshold: computer_record.workload_threshold,
            request_threshold: computer_record.request_threshold,
            process_coefficient: computer_record.process_coefficient,
        };
        network.get_mut(name).unwrap().set_properties(properties);
        names.push(name);
    }

    for connection in &record.connections {
        let first = connection.first_index;
        let second = connection.second_index;
        if first == second || first >= names.len() || second >= names.len() {
            return Err(SchemaError::BadConnection(first, second));
        }
        network.connect(names[first], names[second]);
    }

    Ok(network)
}

pub fn to_json(record: &NetworkRecord) -> String {
    serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
}

pub fn from_json(json: &str) -> Result<NetworkRecord, SchemaError> {
    serde_json::from_str(json).map_err(|error| SchemaError::Json(error.to_string()))
}
