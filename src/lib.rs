extern crate rand;
extern crate itertools;
#[macro_use]
extern crate maplit;
#[macro_use]
extern crate log;
extern crate env_logger;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

pub mod consistency;
pub mod event;
pub mod event_schedule;
pub mod generator;
pub mod geometry;
pub mod logging;
pub mod name;
pub mod network;
pub mod node;
pub mod params;
pub mod process;
pub mod random;
pub mod random_events;
pub mod schema;
pub mod simulation;
