use geometry::Point;
use name::Name;
use network::Network;
use node::ComputerType;
use self::Event::*;

/// A supervisor action applied to the network between ticks.
///
/// Topology and population only ever change through these, never from inside
/// a tick, so no computer observes a half-applied edge.
#[derive(Clone, Debug)]
pub enum Event {
    /// Add a computer and connect it to the whole existing network.
    AddComputer(ComputerType, Point),
    RemoveComputer(Name),
    Connect(Name, Name),
    Disconnect(Name, Name),
}

impl Event {
    pub fn apply(&self, network: &mut Network) {
        match *self {
            AddComputer(computer_type, position) => {
                let name = network.add_computer(computer_type, position);
                network.connect_to_all(name);
                info!("event: added Computer({}) as {}", name, computer_type);
            }
            RemoveComputer(name) => {
                info!("event: removing Computer({})", name);
                network.remove_computer(name);
            }
            Connect(a, b) => {
                info!("event: connecting {} and {}", a, b);
                network.connect(a, b);
            }
            Disconnect(a, b) => {
                info!("event: disconnecting {} and {}", a, b);
                network.disconnect(a, b);
            }
        }
    }
}
