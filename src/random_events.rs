use event::Event;
use geometry::Point;
use itertools::Itertools;
use name::Name;
use network::Network;
use node::ComputerType;
use params::SimulationParams;
use random::{choose, do_with_probability, random_range, sample_single};

/// Draws random supervisor events from the per-step probabilities.
pub struct RandomEvents {
    params: SimulationParams,
}

impl RandomEvents {
    pub fn new(params: SimulationParams) -> Self {
        RandomEvents { params }
    }

    pub fn get_events(&self, network: &Network) -> Vec<Event> {
        let mut events = vec![];

        if do_with_probability(self.params.prob_add) {
            events.push(self.random_add());
        }

        if do_with_probability(self.params.prob_remove) {
            if let Some(event) = random_remove(network) {
                events.push(event);
            }
        }

        if do_with_probability(self.params.prob_connect) {
            if let Some(event) = random_pair(network, false).map(|(a, b)| Event::Connect(a, b)) {
                events.push(event);
            }
        }

        if do_with_probability(self.params.prob_disconnect) {
            if let Some(event) = random_pair(network, true).map(|(a, b)| Event::Disconnect(a, b)) {
                events.push(event);
            }
        }

        events
    }

    fn random_add(&self) -> Event {
        let computer_type = *choose(&[
            ComputerType::Min,
            ComputerType::Max,
            ComputerType::MinMax,
        ]).unwrap();
        let position = Point::new(
            random_range(0, self.params.area_width as i64) as f64,
            random_range(0, self.params.area_height as i64) as f64,
        );
        Event::AddComputer(computer_type, position)
    }
}

fn random_remove(network: &Network) -> Option<Event> {
    sample_single(network.names()).map(Event::RemoveComputer)
}

/// Pick a random pair of computers, either currently connected or currently
/// unconnected.
fn random_pair(network: &Network, connected: bool) -> Option<(Name, Name)> {
    let pairs = network
        .names()
        .into_iter()
        .tuple_combinations()
        .filter(|&(a, b)| network.is_connected(a, b) == connected);
    sample_single(pairs)
}
