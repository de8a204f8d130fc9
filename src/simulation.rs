use consistency::check_graph;
use event_schedule::EventSchedule;
use geometry::Point;
use network::Network;
use node::ComputerType;
use params::SimulationParams;
use random::{choose, random_range};
use random_events::RandomEvents;

/// Headless driver for a balancing run.
///
/// Each step applies the scheduled and random supervisor events, then runs
/// one tick over the whole network. Events never fire inside a tick.
pub struct Simulation {
    network: Network,
    params: SimulationParams,
    schedule: EventSchedule,
    random_events: RandomEvents,
}

impl Simulation {
    /// Start from a randomly seeded, fully connected network: every computer
    /// is wired to all the others, like computers added through an
    /// `AddComputer` event.
    pub fn new(params: SimulationParams) -> Self {
        let mut network = Network::new();
        for _ in 0..params.num_computers {
            let computer_type = *choose(&[
                ComputerType::Min,
                ComputerType::Max,
                ComputerType::MinMax,
            ]).unwrap();
            let position = Point::new(
                random_range(0, params.area_width as i64) as f64,
                random_range(0, params.area_height as i64) as f64,
            );
            let name = network.add_computer(computer_type, position);
            network.connect_to_all(name);
        }

        Self::with_network(network, params, EventSchedule::empty())
    }

    /// Start from a prepared network and a scripted event schedule.
    pub fn with_network(
        network: Network,
        params: SimulationParams,
        schedule: EventSchedule,
    ) -> Self {
        let random_events = RandomEvents::new(params.clone());
        Simulation {
            network,
            params,
            schedule,
            random_events,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Run the configured number of steps, then check the graph invariants.
    pub fn run(&mut self) -> Result<(), ()> {
        for step in 0..self.params.steps {
            for event in self.schedule.get_events(step) {
                event.apply(&mut self.network);
            }

            if step >= self.params.start_random_events_step {
                for event in self.random_events.get_events(&self.network) {
                    event.apply(&mut self.network);
                }
            }

            self.network.update_all();

            info!(
                "step {}: {} computers, {} processes, total workload {}",
                step,
                self.network.len(),
                self.network.total_processes(),
                self.network.total_workload()
            );
        }

        println!("-- final computer states --");
        for (name, computer) in self.network.computers() {
            println!(
                "Computer({}): {} [{}] workload {} with {} processes",
                name,
                computer.properties().name,
                computer.properties().computer_type,
                computer.workload(),
                computer.processes().len()
            );
        }

        check_graph(&self.network)
    }
}
