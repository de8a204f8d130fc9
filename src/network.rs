use geometry::Point;
use name::Name;
use node::{Computer, ComputerType};

use std::collections::BTreeMap;

/// The set of computers plus their neighbour edges.
///
/// Owns every computer behind a stable `Name` handle and is the only place
/// that mutates edges, so both directions of a connection always change
/// together. Balancing inside a tick reaches peers through the arena.
pub struct Network {
    computers: BTreeMap<Name, Computer>,
    next_name: u64,
}

impl Network {
    pub fn new() -> Self {
        Network {
            computers: BTreeMap::new(),
            next_name: 0,
        }
    }

    /// Create a computer of the given type at a position and return its
    /// handle.
    pub fn add_computer(&mut self, computer_type: ComputerType, position: Point) -> Name {
        let name = Name(self.next_name);
        self.next_name += 1;
        self.computers.insert(name, Computer::new(name, computer_type, position));
        debug!("Computer({}): created as {}", name, computer_type);
        name
    }

    /// Dispose of a computer: sever all of its edges symmetrically and drop
    /// it (processes included).
    pub fn remove_computer(&mut self, name: Name) {
        let computer = match self.computers.remove(&name) {
            Some(computer) => computer,
            None => return,
        };
        for neighbour in computer.neighbours() {
            if let Some(peer) = self.computers.get_mut(neighbour) {
                peer.disconnect_from(name);
            }
        }
        debug!("Computer({}): disposed", name);
    }

    /// Connect two computers, applying both directions of the edge.
    pub fn connect(&mut self, a: Name, b: Name) {
        if a == b || !self.computers.contains_key(&a) || !self.computers.contains_key(&b) {
            return;
        }
        if let Some(computer) = self.computers.get_mut(&a) {
            computer.connect_to(b);
        }
        if let Some(computer) = self.computers.get_mut(&b) {
            computer.connect_to(a);
        }
    }

    /// Sever both directions of an edge.
    pub fn disconnect(&mut self, a: Name, b: Name) {
        if let Some(computer) = self.computers.get_mut(&a) {
            computer.disconnect_from(b);
        }
        if let Some(computer) = self.computers.get_mut(&b) {
            computer.disconnect_from(a);
        }
    }

    pub fn is_connected(&self, a: Name, b: Name) -> bool {
        self.computers
            .get(&a)
            .map_or(false, |computer| computer.is_connected(b))
    }

    /// Connect the computer to every other computer in the network.
    pub fn connect_to_all(&mut self, name: Name) {
        let others: Vec<Name> = self.names().into_iter().filter(|n| *n != name).collect();
        for other in others {
            self.connect(name, other);
        }
    }

    pub fn get(&self, name: Name) -> Option<&Computer> {
        self.computers.get(&name)
    }

    pub fn get_mut(&mut self, name: Name) -> Option<&mut Computer> {
        self.computers.get_mut(&name)
    }

    pub fn names(&self) -> Vec<Name> {
        self.computers.keys().cloned().collect()
    }

    pub fn computers(&self) -> &BTreeMap<Name, Computer> {
        &self.computers
    }

    pub fn len(&self) -> usize {
        self.computers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.computers.is_empty()
    }

    pub fn total_workload(&self) -> i64 {
        self.computers.values().map(Computer::workload).sum()
    }

    pub fn total_processes(&self) -> usize {
        self.computers.values().map(|c| c.processes().len()).sum()
    }

    /// Run one tick over every computer, in ascending name order.
    ///
    /// Each computer is taken out of the arena while it updates so its
    /// balancing pass can mutate the peers it requests from. A computer never
    /// neighbours itself, so it can't miss itself in the peer map.
    pub fn update_all(&mut self) {
        let names = self.names();
        for name in names {
            let mut computer = match self.computers.remove(&name) {
                Some(computer) => computer,
                None => continue,
            };
            computer.update(&mut self.computers);
            self.computers.insert(name, computer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use node::Properties;
    use process::Process;

    fn steady_process(workload: i64) -> Process {
        Process::new(format!("server{}.exs", workload), 100, workload, 0)
    }

    fn quiet_properties(computer_type: ComputerType, workload_threshold: u32) -> Properties {
        Properties {
            computer_type,
            workload_threshold,
            process_coefficient: 0,
            ..Properties::default()
        }
    }

    fn add_quiet(
        network: &mut Network,
        computer_type: ComputerType,
        workload_threshold: u32,
        x: f64,
    ) -> Name {
        let name = network.add_computer(computer_type, Point::new(x, 0.0));
        let properties = quiet_properties(computer_type, workload_threshold);
        network.get_mut(name).unwrap().set_properties(properties);
        name
    }

    #[test]
    fn edges_are_symmetric() {
        let mut network = Network::new();
        let a = network.add_computer(ComputerType::Min, Point::new(0.0, 0.0));
        let b = network.add_computer(ComputerType::Max, Point::new(10.0, 0.0));

        network.connect(a, b);
        assert!(network.is_connected(a, b));
        assert!(network.is_connected(b, a));

        network.disconnect(b, a);
        assert!(!network.is_connected(a, b));
        assert!(!network.is_connected(b, a));
    }

    #[test]
    fn self_edges_are_rejected() {
        let mut network = Network::new();
        let a = network.add_computer(ComputerType::Min, Point::new(0.0, 0.0));
        network.connect(a, a);
        assert!(!network.is_connected(a, a));
        assert!(network.get(a).unwrap().neighbours().is_empty());
    }

    #[test]
    fn dispose_severs_all_edges() {
        let mut network = Network::new();
        let a = network.add_computer(ComputerType::Min, Point::new(0.0, 0.0));
        let b = network.add_computer(ComputerType::Max, Point::new(10.0, 0.0));
        let c = network.add_computer(ComputerType::MinMax, Point::new(20.0, 0.0));
        network.connect(a, b);
        network.connect(a, c);

        network.remove_computer(a);
        assert_eq!(network.len(), 2);
        assert!(network.get(b).unwrap().neighbours().is_empty());
        assert!(network.get(c).unwrap().neighbours().is_empty());
    }

    #[test]
    fn connect_to_all_builds_a_complete_neighbourhood() {
        let mut network = Network::new();
        let names: Vec<Name> = (0..4)
            .map(|i| network.add_computer(ComputerType::MinMax, Point::new(i as f64, 0.0)))
            .collect();
        for name in &names {
            network.connect_to_all(*name);
        }
        for a in &names {
            for b in &names {
                assert_eq!(network.is_connected(*a, *b), a != b);
            }
        }
    }

    #[test]
    fn names_are_never_reused() {
        let mut network = Network::new();
        let a = network.add_computer(ComputerType::Min, Point::new(0.0, 0.0));
        network.remove_computer(a);
        let b = network.add_computer(ComputerType::Min, Point::new(0.0, 0.0));
        assert!(b != a);
    }

    #[test]
    fn transfers_conserve_processes() {
        let mut network = Network::new();
        let min = add_quiet(&mut network, ComputerType::Min, 20, 0.0);
        let max = add_quiet(&mut network, ComputerType::Max, 20, 10.0);
        network.connect(min, max);

        network.get_mut(max).unwrap().inject_process(steady_process(70));
        network.get_mut(max).unwrap().inject_process(steady_process(15));
        network.get_mut(min).unwrap().inject_process(steady_process(5));

        for _ in 0..5 {
            network.update_all();
            assert_eq!(network.total_processes(), 3);
        }
    }

    #[test]
    fn end_to_end_min_pulls_from_saturated_max() {
        let mut network = Network::new();
        let min = add_quiet(&mut network, ComputerType::Min, 20, 0.0);
        let max = add_quiet(&mut network, ComputerType::Max, 20, 10.0);
        network.connect(min, max);

        network.get_mut(min).unwrap().inject_process(steady_process(5));
        network.get_mut(max).unwrap().inject_process(steady_process(75));
        network.get_mut(max).unwrap().inject_process(steady_process(15));

        network.update_all();

        // The min computer walked its deficit of 15 over to the max
        // computer and took the matching process.
        assert_eq!(network.get(min).unwrap().workload(), 20);
        assert_eq!(network.get(min).unwrap().processes().len(), 2);
        assert_eq!(network.get(max).unwrap().workload(), 75);
        assert_eq!(network.get(max).unwrap().processes().len(), 1);
    }
}
